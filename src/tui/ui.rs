//! UI rendering for the bench.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, List, ListItem},
    style::{Color, Style, Modifier},
};
use crate::Trit;
use super::app::BenchApp;

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &BenchApp) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60),
            Constraint::Percentage(40),
        ])
        .split(frame.area());

    // Left side: components and status
    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(chunks[0]);

    draw_components(frame, left_chunks[0], app);
    draw_status(frame, left_chunks[1], app);

    // Right side: probes, wires, audit, help
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(6),
            Constraint::Length(6),
            Constraint::Length(5),
        ])
        .split(chunks[1]);

    draw_probes(frame, right_chunks[0], app);
    draw_wires(frame, right_chunks[1], app);
    draw_audit(frame, right_chunks[2], app);
    draw_help(frame, right_chunks[3]);
}

/// Draw every component with its port values.
fn draw_components(frame: &mut Frame, area: Rect, app: &BenchApp) {
    let items: Vec<ListItem> = app
        .component_rows()
        .into_iter()
        .enumerate()
        .map(|(i, (id, kind, ports))| {
            let is_selected = i == app.selected;
            let prefix = if is_selected { "▶ " } else { "  " };

            let mut spans = vec![Span::styled(
                format!("{}{:<10} {:<13}", prefix, id, kind),
                if is_selected {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                },
            )];
            for (name, value) in ports {
                spans.push(Span::raw(format!(" {}=", name)));
                spans.push(Span::styled(format!("{}", value), trit_style(value)));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default()
            .title(format!(" Components (step {}) ", app.circuit.steps()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)));

    frame.render_widget(list, area);
}

/// Draw probe readings.
fn draw_probes(frame: &mut Frame, area: Rect, app: &BenchApp) {
    let content: Vec<Line> = app
        .circuit
        .probes()
        .into_iter()
        .map(|(id, value)| {
            Line::from(vec![
                Span::raw(format!("{}: ", id)),
                Span::styled(format!("{}", value), trit_style(value)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(content)
        .block(Block::default()
            .title(" Probes ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)));

    frame.render_widget(paragraph, area);
}

/// Draw the wire list.
fn draw_wires(frame: &mut Frame, area: Rect, app: &BenchApp) {
    let items: Vec<ListItem> = app
        .circuit
        .wires()
        .iter()
        .map(|w| ListItem::new(format!("{}", w)))
        .collect();

    let list = List::new(items)
        .block(Block::default()
            .title(" Wires ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)));

    frame.render_widget(list, area);
}

/// Draw unwired ports.
fn draw_audit(frame: &mut Frame, area: Rect, app: &BenchApp) {
    let content: Vec<Line> = if app.unwired.is_empty() {
        vec![Line::from("all ports wired")]
    } else {
        app.unwired
            .iter()
            .map(|(id, ports)| Line::from(format!("{}: {}", id, ports.join(", "))))
            .collect()
    };

    let paragraph = Paragraph::new(content)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default()
            .title(" Unwired ")
            .borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

/// Draw status bar.
fn draw_status(frame: &mut Frame, area: Rect, app: &BenchApp) {
    let status = Paragraph::new(app.status.clone())
        .style(Style::default().fg(Color::White))
        .block(Block::default()
            .title(" Status ")
            .borders(Borders::ALL));

    frame.render_widget(status, area);
}

/// Draw help panel.
fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(vec![
        Line::from("s: Step  r: Run/Pause  t: Toggle switch"),
        Line::from("-/0/+: Set switch  x: Reset  ↑↓: Select  q: Quit"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default()
        .title(" Help ")
        .borders(Borders::ALL));

    frame.render_widget(help, area);
}

/// Get color style for a trit.
fn trit_style(t: Trit) -> Style {
    match t {
        Trit::N => Style::default().fg(Color::Red),
        Trit::O => Style::default().fg(Color::Gray),
        Trit::P => Style::default().fg(Color::Green),
    }
}
