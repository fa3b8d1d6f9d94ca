//! Bench application state and logic.

use crate::{Circuit, Trit};
use crate::layout::unwired_ports;
use std::collections::BTreeMap;

/// Bench application state.
pub struct BenchApp {
    /// The circuit being simulated.
    pub circuit: Circuit,
    /// Circuit as loaded, for reset.
    initial: Circuit,
    /// Index of the selected component (insertion order).
    pub selected: usize,
    /// Is the bench stepping continuously?
    pub running: bool,
    /// Should we quit?
    pub should_quit: bool,
    /// Status message to display.
    pub status: String,
    /// Unwired ports per component, computed once on load.
    pub unwired: BTreeMap<String, Vec<String>>,
}

impl BenchApp {
    /// Create a bench around a loaded circuit.
    pub fn new(circuit: Circuit) -> Self {
        let unwired = unwired_ports(&circuit);
        Self {
            initial: circuit.clone(),
            circuit,
            selected: 0,
            running: false,
            should_quit: false,
            status: "Ready. Press 's' to step, 'r' to run, 'q' to quit.".into(),
            unwired,
        }
    }

    /// Id of the selected component, if the circuit has any.
    pub fn selected_id(&self) -> Option<String> {
        self.circuit
            .components()
            .nth(self.selected)
            .map(|c| c.id().to_string())
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.circuit.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Step the circuit once.
    pub fn step(&mut self) {
        match self.circuit.step() {
            Ok(()) => {
                self.status = format!("Step {}: {}", self.circuit.steps(), self.probe_summary());
            }
            Err(e) => {
                self.status = format!("Error: {}", e);
                self.running = false;
            }
        }
    }

    /// Start or stop continuous stepping.
    pub fn toggle_running(&mut self) {
        self.running = !self.running;
        self.status = if self.running { "Running...".into() } else { "Paused.".into() };
    }

    /// Run one iteration of continuous stepping.
    pub fn tick(&mut self) {
        if self.running {
            self.step();
        }
    }

    /// Toggle the selected switch.
    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else { return };
        self.status = match self.circuit.toggle_switch(&id) {
            Ok(v) => format!("{} → {}", id, v),
            Err(e) => format!("Error: {}", e),
        };
    }

    /// Set the selected switch to a value.
    pub fn set_selected(&mut self, value: i64) {
        let Some(id) = self.selected_id() else { return };
        self.status = match self.circuit.set_switch_value(&id, value) {
            Ok(v) => format!("{} = {}", id, v),
            Err(e) => format!("Error: {}", e),
        };
    }

    /// Restore the circuit as loaded.
    pub fn reset(&mut self) {
        self.circuit = self.initial.clone();
        self.running = false;
        self.status = "Reset. Ready.".into();
    }

    /// Probe readings as `id=value` pairs.
    pub fn probe_summary(&self) -> String {
        let probes = self.circuit.probes();
        if probes.is_empty() {
            return "no probes".into();
        }
        probes
            .iter()
            .map(|(id, v)| format!("{}={}", id, v))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Port values of every component, for display.
    pub fn component_rows(&self) -> Vec<(String, String, Vec<(&'static str, Trit)>)> {
        self.circuit
            .components()
            .map(|c| {
                let ports = c.ports().iter().map(|p| (p.name, p.value)).collect();
                (c.id().to_string(), c.component_type().to_string(), ports)
            })
            .collect()
    }
}

/// Run the bench on a circuit.
pub fn run_bench(circuit: Circuit) -> std::io::Result<()> {
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    };
    use ratatui::prelude::*;
    use std::io::stdout;
    use std::time::Duration;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = BenchApp::new(circuit);

    loop {
        terminal.draw(|frame| {
            super::ui::draw(frame, &app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => app.should_quit = true,
                        KeyCode::Char('s') => {
                            app.running = false;
                            app.step();
                        }
                        KeyCode::Char('r') => app.toggle_running(),
                        KeyCode::Char('t') => app.toggle_selected(),
                        KeyCode::Char('-') => app.set_selected(-1),
                        KeyCode::Char('0') => app.set_selected(0),
                        KeyCode::Char('+') => app.set_selected(1),
                        KeyCode::Char('x') => app.reset(),
                        KeyCode::Up => app.select_prev(),
                        KeyCode::Down => app.select_next(),
                        _ => {}
                    }
                }
            }
        }

        app.tick();

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
}
