//! Derived views for drawing and auditing a circuit.
//!
//! Everything here is computed from the wire list and port directions and
//! is only meant for presentation. Nothing in this module feeds back into
//! simulation; [`Circuit::step`](crate::Circuit::step) never consults it.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use crate::circuit::{Circuit, Direction};

/// Arrange components into columns by signal depth.
///
/// Uses Kahn's algorithm over the distinct component-to-component edges.
/// Components that sit on a cycle never reach in-degree zero; each of them
/// gets its own column after the deepest one. Ids are sorted within a column.
pub fn levels(circuit: &Circuit) -> BTreeMap<usize, Vec<String>> {
    let ids: Vec<&str> = circuit.components().map(|c| c.id()).collect();

    let mut out_edges: HashMap<&str, BTreeSet<&str>> = ids.iter().map(|&id| (id, BTreeSet::new())).collect();
    let mut in_degree: HashMap<&str, usize> = ids.iter().map(|&id| (id, 0)).collect();
    for wire in circuit.wires() {
        let (src, dst) = (wire.from.component.as_str(), wire.to.component.as_str());
        if !in_degree.contains_key(dst) {
            continue;
        }
        if let Some(targets) = out_edges.get_mut(src) {
            if targets.insert(dst) {
                *in_degree.entry(dst).or_default() += 1;
            }
        }
    }

    let mut queue: VecDeque<&str> = ids.iter().copied().filter(|id| in_degree[id] == 0).collect();
    let mut level: HashMap<&str, usize> = queue.iter().map(|&id| (id, 0)).collect();
    while let Some(u) = queue.pop_front() {
        let next = level[u] + 1;
        for &v in &out_edges[u] {
            let d = in_degree.entry(v).or_default();
            *d -= 1;
            if *d == 0 {
                let lv = level.get(v).copied().unwrap_or(0).max(next);
                level.insert(v, lv);
                queue.push_back(v);
            }
        }
    }

    let mut max_level = level.values().copied().max().unwrap_or(0);
    for &id in &ids {
        if !level.contains_key(id) {
            max_level += 1;
            level.insert(id, max_level);
        }
    }

    let mut columns: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for (id, lv) in level {
        columns.entry(lv).or_default().push(id.to_string());
    }
    for column in columns.values_mut() {
        column.sort();
    }
    columns
}

/// List the ports nothing is wired to, per component.
///
/// Inputs without a driver appear as `in:<port>`, outputs without a reader
/// as `out:<port>`. Fully wired components are left out.
pub fn unwired_ports(circuit: &Circuit) -> BTreeMap<String, Vec<String>> {
    let driven: HashSet<(&str, &str)> = circuit
        .wires()
        .iter()
        .map(|w| (w.to.component.as_str(), w.to.port.as_str()))
        .collect();
    let used: HashSet<(&str, &str)> = circuit
        .wires()
        .iter()
        .map(|w| (w.from.component.as_str(), w.from.port.as_str()))
        .collect();

    let mut issues = BTreeMap::new();
    for component in circuit.components() {
        let id = component.id();
        let missing: Vec<String> = component
            .ports()
            .iter()
            .filter_map(|p| match p.direction {
                Direction::Input if !driven.contains(&(id, p.name)) => Some(format!("in:{}", p.name)),
                Direction::Output if !used.contains(&(id, p.name)) => Some(format!("out:{}", p.name)),
                _ => None,
            })
            .collect();
        if !missing.is_empty() {
            issues.insert(id.to_string(), missing);
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Component, ComponentType};

    fn chain() -> Circuit {
        let mut c = Circuit::new();
        for (id, ty) in [
            ("p", ComponentType::Probe),
            ("n2", ComponentType::Tnot),
            ("n1", ComponentType::Tnot),
            ("sw", ComponentType::SwitchTernary),
        ] {
            c.add_component(Component::new(id, ty)).unwrap();
        }
        c.connect("sw", "out", "n1", "in").unwrap();
        c.connect("sw", "out", "n1", "in").unwrap();
        c.connect("n1", "out", "n2", "in").unwrap();
        c.connect("n2", "out", "p", "in").unwrap();
        c
    }

    #[test]
    fn test_levels_follow_signal_depth() {
        let levels = levels(&chain());
        assert_eq!(levels[&0], vec!["sw"]);
        assert_eq!(levels[&1], vec!["n1"]);
        assert_eq!(levels[&2], vec!["n2"]);
        assert_eq!(levels[&3], vec!["p"]);
    }

    #[test]
    fn test_cycle_members_get_trailing_levels() {
        let mut c = Circuit::new();
        for id in ["a", "b"] {
            c.add_component(Component::new(id, ComponentType::Tnot)).unwrap();
        }
        c.add_component(Component::new("sw", ComponentType::SwitchBinary)).unwrap();
        c.connect("a", "out", "b", "in").unwrap();
        c.connect("b", "out", "a", "in").unwrap();

        let levels = levels(&c);
        assert_eq!(levels[&0], vec!["sw"]);
        assert_eq!(levels[&1], vec!["a"]);
        assert_eq!(levels[&2], vec!["b"]);
    }

    #[test]
    fn test_levels_do_not_touch_simulation() {
        let mut c = chain();
        c.set_switch_value("sw", 1).unwrap();
        let before: Vec<_> = c.components().cloned().collect();
        let _ = levels(&c);
        let _ = unwired_ports(&c);
        let after: Vec<_> = c.components().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_unwired_audit() {
        let mut c = chain();
        c.add_component(Component::new("fa", ComponentType::TFullAdder)).unwrap();
        c.connect("sw", "out", "fa", "bi").unwrap();

        let issues = unwired_ports(&c);
        assert!(!issues.contains_key("sw"));
        assert!(!issues.contains_key("n1"));
        assert!(!issues.contains_key("p"));
        assert_eq!(issues["fa"], vec!["in:ai", "in:ci", "out:so", "out:co"]);
    }
}
