//! JSON circuit descriptions.
//!
//! A description is a named list of components (id, type, parameters) and
//! a list of wires (pairs of `{componentId, port}` endpoints):
//!
//! ```json
//! {
//!   "name": "Exported",
//!   "version": 1,
//!   "components": [
//!     { "id": "sw1", "type": "SwitchTernary", "params": { "value": 1 } },
//!     { "id": "p1", "type": "Probe", "params": {}, "position": { "x": 100, "y": 80 } }
//!   ],
//!   "wires": [
//!     { "from": { "componentId": "sw1", "port": "out" },
//!       "to":   { "componentId": "p1",  "port": "in" } }
//!   ]
//! }
//! ```
//!
//! Positions belong to whoever draws the circuit; the engine ignores them.

use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::circuit::{Circuit, CircuitError, Component, ComponentType, Wire};

/// Name written into exported descriptions.
pub const EXPORT_NAME: &str = "Exported";

/// Format version written into exported descriptions.
pub const FORMAT_VERSION: u32 = 1;

/// A complete circuit description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitDescription {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub components: Vec<ComponentDescription>,
    #[serde(default)]
    pub wires: Vec<Wire>,
}

/// One described component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDescription {
    pub id: String,
    /// Type name, resolved against the closed set of component types.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub params: ComponentParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Construction parameters. Only switches take one today.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

/// Canvas position, kept for round-tripping only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl CircuitDescription {
    /// Describe a circuit, capturing each switch's current value.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        let components = circuit
            .components()
            .map(|c| ComponentDescription {
                id: c.id().to_string(),
                kind: c.component_type().name().to_string(),
                params: ComponentParams {
                    value: c.switch_value().map(|v| v.to_i8() as i64),
                },
                position: None,
            })
            .collect();

        Self {
            name: EXPORT_NAME.to_string(),
            version: FORMAT_VERSION,
            components,
            wires: circuit.wires().to_vec(),
        }
    }

    /// Build the described circuit.
    ///
    /// Every type name is resolved before anything is constructed, so an
    /// unknown type never yields a partial circuit.
    pub fn to_circuit(&self) -> Result<Circuit, CircuitError> {
        let kinds = self
            .components
            .iter()
            .map(|c| c.kind.parse::<ComponentType>())
            .collect::<Result<Vec<_>, _>>()?;

        let mut circuit = Circuit::new();
        for (desc, ty) in self.components.iter().zip(kinds) {
            circuit.add_component(Component::with_value(desc.id.as_str(), ty, desc.params.value))?;
        }
        for wire in &self.wires {
            circuit.connect(&wire.from.component, &wire.from.port, &wire.to.component, &wire.to.port)?;
        }

        tracing::debug!(
            name = %self.name,
            components = circuit.len(),
            wires = circuit.wires().len(),
            "loaded circuit description"
        );
        Ok(circuit)
    }
}

/// Parse a JSON description into a circuit.
pub fn load_circuit_from_json(text: &str) -> Result<Circuit, DescriptionError> {
    let description: CircuitDescription = serde_json::from_str(text)?;
    Ok(description.to_circuit()?)
}

/// Serialize a circuit as a pretty-printed JSON description.
pub fn dump_circuit_to_json(circuit: &Circuit) -> Result<String, DescriptionError> {
    Ok(serde_json::to_string_pretty(&CircuitDescription::from_circuit(circuit))?)
}

/// Load a circuit from a JSON file on disk.
pub fn load_circuit<P: AsRef<Path>>(path: P) -> Result<Circuit, DescriptionError> {
    let text = std::fs::read_to_string(path.as_ref())
        .map_err(|e| DescriptionError::Io(e.to_string()))?;
    load_circuit_from_json(&text)
}

/// Save a circuit to a JSON file on disk.
pub fn save_circuit<P: AsRef<Path>>(path: P, circuit: &Circuit) -> Result<(), DescriptionError> {
    let mut text = dump_circuit_to_json(circuit)?;
    text.push('\n');
    std::fs::write(path.as_ref(), text).map_err(|e| DescriptionError::Io(e.to_string()))
}

/// Errors that can occur while reading or writing descriptions.
#[derive(Debug, Error)]
pub enum DescriptionError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("invalid circuit description: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Circuit(#[from] CircuitError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ternary::Trit;

    const REFERENCE: &str = r#"{
        "name": "reference",
        "version": 1,
        "components": [
            { "id": "sw1", "type": "SwitchTernary", "params": { "value": 1 } },
            { "id": "sw2", "type": "SwitchTernary", "params": { "value": -1 } },
            { "id": "and1", "type": "TAND", "position": { "x": 300, "y": 100 } },
            { "id": "nor1", "type": "TNOR" },
            { "id": "t1", "type": "Transistor" },
            { "id": "l1", "type": "TLatch" },
            { "id": "p1", "type": "Probe" }
        ],
        "wires": [
            { "from": { "componentId": "sw1", "port": "out" }, "to": { "componentId": "and1", "port": "in1" } },
            { "from": { "componentId": "sw2", "port": "out" }, "to": { "componentId": "and1", "port": "in2" } },
            { "from": { "componentId": "and1", "port": "out" }, "to": { "componentId": "t1", "port": "presence" } },
            { "from": { "componentId": "sw1", "port": "out" }, "to": { "componentId": "t1", "port": "sign" } },
            { "from": { "componentId": "t1", "port": "out" }, "to": { "componentId": "nor1", "port": "in1" } },
            { "from": { "componentId": "sw2", "port": "out" }, "to": { "componentId": "nor1", "port": "in2" } },
            { "from": { "componentId": "nor1", "port": "out" }, "to": { "componentId": "l1", "port": "in" } },
            { "from": { "componentId": "sw1", "port": "out" }, "to": { "componentId": "l1", "port": "enable" } },
            { "from": { "componentId": "l1", "port": "out" }, "to": { "componentId": "p1", "port": "in" } }
        ]
    }"#;

    #[test]
    fn test_load_reference_circuit() {
        let mut c = load_circuit_from_json(REFERENCE).unwrap();
        assert_eq!(c.len(), 7);
        assert_eq!(c.wires().len(), 9);
        assert_eq!(c.port_value("sw2", "out"), Ok(Trit::N));

        c.step().unwrap();
        assert_eq!(c.read_probe("p1"), Ok(Trit::O));
        c.toggle_switch("sw1").unwrap();
        c.toggle_switch("sw2").unwrap();
        c.step().unwrap();
        assert_eq!(c.read_probe("p1"), Ok(Trit::O));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let c = load_circuit_from_json("{}").unwrap();
        assert!(c.is_empty());
        assert!(c.wires().is_empty());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let text = r#"{ "components": [
            { "id": "a", "type": "Probe" },
            { "id": "b", "type": "TXOR" }
        ] }"#;
        match load_circuit_from_json(text) {
            Err(DescriptionError::Circuit(CircuitError::UnknownComponentType(name))) => {
                assert_eq!(name, "TXOR");
            }
            other => panic!("expected unknown type error, got {:?}", other.map(|c| c.len())),
        }
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let text = r#"{ "components": [
            { "id": "a", "type": "Probe" },
            { "id": "a", "type": "TNOT" }
        ] }"#;
        assert!(matches!(
            load_circuit_from_json(text),
            Err(DescriptionError::Circuit(CircuitError::DuplicateId(_)))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            load_circuit_from_json("{ \"components\": 3 }"),
            Err(DescriptionError::Json(_))
        ));
    }

    #[test]
    fn test_export_captures_switch_values() {
        let mut c = load_circuit_from_json(REFERENCE).unwrap();
        c.toggle_switch("sw1").unwrap();

        let json = dump_circuit_to_json(&c).unwrap();
        let desc: CircuitDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(desc.name, EXPORT_NAME);
        assert_eq!(desc.version, FORMAT_VERSION);
        assert_eq!(desc.components[0].params.value, Some(-1));
        assert_eq!(desc.components[1].params.value, Some(-1));
        assert_eq!(desc.components[2].params.value, None);
        assert!(desc.components.iter().all(|c| c.position.is_none()));
        assert_eq!(desc.wires[0].from.component, "sw1");
        assert!(json.contains("\"componentId\": \"sw1\""));

        let reloaded = desc.to_circuit().unwrap();
        assert_eq!(reloaded.port_value("sw1", "out"), Ok(Trit::N));
        assert_eq!(reloaded.wires(), c.wires());
    }

    #[test]
    fn test_bundled_circuits() {
        let mut adder = load_circuit_from_json(include_str!("../../circuits/adder.json")).unwrap();
        adder.run(2).unwrap();
        assert_eq!(adder.read_probe("sum"), Ok(Trit::N));
        assert_eq!(adder.read_probe("carry"), Ok(Trit::P));

        let reference = load_circuit_from_json(include_str!("../../circuits/reference.json")).unwrap();
        assert_eq!(reference.len(), 7);
    }

    #[test]
    fn test_binary_switch_param() {
        let text = r#"{ "components": [ { "id": "b", "type": "SwitchBinary", "params": { "value": -3 } } ] }"#;
        let c = load_circuit_from_json(text).unwrap();
        assert_eq!(c.port_value("b", "out"), Ok(Trit::P));
    }
}
