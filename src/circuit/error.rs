//! Errors reported by the circuit engine.

use thiserror::Error;
use crate::circuit::port::Direction;

/// Errors that can occur while building or simulating a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CircuitError {
    #[error("duplicate component id: {0}")]
    DuplicateId(String),

    #[error("unknown component type: {0}")]
    UnknownComponentType(String),

    #[error("unknown component: {0}")]
    UnknownComponent(String),

    #[error("component {component} has no port {port}")]
    UnknownPort { component: String, port: String },

    #[error("port {component}.{port} is not an {expected} port")]
    WrongDirection {
        component: String,
        port: String,
        expected: Direction,
    },

    #[error("component {0} is not a switch")]
    NotASwitch(String),

    #[error("component {0} is not a probe")]
    NotAProbe(String),
}
