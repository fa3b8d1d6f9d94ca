//! # Ternuino
//!
//! A simulator for small balanced ternary logic circuits.
//!
//! Circuits are built from switches, gates, a transparent latch, a full
//! adder cell and probes, joined by wires. Every signal is a [`Trit`]
//! (-1, 0 or +1) and the whole circuit advances one synchronous step at a
//! time: wired inputs are resolved from the previous outputs, then every
//! component evaluates once.

pub mod ternary;
pub mod circuit;
pub mod io;
pub mod layout;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use ternary::{Trit, clamp};
pub use circuit::{Circuit, CircuitError, Component, ComponentType, Direction, Endpoint, Port, Wire};
pub use io::{CircuitDescription, DescriptionError, load_circuit, load_circuit_from_json, save_circuit, dump_circuit_to_json};

#[cfg(feature = "tui")]
pub use tui::run_bench;
