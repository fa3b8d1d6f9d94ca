//! Circuit persistence.
//!
//! Loads and saves circuits in the JSON description format used by the
//! designer tools.

pub mod description;

pub use description::{
    CircuitDescription, ComponentDescription, ComponentParams, DescriptionError, Position,
    dump_circuit_to_json, load_circuit, load_circuit_from_json, save_circuit,
};
