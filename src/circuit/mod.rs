//! Ternary circuit simulation engine.
//!
//! This module implements the engine proper:
//! - [`Component`] - the nine component types and their transfer functions
//! - [`Wire`] - directed output → input connections
//! - [`resolve`] - the conflict rule for multi-driver nets
//! - [`Circuit`] - the aggregate that owns everything and steps it

pub mod component;
pub mod engine;
pub mod error;
pub mod port;
pub mod resolve;
pub mod wire;

pub use component::{Behavior, Component, ComponentType};
pub use engine::Circuit;
pub use error::CircuitError;
pub use port::{Direction, Port};
pub use resolve::{resolve, Drivers};
pub use wire::{Endpoint, Wire};
