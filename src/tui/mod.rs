//! Terminal bench for ternary circuits.
//!
//! Provides an interactive terminal view of a loaded circuit with:
//! - Live port values with trit coloring
//! - Step/run controls and switch toggling
//! - Probe readings, wire list and an unwired-port audit

mod app;
mod ui;

pub use app::{BenchApp, run_bench};
