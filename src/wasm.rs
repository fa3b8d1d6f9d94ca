//! WebAssembly bindings for the circuit simulator.
//!
//! This module provides JavaScript-friendly wrappers around [`Circuit`] and
//! the JSON description format.

use std::collections::BTreeMap;
use wasm_bindgen::prelude::*;
use crate::Circuit;
use crate::io::{dump_circuit_to_json, load_circuit_from_json};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// WebAssembly-friendly circuit wrapper.
#[wasm_bindgen]
pub struct WasmCircuit {
    circuit: Circuit,
}

#[wasm_bindgen]
impl WasmCircuit {
    /// Create an empty circuit.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { circuit: Circuit::new() }
    }

    /// Replace the circuit with one loaded from a JSON description.
    /// Returns the number of components.
    #[wasm_bindgen]
    pub fn load_json(&mut self, text: &str) -> Result<usize, JsError> {
        self.circuit = load_circuit_from_json(text).map_err(js_error)?;
        Ok(self.circuit.len())
    }

    /// Export the circuit as a JSON description.
    #[wasm_bindgen]
    pub fn export_json(&self) -> Result<String, JsError> {
        dump_circuit_to_json(&self.circuit).map_err(js_error)
    }

    /// Advance one step.
    #[wasm_bindgen]
    pub fn step(&mut self) -> Result<(), JsError> {
        self.circuit.step().map_err(js_error)
    }

    /// Advance `count` steps. Returns the total step count.
    #[wasm_bindgen]
    pub fn run(&mut self, count: u32) -> Result<u64, JsError> {
        self.circuit.run(count as u64).map_err(js_error)?;
        Ok(self.circuit.steps())
    }

    /// Steps performed so far.
    #[wasm_bindgen]
    pub fn steps(&self) -> u64 {
        self.circuit.steps()
    }

    /// Toggle a switch. Returns its new value.
    #[wasm_bindgen]
    pub fn toggle_switch(&mut self, id: &str) -> Result<i8, JsError> {
        self.circuit.toggle_switch(id).map(|v| v.to_i8()).map_err(js_error)
    }

    /// Set a switch. Returns the stored value.
    #[wasm_bindgen]
    pub fn set_switch_value(&mut self, id: &str, value: i32) -> Result<i8, JsError> {
        self.circuit
            .set_switch_value(id, value as i64)
            .map(|v| v.to_i8())
            .map_err(js_error)
    }

    /// Read a probe.
    #[wasm_bindgen]
    pub fn read_probe(&self, id: &str) -> Result<i8, JsError> {
        self.circuit.read_probe(id).map(|v| v.to_i8()).map_err(js_error)
    }

    /// Read any port.
    #[wasm_bindgen]
    pub fn port_value(&self, id: &str, port: &str) -> Result<i8, JsError> {
        self.circuit.port_value(id, port).map(|v| v.to_i8()).map_err(js_error)
    }

    /// Component ids in insertion order.
    #[wasm_bindgen]
    pub fn component_ids(&self) -> js_sys::Array {
        self.circuit
            .components()
            .map(|c| JsValue::from_str(c.id()))
            .collect()
    }

    /// Port values of every component as JSON: `{"id": {"port": value}}`.
    #[wasm_bindgen]
    pub fn state_json(&self) -> Result<String, JsError> {
        let state: BTreeMap<&str, BTreeMap<&str, i8>> = self
            .circuit
            .components()
            .map(|c| {
                let ports = c.ports().iter().map(|p| (p.name, p.value.to_i8())).collect();
                (c.id(), ports)
            })
            .collect();
        serde_json::to_string(&state).map_err(js_error)
    }
}

impl Default for WasmCircuit {
    fn default() -> Self {
        Self::new()
    }
}
