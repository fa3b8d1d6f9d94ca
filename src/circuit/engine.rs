//! The circuit aggregate and its synchronous step.
//!
//! One call to [`Circuit::step`] is one hop: every wired input port is
//! resolved from the output values present *before* the call, then every
//! component runs its transfer function once. A change at an output reaches
//! a directly wired input on the next step, so a chain of N components needs
//! N steps end to end. There is no settling loop and no scheduling; since
//! transfer functions only touch their own ports, evaluation order is not
//! observable.

use std::collections::HashMap;
use crate::circuit::component::Component;
use crate::circuit::port::Direction;
use crate::circuit::resolve::Drivers;
use crate::circuit::wire::{Endpoint, Wire};
use crate::circuit::CircuitError;
use crate::ternary::Trit;

/// A simulated circuit: components, the wires between them, and a step count.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    components: Vec<Component>,
    /// Component id -> position in `components`.
    index: HashMap<String, usize>,
    wires: Vec<Wire>,
    steps: u64,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component. Fails without changing anything if the id is taken.
    pub fn add_component(&mut self, component: Component) -> Result<(), CircuitError> {
        if self.index.contains_key(component.id()) {
            return Err(CircuitError::DuplicateId(component.id().to_string()));
        }
        tracing::debug!(id = component.id(), kind = %component.component_type(), "add component");
        self.index.insert(component.id().to_string(), self.components.len());
        self.components.push(component);
        Ok(())
    }

    /// Remove a component along with every wire attached to it.
    pub fn remove_component(&mut self, id: &str) -> Result<Component, CircuitError> {
        let pos = self
            .index
            .remove(id)
            .ok_or_else(|| CircuitError::UnknownComponent(id.to_string()))?;
        let removed = self.components.remove(pos);

        let before = self.wires.len();
        self.wires.retain(|w| !w.touches(id));
        tracing::debug!(id, wires_dropped = before - self.wires.len(), "remove component");

        for (i, c) in self.components.iter().enumerate().skip(pos) {
            self.index.insert(c.id().to_string(), i);
        }
        Ok(removed)
    }

    /// Wire an output port to an input port.
    ///
    /// Both endpoints are checked here: the components and ports must exist,
    /// the source must be an output and the destination an input.
    pub fn connect(
        &mut self,
        src_id: &str,
        src_port: &str,
        dst_id: &str,
        dst_port: &str,
    ) -> Result<(), CircuitError> {
        let from = Endpoint::new(src_id, src_port);
        let to = Endpoint::new(dst_id, dst_port);
        self.check_direction(&from, Direction::Output)?;
        self.check_direction(&to, Direction::Input)?;

        tracing::debug!(%from, %to, "connect");
        self.wires.push(Wire::new(from, to));
        Ok(())
    }

    /// Remove the wire at `index` (in connection order).
    pub fn disconnect(&mut self, index: usize) -> Option<Wire> {
        if index < self.wires.len() {
            let wire = self.wires.remove(index);
            tracing::debug!(%wire, "disconnect");
            Some(wire)
        } else {
            None
        }
    }

    /// Advance the circuit by one synchronous step.
    pub fn step(&mut self) -> Result<(), CircuitError> {
        // Phase 1: gather every net from pre-step outputs, then write inputs.
        // Inputs with no wire keep whatever they held.
        let mut nets: HashMap<(usize, usize), Drivers> = HashMap::new();
        for wire in &self.wires {
            let (src_comp, src_port) = self.locate(&wire.from)?;
            let dst = self.locate(&wire.to)?;
            let value = self.components[src_comp].port_at(src_port).value;
            nets.entry(dst).or_default().drive(value);
        }
        for (&(comp, port), drivers) in &nets {
            self.components[comp].port_at_mut(port).value = drivers.resolve();
        }

        // Phase 2: every transfer function exactly once.
        for component in &mut self.components {
            component.evaluate();
        }

        self.steps += 1;
        tracing::trace!(step = self.steps, nets = nets.len(), "step");
        Ok(())
    }

    /// Perform `count` steps, stopping at the first error.
    pub fn run(&mut self, count: u64) -> Result<(), CircuitError> {
        for _ in 0..count {
            self.step()?;
        }
        Ok(())
    }

    /// Number of steps performed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Set a switch; the new value is on its output immediately.
    pub fn set_switch_value(&mut self, id: &str, value: i64) -> Result<Trit, CircuitError> {
        let stored = self.component_mut(id)?.set_value(value)?;
        tracing::debug!(id, value = %stored, "set switch");
        Ok(stored)
    }

    /// Advance a switch to its next position.
    pub fn toggle_switch(&mut self, id: &str) -> Result<Trit, CircuitError> {
        let stored = self.component_mut(id)?.toggle()?;
        tracing::debug!(id, value = %stored, "toggle switch");
        Ok(stored)
    }

    /// The last value a probe observed.
    pub fn read_probe(&self, id: &str) -> Result<Trit, CircuitError> {
        self.get(id)?.probe_value()
    }

    /// Current value of any port.
    pub fn port_value(&self, id: &str, port: &str) -> Result<Trit, CircuitError> {
        let component = self.get(id)?;
        component
            .port(port)
            .map(|p| p.value)
            .ok_or_else(|| CircuitError::UnknownPort {
                component: id.to_string(),
                port: port.to_string(),
            })
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.index.get(id).map(|&i| &self.components[i])
    }

    /// Components in insertion order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    /// Wires in connection order.
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// Every probe with its last observed value.
    pub fn probes(&self) -> Vec<(&str, Trit)> {
        self.components
            .iter()
            .filter_map(|c| c.probe_value().ok().map(|v| (c.id(), v)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    fn get(&self, id: &str) -> Result<&Component, CircuitError> {
        self.component(id)
            .ok_or_else(|| CircuitError::UnknownComponent(id.to_string()))
    }

    fn component_mut(&mut self, id: &str) -> Result<&mut Component, CircuitError> {
        match self.index.get(id) {
            Some(&i) => Ok(&mut self.components[i]),
            None => Err(CircuitError::UnknownComponent(id.to_string())),
        }
    }

    /// Resolve an endpoint to (component index, port index).
    fn locate(&self, endpoint: &Endpoint) -> Result<(usize, usize), CircuitError> {
        let comp = *self
            .index
            .get(&endpoint.component)
            .ok_or_else(|| CircuitError::UnknownComponent(endpoint.component.clone()))?;
        let port = self.components[comp]
            .port_index(&endpoint.port)
            .ok_or_else(|| CircuitError::UnknownPort {
                component: endpoint.component.clone(),
                port: endpoint.port.clone(),
            })?;
        Ok((comp, port))
    }

    fn check_direction(&self, endpoint: &Endpoint, expected: Direction) -> Result<(), CircuitError> {
        let (comp, port) = self.locate(endpoint)?;
        if self.components[comp].port_at(port).direction != expected {
            return Err(CircuitError::WrongDirection {
                component: endpoint.component.clone(),
                port: endpoint.port.clone(),
                expected,
            });
        }
        Ok(())
    }
}
