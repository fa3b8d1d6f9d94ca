//! Component variants and their per-step transfer functions.
//!
//! The set of component types is closed. Each type has a static port
//! layout (see [`ComponentType::ports`]) and each [`Component`] carries a
//! [`Behavior`] holding whatever private state its type needs.
//!
//! | Type          | Ports                      | Transfer function                         |
//! |---------------|----------------------------|-------------------------------------------|
//! | SwitchBinary  | out                        | out = stored value in {0, 1}              |
//! | SwitchTernary | out                        | out = stored trit                         |
//! | TNOT          | in, out                    | out = -in                                 |
//! | TAND          | in1, in2, out              | out = min(in1, in2)                       |
//! | TNOR          | in1, in2, out              | out = -max(in1, in2)                      |
//! | Transistor    | presence, sign, out        | out = sign if presence != 0, else 0       |
//! | TLatch        | in, enable, out            | state = in when enable == +1; out = state |
//! | Probe         | in                         | last = in                                 |
//! | TFullAdder    | ai, bi, ci, so, co         | ai + bi + ci = so + 3 * co                |

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::circuit::port::{Direction, Port};
use crate::circuit::CircuitError;
use crate::ternary::{Trit, clamp};

use Direction::{Input, Output};

type Layout = &'static [(&'static str, Direction)];

const SWITCH_PORTS: Layout = &[("out", Output)];
const TNOT_PORTS: Layout = &[("in", Input), ("out", Output)];
const GATE_PORTS: Layout = &[("in1", Input), ("in2", Input), ("out", Output)];
const TRANSISTOR_PORTS: Layout = &[("presence", Input), ("sign", Input), ("out", Output)];
const LATCH_PORTS: Layout = &[("in", Input), ("enable", Input), ("out", Output)];
const PROBE_PORTS: Layout = &[("in", Input)];
const ADDER_PORTS: Layout = &[
    ("ai", Input),
    ("bi", Input),
    ("ci", Input),
    ("so", Output),
    ("co", Output),
];

/// The nine component types, by persistence name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentType {
    SwitchBinary,
    SwitchTernary,
    #[serde(rename = "TNOT")]
    Tnot,
    #[serde(rename = "TAND")]
    Tand,
    #[serde(rename = "TNOR")]
    Tnor,
    Transistor,
    TLatch,
    Probe,
    TFullAdder,
}

impl ComponentType {
    /// Every component type, in palette order.
    pub const ALL: [ComponentType; 9] = [
        ComponentType::SwitchBinary,
        ComponentType::SwitchTernary,
        ComponentType::Tnot,
        ComponentType::Tand,
        ComponentType::Tnor,
        ComponentType::Transistor,
        ComponentType::TLatch,
        ComponentType::Probe,
        ComponentType::TFullAdder,
    ];

    /// Canonical type name used in circuit descriptions.
    pub const fn name(self) -> &'static str {
        match self {
            ComponentType::SwitchBinary => "SwitchBinary",
            ComponentType::SwitchTernary => "SwitchTernary",
            ComponentType::Tnot => "TNOT",
            ComponentType::Tand => "TAND",
            ComponentType::Tnor => "TNOR",
            ComponentType::Transistor => "Transistor",
            ComponentType::TLatch => "TLatch",
            ComponentType::Probe => "Probe",
            ComponentType::TFullAdder => "TFullAdder",
        }
    }

    /// Fixed port layout, in the order ports are stored on the component.
    pub const fn ports(self) -> &'static [(&'static str, Direction)] {
        match self {
            ComponentType::SwitchBinary | ComponentType::SwitchTernary => SWITCH_PORTS,
            ComponentType::Tnot => TNOT_PORTS,
            ComponentType::Tand | ComponentType::Tnor => GATE_PORTS,
            ComponentType::Transistor => TRANSISTOR_PORTS,
            ComponentType::TLatch => LATCH_PORTS,
            ComponentType::Probe => PROBE_PORTS,
            ComponentType::TFullAdder => ADDER_PORTS,
        }
    }

    pub const fn is_switch(self) -> bool {
        matches!(self, ComponentType::SwitchBinary | ComponentType::SwitchTernary)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComponentType {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentType::ALL
            .into_iter()
            .find(|ty| ty.name() == s)
            .ok_or_else(|| CircuitError::UnknownComponentType(s.to_string()))
    }
}

/// Per-variant private state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Behavior {
    /// Stored value is always `O` or `P`.
    SwitchBinary { value: Trit },
    SwitchTernary { value: Trit },
    Tnot,
    Tand,
    Tnor,
    Transistor,
    /// Memory is decoupled from the output port; it only changes on enable.
    TLatch { state: Trit },
    Probe { last: Trit },
    TFullAdder,
}

impl Behavior {
    fn initial(ty: ComponentType) -> Self {
        match ty {
            ComponentType::SwitchBinary => Behavior::SwitchBinary { value: Trit::O },
            ComponentType::SwitchTernary => Behavior::SwitchTernary { value: Trit::O },
            ComponentType::Tnot => Behavior::Tnot,
            ComponentType::Tand => Behavior::Tand,
            ComponentType::Tnor => Behavior::Tnor,
            ComponentType::Transistor => Behavior::Transistor,
            ComponentType::TLatch => Behavior::TLatch { state: Trit::O },
            ComponentType::Probe => Behavior::Probe { last: Trit::O },
            ComponentType::TFullAdder => Behavior::TFullAdder,
        }
    }

    pub const fn component_type(&self) -> ComponentType {
        match self {
            Behavior::SwitchBinary { .. } => ComponentType::SwitchBinary,
            Behavior::SwitchTernary { .. } => ComponentType::SwitchTernary,
            Behavior::Tnot => ComponentType::Tnot,
            Behavior::Tand => ComponentType::Tand,
            Behavior::Tnor => ComponentType::Tnor,
            Behavior::Transistor => ComponentType::Transistor,
            Behavior::TLatch { .. } => ComponentType::TLatch,
            Behavior::Probe { .. } => ComponentType::Probe,
            Behavior::TFullAdder => ComponentType::TFullAdder,
        }
    }
}

/// A circuit element: an id, its behavior, and its fixed port set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    id: String,
    behavior: Behavior,
    ports: Vec<Port>,
}

impl Component {
    /// Create a component of the given type with all ports at zero.
    pub fn new(id: impl Into<String>, ty: ComponentType) -> Self {
        let ports = ty
            .ports()
            .iter()
            .map(|&(name, direction)| Port::new(name, direction))
            .collect();

        Self {
            id: id.into(),
            behavior: Behavior::initial(ty),
            ports,
        }
    }

    /// Create a component with an optional initial switch value.
    ///
    /// The value only applies to switches; other types ignore it.
    pub fn with_value(id: impl Into<String>, ty: ComponentType, value: Option<i64>) -> Self {
        let mut component = Self::new(id, ty);
        if let Some(v) = value {
            if component.set_value(v).is_err() {
                tracing::warn!(id = %component.id, kind = %ty, "ignoring initial value on non-switch component");
            }
        }
        component
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn component_type(&self) -> ComponentType {
        self.behavior.component_type()
    }

    #[inline]
    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    #[inline]
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Look up a port by name.
    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }

    pub(crate) fn port_index(&self, name: &str) -> Option<usize> {
        self.ports.iter().position(|p| p.name == name)
    }

    pub(crate) fn port_at(&self, index: usize) -> &Port {
        &self.ports[index]
    }

    pub(crate) fn port_at_mut(&mut self, index: usize) -> &mut Port {
        &mut self.ports[index]
    }

    pub fn is_switch(&self) -> bool {
        self.component_type().is_switch()
    }

    pub fn is_probe(&self) -> bool {
        matches!(self.behavior, Behavior::Probe { .. })
    }

    /// Stored value of a switch.
    pub fn switch_value(&self) -> Option<Trit> {
        match self.behavior {
            Behavior::SwitchBinary { value } | Behavior::SwitchTernary { value } => Some(value),
            _ => None,
        }
    }

    /// Internal memory of a latch.
    pub fn latch_state(&self) -> Option<Trit> {
        match self.behavior {
            Behavior::TLatch { state } => Some(state),
            _ => None,
        }
    }

    /// Store a new switch value and drive it on `out` immediately.
    ///
    /// Binary switches store 1 for any non-zero value; ternary switches
    /// store the clamped value.
    pub fn set_value(&mut self, value: i64) -> Result<Trit, CircuitError> {
        let stored = match &mut self.behavior {
            Behavior::SwitchBinary { value: stored } => {
                *stored = if value != 0 { Trit::P } else { Trit::O };
                *stored
            }
            Behavior::SwitchTernary { value: stored } => {
                *stored = clamp(value);
                *stored
            }
            _ => return Err(CircuitError::NotASwitch(self.id.clone())),
        };
        self.ports[0].value = stored;
        Ok(stored)
    }

    /// Advance a switch to its next position and drive it on `out`.
    ///
    /// Binary switches flip 0 ↔ 1; ternary switches cycle -1 → 0 → 1 → -1.
    pub fn toggle(&mut self) -> Result<Trit, CircuitError> {
        let stored = match &mut self.behavior {
            Behavior::SwitchBinary { value } => {
                *value = if *value == Trit::P { Trit::O } else { Trit::P };
                *value
            }
            Behavior::SwitchTernary { value } => {
                *value = match *value {
                    Trit::N => Trit::O,
                    Trit::O => Trit::P,
                    Trit::P => Trit::N,
                };
                *value
            }
            _ => return Err(CircuitError::NotASwitch(self.id.clone())),
        };
        self.ports[0].value = stored;
        Ok(stored)
    }

    /// Last value a probe observed.
    pub fn probe_value(&self) -> Result<Trit, CircuitError> {
        match self.behavior {
            Behavior::Probe { last } => Ok(last),
            _ => Err(CircuitError::NotAProbe(self.id.clone())),
        }
    }

    /// Run the transfer function once.
    ///
    /// Reads only this component's input ports and state, writes only its
    /// output ports and state.
    pub fn evaluate(&mut self) {
        let p = &mut self.ports;
        match &mut self.behavior {
            Behavior::SwitchBinary { value } | Behavior::SwitchTernary { value } => {
                p[0].value = *value;
            }
            Behavior::Tnot => {
                p[1].value = -p[0].value;
            }
            Behavior::Tand => {
                p[2].value = p[0].value.min(p[1].value);
            }
            Behavior::Tnor => {
                p[2].value = -p[0].value.max(p[1].value);
            }
            Behavior::Transistor => {
                let (presence, sign) = (p[0].value, p[1].value);
                p[2].value = if !presence.is_zero() && !sign.is_zero() { sign } else { Trit::O };
            }
            Behavior::TLatch { state } => {
                // Only exactly +1 writes; 0 and -1 both hold.
                if p[1].value == Trit::P {
                    *state = p[0].value;
                }
                p[2].value = *state;
            }
            Behavior::Probe { last } => {
                *last = p[0].value;
            }
            Behavior::TFullAdder => {
                let (sum, carry) = p[0].value.full_add(p[1].value, p[2].value);
                p[3].value = sum;
                p[4].value = carry;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive the named inputs, evaluate once, return the named output.
    fn eval(component: &mut Component, inputs: &[(&str, i8)], output: &str) -> Trit {
        for &(name, v) in inputs {
            let idx = component.port_index(name).unwrap();
            component.port_at_mut(idx).value = Trit::from(v);
        }
        component.evaluate();
        component.port(output).unwrap().value
    }

    #[test]
    fn test_type_names_roundtrip() {
        for ty in ComponentType::ALL {
            assert_eq!(ty.name().parse::<ComponentType>().unwrap(), ty);
        }
        assert_eq!(
            "TXOR".parse::<ComponentType>(),
            Err(CircuitError::UnknownComponentType("TXOR".into()))
        );
    }

    #[test]
    fn test_port_layouts() {
        let adder = Component::new("fa", ComponentType::TFullAdder);
        let names: Vec<_> = adder.ports().iter().map(|p| p.name).collect();
        assert_eq!(names, ["ai", "bi", "ci", "so", "co"]);
        assert!(adder.port("so").unwrap().is_output());
        assert!(adder.port("ci").unwrap().is_input());

        let probe = Component::new("p", ComponentType::Probe);
        assert_eq!(probe.ports().len(), 1);
        assert!(probe.port("out").is_none());
    }

    #[test]
    fn test_tnot() {
        let mut c = Component::new("n", ComponentType::Tnot);
        assert_eq!(eval(&mut c, &[("in", 1)], "out"), Trit::N);
        assert_eq!(eval(&mut c, &[("in", -1)], "out"), Trit::P);
        assert_eq!(eval(&mut c, &[("in", 0)], "out"), Trit::O);
    }

    #[test]
    fn test_tand() {
        let mut c = Component::new("a", ComponentType::Tand);
        assert_eq!(eval(&mut c, &[("in1", 1), ("in2", -1)], "out"), Trit::N);
        assert_eq!(eval(&mut c, &[("in1", 1), ("in2", 1)], "out"), Trit::P);
        assert_eq!(eval(&mut c, &[("in1", 0), ("in2", 1)], "out"), Trit::O);
    }

    #[test]
    fn test_tnor() {
        let mut c = Component::new("o", ComponentType::Tnor);
        assert_eq!(eval(&mut c, &[("in1", 1), ("in2", -1)], "out"), Trit::N);
        assert_eq!(eval(&mut c, &[("in1", -1), ("in2", -1)], "out"), Trit::P);
        assert_eq!(eval(&mut c, &[("in1", 0), ("in2", 0)], "out"), Trit::O);
    }

    #[test]
    fn test_transistor() {
        let mut c = Component::new("t", ComponentType::Transistor);
        for sign in [-1, 0, 1] {
            assert_eq!(eval(&mut c, &[("presence", 0), ("sign", sign)], "out"), Trit::O);
        }
        assert_eq!(eval(&mut c, &[("presence", 1), ("sign", -1)], "out"), Trit::N);
        assert_eq!(eval(&mut c, &[("presence", -1), ("sign", 1)], "out"), Trit::P);
        assert_eq!(eval(&mut c, &[("presence", 1), ("sign", 0)], "out"), Trit::O);
    }

    #[test]
    fn test_latch_holds_unless_enabled() {
        let mut c = Component::new("l", ComponentType::TLatch);
        assert_eq!(eval(&mut c, &[("in", 1), ("enable", 1)], "out"), Trit::P);
        assert_eq!(c.latch_state(), Some(Trit::P));

        assert_eq!(eval(&mut c, &[("in", -1), ("enable", 0)], "out"), Trit::P);
        assert_eq!(c.latch_state(), Some(Trit::P));

        assert_eq!(eval(&mut c, &[("in", -1), ("enable", -1)], "out"), Trit::P);
        assert_eq!(c.latch_state(), Some(Trit::P));

        assert_eq!(eval(&mut c, &[("in", -1), ("enable", 1)], "out"), Trit::N);
    }

    #[test]
    fn test_full_adder_cell() {
        let mut c = Component::new("fa", ComponentType::TFullAdder);
        eval(&mut c, &[("ai", 1), ("bi", 1), ("ci", 1)], "so");
        assert_eq!((c.port("so").unwrap().value, c.port("co").unwrap().value), (Trit::O, Trit::P));

        eval(&mut c, &[("ai", 1), ("bi", 1), ("ci", 0)], "so");
        assert_eq!((c.port("so").unwrap().value, c.port("co").unwrap().value), (Trit::N, Trit::P));

        eval(&mut c, &[("ai", -1), ("bi", -1), ("ci", -1)], "so");
        assert_eq!((c.port("so").unwrap().value, c.port("co").unwrap().value), (Trit::O, Trit::N));
    }

    #[test]
    fn test_probe_records_input() {
        let mut c = Component::new("p", ComponentType::Probe);
        assert_eq!(c.probe_value(), Ok(Trit::O));
        let idx = c.port_index("in").unwrap();
        c.port_at_mut(idx).value = Trit::N;
        c.evaluate();
        assert_eq!(c.probe_value(), Ok(Trit::N));
    }

    #[test]
    fn test_ternary_toggle_cycle() {
        for start in [-1, 0, 1] {
            let mut sw = Component::with_value("sw", ComponentType::SwitchTernary, Some(start));
            let mut seen = vec![sw.switch_value().unwrap()];
            for _ in 0..3 {
                seen.push(sw.toggle().unwrap());
            }
            assert_eq!(seen[0], seen[3]);
            for pair in seen.windows(2) {
                let next = match pair[0] {
                    Trit::N => Trit::O,
                    Trit::O => Trit::P,
                    Trit::P => Trit::N,
                };
                assert_eq!(pair[1], next);
            }
            assert_eq!(sw.port("out").unwrap().value, sw.switch_value().unwrap());
        }
    }

    #[test]
    fn test_binary_switch() {
        let mut sw = Component::new("b", ComponentType::SwitchBinary);
        assert_eq!(sw.toggle(), Ok(Trit::P));
        assert_eq!(sw.toggle(), Ok(Trit::O));
        assert_eq!(sw.set_value(-1), Ok(Trit::P));
        assert_eq!(sw.port("out").unwrap().value, Trit::P);
        assert_eq!(sw.set_value(0), Ok(Trit::O));
    }

    #[test]
    fn test_ternary_set_value_clamps() {
        let mut sw = Component::new("t", ComponentType::SwitchTernary);
        assert_eq!(sw.set_value(5), Ok(Trit::P));
        assert_eq!(sw.set_value(-9), Ok(Trit::N));
        assert_eq!(sw.port("out").unwrap().value, Trit::N);
    }

    #[test]
    fn test_switch_api_on_wrong_variant() {
        let mut gate = Component::new("g", ComponentType::Tand);
        assert_eq!(gate.toggle(), Err(CircuitError::NotASwitch("g".into())));
        assert_eq!(gate.set_value(1), Err(CircuitError::NotASwitch("g".into())));
        assert_eq!(gate.probe_value(), Err(CircuitError::NotAProbe("g".into())));

        let ignored = Component::with_value("g2", ComponentType::Tnot, Some(1));
        assert!(ignored.ports().iter().all(|p| p.value == Trit::O));
    }
}
