//! Component terminals.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::ternary::Trit;

/// Which way a port carries its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Written by wire resolution, read by the owning component.
    Input,
    /// Written by the owning component, read by wire resolution.
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Input => write!(f, "input"),
            Direction::Output => write!(f, "output"),
        }
    }
}

/// A named, directional terminal holding one trit.
///
/// Port names come from the static layout of the owning component type,
/// so they are unique within the component and never allocated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Port {
    pub name: &'static str,
    pub direction: Direction,
    pub value: Trit,
}

impl Port {
    /// Create a port holding zero.
    pub const fn new(name: &'static str, direction: Direction) -> Self {
        Self { name, direction, value: Trit::O }
    }

    #[inline]
    pub const fn is_input(&self) -> bool {
        matches!(self.direction, Direction::Input)
    }

    #[inline]
    pub const fn is_output(&self) -> bool {
        matches!(self.direction, Direction::Output)
    }
}
