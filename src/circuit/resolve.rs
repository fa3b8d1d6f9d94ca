//! Multi-driver net resolution.
//!
//! A net is the set of wires sharing one destination port. Its value is
//! decided by which distinct values are present among the drivers:
//!
//! - both -1 and +1: 0 (a drive conflict nulls the net)
//! - +1 only (possibly with zeros): +1
//! - -1 only (possibly with zeros): -1
//! - nothing but zeros, or no drivers: 0
//!
//! How many wires carry each value, and their order, never matters.

use crate::ternary::Trit;

/// Accumulates the distinct values seen on a net.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Drivers {
    negative: bool,
    positive: bool,
}

impl Drivers {
    pub const fn new() -> Self {
        Self { negative: false, positive: false }
    }

    /// Record one driver value.
    #[inline]
    pub fn drive(&mut self, value: Trit) {
        match value {
            Trit::N => self.negative = true,
            Trit::P => self.positive = true,
            Trit::O => {}
        }
    }

    /// The value the net settles to.
    #[inline]
    pub const fn resolve(self) -> Trit {
        match (self.negative, self.positive) {
            (true, true) => Trit::O,
            (false, true) => Trit::P,
            (true, false) => Trit::N,
            (false, false) => Trit::O,
        }
    }
}

impl FromIterator<Trit> for Drivers {
    fn from_iter<I: IntoIterator<Item = Trit>>(iter: I) -> Self {
        let mut drivers = Drivers::new();
        for value in iter {
            drivers.drive(value);
        }
        drivers
    }
}

/// Resolve a set of driver values to a single trit.
pub fn resolve<I: IntoIterator<Item = Trit>>(drivers: I) -> Trit {
    drivers.into_iter().collect::<Drivers>().resolve()
}
