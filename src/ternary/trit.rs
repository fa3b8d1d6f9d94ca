//! Single balanced ternary digit (trit).
//!
//! A trit can hold one of three values: -1, 0, or +1. Every signal in a
//! circuit is a trit, so the range invariant is carried by the type itself:
//! integers only enter the domain through the saturating [`clamp`].

use std::fmt;
use serde::{Serialize, Deserialize};

/// A single balanced ternary digit.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i8", into = "i8")]
pub enum Trit {
    /// Negative (-1)
    N,
    /// Zero (0)
    O,
    /// Positive (+1)
    P,
}

/// Saturate an integer into the trit range.
///
/// Values above 1 become `P`, values below -1 become `N`.
#[inline]
pub const fn clamp(value: i64) -> Trit {
    match value {
        i64::MIN..=-1 => Trit::N,
        0 => Trit::O,
        _ => Trit::P,
    }
}

impl Trit {
    /// All possible trit values in order: N, O, P
    pub const ALL: [Trit; 3] = [Trit::N, Trit::O, Trit::P];

    /// Convert to integer value.
    #[inline]
    pub const fn to_i8(self) -> i8 {
        match self {
            Trit::N => -1,
            Trit::O => 0,
            Trit::P => 1,
        }
    }

    /// Negate the trit (flip N ↔ P, O stays O).
    #[inline]
    pub const fn neg(self) -> Self {
        match self {
            Trit::N => Trit::P,
            Trit::O => Trit::O,
            Trit::P => Trit::N,
        }
    }

    /// Minimum (ternary AND) - returns the lesser value.
    #[inline]
    pub const fn min(self, other: Self) -> Self {
        if self.to_i8() <= other.to_i8() { self } else { other }
    }

    /// Maximum (ternary OR) - returns the greater value.
    #[inline]
    pub const fn max(self, other: Self) -> Self {
        if self.to_i8() >= other.to_i8() { self } else { other }
    }

    /// Full adder: adds three trits, returns (sum, carry) with
    /// `a + b + c == sum + 3 * carry`.
    ///
    /// The carry is `total / 3` rounded half away from zero.
    #[inline]
    pub const fn full_add(self, other: Self, carry_in: Self) -> (Self, Self) {
        let total = self.to_i8() as i64 + other.to_i8() as i64 + carry_in.to_i8() as i64;
        let carry = match total {
            i64::MIN..=-2 => -1,
            -1..=1 => 0,
            _ => 1,
        };
        (clamp(total - 3 * carry), clamp(carry))
    }

    /// Returns true if this trit is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        matches!(self, Trit::O)
    }
}

impl Default for Trit {
    fn default() -> Self {
        Trit::O
    }
}

impl fmt::Debug for Trit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trit::N => write!(f, "N"),
            Trit::O => write!(f, "O"),
            Trit::P => write!(f, "P"),
        }
    }
}

impl fmt::Display for Trit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trit::N => write!(f, "-"),
            Trit::O => write!(f, "0"),
            Trit::P => write!(f, "+"),
        }
    }
}

impl std::ops::Neg for Trit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Trit::neg(self)
    }
}

/// Saturating: anything outside {-1, 0, 1} is clamped.
impl From<i8> for Trit {
    fn from(value: i8) -> Self {
        clamp(value as i64)
    }
}

impl From<Trit> for i8 {
    fn from(trit: Trit) -> Self {
        trit.to_i8()
    }
}
