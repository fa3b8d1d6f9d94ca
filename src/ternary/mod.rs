//! Balanced ternary value domain.
//!
//! - [`Trit`] - A single balanced ternary digit (-1, 0, +1)
//! - [`clamp`] - Saturating conversion from integers

mod trit;

pub use trit::{Trit, clamp};
