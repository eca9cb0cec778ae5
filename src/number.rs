// src/number.rs

//! Numeric helpers shared by the control laws.

use piddiy::Number as PiddiyNumber;

/// Custom trait to encapsulate base number requirements.
pub trait Number: PiddiyNumber {
    /// Clamps generic PartialOrd values within a given range.
    ///
    /// Unlike `f32::clamp` this never panics. An inverted range yields one of
    /// its bounds, and NaN bounds are ignored.
    fn clamp(self, min: Self, max: Self) -> Self {
        if self < min {
            min
        } else if max < self {
            max
        } else {
            self
        }
    }
}

impl<T: PiddiyNumber> Number for T {}
