// src/test_utils.rs

//! This module contains utilities for testing.

use num_traits::Float;

/// A constant defining the tolerance within which floating-point values
/// are considered close enough to be equal.
pub const TEST_TOLERANCE: f32 = 1e-5;

/// Checks if two floating point numbers are close enough to be considered
/// equal.
///
/// # Arguments
/// * `target` - The target value.
/// * `value` - The value to compare against the target.
///
/// # Returns
/// `true` if the absolute difference between `target` and `value` is less than
/// `TEST_TOLERANCE`, otherwise `false`.
pub fn value_close(target: f32, value: f32) -> bool {
    Float::abs(target - value) < TEST_TOLERANCE
}

/// Checks if a normalized value lies in [0, 1], allowing for rounding.
///
/// # Arguments
/// * `value` - The value to check.
///
/// # Returns
/// `true` if `value` is within `TEST_TOLERANCE` of the unit range.
pub fn in_unit_range(value: f32) -> bool {
    -TEST_TOLERANCE <= value && value <= 1.0 + TEST_TOLERANCE
}
