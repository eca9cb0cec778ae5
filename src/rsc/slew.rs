// src/rsc/slew.rs

//! Output slew rate limiting.

use crate::number::Number;

/// Limits the change from `previous` to `output` to `rate_pct_per_s` percent
/// of full output per second. A rate of zero disables limiting.
///
/// The limit applies to every rotor control state, so a stop command also
/// winds down at the configured rate.
///
/// A NaN `previous` leaves `output` unlimited, so a single bad tick does not
/// latch.
pub fn slew_limit(output: f32, previous: f32, rate_pct_per_s: u16, dt: f32) -> f32 {
    if rate_pct_per_s == 0 {
        return output;
    }
    let max_delta = dt * f32::from(rate_pct_per_s) * 0.01;
    Number::clamp(output, previous - max_delta, previous + max_delta)
}
