// src/rsc/ramp.rs

//! # Rotor Ramp Model
//!
//! Slews the commanded rotor speed fraction toward its target. Ramping up
//! takes `ramp_time_s` from zero to full; ramping down is immediate, since
//! the physical spin-down lag is modeled by the runup estimate instead.

use crate::logging::rsc_warn;

/// Ramp time used when a non-positive one is configured.
pub const DEFAULT_RAMP_TIME_S: f32 = 1.0;

/// Commanded rotor speed ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotorRamp {
    output: f32,
    ramp_time_s: f32,
}

impl RotorRamp {
    /// Creates a ramp at zero output.
    pub fn new(ramp_time_s: f32) -> Self {
        Self {
            output: 0.0,
            ramp_time_s,
        }
    }

    /// Current ramp output in [0, 1].
    pub fn output(&self) -> f32 {
        self.output
    }

    /// Configured ramp time in seconds.
    pub fn ramp_time(&self) -> f32 {
        self.ramp_time_s
    }

    /// Sets the ramp time. Non-positive values are replaced on the next update.
    pub fn set_ramp_time(&mut self, ramp_time_s: f32) {
        self.ramp_time_s = ramp_time_s;
    }

    /// Advances the ramp by `dt` seconds toward `target`.
    ///
    /// `runup_output` is the current rotor speed estimate. When ramping up from
    /// below it, the ramp first jumps to the estimate so a rotor that is still
    /// spinning does not restart from the bottom.
    pub fn update(&mut self, target: f32, runup_output: f32, dt: f32) {
        if self.ramp_time_s <= 0.0 {
            rsc_warn!("rsc: ramp time {} s invalid, using default", self.ramp_time_s);
            self.ramp_time_s = DEFAULT_RAMP_TIME_S;
        }

        if self.output < target {
            if self.output < runup_output {
                self.output = runup_output;
            }
            self.output = (self.output + dt / self.ramp_time_s).min(target);
        } else {
            self.output = target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    /// Test that the ramp climbs at 1 / ramp_time per second.
    #[test]
    fn test_ramp_up_rate() {
        let mut ramp = RotorRamp::new(4.0);
        ramp.update(1.0, 0.0, 1.0);
        assert!(value_close(0.25, ramp.output()), "Ramp should be a quarter up.");
        ramp.update(1.0, 0.0, 1.0);
        assert!(value_close(0.5, ramp.output()), "Ramp should be half way.");
    }

    /// Test that a large step is clamped at the target.
    #[test]
    fn test_ramp_up_clamped_to_target() {
        let mut ramp = RotorRamp::new(1.0);
        ramp.update(1.0, 0.0, 5.0);
        assert!(value_close(1.0, ramp.output()), "Ramp should stop at target.");
    }

    /// Test that ramping down takes effect in a single update.
    #[test]
    fn test_ramp_down_is_instant() {
        let mut ramp = RotorRamp::new(1.0);
        ramp.update(1.0, 0.0, 1.0);
        ramp.update(0.0, 1.0, 0.001);
        assert!(value_close(0.0, ramp.output()), "Ramp down should be instant.");
    }

    /// Test that ramping up starts from the runup estimate when it is higher.
    #[test]
    fn test_ramp_up_jumps_to_runup() {
        let mut ramp = RotorRamp::new(10.0);
        ramp.update(1.0, 0.6, 1.0);
        assert!(
            value_close(0.7, ramp.output()),
            "Ramp should resume from the estimated rotor speed."
        );
    }

    /// Test that a non-positive ramp time falls back to the default.
    #[test]
    fn test_invalid_ramp_time() {
        let mut ramp = RotorRamp::new(0.0);
        ramp.update(1.0, 0.0, 0.5);
        assert!(value_close(DEFAULT_RAMP_TIME_S, ramp.ramp_time()));
        assert!(value_close(0.5, ramp.output()));

        ramp.set_ramp_time(-3.0);
        ramp.update(1.0, 0.0, 0.1);
        assert!(value_close(DEFAULT_RAMP_TIME_S, ramp.ramp_time()));
    }
}
