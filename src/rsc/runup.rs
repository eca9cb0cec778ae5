// src/rsc/runup.rs

//! # Rotor Runup Estimator
//!
//! Without a rotor speed sensor the controller estimates rotor speed by
//! lagging the ramp output with a slower slew. The estimate also drives the
//! run-up complete flag, which latches when both ramp and estimate reach full
//! speed and clears again once the estimate falls to the critical speed.

use crate::logging::rsc_debug;
use crate::rsc::types::ControlMode;

/// Runup time used when a non-positive one is configured.
pub const DEFAULT_RUNUP_TIME_S: f32 = 1.0;

/// Run-up completion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunupPhase {
    /// Rotor has not reached, or has since dropped out of, flight speed.
    #[default]
    Incomplete,
    /// Rotor reached full speed and stays above critical speed.
    Complete,
}

impl RunupPhase {
    /// Computes the next phase.
    ///
    /// - `Disabled` mode: always `Complete`, no rotor is governed.
    /// - `Incomplete` → `Complete` when `ramp >= 1` and `runup >= 1`.
    /// - `Complete` → `Incomplete` when `runup <= critical_speed`.
    ///
    /// The reset guard is evaluated after the latch, so a critical speed at or
    /// above full speed never lets the phase settle in `Complete`.
    pub fn next(self, mode: ControlMode, ramp: f32, runup: f32, critical_speed: f32) -> Self {
        if mode == ControlMode::Disabled {
            return RunupPhase::Complete;
        }

        let latched = match self {
            RunupPhase::Incomplete if ramp >= 1.0 && runup >= 1.0 => RunupPhase::Complete,
            phase => phase,
        };

        match latched {
            RunupPhase::Complete if runup <= critical_speed => RunupPhase::Incomplete,
            phase => phase,
        }
    }

    /// True in the `Complete` phase.
    pub fn is_complete(self) -> bool {
        self == RunupPhase::Complete
    }
}

/// Estimated rotor speed and run-up completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotorRunup {
    output: f32,
    runup_time_s: f32,
    phase: RunupPhase,
}

impl RotorRunup {
    /// Creates a stopped rotor estimate.
    pub fn new(runup_time_s: f32) -> Self {
        Self {
            output: 0.0,
            runup_time_s,
            phase: RunupPhase::Incomplete,
        }
    }

    /// Estimated rotor speed as a fraction of full speed.
    pub fn output(&self) -> f32 {
        self.output
    }

    /// Configured runup time in seconds.
    pub fn runup_time(&self) -> f32 {
        self.runup_time_s
    }

    /// Sets the runup time. It is raised to the ramp time on the next update.
    pub fn set_runup_time(&mut self, runup_time_s: f32) {
        self.runup_time_s = runup_time_s;
    }

    /// Current run-up phase.
    pub fn phase(&self) -> RunupPhase {
        self.phase
    }

    /// Advances the estimate by `dt` seconds toward `ramp_output`.
    pub fn update(
        &mut self,
        ramp_output: f32,
        ramp_time_s: f32,
        mode: ControlMode,
        critical_speed: f32,
        dt: f32,
    ) {
        // Runup can not be faster than the ramp.
        if self.runup_time_s < ramp_time_s {
            self.runup_time_s = ramp_time_s;
        }
        if self.runup_time_s <= 0.0 {
            self.runup_time_s = DEFAULT_RUNUP_TIME_S;
        }

        let increment = dt / self.runup_time_s;
        if self.output < ramp_output {
            self.output = (self.output + increment).min(ramp_output);
        } else {
            self.output = (self.output - increment).max(ramp_output);
        }

        let next = self
            .phase
            .next(mode, ramp_output, self.output, critical_speed);
        if next != self.phase {
            rsc_debug!("rsc: runup {} at rotor speed {}", next, self.output);
        }
        self.phase = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    /// Test the latch guard requires both ramp and runup at full speed.
    #[test]
    fn test_phase_latch_requires_full_speed() {
        let mode = ControlMode::SpeedSetpoint;
        let phase = RunupPhase::Incomplete;
        assert_eq!(phase.next(mode, 1.0, 0.99, 0.5), RunupPhase::Incomplete);
        assert_eq!(phase.next(mode, 0.99, 1.0, 0.5), RunupPhase::Incomplete);
        assert_eq!(phase.next(mode, 1.0, 1.0, 0.5), RunupPhase::Complete);
    }

    /// Test the hysteresis between latch and critical speed reset.
    #[test]
    fn test_phase_hysteresis() {
        let mode = ControlMode::Governor;
        let phase = RunupPhase::Complete;
        assert_eq!(
            phase.next(mode, 0.0, 0.8, 0.5),
            RunupPhase::Complete,
            "Above critical speed the flag stays set."
        );
        assert_eq!(phase.next(mode, 0.0, 0.5, 0.5), RunupPhase::Incomplete);
        assert_eq!(
            RunupPhase::Incomplete.next(mode, 0.0, 0.8, 0.5),
            RunupPhase::Incomplete,
            "Once cleared, only full speed latches again."
        );
    }

    /// Test that disabled mode reports run-up complete unconditionally.
    #[test]
    fn test_phase_disabled_mode() {
        let phase = RunupPhase::Incomplete;
        assert!(phase.next(ControlMode::Disabled, 0.0, 0.0, 0.5).is_complete());
    }

    /// Test that a critical speed at full speed clears the latch immediately.
    #[test]
    fn test_phase_critical_above_full_speed() {
        let phase = RunupPhase::Incomplete;
        assert_eq!(
            phase.next(ControlMode::SpeedSetpoint, 1.0, 1.0, 1.0),
            RunupPhase::Incomplete
        );
    }

    /// Test the estimate follows the ramp without overshoot in both directions.
    #[test]
    fn test_runup_tracking() {
        let mut runup = RotorRunup::new(2.0);
        runup.update(1.0, 1.0, ControlMode::SpeedSetpoint, 0.5, 1.0);
        assert!(value_close(0.5, runup.output()), "Half way after 1 s.");

        runup.update(1.0, 1.0, ControlMode::SpeedSetpoint, 0.5, 5.0);
        assert!(value_close(1.0, runup.output()), "Clamped at the ramp.");
        assert!(runup.phase().is_complete());

        runup.update(0.0, 1.0, ControlMode::SpeedSetpoint, 0.5, 1.0);
        assert!(value_close(0.5, runup.output()), "Spins down at the same rate.");
        assert!(!runup.phase().is_complete(), "Cleared at critical speed.");

        runup.update(0.0, 1.0, ControlMode::SpeedSetpoint, 0.5, 5.0);
        assert!(value_close(0.0, runup.output()), "Clamped at the ramp.");
    }

    /// Test that the runup time is never shorter than the ramp time.
    #[test]
    fn test_runup_time_floor() {
        let mut runup = RotorRunup::new(1.0);
        runup.update(1.0, 4.0, ControlMode::SpeedSetpoint, 0.5, 1.0);
        assert!(value_close(4.0, runup.runup_time()));
        assert!(value_close(0.25, runup.output()));

        runup.set_runup_time(-1.0);
        runup.update(1.0, 0.0, ControlMode::SpeedSetpoint, 0.5, 0.0);
        assert!(value_close(DEFAULT_RUNUP_TIME_S, runup.runup_time()));
    }
}
