// src/rsc/law.rs

//! # Control Law Selection
//!
//! Each tick the controller picks exactly one [`ControlLaw`] from the rotor
//! control state, the control mode and the governor status, then evaluates
//! it. Keeping selection separate from evaluation means each law can be
//! exercised on its own, and the missing-PID fallback is decided in one place.

use crate::logging::rsc_warn;
use crate::number::Number;
use crate::pid::GovernorPid;
use crate::rsc::config::{GovernorConfig, PowerCurve};
use crate::rsc::types::{ControlMode, RotorControlState};

/// Scale applied to the RPM error before it enters the governor PID.
pub const GOVERNOR_ERROR_SCALE: f32 = 100.0;

/// Snapshot of the values a control law reads during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LawInputs {
    /// Ramp output after this tick's ramp update.
    pub ramp_output: f32,
    /// Idle output level.
    pub idle_output: f32,
    /// Desired speed for passthrough control.
    pub desired_speed: f32,
    /// Estimated rotor load, positive for positive collective.
    pub load_feedforward: f32,
    /// Open-loop power calibration.
    pub power: PowerCurve,
    /// Governor parameters and RPM feedback.
    pub governor: GovernorConfig,
    /// Control output of the previous tick.
    pub previous_output: f32,
    /// Tick duration in seconds.
    pub dt: f32,
}

/// Control law used to compute this tick's output.
pub enum ControlLaw<'a, P: GovernorPid> {
    /// Output forced to zero.
    Stop,
    /// Output set to the idle level.
    Idle,
    /// Ramped interpolation from idle to the desired speed.
    SpeedPassthrough,
    /// Open-loop power curve.
    OpenLoopPower,
    /// Previous output held unchanged.
    Hold,
    /// Governor mode with the governor disengaged. Passthrough output while
    /// the PID, if any, is fed a neutral input.
    GovernorBypass(Option<&'a mut P>),
    /// Closed-loop RPM governor.
    ClosedLoop(&'a mut P),
}

impl<'a, P: GovernorPid> ControlLaw<'a, P> {
    /// Selects the control law for one tick.
    pub fn select(
        state: RotorControlState,
        mode: ControlMode,
        governor: &GovernorConfig,
        pid: Option<&'a mut P>,
    ) -> Self {
        match state {
            RotorControlState::Stop => ControlLaw::Stop,
            RotorControlState::Idle => ControlLaw::Idle,
            RotorControlState::Active => match mode {
                ControlMode::Disabled => ControlLaw::Hold,
                ControlMode::SpeedPassthrough | ControlMode::SpeedSetpoint => {
                    ControlLaw::SpeedPassthrough
                }
                ControlMode::OpenLoopPowerOutput => ControlLaw::OpenLoopPower,
                ControlMode::Governor if !governor.enabled => ControlLaw::GovernorBypass(pid),
                ControlMode::Governor if governor.within_deadband() => ControlLaw::Hold,
                ControlMode::Governor => match pid {
                    Some(pid) => ControlLaw::ClosedLoop(pid),
                    None => ControlLaw::OpenLoopPower,
                },
            },
        }
    }

    /// Computes the control output.
    pub fn evaluate(self, inputs: &LawInputs) -> f32 {
        match self {
            ControlLaw::Stop => 0.0,
            ControlLaw::Idle => inputs.idle_output,
            ControlLaw::SpeedPassthrough => speed_passthrough_output(inputs),
            ControlLaw::OpenLoopPower => open_loop_power_output(inputs),
            ControlLaw::Hold => inputs.previous_output,
            ControlLaw::GovernorBypass(pid) => {
                if let Some(pid) = pid {
                    pid.set_filtered_input(0.0, inputs.dt);
                }
                speed_passthrough_output(inputs)
            }
            ControlLaw::ClosedLoop(pid) => closed_loop_output(pid, inputs),
        }
    }
}

/// Interpolates from idle to the desired speed by ramp progress.
pub fn speed_passthrough_output(inputs: &LawInputs) -> f32 {
    inputs.idle_output + inputs.ramp_output * (inputs.desired_speed - inputs.idle_output)
}

/// Open-loop output from estimated load.
///
/// Positive load (right side of the V-curve) interpolates toward
/// `power_high`, negative load toward `power_negc`. The result ramps up from
/// idle with the ramp output.
pub fn open_loop_power_output(inputs: &LawInputs) -> f32 {
    let power = &inputs.power;
    let load = inputs.load_feedforward;
    let base = power.power_low - inputs.idle_output;

    let demand = if load >= 0.0 {
        base + (power.power_high - power.power_low) * load
    } else {
        base - (power.power_negc - power.power_low) * load
    };

    inputs.idle_output + inputs.ramp_output * demand
}

/// Closed-loop governor output.
///
/// The setpoint ramps with the ramp output so the governor engages smoothly.
/// The result is the PID output alone, clamped to [0, 1]. A non-finite RPM
/// error is not fed to the PID, and a non-finite PID output is discarded.
/// In both cases the previous output is held.
pub fn closed_loop_output<P: GovernorPid>(pid: &mut P, inputs: &LawInputs) -> f32 {
    let governor = &inputs.governor;
    let target_rpm = inputs.ramp_output * governor.setpoint_rpm;
    let error = (target_rpm - governor.feedback_rpm) / GOVERNOR_ERROR_SCALE;
    if !error.is_finite() {
        rsc_warn!("rsc: governor error not finite, holding output");
        return inputs.previous_output;
    }

    pid.set_filtered_input(error, inputs.dt);
    let output = pid.output();
    if !output.is_finite() {
        rsc_warn!("rsc: governor output not finite, holding output");
        return inputs.previous_output;
    }
    Number::clamp(output, 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    /// PID double that echoes its last input scaled by a gain.
    struct EchoPid {
        gain: f32,
        last_input: Option<f32>,
    }

    impl EchoPid {
        fn new(gain: f32) -> Self {
            Self {
                gain,
                last_input: None,
            }
        }
    }

    impl GovernorPid for EchoPid {
        fn set_filtered_input(&mut self, input: f32, _dt: f32) {
            self.last_input = Some(input);
        }

        fn output(&self) -> f32 {
            self.gain * self.last_input.unwrap_or(0.0)
        }
    }

    fn inputs() -> LawInputs {
        LawInputs {
            ramp_output: 1.0,
            idle_output: 0.1,
            desired_speed: 0.7,
            load_feedforward: 0.5,
            power: PowerCurve {
                power_low: 0.2,
                power_high: 0.8,
                power_negc: 0.6,
                slew_rate_pct_per_s: 0,
            },
            governor: GovernorConfig {
                enabled: true,
                setpoint_rpm: 1500.0,
                deadband_rpm: 20.0,
                feedback_rpm: 1400.0,
            },
            previous_output: 0.42,
            dt: 0.01,
        }
    }

    /// Test the positive load branch of the power curve.
    #[test]
    fn test_open_loop_positive_load() {
        let output = open_loop_power_output(&inputs());
        assert!(value_close(0.5, output), "0.1 + (0.1 + 0.6 * 0.5) = 0.5");
    }

    /// Test the negative collective branch of the power curve.
    #[test]
    fn test_open_loop_negative_load() {
        let mut data = inputs();
        data.load_feedforward = -0.5;
        let output = open_loop_power_output(&data);
        assert!(value_close(0.4, output), "0.1 + (0.1 + 0.4 * 0.5) = 0.4");
    }

    /// Test that the power curve ramps up from idle.
    #[test]
    fn test_open_loop_scaled_by_ramp() {
        let mut data = inputs();
        data.ramp_output = 0.0;
        assert!(value_close(0.1, open_loop_power_output(&data)));
        data.ramp_output = 0.5;
        assert!(value_close(0.3, open_loop_power_output(&data)));
    }

    /// Test the passthrough interpolation between idle and desired speed.
    #[test]
    fn test_speed_passthrough() {
        let mut data = inputs();
        assert!(value_close(0.7, speed_passthrough_output(&data)));
        data.ramp_output = 0.5;
        assert!(value_close(0.4, speed_passthrough_output(&data)));
    }

    /// Test the closed loop error scaling and output clamping.
    #[test]
    fn test_closed_loop_output() {
        let mut pid = EchoPid::new(0.5);
        let data = inputs();
        let output = closed_loop_output(&mut pid, &data);
        assert!(value_close(1.0, pid.last_input.unwrap()), "(1500 - 1400) / 100");
        assert!(value_close(0.5, output));

        let mut pid = EchoPid::new(10.0);
        assert!(value_close(1.0, closed_loop_output(&mut pid, &data)));

        let mut overspeed = data;
        overspeed.governor.feedback_rpm = 1700.0;
        let mut pid = EchoPid::new(1.0);
        assert!(
            value_close(0.0, closed_loop_output(&mut pid, &overspeed)),
            "Negative PID output is clamped to zero."
        );
    }

    /// Test that a NaN RPM feedback holds the output and skips the PID.
    #[test]
    fn test_closed_loop_nan_feedback() {
        let mut pid = EchoPid::new(1.0);
        let mut data = inputs();
        data.governor.feedback_rpm = f32::NAN;

        let output = closed_loop_output(&mut pid, &data);
        assert!(value_close(0.42, output), "Previous output is held.");
        assert_eq!(pid.last_input, None, "PID is not fed a NaN error.");
    }

    /// Test that a non-finite PID output is discarded.
    #[test]
    fn test_closed_loop_infinite_pid_output() {
        let mut pid = EchoPid::new(f32::INFINITY);
        let output = closed_loop_output(&mut pid, &inputs());
        assert!(value_close(0.42, output), "Previous output is held.");
    }

    /// Test that the governor target follows the ramp.
    #[test]
    fn test_closed_loop_target_is_ramped() {
        let mut pid = EchoPid::new(1.0);
        let mut data = inputs();
        data.ramp_output = 0.5;
        data.governor.feedback_rpm = 700.0;
        closed_loop_output(&mut pid, &data);
        assert!(value_close(0.5, pid.last_input.unwrap()), "(750 - 700) / 100");
    }

    /// Test law selection for every non-governor combination.
    #[test]
    fn test_select_without_governor() {
        let governor = GovernorConfig::new();
        let select = |state, mode| ControlLaw::<EchoPid>::select(state, mode, &governor, None);

        for mode in [
            ControlMode::Disabled,
            ControlMode::SpeedPassthrough,
            ControlMode::OpenLoopPowerOutput,
            ControlMode::Governor,
        ] {
            assert!(matches!(
                select(RotorControlState::Stop, mode),
                ControlLaw::Stop
            ));
            assert!(matches!(
                select(RotorControlState::Idle, mode),
                ControlLaw::Idle
            ));
        }

        let active = RotorControlState::Active;
        assert!(matches!(
            select(active, ControlMode::Disabled),
            ControlLaw::Hold
        ));
        assert!(matches!(
            select(active, ControlMode::SpeedPassthrough),
            ControlLaw::SpeedPassthrough
        ));
        assert!(matches!(
            select(active, ControlMode::SpeedSetpoint),
            ControlLaw::SpeedPassthrough
        ));
        assert!(matches!(
            select(active, ControlMode::OpenLoopPowerOutput),
            ControlLaw::OpenLoopPower
        ));
    }

    /// Test governor law selection, including the missing PID fallback.
    #[test]
    fn test_select_governor() {
        let active = RotorControlState::Active;
        let mode = ControlMode::Governor;
        let mut pid = EchoPid::new(1.0);
        let mut governor = inputs().governor;

        let law = ControlLaw::select(active, mode, &governor, Some(&mut pid));
        assert!(matches!(law, ControlLaw::ClosedLoop(_)));

        let law = ControlLaw::<EchoPid>::select(active, mode, &governor, None);
        assert!(matches!(law, ControlLaw::OpenLoopPower));

        governor.feedback_rpm = 1490.0;
        let law = ControlLaw::select(active, mode, &governor, Some(&mut pid));
        assert!(matches!(law, ControlLaw::Hold));

        governor.enabled = false;
        let law = ControlLaw::select(active, mode, &governor, Some(&mut pid));
        assert!(matches!(law, ControlLaw::GovernorBypass(Some(_))));
    }

    /// Test that a disengaged governor feeds the PID a neutral input.
    #[test]
    fn test_governor_bypass_neutral_input() {
        let mut pid = EchoPid::new(1.0);
        pid.last_input = Some(3.0);
        let data = inputs();

        let output = ControlLaw::GovernorBypass(Some(&mut pid)).evaluate(&data);
        assert!(value_close(0.7, output), "Passthrough to desired speed.");
        assert_eq!(pid.last_input, Some(0.0));
        assert!(value_close(0.0, pid.output()));
    }

    /// Test that hold returns the previous output.
    #[test]
    fn test_hold() {
        let data = inputs();
        let output = ControlLaw::<EchoPid>::Hold.evaluate(&data);
        assert!(value_close(0.42, output));
        assert!(value_close(0.0, ControlLaw::<EchoPid>::Stop.evaluate(&data)));
        assert!(value_close(0.1, ControlLaw::<EchoPid>::Idle.evaluate(&data)));
    }
}
