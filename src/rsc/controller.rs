// src/rsc/controller.rs

//! # Rotor Speed Controller
//!
//! [`RotorSpeedController`] owns the ramp and runup models, the selected
//! control mode and the output mapping. Its [`output`](RotorSpeedController::output)
//! method is called once per scheduler tick with the rotor control state
//! chosen by the flight mode layer, and runs the tick in a fixed order:
//!
//! 1. derive `dt` from the injected clock,
//! 2. update the ramp toward 0 or 1,
//! 3. select and evaluate the control law,
//! 4. update the runup estimate from the new ramp output,
//! 5. slew limit the output,
//! 6. write the pulse width to the servo output.
//!
//! The tick never fails. Invalid timing configuration is clamped, a missing
//! governor PID falls back to open-loop control, and servo write errors are
//! logged and otherwise ignored.

use crate::error::OutputError;
use crate::logging::{rsc_debug, rsc_warn};
use crate::pid::{GovernorPid, PidGovernor};
use crate::rsc::config::{GovernorConfig, PowerCurve, PwmMapping, RscConfig};
use crate::rsc::law::{ControlLaw, LawInputs};
use crate::rsc::ramp::RotorRamp;
use crate::rsc::runup::{RotorRunup, RunupPhase};
use crate::rsc::slew::slew_limit;
use crate::rsc::types::{ControlMode, PwmPolarity, RotorControlState};
use crate::traits::{ChannelFunction, ServoOutput, TimeSource};

/// Time step assumed for the first tick, in seconds.
pub const FIRST_TICK_DT_S: f32 = 0.001;

/// Helicopter main rotor speed controller.
///
/// ```
/// use rotor_speed_control::{
///     MockServo, MockTime, RotorControlState, RotorSpeedController, RscConfig,
/// };
///
/// let time = MockTime::new();
/// let mut rsc = RotorSpeedController::new(&time, MockServo::new(), RscConfig::new());
///
/// for _ in 0..100 {
///     time.advance(10_000);
///     rsc.output(RotorControlState::Active);
/// }
/// assert!(rsc.rotor_ramp_output() > 0.9);
/// assert!(!rsc.is_runup_complete());
/// ```
pub struct RotorSpeedController<C: TimeSource, S: ServoOutput, P: GovernorPid = PidGovernor> {
    clock: C,
    servo: S,
    pid: Option<P>,

    control_mode: ControlMode,
    critical_speed: f32,
    idle_output: f32,
    desired_speed: f32,
    load_feedforward: f32,
    power: PowerCurve,
    governor: GovernorConfig,
    pwm: PwmMapping,
    channel_function: ChannelFunction,
    default_channel: u8,

    ramp: RotorRamp,
    runup: RotorRunup,
    control_output: f32,
    last_update_us: Option<u64>,
}

impl<C: TimeSource, S: ServoOutput> RotorSpeedController<C, S, PidGovernor> {
    /// Creates a controller without a governor PID.
    ///
    /// Governor mode falls back to open-loop power output until a PID is
    /// installed with [`set_governor_pid`](Self::set_governor_pid).
    pub fn new(clock: C, servo: S, config: RscConfig) -> Self {
        Self::with_pid(clock, servo, config, None)
    }
}

impl<C: TimeSource, S: ServoOutput, P: GovernorPid> RotorSpeedController<C, S, P> {
    /// Creates a controller with an optional governor PID.
    pub fn with_pid(clock: C, servo: S, config: RscConfig, pid: Option<P>) -> Self {
        Self {
            clock,
            servo,
            pid,
            control_mode: config.control_mode,
            critical_speed: config.critical_speed,
            idle_output: config.idle_output,
            desired_speed: config.desired_speed,
            load_feedforward: 0.0,
            power: config.power,
            governor: GovernorConfig::new(),
            pwm: config.pwm,
            channel_function: config.channel_function,
            default_channel: config.default_channel,
            ramp: RotorRamp::new(config.ramp_time_s),
            runup: RotorRunup::new(config.runup_time_s),
            control_output: 0.0,
            last_update_us: None,
        }
    }

    /// Assigns the output function to its default channel.
    pub fn init_servo(&mut self) -> Result<(), OutputError> {
        self.servo
            .set_aux_channel_default(self.channel_function, self.default_channel)
    }

    /// Runs one control tick and writes the result to the servo output.
    ///
    /// Returns the pulse width written, or `None` in disabled mode where the
    /// output channel is left to other functions.
    pub fn output(&mut self, state: RotorControlState) -> Option<u16> {
        let dt = self.tick_dt();
        let last_control_output = self.control_output;

        let ramp_target = match state {
            RotorControlState::Active => 1.0,
            RotorControlState::Stop | RotorControlState::Idle => 0.0,
        };
        self.ramp.update(ramp_target, self.runup.output(), dt);

        let inputs = LawInputs {
            ramp_output: self.ramp.output(),
            idle_output: self.idle_output,
            desired_speed: self.desired_speed,
            load_feedforward: self.load_feedforward,
            power: self.power,
            governor: self.governor,
            previous_output: last_control_output,
            dt,
        };
        let law = ControlLaw::select(state, self.control_mode, &self.governor, self.pid.as_mut());
        self.control_output = law.evaluate(&inputs);

        self.runup.update(
            self.ramp.output(),
            self.ramp.ramp_time(),
            self.control_mode,
            self.critical_speed,
            dt,
        );

        self.control_output = slew_limit(
            self.control_output,
            last_control_output,
            self.power.slew_rate_pct_per_s,
            dt,
        );

        self.write_rsc(self.control_output)
    }

    fn tick_dt(&mut self) -> f32 {
        let dt = match self.last_update_us {
            Some(last) => self.clock.elapsed_since(last) as f32 / 1.0e6,
            None => FIRST_TICK_DT_S,
        };
        self.last_update_us = Some(self.clock.now_us());
        dt
    }

    fn write_rsc(&mut self, output: f32) -> Option<u16> {
        if self.control_mode == ControlMode::Disabled {
            return None;
        }
        let pwm = self.pwm.pulse_width(output);
        if let Err(error) = self.servo.set_output_pwm(self.channel_function, pwm) {
            rsc_warn!("rsc: output write failed: {}", error);
        }
        Some(pwm)
    }

    /// Sets the open-loop power curve and output slew rate.
    pub fn set_power_output_range(
        &mut self,
        power_low: f32,
        power_high: f32,
        power_negc: f32,
        slew_rate_pct_per_s: u16,
    ) {
        self.power = PowerCurve {
            power_low,
            power_high,
            power_negc,
            slew_rate_pct_per_s,
        };
    }

    /// Sets the governor state, setpoint, deadband and the latest RPM feedback.
    pub fn set_gov_enable(&mut self, enabled: bool, rpm: f32, deadband: f32, rpm_feedback: f32) {
        if enabled != self.governor.enabled {
            rsc_debug!("rsc: governor enabled {}", enabled);
        }
        self.governor = GovernorConfig {
            enabled,
            setpoint_rpm: rpm,
            deadband_rpm: deadband,
            feedback_rpm: rpm_feedback,
        };
    }

    /// Updates only the measured rotor RPM.
    pub fn set_rpm_feedback(&mut self, rpm_feedback: f32) {
        self.governor.feedback_rpm = rpm_feedback;
    }

    /// Installs or replaces the governor PID.
    pub fn set_governor_pid(&mut self, pid: P) {
        self.pid = Some(pid);
    }

    /// Removes the governor PID, reverting governor mode to open-loop output.
    pub fn clear_governor_pid(&mut self) -> Option<P> {
        self.pid.take()
    }

    /// Sets the control mode.
    pub fn set_control_mode(&mut self, mode: ControlMode) {
        if mode != self.control_mode {
            rsc_debug!("rsc: control mode {} -> {}", self.control_mode, mode);
        }
        self.control_mode = mode;
    }

    /// Sets the critical rotor speed as a fraction of full speed.
    pub fn set_critical_speed(&mut self, critical_speed: f32) {
        self.critical_speed = critical_speed;
    }

    /// Sets the idle output level.
    pub fn set_idle_output(&mut self, idle_output: f32) {
        self.idle_output = idle_output;
    }

    /// Sets the desired speed for passthrough and setpoint modes.
    pub fn set_desired_speed(&mut self, desired_speed: f32) {
        self.desired_speed = desired_speed;
    }

    /// Sets the estimated rotor load used by open-loop power control.
    pub fn set_load_feedforward(&mut self, load_feedforward: f32) {
        self.load_feedforward = load_feedforward;
    }

    /// Sets the ramp time in seconds.
    pub fn set_ramp_time(&mut self, ramp_time_s: f32) {
        self.ramp.set_ramp_time(ramp_time_s);
    }

    /// Sets the runup time in seconds.
    pub fn set_runup_time(&mut self, runup_time_s: f32) {
        self.runup.set_runup_time(runup_time_s);
    }

    /// Sets the minimum output pulse width.
    pub fn set_pwm_min(&mut self, pwm_min: u16) {
        self.pwm.pwm_min = pwm_min;
    }

    /// Sets the maximum output pulse width.
    pub fn set_pwm_max(&mut self, pwm_max: u16) {
        self.pwm.pwm_max = pwm_max;
    }

    /// Sets the output polarity from the signed reverse parameter.
    pub fn set_pwm_rev(&mut self, rev: i8) {
        self.pwm.polarity = PwmPolarity::from_param(rev);
    }

    /// Sets the output channel function and its default channel.
    pub fn set_channel_function(&mut self, function: ChannelFunction, default_channel: u8) {
        self.channel_function = function;
        self.default_channel = default_channel;
    }

    /// Last control output in [0, 1].
    pub fn control_output(&self) -> f32 {
        self.control_output
    }

    /// Commanded ramp output.
    pub fn rotor_ramp_output(&self) -> f32 {
        self.ramp.output()
    }

    /// Runup estimate of rotor speed.
    pub fn rotor_runup_output(&self) -> f32 {
        self.runup.output()
    }

    /// Rotor speed as a fraction of full speed.
    ///
    /// No rotor speed measurement is used yet, so this is the runup estimate.
    pub fn rotor_speed(&self) -> f32 {
        self.runup.output()
    }

    /// True once the rotor has run up and stayed above critical speed.
    pub fn is_runup_complete(&self) -> bool {
        self.runup.phase().is_complete()
    }

    /// Current run-up phase.
    pub fn runup_phase(&self) -> RunupPhase {
        self.runup.phase()
    }

    /// Current control mode.
    pub fn control_mode(&self) -> ControlMode {
        self.control_mode
    }

    /// Desired speed for passthrough and setpoint modes.
    pub fn desired_speed(&self) -> f32 {
        self.desired_speed
    }

    /// Idle output level.
    pub fn idle_output(&self) -> f32 {
        self.idle_output
    }

    /// Configured ramp time in seconds.
    pub fn ramp_time(&self) -> f32 {
        self.ramp.ramp_time()
    }

    /// Configured runup time in seconds.
    pub fn runup_time(&self) -> f32 {
        self.runup.runup_time()
    }

    /// Governor parameters and RPM feedback.
    pub fn governor(&self) -> &GovernorConfig {
        &self.governor
    }

    /// The governor PID, if installed.
    pub fn governor_pid(&self) -> Option<&P> {
        self.pid.as_ref()
    }

    /// The servo output sink.
    pub fn servo(&self) -> &S {
        &self.servo
    }

    /// Mutable access to the servo output sink.
    pub fn servo_mut(&mut self) -> &mut S {
        &mut self.servo
    }
}
