// src/rsc/config.rs

//! Configuration for the rotor speed controller.
//!
//! Defaults follow the stock helicopter parameter set. They are a starting
//! point only and must be checked against the ESC and drivetrain in use.

use crate::rsc::types::{ControlMode, PwmPolarity};
use crate::traits::ChannelFunction;

/// Power output calibration for open-loop control.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerCurve {
    /// Output at zero load.
    pub power_low: f32,
    /// Output at full positive collective load.
    pub power_high: f32,
    /// Output at full negative collective load.
    pub power_negc: f32,
    /// Maximum output change in percent per second. Zero disables limiting.
    pub slew_rate_pct_per_s: u16,
}

impl PowerCurve {
    /// Creates the default power curve with slew limiting disabled.
    pub fn new() -> Self {
        Self {
            power_low: 0.2,
            power_high: 0.4,
            power_negc: 0.4,
            slew_rate_pct_per_s: 0,
        }
    }
}

impl Default for PowerCurve {
    fn default() -> Self {
        Self::new()
    }
}

/// Closed-loop governor parameters and the latest RPM feedback.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GovernorConfig {
    /// Governor engaged.
    pub enabled: bool,
    /// Target rotor RPM at full ramp.
    pub setpoint_rpm: f32,
    /// RPM error window with no corrective action.
    pub deadband_rpm: f32,
    /// Measured rotor RPM, supplied each tick.
    pub feedback_rpm: f32,
}

impl GovernorConfig {
    /// Creates a disengaged governor.
    pub fn new() -> Self {
        Self {
            enabled: false,
            setpoint_rpm: 1500.0,
            deadband_rpm: 50.0,
            feedback_rpm: 0.0,
        }
    }

    /// True when the feedback is close enough to the setpoint to hold output.
    pub fn within_deadband(&self) -> bool {
        num_traits::Float::abs(self.setpoint_rpm - self.feedback_rpm) < self.deadband_rpm
    }
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Pulse width range and polarity of the output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PwmMapping {
    /// Pulse width at zero output, in microseconds.
    pub pwm_min: u16,
    /// Pulse width at full output, in microseconds.
    pub pwm_max: u16,
    /// Output polarity.
    pub polarity: PwmPolarity,
}

impl PwmMapping {
    /// Creates the standard 1000-2000 µs mapping with normal polarity.
    pub fn new() -> Self {
        Self {
            pwm_min: 1000,
            pwm_max: 2000,
            polarity: PwmPolarity::Normal,
        }
    }
}

impl Default for PwmMapping {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete rotor speed controller configuration.
///
/// ```
/// use rotor_speed_control::{ControlMode, RscConfig};
///
/// let mut config = RscConfig::new();
/// config.control_mode = ControlMode::OpenLoopPowerOutput;
/// config.ramp_time_s = 2.0;
/// config.runup_time_s = 8.0;
/// config.power.slew_rate_pct_per_s = 50;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RscConfig {
    /// Output control method.
    pub control_mode: ControlMode,
    /// Time to ramp the commanded speed from zero to full, in seconds.
    pub ramp_time_s: f32,
    /// Time for the rotor to physically reach full speed, in seconds.
    pub runup_time_s: f32,
    /// Fraction of full speed below which run-up is considered lost.
    pub critical_speed: f32,
    /// Output while the rotor is idling.
    pub idle_output: f32,
    /// Desired speed output for the speed passthrough and setpoint modes.
    pub desired_speed: f32,
    /// Open-loop power calibration and slew rate.
    pub power: PowerCurve,
    /// Output pulse width mapping.
    pub pwm: PwmMapping,
    /// Channel function carrying the output.
    pub channel_function: ChannelFunction,
    /// Zero-based channel the function is assigned to by default.
    pub default_channel: u8,
}

impl RscConfig {
    /// Creates a configuration with the stock helicopter defaults.
    pub fn new() -> Self {
        Self {
            control_mode: ControlMode::SpeedPassthrough,
            ramp_time_s: 1.0,
            runup_time_s: 10.0,
            critical_speed: 0.5,
            idle_output: 0.0,
            desired_speed: 0.7,
            power: PowerCurve::new(),
            pwm: PwmMapping::new(),
            channel_function: ChannelFunction::HELI_RSC,
            default_channel: 7,
        }
    }
}

impl Default for RscConfig {
    fn default() -> Self {
        Self::new()
    }
}
