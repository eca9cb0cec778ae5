// src/pid/governor.rs

//! # Rotor Governor PID Module
//!
//! This module provides a compute function and control data structure for
//! the rotor RPM governor, plus [`PidGovernor`], a filtered-input PID that
//! implements the [`GovernorPid`] seam consumed by the rotor speed controller.
//!
//! The governor does not track a set point of its own. The controller feeds
//! it an already formed, scaled RPM error, so the compute callback treats the
//! filtered input as the error term directly.

use core::f32::consts::PI;

use num_traits::Float;
use piddiy::PidController;

use crate::number::Number;

/// Filtered-input PID primitive driven by the rotor governor.
///
/// Implementations keep their filter and integrator state between calls.
pub trait GovernorPid {
    /// Feeds a new raw input through the input filter and steps the PID.
    fn set_filtered_input(&mut self, input: f32, dt: f32);

    /// Returns the PID output computed by the last input.
    fn output(&self) -> f32;
}

/// Control data for the governor PID compute callback.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GovernorControlData {
    /// Low-pass filtered governor error.
    pub input: f32,
    /// The time delta since the last computation.
    pub dt: f32,
    /// The maximum allowed magnitude of the integral term.
    pub integral_limit: f32,
}

/// Governor PID compute callback.
pub fn compute_governor(
    pid: &mut PidController<f32, GovernorControlData>,
    data: GovernorControlData,
) -> (f32, f32, f32) {
    let error = data.input;
    let integral = Number::clamp(
        pid.integral + error * data.dt,
        -data.integral_limit,
        data.integral_limit,
    );
    let derivative = if data.dt > 0.0 {
        (error - pid.error) / data.dt
    } else {
        0.0
    };

    (error, integral, derivative)
}

/// Gains and filter settings for [`PidGovernor`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PidGovernorConfig {
    /// Proportional gain.
    pub kp: f32,
    /// Integral gain.
    pub ki: f32,
    /// Derivative gain.
    pub kd: f32,
    /// Integrator limit. The sign is ignored.
    pub imax: f32,
    /// Input filter cutoff in Hz. Zero disables filtering.
    pub filt_hz: f32,
}

impl PidGovernorConfig {
    /// Creates a configuration with conservative starting gains.
    /// These should be tuned for the airframe and ESC.
    pub fn new() -> Self {
        Self {
            kp: 0.2,
            ki: 0.2,
            kd: 0.0,
            imax: 1.0,
            filt_hz: 20.0,
        }
    }
}

impl Default for PidGovernorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// PID governor built on `piddiy` with a first-order input filter.
pub struct PidGovernor {
    pid: PidController<f32, GovernorControlData>,
    imax: f32,
    filt_hz: f32,
    filtered_input: Option<f32>,
    output: f32,
}

impl PidGovernor {
    /// Creates a new governor using the provided configuration.
    pub fn with_config(config: PidGovernorConfig) -> Self {
        let mut pid = PidController::new();
        pid.compute_fn(compute_governor)
            .set_point(0.0)
            .kp(config.kp)
            .ki(config.ki)
            .kd(config.kd);

        PidGovernor {
            pid,
            imax: Float::abs(config.imax),
            filt_hz: config.filt_hz,
            filtered_input: None,
            output: 0.0,
        }
    }

    /// Creates a new governor with default settings.
    pub fn new() -> Self {
        Self::with_config(PidGovernorConfig::new())
    }

    /// Current filtered input, if any input has been received.
    pub fn filtered_input(&self) -> Option<f32> {
        self.filtered_input
    }

    fn filter_alpha(&self, dt: f32) -> f32 {
        if self.filt_hz <= 0.0 || dt <= 0.0 {
            return 1.0;
        }
        let rc = 1.0 / (2.0 * PI * self.filt_hz);
        dt / (dt + rc)
    }
}

impl Default for PidGovernor {
    fn default() -> Self {
        Self::new()
    }
}

impl GovernorPid for PidGovernor {
    fn set_filtered_input(&mut self, input: f32, dt: f32) {
        // The first sample seeds the filter.
        let filtered = match self.filtered_input {
            None => input,
            Some(previous) => previous + self.filter_alpha(dt) * (input - previous),
        };
        self.filtered_input = Some(filtered);

        let data = GovernorControlData {
            input: filtered,
            dt,
            integral_limit: self.imax,
        };
        self.output = self.pid.compute(data);
    }

    fn output(&self) -> f32 {
        self.output
    }
}
