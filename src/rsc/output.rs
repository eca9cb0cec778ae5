// src/rsc/output.rs

//! Mapping from normalized control output to a servo pulse width.

use crate::rsc::config::PwmMapping;
use crate::rsc::types::PwmPolarity;

impl PwmMapping {
    /// Converts a normalized output in [0, 1] to a pulse width in microseconds.
    ///
    /// The span is truncated to whole microseconds before the polarity is
    /// applied. Out of range outputs are clamped.
    pub fn pulse_width(&self, output: f32) -> u16 {
        let span = self.pwm_max.saturating_sub(self.pwm_min);
        let delta = (output.clamp(0.0, 1.0) * f32::from(span)) as u16;

        match self.polarity {
            PwmPolarity::Normal => self.pwm_min.saturating_add(delta),
            PwmPolarity::Reversed => self.pwm_max.saturating_sub(delta),
        }
    }
}
