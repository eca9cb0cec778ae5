// src/rpm.rs

//! # External RPM Backend
//!
//! A passive rotor RPM source. It does not sample anything itself; another
//! component (an ESC telemetry parser, a companion computer link) pushes
//! readings in with [`ExternalRpm::set_rpm`], and the governor reads them back
//! as feedback.

/// Rotor RPM reading pushed in from outside the controller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExternalRpm {
    rate_rpm: f32,
    last_reading_us: Option<u64>,
}

impl ExternalRpm {
    /// Creates a backend with no reading yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Periodic update hook. Readings arrive through [`set_rpm`](Self::set_rpm),
    /// so there is nothing to sample here.
    pub fn update(&mut self) {}

    /// Stores a reading taken at `now_us`.
    pub fn set_rpm(&mut self, now_us: u64, rpm: f32) {
        self.rate_rpm = rpm;
        self.last_reading_us = Some(now_us);
    }

    /// Last reported RPM, zero before the first reading.
    pub fn rpm(&self) -> f32 {
        self.rate_rpm
    }

    /// Time of the last reading.
    pub fn last_reading_us(&self) -> Option<u64> {
        self.last_reading_us
    }

    /// True when a reading arrived within `timeout_us` of `now_us`.
    pub fn is_healthy(&self, now_us: u64, timeout_us: u64) -> bool {
        match self.last_reading_us {
            Some(last) => now_us.saturating_sub(last) <= timeout_us,
            None => false,
        }
    }

    /// The last reading if it is still fresh.
    pub fn healthy_rpm(&self, now_us: u64, timeout_us: u64) -> Option<f32> {
        if self.is_healthy(now_us, timeout_us) {
            Some(self.rate_rpm)
        } else {
            None
        }
    }
}
