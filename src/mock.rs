// src/mock.rs

//! # Host Test Doubles
//!
//! Controllable stand-ins for the clock and the servo output sink. They are
//! always compiled so downstream crates can drive the controller on the host.

use core::cell::Cell;

use crate::error::OutputError;
use crate::traits::{ChannelFunction, ServoOutput, TimeSource};

/// Mock time source with manual advancement.
///
/// Interior mutability lets a test keep advancing the clock while the
/// controller holds a shared reference to it.
///
/// ```
/// use rotor_speed_control::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// time.advance(1000);
/// assert_eq!(time.now_us(), 1000);
/// ```
#[derive(Debug, Default)]
pub struct MockTime {
    current_us: Cell<u64>,
}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self {
            current_us: Cell::new(0),
        }
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub fn with_initial(us: u64) -> Self {
        Self {
            current_us: Cell::new(us),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, us: u64) {
        self.current_us.set(us);
    }

    /// Advances the current time by the specified amount.
    pub fn advance(&self, us: u64) {
        self.current_us.set(self.current_us.get() + us);
    }
}

impl TimeSource for MockTime {
    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}

/// Mock servo output that records what the controller wrote.
#[derive(Debug, Default, Clone)]
pub struct MockServo {
    /// Last pulse width written, with its channel function.
    pub last_output: Option<(ChannelFunction, u16)>,
    /// Number of successful pulse writes.
    pub write_count: u32,
    /// Default channel assignment requested at initialization.
    pub default_channel: Option<(ChannelFunction, u8)>,
    /// When set, every call fails with this error.
    pub fail_with: Option<OutputError>,
}

impl MockServo {
    /// Creates a mock with nothing written yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last pulse width written, if any.
    pub fn last_pwm(&self) -> Option<u16> {
        self.last_output.map(|(_, pwm)| pwm)
    }
}

impl ServoOutput for MockServo {
    fn set_aux_channel_default(
        &mut self,
        function: ChannelFunction,
        channel: u8,
    ) -> Result<(), OutputError> {
        if let Some(error) = self.fail_with {
            return Err(error);
        }
        self.default_channel = Some((function, channel));
        Ok(())
    }

    fn set_output_pwm(&mut self, function: ChannelFunction, pwm: u16) -> Result<(), OutputError> {
        if let Some(error) = self.fail_with {
            return Err(error);
        }
        self.last_output = Some((function, pwm));
        self.write_count += 1;
        Ok(())
    }
}
