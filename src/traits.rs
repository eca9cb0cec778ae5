// src/traits.rs

//! # Hardware Abstraction Traits
//!
//! The rotor speed controller never touches hardware directly. The clock and
//! the servo output sink are injected through these traits, so the firmware
//! supplies board implementations and host tests supply the doubles in
//! [`mock`](crate::mock).

use crate::error::OutputError;

/// Monotonic time source for the control loop.
pub trait TimeSource {
    /// Returns current time in microseconds since system start.
    fn now_us(&self) -> u64;

    /// Returns elapsed time in microseconds since a reference point.
    ///
    /// Uses saturating subtraction so a misbehaving clock yields zero
    /// rather than wrapping.
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}

/// Identifier of an output channel function, e.g. the main rotor ESC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelFunction(pub u16);

impl ChannelFunction {
    /// Helicopter rotor speed control output.
    pub const HELI_RSC: ChannelFunction = ChannelFunction(31);
}

/// Servo output sink that owns the PWM channels.
pub trait ServoOutput {
    /// Assigns `function` to `channel` unless the user already mapped it elsewhere.
    fn set_aux_channel_default(
        &mut self,
        function: ChannelFunction,
        channel: u8,
    ) -> Result<(), OutputError>;

    /// Writes a pulse width in microseconds to the channel carrying `function`.
    fn set_output_pwm(&mut self, function: ChannelFunction, pwm: u16) -> Result<(), OutputError>;
}

impl<S: ServoOutput + ?Sized> ServoOutput for &mut S {
    fn set_aux_channel_default(
        &mut self,
        function: ChannelFunction,
        channel: u8,
    ) -> Result<(), OutputError> {
        (**self).set_aux_channel_default(function, channel)
    }

    fn set_output_pwm(&mut self, function: ChannelFunction, pwm: u16) -> Result<(), OutputError> {
        (**self).set_output_pwm(function, pwm)
    }
}
