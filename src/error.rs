// src/error.rs

//! # Error Types
//!
//! The control tick itself never fails. Errors only surface at the edges:
//! converting raw parameter values and talking to the servo output sink.

use core::fmt;

/// Errors reported by a [`ServoOutput`](crate::ServoOutput) implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// No output channel is assigned to the requested function.
    ChannelUnassigned {
        /// Raw channel function identifier.
        function: u16,
    },
    /// The requested channel index does not exist on this board.
    InvalidChannel {
        /// Zero-based channel index.
        channel: u8,
    },
    /// The hardware rejected the write.
    WriteFailed,
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::ChannelUnassigned { function } => {
                write!(f, "No output channel assigned to function {}", function)
            }
            OutputError::InvalidChannel { channel } => {
                write!(f, "Output channel {} does not exist", channel)
            }
            OutputError::WriteFailed => write!(f, "Servo output write failed"),
        }
    }
}

/// Errors converting raw parameter values into typed configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParameterError {
    /// Unknown rotor speed control mode value.
    InvalidControlMode(u8),
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::InvalidControlMode(value) => {
                write!(f, "Invalid rotor control mode: {}", value)
            }
        }
    }
}
