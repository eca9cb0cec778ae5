// src/rsc/types.rs

//! Rotor control state and control mode enumerations.

use crate::error::ParameterError;

/// Rotor control state commanded by the flight mode and arming layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RotorControlState {
    /// Rotor stopped, output forced to zero.
    Stop,
    /// Rotor at idle output, ramp decaying to zero.
    Idle,
    /// Rotor spooled up toward full speed.
    Active,
}

/// Method used to produce the rotor speed control output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlMode {
    /// No rotor speed control. The output channel is left untouched.
    Disabled = 0,
    /// Desired speed is passed through from the pilot input.
    #[default]
    SpeedPassthrough = 1,
    /// Desired speed is a fixed setpoint.
    SpeedSetpoint = 2,
    /// Output follows an open-loop power curve keyed on estimated load.
    OpenLoopPowerOutput = 3,
    /// Closed-loop RPM governor.
    Governor = 4,
}

impl TryFrom<u8> for ControlMode {
    type Error = ParameterError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ControlMode::Disabled),
            1 => Ok(ControlMode::SpeedPassthrough),
            2 => Ok(ControlMode::SpeedSetpoint),
            3 => Ok(ControlMode::OpenLoopPowerOutput),
            4 => Ok(ControlMode::Governor),
            other => Err(ParameterError::InvalidControlMode(other)),
        }
    }
}

impl From<ControlMode> for u8 {
    fn from(mode: ControlMode) -> u8 {
        mode as u8
    }
}

/// Output pulse polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PwmPolarity {
    /// Higher output means a longer pulse.
    #[default]
    Normal,
    /// Higher output means a shorter pulse.
    Reversed,
}

impl PwmPolarity {
    /// Converts the signed reverse parameter. Zero and positive values are normal.
    pub fn from_param(value: i8) -> Self {
        if value >= 0 {
            PwmPolarity::Normal
        } else {
            PwmPolarity::Reversed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that every parameter value maps to its mode and back.
    #[test]
    fn test_control_mode_from_param() {
        for value in 0u8..=4 {
            let mode = ControlMode::try_from(value).unwrap();
            assert_eq!(u8::from(mode), value);
        }
        assert_eq!(
            ControlMode::try_from(5),
            Err(ParameterError::InvalidControlMode(5))
        );
    }

    /// Test the sign convention of the reverse parameter.
    #[test]
    fn test_polarity_from_param() {
        assert_eq!(PwmPolarity::from_param(1), PwmPolarity::Normal);
        assert_eq!(PwmPolarity::from_param(0), PwmPolarity::Normal);
        assert_eq!(PwmPolarity::from_param(-1), PwmPolarity::Reversed);
    }
}
