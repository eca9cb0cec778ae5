// src/lib.rs

//! # Helicopter Rotor Speed Controller
//!
//! This crate provides a `no_std`, no-alloc rotor speed controller (RSC) for
//! helicopter main rotors. Given the rotor control state chosen by the flight
//! mode layer, it computes a normalized ESC or throttle servo command and
//! maps it to an output pulse width.
//!
//! ## Overview
//!
//! - A ramp model slews the commanded rotor speed toward stop or full speed.
//! - A runup model lags the ramp to estimate actual rotor speed, and tracks
//!   whether run-up to flight speed is complete.
//! - A control law chosen from the control mode produces the output: speed
//!   passthrough, an open-loop power curve, or a closed-loop RPM governor
//!   built on `piddiy`.
//! - The output is slew limited and written through an injected
//!   [`ServoOutput`], with time taken from an injected [`TimeSource`].
//!
//! ## Usage
//!
//! ```
//! use rotor_speed_control::{
//!     ControlMode, MockServo, MockTime, PidGovernor, RotorControlState,
//!     RotorSpeedController, RscConfig,
//! };
//!
//! let time = MockTime::new();
//! let mut config = RscConfig::new();
//! config.control_mode = ControlMode::Governor;
//!
//! let mut rsc = RotorSpeedController::with_pid(
//!     &time,
//!     MockServo::new(),
//!     config,
//!     Some(PidGovernor::new()),
//! );
//! rsc.init_servo().unwrap();
//! rsc.set_gov_enable(true, 1500.0, 20.0, 0.0);
//!
//! time.advance(10_000);
//! let pwm = rsc.output(RotorControlState::Active);
//! assert!(pwm.is_some());
//! ```

#![no_std]
#![deny(missing_docs)]

mod logging;

pub mod error;
pub mod mock;
pub mod number;
pub mod pid;
pub mod rpm;
pub mod rsc;
pub mod traits;

#[doc(inline)]
pub use error::*;
#[doc(inline)]
pub use mock::*;
#[doc(inline)]
pub use number::*;
#[doc(inline)]
pub use pid::*;
#[doc(inline)]
pub use rpm::*;
#[doc(inline)]
pub use rsc::*;
#[doc(inline)]
pub use traits::*;

#[cfg(test)]
mod test_utils;
