// src/rsc.rs

//! # Rotor Speed Control Module
//!
//! Helicopter main rotor speed control: ramp and runup models, control law
//! selection, slew limiting and pulse width mapping, driven by
//! [`RotorSpeedController`].

pub mod config;
pub use config::*;
pub mod controller;
pub use controller::*;
pub mod law;
pub use law::*;
pub mod output;
pub mod ramp;
pub use ramp::*;
pub mod runup;
pub use runup::*;
pub mod slew;
pub use slew::*;
pub mod types;
pub use types::*;
