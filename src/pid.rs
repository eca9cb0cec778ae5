// src/pid.rs

//! # PID Control Module
//!
//! This module provides the compute function, control data structure and
//! governor wrapper used for closed-loop rotor RPM control.

pub mod governor;
pub use governor::*;
