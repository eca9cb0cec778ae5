// src/logging.rs

//! Crate-internal logging macros.
//!
//! With the `defmt` feature enabled, messages are forwarded to the `defmt`
//! logger of the firmware image. Without it, the macros expand to nothing
//! but still borrow their arguments so call sites stay warning-free.

macro_rules! rsc_debug {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($fmt $(, $arg)*);

        #[cfg(not(feature = "defmt"))]
        {
            $(let _ = &$arg;)*
        }
    }};
}

macro_rules! rsc_warn {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($fmt $(, $arg)*);

        #[cfg(not(feature = "defmt"))]
        {
            $(let _ = &$arg;)*
        }
    }};
}

pub(crate) use rsc_debug;
pub(crate) use rsc_warn;
