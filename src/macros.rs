//! Diagnostic output.
//!
//! Routed to `defmt::warn!` when the `defmt` feature is enabled, compiled out
//! otherwise. Only failure paths use it.

macro_rules! diag {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)*);
    };
}

pub(crate) use diag;
