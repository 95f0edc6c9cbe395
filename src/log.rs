//! Crate-internal logging macros.
//!
//! Forward to `defmt` when the `defmt` feature is enabled, otherwise expand
//! to nothing. Arguments must implement `defmt::Format`.
//!
//! The warning macro is `warning!` since `warn` collides with the built-in
//! lint attribute.

macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);
    };
}

macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        defmt::trace!($($arg)*);
    };
}

macro_rules! warning {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)*);
    };
}

pub(crate) use {debug, trace, warning};
