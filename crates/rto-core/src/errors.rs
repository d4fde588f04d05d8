//! Error types for the RTO attendance calendar.
//!
//! Every fallible operation in the workspace returns the single
//! `thiserror`-derived [`Error`] enum.  Precondition and invariant checks go
//! through the `ensure!`, `invariant!`, and `fail!` macros defined here so the
//! call sites stay one line long.

use thiserror::Error;

/// The top-level error type used throughout the workspace.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A validation mode that no strategy implements was requested.
    #[error("unsupported validation mode '{requested}'; valid modes: {valid}")]
    UnsupportedMode {
        /// The mode string that was asked for.
        requested: String,
        /// Comma-separated list of the supported modes.
        valid: String,
    },

    /// A policy parameter is outside its allowed range.
    #[error("invalid policy: {0}")]
    InvalidPolicy(String),

    /// An internal invariant was broken.  Always a caller bug.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Date-related error (out of range, malformed).
    #[error("date error: {0}")]
    Date(String),

    /// Malformed settings or other textual input.
    #[error("parse error: {0}")]
    Parse(String),

    /// Week or window index outside the tracked period.
    #[error("index ({index}) out of range [0, {size})")]
    IndexOutOfRange {
        /// The index that was out of range.
        index: usize,
        /// The size of the container.
        size: usize,
    },

    /// General runtime error (raised by `fail!`).
    #[error("{0}")]
    Runtime(String),
}

/// Shorthand `Result` type used throughout the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::InvalidPolicy(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use rto_core::{ensure, errors::Error};
/// fn threshold(x: f64) -> rto_core::errors::Result<f64> {
///     ensure!(x > 0.0 && x <= 1.0, "threshold must be in (0, 1], got {x}");
///     Ok(x)
/// }
/// assert!(threshold(0.6).is_ok());
/// assert!(matches!(threshold(1.5), Err(Error::InvalidPolicy(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidPolicy(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::InvariantViolation(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use rto_core::{invariant, errors::Error};
/// fn non_empty(weeks: &[u32]) -> rto_core::errors::Result<usize> {
///     invariant!(!weeks.is_empty(), "window has no weeks");
///     Ok(weeks.len())
/// }
/// assert!(non_empty(&[3]).is_ok());
/// assert!(matches!(non_empty(&[]), Err(Error::InvariantViolation(_))));
/// ```
#[macro_export]
macro_rules! invariant {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvariantViolation(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use rto_core::{fail, errors::Error};
/// fn always_err() -> rto_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
