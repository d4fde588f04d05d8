//! # rto-core
//!
//! Core types and error definitions for the RTO attendance calendar.
//!
//! This crate provides the building blocks shared by every other crate in the
//! workspace: the error enum with its `ensure!` / `invariant!` / `fail!`
//! macros, and the primitive type aliases used in the compliance arithmetic.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `invariant!` / `fail!` macros.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used for averages and ratios.
pub type Real = f64;

/// A percentage on the 0–100 scale.
pub type Percentage = f64;

/// A count of days (office, OOF, holiday, weekday).
pub type DayCount = u32;

/// Alias used for week / window indices and sizes.
pub type Size = usize;

/// Milliseconds since the Unix epoch; the week identifier handed to the
/// display layer.
pub type Timestamp = i64;

/// Tolerance applied when comparing a computed percentage to a threshold, so
/// that exact boundaries such as 3/5 = 60 % are not lost to rounding.
pub const PERCENT_EPSILON: Real = 1e-9;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
