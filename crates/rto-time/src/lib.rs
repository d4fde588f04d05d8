//! # rto-time
//!
//! Dates, weekdays, Monday-aligned week arithmetic, and holiday calendars.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `Date` type and week arithmetic.
pub mod date;

/// `HolidayCalendar` trait, `NoHolidays`, and `HolidaySet`.
pub mod holidays;

/// `Weekday`, day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use date::Date;
pub use holidays::{HolidayCalendar, HolidaySet, NoHolidays};
pub use weekday::Weekday;
