//! # rto-calendar
//!
//! Rolling-window compliance validation for a return-to-office attendance
//! calendar.
//!
//! This crate is a **façade** that re-exports the public items of the
//! workspace crates. Application code should depend on this crate rather
//! than the individual `rto-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! rto-calendar = "0.1"
//! ```
//!
//! ```rust
//! use rto_calendar::prelude::*;
//!
//! let settings = ValidatorSettings::from_json(r#"{"evaluateBestWeeksOnly": true}"#).unwrap();
//! let holidays = HolidaySet::from_iso_strs(["2024-01-01"]);
//!
//! let monday = Date::from_ymd(2024, 1, 1).unwrap();
//! let selections = (0..8)
//!     .map(|week| DaySelection::out_of_office(monday + 7 * week + 1, &holidays))
//!     .collect();
//! let ctx = ValidationContext::new(selections, settings.policy).with_holidays(holidays);
//!
//! let result = ValidationManager::from_settings(&settings).validate(&ctx).unwrap();
//! assert!(result.is_valid);
//! assert!(result.message.starts_with("✓"));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use rto_core as core;

/// Dates, weekdays, week arithmetic, and holiday calendars.
pub use rto_time as time;

/// Policy, week accounting, strategies, and the window slider.
pub use rto_validation as validation;

/// The items most callers need.
pub mod prelude {
    pub use rto_core::{Error, Result};
    pub use rto_time::{Date, HolidayCalendar, HolidaySet, NoHolidays, Weekday};
    pub use rto_validation::{
        read_day_selections, read_weeks, validate_sliding_window, DaySelection, RawDay,
        RtoPolicyConfig, TrackedPeriod, ValidationContext, ValidationManager, ValidationMode,
        ValidationResult, ValidationStrategy, ValidatorSettings, WeekInfo,
    };
}
