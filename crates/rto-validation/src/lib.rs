//! # rto-validation
//!
//! Rolling-window compliance validation for the RTO attendance calendar.
//!
//! The pieces, bottom up:
//!
//! * [`policy`]: policy parameters, validation modes, persisted settings.
//! * [`day`], [`week`], [`accounting`]: per-day marks, per-week and
//!   per-window figures, and the office / holiday / OOF arithmetic.
//! * [`reader`]: raw calendar cells in, week records out.
//! * [`strategy`], [`strict`], [`average`]: the validation strategies.
//! * [`slider`]: drives a strategy across every rolling window.
//! * [`sliding_window`]: the standalone best-weeks search over week records.
//! * [`manager`]: owns the selected strategy.
//!
//! ```
//! use rto_time::{Date, NoHolidays};
//! use rto_validation::{DaySelection, RtoPolicyConfig, ValidationContext};
//! use rto_validation::{ValidationManager, ValidationMode};
//!
//! let monday = Date::from_ymd(2024, 1, 1).unwrap();
//! let selections = vec![
//!     DaySelection::out_of_office(monday, &NoHolidays),
//!     DaySelection::out_of_office(monday + 1, &NoHolidays),
//! ];
//! let ctx = ValidationContext::new(selections, RtoPolicyConfig::default());
//! let result = ValidationManager::new(ValidationMode::Average).validate(&ctx).unwrap();
//! assert!(result.is_valid);
//! assert!((result.overall_compliance - 60.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Office / holiday / OOF day arithmetic.
pub mod accounting;

/// Average-mode strategy.
pub mod average;

/// Strategy-owned memo of week and window results.
pub mod cache;

/// Everything one validation run reads.
pub mod context;

/// Per-day selection state.
pub mod day;

/// Validation orchestrator.
pub mod manager;

/// Policy, modes, and settings.
pub mod policy;

/// Raw calendar cells to week records.
pub mod reader;

/// Validation verdict.
pub mod result;

/// Rolling-window driver.
pub mod slider;

/// Standalone best-weeks search.
pub mod sliding_window;

/// The strategy trait and the closed set of strategies.
pub mod strategy;

/// Strict-mode strategy.
pub mod strict;

/// Week and window aggregates.
pub mod week;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use accounting::{meets_threshold, percentage, WeekTally};
pub use average::AverageStrategy;
pub use cache::ComplianceCache;
pub use context::ValidationContext;
pub use day::{DaySelection, SelectionType};
pub use manager::ValidationManager;
pub use policy::{RtoPolicyConfig, ValidationMode, ValidatorSettings};
pub use reader::{read_day_selections, read_weeks, RawDay, TrackedPeriod};
pub use result::ValidationResult;
pub use slider::{SlideOutcome, SlideState, WindowSlider};
pub use sliding_window::{validate_sliding_window, SlidingWindowResult};
pub use strategy::{Strategy, ValidationStrategy};
pub use strict::StrictStrategy;
pub use week::{select_best_weeks, WeekCompliance, WeekInfo, WindowCompliance};
