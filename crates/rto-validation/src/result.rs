//! The verdict handed to the display layer.
//!
//! Wording of the messages is a display concern; the glyph prefix (`✓` or
//! `✗`) and the figures in them come from here.

use crate::policy::{RtoPolicyConfig, ValidationMode};
use crate::week::{WeekCompliance, WindowCompliance};
use rto_core::{Percentage, Real, Timestamp};
use serde::Serialize;

/// Message for a run with nothing selected.
pub const NO_SELECTIONS_MESSAGE: &str = "No selections to validate";

/// Message for a run whose tracked period holds no weeks.
pub const NO_WEEKS_MESSAGE: &str = "No weeks to validate";

/// Outcome of a validation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Overall pass/fail.
    pub is_valid: bool,
    /// Human-readable verdict.
    pub message: String,
    /// Strategy that produced the verdict.
    pub mode: ValidationMode,
    /// Compliance percentage (0–100) of the representative window or week.
    pub overall_compliance: Percentage,
    /// Average office days per evaluated week.
    pub average_office_days: Real,
    /// Windows that passed, in evaluation order.
    pub compliant_windows: Vec<WindowCompliance>,
    /// Windows that failed, in evaluation order.
    pub violating_windows: Vec<WindowCompliance>,
    /// The week singled out for highlighting when the run fails.
    pub invalid_week: Option<WeekCompliance>,
    /// Epoch-ms week starts of the weeks counted toward the verdict.
    pub evaluated_week_starts: Vec<Timestamp>,
    /// Epoch-ms week starts of every week in the reported window.
    pub window_week_starts: Vec<Timestamp>,
    /// Epoch-ms week start of `invalid_week`.
    pub invalid_week_start: Option<Timestamp>,
}

impl ValidationResult {
    /// A passing result with no figures behind it.
    fn vacuous(mode: ValidationMode, message: &str) -> Self {
        Self {
            is_valid: true,
            message: message.to_string(),
            mode,
            overall_compliance: 100.0,
            average_office_days: 0.0,
            compliant_windows: Vec::new(),
            violating_windows: Vec::new(),
            invalid_week: None,
            evaluated_week_starts: Vec::new(),
            window_week_starts: Vec::new(),
            invalid_week_start: None,
        }
    }

    /// Nothing was selected: compliant at 100 %.
    pub fn no_selections(mode: ValidationMode) -> Self {
        Self::vacuous(mode, NO_SELECTIONS_MESSAGE)
    }

    /// The tracked period is empty: compliant at 100 %.
    pub fn no_weeks(mode: ValidationMode) -> Self {
        Self::vacuous(mode, NO_WEEKS_MESSAGE)
    }

    /// The first violating window, if any.
    pub fn first_violation(&self) -> Option<&WindowCompliance> {
        self.violating_windows.first()
    }
}

pub(crate) fn average_pass_message(avg: Real, pct: Percentage, policy: &RtoPolicyConfig) -> String {
    format!(
        "✓ RTO Compliant: {avg:.1} office days/week ({pct:.1}%) meets the {:.0}% requirement",
        policy.threshold_percent()
    )
}

pub(crate) fn average_fail_message(
    first_week: usize,
    last_week: usize,
    avg: Real,
    pct: Percentage,
    policy: &RtoPolicyConfig,
) -> String {
    format!(
        "✗ RTO Violation: weeks {first_week}-{last_week} average {avg:.1} office days/week \
         ({pct:.1}%), below the {:.0}% requirement",
        policy.threshold_percent()
    )
}

pub(crate) fn strict_pass_message(pct: Percentage, policy: &RtoPolicyConfig) -> String {
    format!(
        "✓ RTO Compliant: every week has at least {} office days ({pct:.1}% average)",
        policy.min_office_days_per_week
    )
}

pub(crate) fn strict_fail_message(week: &WeekCompliance, policy: &RtoPolicyConfig) -> String {
    format!(
        "✗ RTO Violation: week {} ({}) has {} office days, minimum is {}",
        week.week_number,
        week.week_start.to_iso(),
        week.office_days,
        policy.min_office_days_per_week
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rto_time::Date;

    #[test]
    fn vacuous_results() {
        let r = ValidationResult::no_selections(ValidationMode::Average);
        assert!(r.is_valid);
        assert_eq!(r.message, "No selections to validate");
        assert_eq!(r.overall_compliance, 100.0);
        assert!(r.first_violation().is_none());
        assert_eq!(ValidationResult::no_weeks(ValidationMode::Strict).message, NO_WEEKS_MESSAGE);
    }

    #[test]
    fn messages_carry_glyphs_and_figures() {
        let policy = RtoPolicyConfig::default();
        let pass = average_pass_message(3.0, 60.0, &policy);
        assert!(pass.starts_with("✓ RTO Compliant"));
        assert!(pass.contains("3.0") && pass.contains("60.0%") && pass.contains("60%"));

        let fail = average_fail_message(1, 12, 2.0, 40.0, &policy);
        assert!(fail.starts_with("✗ RTO Violation"));
        assert!(fail.contains("weeks 1-12") && fail.contains("40.0%"));

        let week = WeekCompliance {
            week_start: Date::from_ymd(2024, 1, 29).unwrap(),
            week_number: 5,
            office_days: 2,
            total_days: 5,
            oof_days: 3,
            holiday_days: 0,
            is_compliant: false,
            percentage: 40.0,
        };
        let strict = strict_fail_message(&week, &policy);
        assert_eq!(
            strict,
            "✗ RTO Violation: week 5 (2024-01-29) has 2 office days, minimum is 3"
        );
        assert!(strict_pass_message(80.0, &policy).contains("at least 3 office days"));
    }

    #[test]
    fn serializes_camel_case() {
        let json =
            serde_json::to_value(ValidationResult::no_selections(ValidationMode::Strict)).unwrap();
        assert_eq!(json["isValid"], true);
        assert_eq!(json["overallCompliance"], 100.0);
        assert_eq!(json["mode"], "strict");
        assert!(json["invalidWeekStart"].is_null());
        assert!(json["evaluatedWeekStarts"].as_array().unwrap().is_empty());
    }
}
