//! Standalone best-weeks search over reader records.
//!
//! Unlike the strategies, this works directly on a list of [`WeekInfo`]
//! records and never re-derives them from selections.  Windows are searched
//! chronologically; the first failing window is returned together with the
//! week to highlight.  If every window passes, the last window is returned
//! marked valid.

use crate::accounting::{meets_threshold, percentage};
use crate::policy::RtoPolicyConfig;
use crate::result::{average_fail_message, average_pass_message};
use crate::week::WeekInfo;
use rto_core::errors::{Error, Result};
use rto_core::{DayCount, Percentage, Real, Size, Timestamp};
use serde::Serialize;
use tracing::debug;

/// Outcome of [`validate_sliding_window`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlidingWindowResult {
    /// Whether every window passed.
    pub is_valid: bool,
    /// 0-based first week of the reported window.
    pub window_start: Option<Size>,
    /// 0-based last week (inclusive) of the reported window.
    pub window_end: Option<Size>,
    /// Average office days over the window's evaluated weeks.
    pub average_office_days: Real,
    /// Office percentage over the window's evaluated weeks.
    pub average_office_percentage: Percentage,
    /// Epoch-ms starts of the evaluated weeks, best first.
    pub evaluated_week_starts: Vec<Timestamp>,
    /// Epoch-ms starts of every week in the window, chronologically.
    pub window_week_starts: Vec<Timestamp>,
    /// Epoch-ms start of the evaluated week with the fewest office days.
    pub invalid_week_start: Option<Timestamp>,
}

impl SlidingWindowResult {
    fn empty() -> Self {
        Self {
            is_valid: true,
            window_start: None,
            window_end: None,
            average_office_days: 0.0,
            average_office_percentage: 100.0,
            evaluated_week_starts: Vec::new(),
            window_week_starts: Vec::new(),
            invalid_week_start: None,
        }
    }

    /// Human-readable verdict in the same wording as average mode.
    pub fn message(&self, policy: &RtoPolicyConfig) -> String {
        match (self.is_valid, self.window_start, self.window_end) {
            (false, Some(start), Some(end)) => average_fail_message(
                start + 1,
                end + 1,
                self.average_office_days,
                self.average_office_percentage,
                policy,
            ),
            _ => average_pass_message(
                self.average_office_days,
                self.average_office_percentage,
                policy,
            ),
        }
    }
}

/// Search `weeks` for the first window whose evaluated weeks miss the
/// threshold.
///
/// Windows hold `rolling_period_weeks` weeks, or every week if there are
/// fewer.  Within a window the weeks are ranked by office days, highest
/// first, ties in chronological order, and only the top `best_weeks_count`
/// are evaluated.  `evaluate_best_weeks_only` does not apply here; this
/// search always judges the best weeks of each window.
pub fn validate_sliding_window(
    weeks: &[WeekInfo],
    policy: &RtoPolicyConfig,
) -> Result<SlidingWindowResult> {
    policy.validate()?;
    if weeks.is_empty() {
        return Ok(SlidingWindowResult::empty());
    }

    let window_size = policy.rolling_period_weeks.min(weeks.len());
    let best_count = policy.best_weeks_count.min(window_size);
    let mut last = None;

    for start in 0..=weeks.len() - window_size {
        let window = &weeks[start..start + window_size];
        let mut ranked: Vec<&WeekInfo> = window.iter().collect();
        ranked.sort_by(|a, b| b.office_days.cmp(&a.office_days));
        ranked.truncate(best_count);

        let office: DayCount = ranked.iter().map(|w| w.office_days).sum();
        let total: DayCount = ranked.iter().map(|w| w.total_days).sum();
        let pct = percentage(office, total);
        let avg = Real::from(office) / ranked.len() as Real;
        let is_valid = meets_threshold(pct, policy);
        debug!(start, office, total, pct, is_valid, "sliding window");

        let result = SlidingWindowResult {
            is_valid,
            window_start: Some(start),
            window_end: Some(start + window_size - 1),
            average_office_days: avg,
            average_office_percentage: pct,
            evaluated_week_starts: ranked
                .iter()
                .map(|w| w.week_start.timestamp_millis())
                .collect(),
            window_week_starts: window
                .iter()
                .map(|w| w.week_start.timestamp_millis())
                .collect(),
            invalid_week_start: None,
        };
        if !is_valid {
            let weakest = ranked
                .iter()
                .min_by_key(|w| (w.office_days, w.week_start))
                .map(|w| w.week_start.timestamp_millis());
            return Ok(SlidingWindowResult {
                invalid_week_start: weakest,
                ..result
            });
        }
        last = Some(result);
    }

    last.ok_or_else(|| Error::InvariantViolation("no sliding window was evaluated".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rto_time::Date;

    fn week(i: usize, office: DayCount) -> WeekInfo {
        WeekInfo {
            week_start: Date::from_ymd(2024, 1, 1).unwrap() + 7 * i as i32,
            office_days: office,
            total_days: 5,
            oof_days: 5 - office,
            is_compliant: office >= 3,
        }
    }

    #[test]
    fn empty_input_is_valid() {
        let r = validate_sliding_window(&[], &RtoPolicyConfig::default()).unwrap();
        assert!(r.is_valid);
        assert_eq!(r.window_start, None);
        assert_eq!(r.average_office_percentage, 100.0);
    }

    #[test]
    fn passing_run_returns_last_window() {
        let weeks: Vec<_> = (0..15).map(|i| week(i, 3)).collect();
        let r = validate_sliding_window(&weeks, &RtoPolicyConfig::default()).unwrap();
        assert!(r.is_valid);
        assert_eq!((r.window_start, r.window_end), (Some(3), Some(14)));
        assert_eq!(r.invalid_week_start, None);
        assert!(r.message(&RtoPolicyConfig::default()).starts_with("✓"));
    }

    #[test]
    fn rejects_invalid_policy() {
        let policy = RtoPolicyConfig::default().with_rolling_period(0);
        assert!(validate_sliding_window(&[week(0, 3)], &policy).is_err());
    }
}
