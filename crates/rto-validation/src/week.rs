//! Week and window aggregates.
//!
//! [`WeekInfo`] is the record the data reader hands over; [`WeekCompliance`]
//! is the per-week figure a strategy computes; [`WindowCompliance`] sums a
//! contiguous run of weeks, or the best-N subset of that run.

use crate::accounting::{meets_threshold, percentage};
use crate::policy::RtoPolicyConfig;
use rto_core::{DayCount, Percentage, Real, Size, Timestamp};
use rto_time::Date;
use serde::Serialize;

/// Reader output for one Monday-aligned week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekInfo {
    /// Monday of the week.
    pub week_start: Date,
    /// Effective weekdays minus OOF days.
    pub office_days: DayCount,
    /// Effective weekdays (working days minus holidays).
    pub total_days: DayCount,
    /// OOF-marked working days, holidays excluded.
    pub oof_days: DayCount,
    /// `office_days >= minOfficeDaysPerWeek`.
    pub is_compliant: bool,
}

impl WeekInfo {
    /// `office_days / total_days * 100`, or 100 for a week with no
    /// effective weekdays.
    pub fn percentage(&self) -> Percentage {
        percentage(self.office_days, self.total_days)
    }
}

/// Compliance figures for one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekCompliance {
    /// Monday of the week.
    pub week_start: Date,
    /// 1-based position in the tracked period; 0 if outside it.
    pub week_number: Size,
    /// Effective weekdays minus OOF days.
    pub office_days: DayCount,
    /// Effective weekdays (working days minus holidays).
    pub total_days: DayCount,
    /// OOF-marked working days, holidays excluded.
    pub oof_days: DayCount,
    /// Weekday holidays observed this week.
    pub holiday_days: DayCount,
    /// `office_days >= minOfficeDaysPerWeek`.
    pub is_compliant: bool,
    /// `office_days / total_days * 100`; 100 when `total_days` is 0.
    pub percentage: Percentage,
}

impl WeekCompliance {
    /// Work-from-home days; the same count as `oof_days`.
    pub fn wfh_days(&self) -> DayCount {
        self.oof_days
    }

    /// Epoch-millisecond identifier of the week.
    pub fn week_start_millis(&self) -> Timestamp {
        self.week_start.timestamp_millis()
    }

    /// Rebuild from a reader record.
    ///
    /// `WeekInfo` does not carry the holiday count, so `holiday_days` is 0.
    pub fn from_info(info: &WeekInfo, week_number: Size) -> Self {
        Self {
            week_start: info.week_start,
            week_number,
            office_days: info.office_days,
            total_days: info.total_days,
            oof_days: info.oof_days,
            holiday_days: 0,
            is_compliant: info.is_compliant,
            percentage: info.percentage(),
        }
    }

    /// Project onto the reader record shape.
    pub fn to_info(&self) -> WeekInfo {
        WeekInfo {
            week_start: self.week_start,
            office_days: self.office_days,
            total_days: self.total_days,
            oof_days: self.oof_days,
            is_compliant: self.is_compliant,
        }
    }
}

/// Aggregate compliance over a rolling window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowCompliance {
    /// 0-based index of the first week.
    pub window_start: Size,
    /// 0-based index of the last week (inclusive).
    pub window_end: Size,
    /// The weeks that count toward the totals.  In best-weeks mode this is
    /// the best-N subset, highest percentage first.
    pub weeks: Vec<WeekCompliance>,
    /// Weeks of the window left out of the totals, in chronological order.
    pub excluded_weeks: Vec<WeekCompliance>,
    /// Office days over the evaluated weeks.
    pub total_office_days: DayCount,
    /// Effective weekdays over the evaluated weeks.
    pub total_weekdays: DayCount,
    /// `total_office_days / weeks.len()`.
    pub average_office_days_per_week: Real,
    /// `total_office_days / total_weekdays * 100`; 100 when there are no
    /// weekdays.
    pub compliance_percentage: Percentage,
    /// Whether the window passes.
    pub is_compliant: bool,
}

impl WindowCompliance {
    /// Sum `evaluated` into a window and judge it against the policy
    /// threshold.
    ///
    /// Only `evaluated` contributes to the totals; `excluded` is carried for
    /// display.
    pub fn aggregate(
        window_start: Size,
        window_size: Size,
        evaluated: Vec<WeekCompliance>,
        excluded: Vec<WeekCompliance>,
        policy: &RtoPolicyConfig,
    ) -> Self {
        let total_office_days: DayCount = evaluated.iter().map(|w| w.office_days).sum();
        let total_weekdays: DayCount = evaluated.iter().map(|w| w.total_days).sum();
        let average_office_days_per_week = if evaluated.is_empty() {
            0.0
        } else {
            Real::from(total_office_days) / evaluated.len() as Real
        };
        let compliance_percentage = percentage(total_office_days, total_weekdays);
        Self {
            window_start,
            window_end: (window_start + window_size).saturating_sub(1),
            weeks: evaluated,
            excluded_weeks: excluded,
            total_office_days,
            total_weekdays,
            average_office_days_per_week,
            compliance_percentage,
            is_compliant: meets_threshold(compliance_percentage, policy),
        }
    }

    /// Number of weeks in the window, evaluated or not.
    pub fn window_size(&self) -> Size {
        self.window_end + 1 - self.window_start
    }

    /// Week starts of the evaluated weeks, in evaluation order.
    pub fn evaluated_week_starts(&self) -> Vec<Timestamp> {
        self.weeks.iter().map(WeekCompliance::week_start_millis).collect()
    }

    /// Week starts of every week in the window, chronologically.
    pub fn window_week_starts(&self) -> Vec<Timestamp> {
        let mut all: Vec<Timestamp> = self
            .weeks
            .iter()
            .chain(&self.excluded_weeks)
            .map(WeekCompliance::week_start_millis)
            .collect();
        all.sort_unstable();
        all
    }

    /// The evaluated week with the fewest office days; the earliest one wins
    /// a tie.
    pub fn weakest_week(&self) -> Option<&WeekCompliance> {
        self.weeks
            .iter()
            .min_by_key(|w| (w.office_days, w.week_start))
    }
}

/// Split `weeks` into the best `count` by percentage (descending) and the
/// rest.
///
/// The sort is stable, so equal percentages keep their chronological order.
/// The excluded weeks come back in chronological order.
pub fn select_best_weeks(
    mut weeks: Vec<WeekCompliance>,
    count: Size,
) -> (Vec<WeekCompliance>, Vec<WeekCompliance>) {
    weeks.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    let mut excluded = weeks.split_off(count.min(weeks.len()));
    excluded.sort_by_key(|w| w.week_start);
    (weeks, excluded)
}
