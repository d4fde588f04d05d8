//! Office / holiday / OOF day arithmetic shared by every strategy and by the
//! data reader.
//!
//! For one week:
//!
//! ```text
//! effective_weekdays = totalWeekdaysPerWeek - holidays_that_week
//! office_days        = effective_weekdays - oof_days_that_week
//! ```
//!
//! A holiday is never also an OOF day, even if the user marked it before it
//! became a holiday.

use crate::policy::RtoPolicyConfig;
use crate::week::{WeekCompliance, WeekInfo};
use rto_core::{DayCount, Percentage, Real, Size, PERCENT_EPSILON};
use rto_time::{Date, HolidayCalendar};
use std::collections::BTreeSet;

/// Raw day counts for one week, before the policy is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekTally {
    /// Monday of the week.
    pub week_start: Date,
    /// Weekday holidays.
    pub holiday_days: DayCount,
    /// OOF-marked weekdays that are not holidays.
    pub oof_days: DayCount,
}

impl WeekTally {
    /// Count holidays and OOF days in the week containing `date`.
    pub fn count(date: Date, oof_dates: &BTreeSet<Date>, holidays: &impl HolidayCalendar) -> Self {
        let days = date.week_dates();
        let holiday_days = days.iter().filter(|d| holidays.is_holiday(**d)).count() as DayCount;
        let oof_days = oof_dates
            .range(days[0]..=days[4])
            .filter(|d| !holidays.is_holiday(**d))
            .count() as DayCount;
        Self {
            week_start: days[0],
            holiday_days,
            oof_days,
        }
    }

    /// `(office_days, total_days, oof_days)` under `policy`.
    ///
    /// OOF days beyond the effective weekdays (possible when the policy's
    /// working week is shorter than five days) are clamped so that
    /// `office + oof == total` always holds.
    pub fn split(&self, policy: &RtoPolicyConfig) -> (DayCount, DayCount, DayCount) {
        let total = policy
            .total_weekdays_per_week
            .saturating_sub(self.holiday_days);
        let oof = self.oof_days.min(total);
        (total - oof, total, oof)
    }

    /// Full per-week compliance record.
    pub fn compliance(&self, week_number: Size, policy: &RtoPolicyConfig) -> WeekCompliance {
        let (office_days, total_days, oof_days) = self.split(policy);
        WeekCompliance {
            week_start: self.week_start,
            week_number,
            office_days,
            total_days,
            oof_days,
            holiday_days: self.holiday_days,
            is_compliant: office_days >= policy.min_office_days_per_week,
            percentage: percentage(office_days, total_days),
        }
    }

    /// Reader record for this week.
    pub fn info(&self, policy: &RtoPolicyConfig) -> WeekInfo {
        let (office_days, total_days, oof_days) = self.split(policy);
        WeekInfo {
            week_start: self.week_start,
            office_days,
            total_days,
            oof_days,
            is_compliant: office_days >= policy.min_office_days_per_week,
        }
    }
}

/// `part / whole * 100`, or 100 when `whole` is 0.
pub fn percentage(part: DayCount, whole: DayCount) -> Percentage {
    if whole == 0 {
        100.0
    } else {
        Real::from(part) / Real::from(whole) * 100.0
    }
}

/// Whether `pct` (0–100 scale) reaches the policy threshold.
pub fn meets_threshold(pct: Percentage, policy: &RtoPolicyConfig) -> bool {
    pct + PERCENT_EPSILON >= policy.threshold_percent()
}
