//! Everything one validation run reads: selections, holidays, policy, and
//! the tracked period.

use crate::day::DaySelection;
use crate::policy::RtoPolicyConfig;
use crate::reader::TrackedPeriod;
use rto_core::Size;
use rto_time::{Date, HolidayCalendar, HolidaySet};
use std::collections::BTreeSet;

/// Input to a [`ValidationStrategy`](crate::strategy::ValidationStrategy).
///
/// When no period is given explicitly, the period is the run of weeks that
/// covers the selections.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    selections: Vec<DaySelection>,
    oof_dates: BTreeSet<Date>,
    holidays: HolidaySet,
    policy: RtoPolicyConfig,
    period: Option<TrackedPeriod>,
}

impl ValidationContext {
    /// Build a context over `selections` with no holidays.
    pub fn new(selections: Vec<DaySelection>, policy: RtoPolicyConfig) -> Self {
        let oof_dates = selections
            .iter()
            .filter(|s| s.is_out_of_office())
            .map(|s| s.date)
            .collect();
        let period = TrackedPeriod::covering(selections.iter().map(|s| s.date));
        Self {
            selections,
            oof_dates,
            holidays: HolidaySet::new(),
            policy,
            period,
        }
    }

    /// Apply a holiday set.  Every selection's `is_holiday` flag is
    /// recomputed against it.
    pub fn with_holidays(mut self, holidays: HolidaySet) -> Self {
        for s in &mut self.selections {
            s.is_holiday = holidays.is_holiday(s.date);
        }
        self.holidays = holidays;
        self
    }

    /// Track an explicit period instead of the one covering the selections.
    pub fn with_period(mut self, period: TrackedPeriod) -> Self {
        self.period = Some(period);
        self
    }

    /// The day selections.
    pub fn selections(&self) -> &[DaySelection] {
        &self.selections
    }

    /// OOF-marked dates, ascending.
    pub fn oof_dates(&self) -> &BTreeSet<Date> {
        &self.oof_dates
    }

    /// The holiday set.
    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }

    /// The policy.
    pub fn policy(&self) -> &RtoPolicyConfig {
        &self.policy
    }

    /// The tracked period, if there is one.
    pub fn period(&self) -> Option<&TrackedPeriod> {
        self.period.as_ref()
    }

    /// Number of tracked weeks.
    pub fn week_count(&self) -> Size {
        self.period.map_or(0, |p| p.weeks())
    }

    /// Monday of every tracked week.
    pub fn week_starts(&self) -> Vec<Date> {
        self.period.map(|p| p.week_starts()).unwrap_or_default()
    }

    /// 1-based week number of `week_start`; 0 if outside the period.
    pub fn week_number(&self, week_start: Date) -> Size {
        self.period
            .and_then(|p| p.week_index(week_start))
            .map_or(0, |i| i + 1)
    }
}
