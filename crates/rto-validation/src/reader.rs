//! Data reader boundary: raw persisted day cells in, week records out.
//!
//! The host page stores each marked calendar cell as a small JSON object.
//! Cells missing a date component, or naming a date that does not exist, are
//! dropped one by one; the rest of the calendar is still read.

use crate::accounting::WeekTally;
use crate::day::{DaySelection, SelectionType};
use crate::policy::RtoPolicyConfig;
use crate::week::WeekInfo;
use rto_core::Size;
use rto_time::{Date, HolidayCalendar};
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// One persisted calendar cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDay {
    /// Calendar year.
    pub year: Option<i32>,
    /// Month, 1–12.
    pub month: Option<u32>,
    /// Day of month.
    pub day: Option<u32>,
    /// Selection string (`out-of-office`, `none`, or a legacy alias).
    pub selection_type: Option<String>,
}

impl RawDay {
    /// Decode the cell, or explain why it is malformed.
    fn decode(&self) -> Result<(Date, SelectionType), String> {
        let (Some(y), Some(m), Some(d)) = (self.year, self.month, self.day) else {
            return Err("missing year, month, or day".to_string());
        };
        let date = Date::from_ymd(y, m, d).map_err(|e| e.to_string())?;
        let selection = match &self.selection_type {
            Some(s) => s.parse().map_err(|e: rto_core::Error| e.to_string())?,
            None => SelectionType::None,
        };
        Ok((date, selection))
    }
}

/// Read the OOF-marked days out of `raw`, skipping malformed cells.
pub fn read_day_selections(raw: &[RawDay], holidays: &impl HolidayCalendar) -> Vec<DaySelection> {
    let mut out = Vec::with_capacity(raw.len());
    for (i, cell) in raw.iter().enumerate() {
        match cell.decode() {
            Ok((date, SelectionType::OutOfOffice)) => {
                out.push(DaySelection::out_of_office(date, holidays));
            }
            Ok(_) => {}
            Err(reason) => warn!(index = i, ?cell, %reason, "skipping malformed day"),
        }
    }
    out.sort_by_key(|d| d.date);
    out.dedup_by_key(|d| d.date);
    debug!(read = out.len(), cells = raw.len(), "read OOF selections");
    out
}

/// A run of consecutive Monday-aligned weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedPeriod {
    first_week: Date,
    weeks: Size,
}

impl TrackedPeriod {
    /// `weeks` weeks starting with the week that contains `first_week`.
    pub fn new(first_week: Date, weeks: Size) -> Self {
        Self {
            first_week: first_week.week_start(),
            weeks,
        }
    }

    /// `weeks` weeks starting on the first Monday on or after the calendar's
    /// start date.
    pub fn from_calendar_start(start: Date, weeks: Size) -> Self {
        Self::new(start.first_week_start(), weeks)
    }

    /// The smallest period whose weeks contain every date in `dates`, or
    /// `None` if `dates` is empty.
    pub fn covering(dates: impl IntoIterator<Item = Date>) -> Option<Self> {
        let (lo, hi) = dates
            .into_iter()
            .fold(None, |acc: Option<(Date, Date)>, d| match acc {
                None => Some((d, d)),
                Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
            })?;
        let first = lo.week_start();
        let weeks = (hi.week_start() - first) as Size / 7 + 1;
        Some(Self::new(first, weeks))
    }

    /// Monday of the first week.
    pub fn first_week(&self) -> Date {
        self.first_week
    }

    /// Number of weeks.
    pub fn weeks(&self) -> Size {
        self.weeks
    }

    /// Monday of every week, in order.
    pub fn week_starts(&self) -> Vec<Date> {
        (0..self.weeks)
            .map(|i| self.first_week + 7 * i as i32)
            .collect()
    }

    /// 0-based index of the week containing `date`, if it is in the period.
    pub fn week_index(&self, date: Date) -> Option<Size> {
        let offset = date.week_start() - self.first_week;
        if offset < 0 {
            return None;
        }
        let index = offset as Size / 7;
        (index < self.weeks).then_some(index)
    }
}

/// One [`WeekInfo`] per week of `period`.
pub fn read_weeks(
    selections: &[DaySelection],
    holidays: &impl HolidayCalendar,
    period: &TrackedPeriod,
    policy: &RtoPolicyConfig,
) -> Vec<WeekInfo> {
    let oof_dates: BTreeSet<Date> = selections
        .iter()
        .filter(|s| s.is_out_of_office())
        .map(|s| s.date)
        .collect();
    period
        .week_starts()
        .into_iter()
        .map(|monday| WeekTally::count(monday, &oof_dates, holidays).info(policy))
        .collect()
}
