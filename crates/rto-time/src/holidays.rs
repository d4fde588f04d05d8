//! Holiday calendars.
//!
//! The compliance arithmetic only ever asks two questions of a calendar: is
//! this date a holiday, and how many working-day holidays fall in this week.
//! Holiday data is resolved by the host page before validation starts; the
//! core sees it as a plain set of dates.

use crate::date::Date;
use std::collections::BTreeSet;
use tracing::warn;

/// A source of non-working holidays.
pub trait HolidayCalendar: std::fmt::Debug + Send + Sync {
    /// Return `true` if `date` is a declared holiday.
    fn is_holiday(&self, date: Date) -> bool;

    /// Return `true` if `date` is a Saturday or Sunday.
    fn is_weekend(&self, date: Date) -> bool {
        date.is_weekend()
    }

    /// Return `true` if `date` is a weekday that is not a holiday.
    fn is_working_day(&self, date: Date) -> bool {
        !self.is_weekend(date) && !self.is_holiday(date)
    }

    /// Number of Monday–Friday holidays in the week containing `date`.
    ///
    /// Weekend holidays are not counted; they never reduce the working week.
    fn holidays_in_week(&self, date: Date) -> u32 {
        date.week_dates()
            .iter()
            .filter(|d| self.is_holiday(**d))
            .count() as u32
    }
}

/// A calendar with no holidays at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_holiday(&self, _date: Date) -> bool {
        false
    }
}

/// An explicit set of holiday dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    dates: BTreeSet<Date>,
}

impl HolidaySet {
    /// Create an empty holiday set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ISO `YYYY-MM-DD` strings.
    ///
    /// Malformed entries are skipped with a warning; the rest are kept.
    pub fn from_iso_strs<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for raw in iter {
            match Date::parse_iso(raw.as_ref()) {
                Ok(d) => set.add_holiday(d),
                Err(e) => warn!(holiday = raw.as_ref(), error = %e, "skipping malformed holiday"),
            }
        }
        set
    }

    /// Add a holiday.
    pub fn add_holiday(&mut self, date: Date) {
        self.dates.insert(date);
    }

    /// Remove a previously added holiday.
    pub fn remove_holiday(&mut self, date: Date) {
        self.dates.remove(&date);
    }

    /// Number of holidays in the set.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Iterate over the holidays in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Date> {
        self.dates.iter()
    }
}

impl FromIterator<Date> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = Date>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

impl HolidayCalendar for HolidaySet {
    fn is_holiday(&self, date: Date) -> bool {
        self.dates.contains(&date)
    }
}
