//! Per-day selection state.

use rto_core::errors::{Error, Result};
use rto_time::{Date, HolidayCalendar};
use serde::{Deserialize, Serialize};

/// How the user marked a day.
///
/// Older saved calendars also use `office` and `working`; both mean the same
/// as `none` (an unmarked weekday is an office day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionType {
    /// Marked out-of-office.
    OutOfOffice,
    /// Unmarked.
    #[default]
    #[serde(alias = "office", alias = "working")]
    None,
}

impl std::str::FromStr for SelectionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "out-of-office" | "oof" => Ok(SelectionType::OutOfOffice),
            "none" | "office" | "working" | "" => Ok(SelectionType::None),
            other => Err(Error::Parse(format!("unknown selection type '{other}'"))),
        }
    }
}

/// One calendar day and how it was marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DaySelection {
    /// The calendar day.
    pub date: Date,
    /// How the user marked it.
    pub selection_type: SelectionType,
    /// Whether the day is a declared holiday.
    pub is_holiday: bool,
}

impl DaySelection {
    /// Build a selection, looking the date up in `holidays`.
    pub fn new(date: Date, selection_type: SelectionType, holidays: &impl HolidayCalendar) -> Self {
        Self {
            date,
            selection_type,
            is_holiday: holidays.is_holiday(date),
        }
    }

    /// Shorthand for an out-of-office selection.
    pub fn out_of_office(date: Date, holidays: &impl HolidayCalendar) -> Self {
        Self::new(date, SelectionType::OutOfOffice, holidays)
    }

    /// Monday–Friday.
    pub fn is_weekday(&self) -> bool {
        self.date.is_weekday()
    }

    /// Marked out-of-office (regardless of weekday/holiday status).
    pub fn is_out_of_office(&self) -> bool {
        self.selection_type == SelectionType::OutOfOffice
    }

    /// Whether this day reduces the office-day count: an OOF-marked weekday
    /// that is not a holiday.
    pub fn counts_as_oof(&self) -> bool {
        self.is_out_of_office() && self.is_weekday() && !self.is_holiday
    }

    /// Opaque identifier the presentation layer uses to find its own cell.
    pub fn id(&self) -> String {
        self.date.to_iso()
    }
}
