//! `Date` type and the week arithmetic built on it.
//!
//! A `Date` is a plain calendar day with no time-of-day component, so two
//! dates that name the same day always compare equal and hash identically.
//! That makes `Date` safe to use directly as a cache key; there is no local
//! midnight to normalise and no DST offset to trip over.
//!
//! Storage and month/year rollover are delegated to [`chrono::NaiveDate`];
//! adding days never special-cases month boundaries.

use crate::weekday::Weekday;
use chrono::{Datelike, Duration, NaiveDate};
use rto_core::errors::{Error, Result};
use rto_core::Timestamp;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// A calendar date.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(NaiveDate);

impl Date {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| Error::Date(format!("{year}-{month:02}-{day:02} is not a valid date")))
    }

    /// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
    pub fn parse_iso(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| Error::Date(format!("cannot parse '{s}' as YYYY-MM-DD: {e}")))
    }

    /// Recover the date from epoch milliseconds.  Any time-of-day part is
    /// discarded.
    pub fn from_timestamp_millis(millis: Timestamp) -> Result<Self> {
        let days = millis.div_euclid(MILLIS_PER_DAY);
        i32::try_from(days)
            .ok()
            .and_then(|d| d.checked_add(UNIX_EPOCH_DAYS_FROM_CE))
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .map(Date)
            .ok_or_else(|| Error::Date(format!("timestamp {millis} out of range")))
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u32 {
        self.0.day()
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        self.0.weekday().into()
    }

    /// Return `true` for Monday–Friday.
    pub fn is_weekday(&self) -> bool {
        self.weekday().is_weekday()
    }

    /// Return `true` for Saturday and Sunday.
    pub fn is_weekend(&self) -> bool {
        self.weekday().is_weekend()
    }

    /// Milliseconds since the Unix epoch at midnight UTC of this date.
    ///
    /// This is the week identifier handed to the display layer.
    pub fn timestamp_millis(&self) -> Timestamp {
        let days = self.0.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE;
        i64::from(days) * MILLIS_PER_DAY
    }

    /// Format as `YYYY-MM-DD`.
    pub fn to_iso(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` days.  Returns an error if the result is out of range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        self.0
            .checked_add_signed(Duration::days(i64::from(n)))
            .map(Date)
            .ok_or_else(|| Error::Date(format!("{self:?} + {n} days is out of range")))
    }

    /// Return the number of calendar days between `self` and `other`.
    /// Positive if `other > self`.
    pub fn days_between(self, other: Date) -> i32 {
        // Both ends lie inside chrono's range, so the difference fits in i32.
        other.0.signed_duration_since(self.0).num_days() as i32
    }

    // ── Week arithmetic ───────────────────────────────────────────────────────

    /// Return the first day of the week containing this date, where weeks
    /// begin on `first_day`.
    ///
    /// Idempotent: `d.start_of_week(f).start_of_week(f) == d.start_of_week(f)`.
    pub fn start_of_week(self, first_day: Weekday) -> Self {
        self - i32::from(self.weekday().days_since(first_day))
    }

    /// Return the Monday of the week containing this date.
    pub fn week_start(self) -> Self {
        self.start_of_week(Weekday::Monday)
    }

    /// Return the first Monday on or after this date.
    ///
    /// Used to align a tracked period to the calendar's start date rather
    /// than to the week that happens to contain it.
    pub fn first_week_start(self) -> Self {
        let ahead = Weekday::Monday.days_since(self.weekday());
        self + i32::from(ahead)
    }

    /// Return the five working days (Monday–Friday) of the week containing
    /// this date.
    pub fn week_dates(self) -> [Date; 5] {
        let monday = self.week_start();
        [monday, monday + 1, monday + 2, monday + 3, monday + 4]
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl From<NaiveDate> for Date {
    fn from(d: NaiveDate) -> Self {
        Date(d)
    }
}

impl From<Date> for NaiveDate {
    fn from(d: Date) -> Self {
        d.0
    }
}

impl std::str::FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Date::parse_iso(s)
    }
}

// ── Serde: ISO `YYYY-MM-DD` strings ───────────────────────────────────────────

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Date::parse_iso(&s).map_err(de::Error::custom)
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────

impl std::ops::Add<i32> for Date {
    type Output = Self;
    fn add(self, rhs: i32) -> Self {
        self.add_days(rhs).expect("date addition overflow")
    }
}

impl std::ops::Sub<i32> for Date {
    type Output = Self;
    fn sub(self, rhs: i32) -> Self {
        self.add_days(-rhs).expect("date subtraction underflow")
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        rhs.days_between(self)
    }
}

impl std::ops::AddAssign<i32> for Date {
    fn add_assign(&mut self, rhs: i32) {
        *self = self.add_days(rhs).expect("date addition overflow");
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%-d %B %Y"))
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Date({})", self.to_iso())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_invalid_ymd() {
        assert!(Date::from_ymd(2023, 2, 29).is_err());
        assert!(Date::from_ymd(2024, 13, 1).is_err());
        assert!(Date::from_ymd(2024, 4, 31).is_err());
        assert!(Date::from_ymd(2024, 2, 29).is_ok());
    }

    #[test]
    fn test_weekday() {
        // 2024-01-01 is a Monday
        assert_eq!(date(2024, 1, 1).weekday(), Weekday::Monday);
        // 2024-01-06 is a Saturday
        assert_eq!(date(2024, 1, 6).weekday(), Weekday::Saturday);
        assert!(date(2024, 1, 6).is_weekend());
        assert!(date(2024, 1, 5).is_weekday());
    }

    #[test]
    fn test_week_start_month_rollover() {
        // Thursday 2024-02-01 belongs to the week of Monday 2024-01-29
        assert_eq!(date(2024, 2, 1).week_start(), date(2024, 1, 29));
        // Sunday 2023-01-01 belongs to the week of Monday 2022-12-26
        assert_eq!(date(2023, 1, 1).week_start(), date(2022, 12, 26));
    }

    #[test]
    fn test_start_of_week_sunday_first() {
        // With Sunday-first weeks, Wednesday 2024-01-10 starts on Sunday 2024-01-07
        assert_eq!(date(2024, 1, 10).start_of_week(Weekday::Sunday), date(2024, 1, 7));
        assert_eq!(date(2024, 1, 7).start_of_week(Weekday::Sunday), date(2024, 1, 7));
    }

    #[test]
    fn test_first_week_start() {
        // Monday stays put
        assert_eq!(date(2024, 1, 1).first_week_start(), date(2024, 1, 1));
        // Tuesday moves to the next Monday
        assert_eq!(date(2024, 1, 2).first_week_start(), date(2024, 1, 8));
        // Sunday moves one day ahead
        assert_eq!(date(2024, 1, 7).first_week_start(), date(2024, 1, 8));
    }

    #[test]
    fn test_week_dates() {
        let days = date(2024, 2, 28).week_dates();
        assert_eq!(days[0], date(2024, 2, 26));
        assert_eq!(days[3], date(2024, 2, 29));
        assert_eq!(days[4], date(2024, 3, 1));
        assert!(days.iter().all(Date::is_weekday));
    }

    #[test]
    fn test_iso_roundtrip() {
        let d = Date::parse_iso("2024-03-15").unwrap();
        assert_eq!(d, date(2024, 3, 15));
        assert_eq!(d.to_iso(), "2024-03-15");
        assert!(Date::parse_iso("2024-3-xx").is_err());
        assert!(Date::parse_iso("").is_err());
    }

    #[test]
    fn test_timestamp_millis() {
        assert_eq!(date(1970, 1, 1).timestamp_millis(), 0);
        assert_eq!(date(2024, 1, 1).timestamp_millis(), 1_704_067_200_000);
        assert_eq!(date(1969, 12, 31).timestamp_millis(), -86_400_000);
        let d = Date::from_timestamp_millis(1_704_067_200_000 + 3_600_000).unwrap();
        assert_eq!(d, date(2024, 1, 1));
    }

    #[test]
    fn test_arithmetic() {
        let d = date(2023, 1, 1);
        let d2 = d + 31;
        assert_eq!(d2.month(), 2);
        assert_eq!(d2.day_of_month(), 1);
        assert_eq!(date(2023, 2, 1) - d, 31);
        assert_eq!(d.days_between(d2), 31);
    }

    #[test]
    fn test_serde_iso_string() {
        let json = serde_json::to_string(&date(2024, 3, 5)).unwrap();
        assert_eq!(json, "\"2024-03-05\"");
        let back: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date(2024, 3, 5));
        assert!(serde_json::from_str::<Date>("\"2024-02-30\"").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(date(2024, 3, 5).to_string(), "5 March 2024");
        assert_eq!(format!("{:?}", date(2024, 3, 5)), "Date(2024-03-05)");
    }
}
