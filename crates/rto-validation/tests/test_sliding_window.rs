//! Integration tests for the standalone best-weeks search.

use approx::assert_abs_diff_eq;
use rto_core::DayCount;
use rto_time::{Date, HolidaySet};
use rto_validation::{
    read_weeks, validate_sliding_window, DaySelection, RtoPolicyConfig, TrackedPeriod, WeekInfo,
};

fn week_start(i: usize) -> Date {
    Date::from_ymd(2024, 1, 1).unwrap() + 7 * i as i32
}

fn weeks(office: &[DayCount]) -> Vec<WeekInfo> {
    office
        .iter()
        .enumerate()
        .map(|(i, &o)| WeekInfo {
            week_start: week_start(i),
            office_days: o,
            total_days: 5,
            oof_days: 5 - o,
            is_compliant: o >= 3,
        })
        .collect()
}

#[test]
fn best_eight_of_twelve_passes_with_bad_tail() {
    let mut office = vec![3; 12];
    for o in &mut office[8..] {
        *o = 1;
    }
    let policy = RtoPolicyConfig::default().with_best_weeks(8);
    let r = validate_sliding_window(&weeks(&office), &policy).unwrap();
    assert!(r.is_valid);
    assert_abs_diff_eq!(r.average_office_days, 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(r.average_office_percentage, 60.0, epsilon = 1e-9);
    assert_eq!(r.evaluated_week_starts.len(), 8);
    assert_eq!(r.window_week_starts.len(), 12);
    assert_eq!(r.invalid_week_start, None);
}

#[test]
fn first_failing_window_is_reported() {
    // window 1 keeps only seven full weeks, so an empty week enters its best eight
    let mut office = vec![3; 14];
    for o in &mut office[8..=12] {
        *o = 0;
    }
    let policy = RtoPolicyConfig::default();
    let r = validate_sliding_window(&weeks(&office), &policy).unwrap();
    assert!(!r.is_valid);
    assert_eq!((r.window_start, r.window_end), (Some(1), Some(12)));
    assert_abs_diff_eq!(r.average_office_percentage, 52.5, epsilon = 1e-9);
    assert_eq!(r.evaluated_week_starts.len(), 8);
    assert_eq!(r.invalid_week_start, Some(week_start(8).timestamp_millis()));
    assert!(r.message(&policy).contains("weeks 2-13"));
}

#[test]
fn default_policy_always_ranks_best_weeks() {
    let mut office = vec![3; 8];
    office.extend([1; 4]);
    let policy = RtoPolicyConfig::default();
    assert!(!policy.evaluate_best_weeks_only);
    let r = validate_sliding_window(&weeks(&office), &policy).unwrap();
    assert!(r.is_valid);
    assert_abs_diff_eq!(r.average_office_percentage, 60.0, epsilon = 1e-9);
    assert_abs_diff_eq!(r.average_office_days, 3.0, epsilon = 1e-9);
    assert_eq!(r.evaluated_week_starts.len(), 8);
    assert_eq!(r.window_week_starts.len(), 12);
    assert_eq!(r.invalid_week_start, None);
}

#[test]
fn invalid_week_is_weakest_evaluated_week() {
    let office = [5, 2, 4, 2, 1, 5];
    let policy = RtoPolicyConfig::default().with_rolling_period(6).with_best_weeks(4);
    let r = validate_sliding_window(&weeks(&office), &policy).unwrap();
    // best four: 5, 5, 4, 2 (the earlier 2) => 16/20
    assert!(r.is_valid);
    assert_abs_diff_eq!(r.average_office_percentage, 80.0, epsilon = 1e-9);
    assert_eq!(
        r.evaluated_week_starts,
        vec![
            week_start(0).timestamp_millis(),
            week_start(5).timestamp_millis(),
            week_start(2).timestamp_millis(),
            week_start(1).timestamp_millis(),
        ]
    );

    let strict = policy.with_threshold(0.85);
    let r = validate_sliding_window(&weeks(&office), &strict).unwrap();
    assert!(!r.is_valid);
    assert_eq!(r.invalid_week_start, Some(week_start(1).timestamp_millis()));
}

#[test]
fn short_history_uses_one_window() {
    let r = validate_sliding_window(&weeks(&[2, 2, 2]), &RtoPolicyConfig::default()).unwrap();
    assert!(!r.is_valid);
    assert_eq!((r.window_start, r.window_end), (Some(0), Some(2)));
    assert_eq!(r.window_week_starts.len(), 3);
}

#[test]
fn reader_records_with_holidays() {
    let holidays: HolidaySet = [week_start(0)].into_iter().collect();
    let selections = vec![
        DaySelection::out_of_office(week_start(0), &holidays),
        DaySelection::out_of_office(week_start(0) + 1, &holidays),
        DaySelection::out_of_office(week_start(0) + 2, &holidays),
    ];
    let period = TrackedPeriod::new(week_start(0), 2);
    let policy = RtoPolicyConfig::default();
    let records = read_weeks(&selections, &holidays, &period, &policy);
    assert_eq!((records[0].office_days, records[0].total_days), (2, 4));

    let r = validate_sliding_window(&records, &policy).unwrap();
    // (2 + 5) / (4 + 5)
    assert!(r.is_valid);
    assert_abs_diff_eq!(r.average_office_percentage, 700.0 / 9.0, epsilon = 1e-9);
    assert_abs_diff_eq!(r.average_office_days, 3.5, epsilon = 1e-9);
}

#[test]
fn result_serializes_camel_case() {
    let r = validate_sliding_window(&weeks(&[1]), &RtoPolicyConfig::default()).unwrap();
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["isValid"], false);
    assert_eq!(json["windowStart"], 0);
    assert!(json.get("averageOfficePercentage").is_some());
    assert_eq!(json["invalidWeekStart"], week_start(0).timestamp_millis());
}
