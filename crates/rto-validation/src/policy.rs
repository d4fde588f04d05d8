//! Policy parameters, validation modes, and the user-facing settings blob.
//!
//! [`RtoPolicyConfig`] is immutable for the duration of a validation run.
//! [`ValidatorSettings`] is what the host page persists: the policy fields
//! flattened alongside the `validationMode` string.

use rto_core::errors::{Error, Result};
use rto_core::{ensure, DayCount, Percentage, Real, Size};
use serde::{Deserialize, Serialize};

/// Parameters of a return-to-office policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RtoPolicyConfig {
    /// Office days a single week needs in strict mode.
    pub min_office_days_per_week: DayCount,
    /// Working days in a full week.
    pub total_weekdays_per_week: DayCount,
    /// Fraction (0, 1] of effective weekdays that must be office days.
    pub threshold_percentage: Real,
    /// Length of a rolling window, in weeks.
    pub rolling_period_weeks: Size,
    /// How many of the best weeks in a window are evaluated when
    /// `evaluate_best_weeks_only` is set.
    #[serde(alias = "topWeeksToCheck")]
    pub best_weeks_count: Size,
    /// Evaluate only the best `best_weeks_count` weeks of each window.
    pub evaluate_best_weeks_only: bool,
}

impl Default for RtoPolicyConfig {
    fn default() -> Self {
        Self {
            min_office_days_per_week: 3,
            total_weekdays_per_week: 5,
            threshold_percentage: 0.6,
            rolling_period_weeks: 12,
            best_weeks_count: 8,
            evaluate_best_weeks_only: false,
        }
    }
}

impl RtoPolicyConfig {
    /// Check the policy invariants.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=5).contains(&self.total_weekdays_per_week),
            "totalWeekdaysPerWeek must be in [1, 5], got {}",
            self.total_weekdays_per_week
        );
        ensure!(
            self.min_office_days_per_week <= self.total_weekdays_per_week,
            "minOfficeDaysPerWeek ({}) exceeds totalWeekdaysPerWeek ({})",
            self.min_office_days_per_week,
            self.total_weekdays_per_week
        );
        ensure!(
            self.threshold_percentage > 0.0 && self.threshold_percentage <= 1.0,
            "thresholdPercentage must be in (0, 1], got {}",
            self.threshold_percentage
        );
        ensure!(
            self.rolling_period_weeks > 0,
            "rollingPeriodWeeks must be positive"
        );
        ensure!(
            self.best_weeks_count > 0 && self.best_weeks_count <= self.rolling_period_weeks,
            "bestWeeksCount must be in [1, {}], got {}",
            self.rolling_period_weeks,
            self.best_weeks_count
        );
        Ok(())
    }

    /// The threshold on the 0–100 scale.
    pub fn threshold_percent(&self) -> Percentage {
        self.threshold_percentage * 100.0
    }

    /// Set the strict-mode weekly minimum.
    pub fn with_min_office_days(mut self, days: DayCount) -> Self {
        self.min_office_days_per_week = days;
        self
    }

    /// Set the threshold fraction.
    pub fn with_threshold(mut self, threshold: Real) -> Self {
        self.threshold_percentage = threshold;
        self
    }

    /// Set the rolling window length.
    pub fn with_rolling_period(mut self, weeks: Size) -> Self {
        self.rolling_period_weeks = weeks;
        self
    }

    /// Evaluate only the best `count` weeks of each window.
    pub fn with_best_weeks(mut self, count: Size) -> Self {
        self.best_weeks_count = count;
        self.evaluate_best_weeks_only = true;
        self
    }

    /// Evaluate every week of each window.
    pub fn with_all_weeks(mut self) -> Self {
        self.evaluate_best_weeks_only = false;
        self
    }
}

/// Which strategy judges the selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationMode {
    /// Every week must meet the weekly minimum on its own.
    Strict,
    /// Rolling windows are judged on their aggregate percentage.
    #[default]
    Average,
}

impl ValidationMode {
    /// All supported modes.
    pub const ALL: [ValidationMode; 2] = [ValidationMode::Strict, ValidationMode::Average];

    /// The settings-file spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMode::Strict => "strict",
            ValidationMode::Average => "average",
        }
    }

    fn valid_modes() -> String {
        Self::ALL
            .iter()
            .map(ValidationMode::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::str::FromStr for ValidationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnsupportedMode {
                requested: s.to_string(),
                valid: Self::valid_modes(),
            })
    }
}

impl std::fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ValidationMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ValidationMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The persisted user settings: policy plus validation mode.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorSettings {
    /// Policy parameters.
    #[serde(flatten)]
    pub policy: RtoPolicyConfig,
    /// Strategy selection.
    pub validation_mode: ValidationMode,
}

/// Wire shape of [`ValidatorSettings`] before the mode string is checked.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    #[serde(flatten)]
    policy: RtoPolicyConfig,
    validation_mode: Option<String>,
    top_weeks_to_check: Option<Size>,
}

impl ValidatorSettings {
    /// Parse and validate a settings blob.
    ///
    /// Missing fields take their defaults.  An unknown `validationMode` is
    /// reported as [`Error::UnsupportedMode`], a policy outside its ranges as
    /// [`Error::InvalidPolicy`], and anything else as [`Error::Parse`].
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawSettings =
            serde_json::from_str(json).map_err(|e| Error::Parse(e.to_string()))?;
        let mut policy = raw.policy;
        if let Some(count) = raw.top_weeks_to_check {
            policy.best_weeks_count = count;
        }
        let validation_mode = match raw.validation_mode {
            Some(mode) => mode.parse()?,
            None => ValidationMode::default(),
        };
        policy.validate()?;
        Ok(Self {
            policy,
            validation_mode,
        })
    }

    /// Serialize to the persisted JSON form.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let p = RtoPolicyConfig::default();
        assert!(p.validate().is_ok());
        assert_eq!(p.min_office_days_per_week, 3);
        assert_eq!(p.rolling_period_weeks, 12);
        assert_eq!(p.best_weeks_count, 8);
        assert!(!p.evaluate_best_weeks_only);
        assert!((p.threshold_percent() - 60.0).abs() < 1e-12);
    }

    #[test]
    fn policy_ranges_are_enforced() {
        let p = RtoPolicyConfig::default();
        assert!(matches!(
            p.with_min_office_days(6).validate(),
            Err(Error::InvalidPolicy(_))
        ));
        assert!(p.with_threshold(0.0).validate().is_err());
        assert!(p.with_threshold(1.01).validate().is_err());
        assert!(p.with_threshold(1.0).validate().is_ok());
        assert!(p.with_rolling_period(0).validate().is_err());
        assert!(p.with_best_weeks(13).validate().is_err());
        assert!(p.with_best_weeks(12).validate().is_ok());
    }

    #[test]
    fn mode_parsing() {
        assert_eq!("strict".parse::<ValidationMode>().unwrap(), ValidationMode::Strict);
        assert_eq!(" Average ".parse::<ValidationMode>().unwrap(), ValidationMode::Average);
        let err = "lenient".parse::<ValidationMode>().unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedMode {
                requested: "lenient".into(),
                valid: "strict, average".into(),
            }
        );
    }

    #[test]
    fn settings_from_json_with_defaults_and_alias() {
        let s = ValidatorSettings::from_json(
            r#"{
                "minOfficeDaysPerWeek": 2,
                "topWeeksToCheck": 6,
                "evaluateBestWeeksOnly": true,
                "validationMode": "strict"
            }"#,
        )
        .unwrap();
        assert_eq!(s.validation_mode, ValidationMode::Strict);
        assert_eq!(s.policy.min_office_days_per_week, 2);
        assert_eq!(s.policy.best_weeks_count, 6);
        assert!(s.policy.evaluate_best_weeks_only);
        assert_eq!(s.policy.rolling_period_weeks, 12);

        let empty = ValidatorSettings::from_json("{}").unwrap();
        assert_eq!(empty, ValidatorSettings::default());
    }

    #[test]
    fn settings_errors_are_classified() {
        assert!(matches!(
            ValidatorSettings::from_json(r#"{"validationMode": "weekly"}"#),
            Err(Error::UnsupportedMode { .. })
        ));
        assert!(matches!(
            ValidatorSettings::from_json(r#"{"thresholdPercentage": 2.0}"#),
            Err(Error::InvalidPolicy(_))
        ));
        assert!(matches!(
            ValidatorSettings::from_json("{not json"),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn settings_json_roundtrip() {
        let s = ValidatorSettings {
            policy: RtoPolicyConfig::default().with_best_weeks(8),
            validation_mode: ValidationMode::Average,
        };
        let json = s.to_json().unwrap();
        assert!(json.contains(r#""validationMode":"average""#));
        assert!(json.contains(r#""bestWeeksCount":8"#));
        assert_eq!(ValidatorSettings::from_json(&json).unwrap(), s);
    }
}
