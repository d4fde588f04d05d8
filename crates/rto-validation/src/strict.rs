//! Strict mode: every week on its own must reach the weekly minimum.
//!
//! Weeks are walked one at a time over the whole tracked period (not bounded
//! to the rolling period) and the walk stops at the first failing week.

use crate::cache::ComplianceCache;
use crate::context::ValidationContext;
use crate::policy::{RtoPolicyConfig, ValidationMode};
use crate::result::{strict_fail_message, strict_pass_message, ValidationResult};
use crate::slider::{SlideOutcome, WindowSlider};
use crate::strategy::{cached_week, window_weeks, ValidationStrategy};
use crate::week::{WeekCompliance, WindowCompliance};
use rto_core::errors::Result;
use rto_core::{invariant, Real, Size, Timestamp};
use rto_time::Date;
use tracing::info;

/// Fail-fast, week-by-week validation.
#[derive(Debug, Clone, Default)]
pub struct StrictStrategy {
    cache: ComplianceCache,
}

impl StrictStrategy {
    /// A strategy with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The strategy's cache.
    pub fn cache(&self) -> &ComplianceCache {
        &self.cache
    }
}

impl ValidationStrategy for StrictStrategy {
    fn mode(&self) -> ValidationMode {
        ValidationMode::Strict
    }

    fn validate(&mut self, ctx: &ValidationContext) -> Result<ValidationResult> {
        ctx.policy().validate()?;
        if !self.is_applicable(ctx) {
            info!(strategy = self.name(), "no selections, nothing to validate");
            return Ok(ValidationResult::no_selections(self.mode()));
        }
        if ctx.week_count() == 0 {
            return Ok(ValidationResult::no_weeks(self.mode()));
        }

        let outcome = WindowSlider::new(1).fail_fast(true).run(self, ctx)?;
        let result = strict_result(outcome, ctx.policy())?;
        info!(
            strategy = self.name(),
            valid = result.is_valid,
            pct = result.overall_compliance,
            "validation finished"
        );
        Ok(result)
    }

    fn week_compliance(&mut self, week_start: Date, ctx: &ValidationContext) -> WeekCompliance {
        cached_week(&mut self.cache, week_start, ctx)
    }

    /// A window passes only if every week in it reaches the weekly minimum.
    fn window_compliance(
        &mut self,
        window_start: Size,
        window_size: Size,
        ctx: &ValidationContext,
    ) -> Result<WindowCompliance> {
        if let Some(window) = self.cache.window(window_start, window_size) {
            return Ok(window.clone());
        }
        let weeks = window_weeks(&mut self.cache, window_start, window_size, ctx)?;
        let every_week_passes = weeks.iter().all(|w| w.is_compliant);
        let mut window =
            WindowCompliance::aggregate(window_start, window_size, weeks, Vec::new(), ctx.policy());
        window.is_compliant = every_week_passes;
        self.cache.insert_window(window_size, window.clone());
        Ok(window)
    }

    fn reset(&mut self) {
        self.cache.clear();
    }
}

fn strict_result(outcome: SlideOutcome, policy: &RtoPolicyConfig) -> Result<ValidationResult> {
    let SlideOutcome {
        compliant_windows,
        violating_windows,
        ..
    } = outcome;
    let passed: Vec<&WeekCompliance> = compliant_windows.iter().flat_map(|w| &w.weeks).collect();
    let mut evaluated_week_starts: Vec<Timestamp> =
        passed.iter().map(|w| w.week_start_millis()).collect();

    if let Some(window) = violating_windows.first() {
        invariant!(
            !window.weeks.is_empty(),
            "violating window at week {} has no weeks",
            window.window_start
        );
        let week = window.weeks[0].clone();
        let start = week.week_start_millis();
        evaluated_week_starts.push(start);
        return Ok(ValidationResult {
            is_valid: false,
            message: strict_fail_message(&week, policy),
            mode: ValidationMode::Strict,
            overall_compliance: week.percentage,
            average_office_days: Real::from(week.office_days),
            compliant_windows,
            violating_windows,
            invalid_week: Some(week),
            evaluated_week_starts,
            window_week_starts: vec![start],
            invalid_week_start: Some(start),
        });
    }

    let n = passed.len().max(1) as Real;
    let mean_pct = if passed.is_empty() {
        100.0
    } else {
        passed.iter().map(|w| w.percentage).sum::<Real>() / n
    };
    let mean_office = passed.iter().map(|w| Real::from(w.office_days)).sum::<Real>() / n;
    Ok(ValidationResult {
        is_valid: true,
        message: strict_pass_message(mean_pct, policy),
        mode: ValidationMode::Strict,
        overall_compliance: mean_pct,
        average_office_days: mean_office,
        compliant_windows,
        violating_windows,
        invalid_week: None,
        window_week_starts: evaluated_week_starts.clone(),
        evaluated_week_starts,
        invalid_week_start: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::DaySelection;
    use crate::reader::TrackedPeriod;
    use rto_time::NoHolidays;

    fn monday() -> Date {
        Date::from_ymd(2024, 1, 1).unwrap()
    }

    /// `oof[i]` OOF days (Mon onward) in week `i`.
    fn ctx(oof: &[u32]) -> ValidationContext {
        let mut selections = Vec::new();
        for (i, n) in oof.iter().enumerate() {
            for d in 0..*n {
                let date = monday() + (7 * i as i32 + d as i32);
                selections.push(DaySelection::out_of_office(date, &NoHolidays));
            }
        }
        ValidationContext::new(selections, RtoPolicyConfig::default())
            .with_period(TrackedPeriod::new(monday(), oof.len()))
    }

    #[test]
    fn stops_at_first_failing_week() {
        let mut s = StrictStrategy::new();
        let r = s.validate(&ctx(&[2, 2, 3, 4, 0])).unwrap();
        assert!(!r.is_valid);
        assert_eq!(r.invalid_week.as_ref().map(|w| w.week_number), Some(3));
        assert_eq!(r.compliant_windows.len(), 2);
        assert_eq!(r.violating_windows.len(), 1);
        assert_eq!(r.evaluated_week_starts.len(), 3);
        // weeks 4 and 5 were never looked at
        assert_eq!(s.cache().week_entries(), 3);
    }

    #[test]
    fn passing_run_reports_mean_percentage() {
        let mut s = StrictStrategy::new();
        let r = s.validate(&ctx(&[0, 2])).unwrap();
        assert!(r.is_valid);
        assert!((r.overall_compliance - 80.0).abs() < 1e-9);
        assert!((r.average_office_days - 4.0).abs() < 1e-9);
        assert!(r.message.starts_with("✓"));
        assert_eq!(r.window_week_starts.len(), 2);
    }

    #[test]
    fn reset_clears_cache() {
        let mut s = StrictStrategy::new();
        s.validate(&ctx(&[1, 1])).unwrap();
        assert!(!s.cache().is_empty());
        s.reset();
        assert!(s.cache().is_empty());
    }
}
