//! Average mode: rolling windows judged on their aggregate percentage.
//!
//! Windows hold `rolling_period_weeks` weeks (fewer if the tracked period is
//! shorter).  With `evaluate_best_weeks_only` set, only the best
//! `best_weeks_count` weeks of each window count toward its totals.  Every
//! window is evaluated; the verdict is reported against the first violating
//! window, or the first window when none violates.

use crate::cache::ComplianceCache;
use crate::context::ValidationContext;
use crate::policy::{RtoPolicyConfig, ValidationMode};
use crate::result::{average_fail_message, average_pass_message, ValidationResult};
use crate::slider::{SlideOutcome, SlideState, WindowSlider};
use crate::strategy::{cached_week, window_weeks, ValidationStrategy};
use crate::week::{select_best_weeks, WeekCompliance, WindowCompliance};
use rto_core::errors::{Error, Result};
use rto_core::{invariant, Size};
use rto_time::Date;
use tracing::{debug, info};

/// Rolling-window, optionally best-N-of-M, validation.
#[derive(Debug, Clone, Default)]
pub struct AverageStrategy {
    cache: ComplianceCache,
}

impl AverageStrategy {
    /// A strategy with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The strategy's cache.
    pub fn cache(&self) -> &ComplianceCache {
        &self.cache
    }

    /// Window length used over `ctx`.
    pub fn window_size(ctx: &ValidationContext) -> Size {
        ctx.policy().rolling_period_weeks.min(ctx.week_count())
    }
}

impl ValidationStrategy for AverageStrategy {
    fn mode(&self) -> ValidationMode {
        ValidationMode::Average
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

        let window_size = Self::window_size(ctx);
        let outcome = WindowSlider::new(window_size).run(self, ctx)?;
        let result = average_result(outcome, ctx.policy())?;
        info!(
            strategy = self.name(),
            valid = result.is_valid,
            pct = result.overall_compliance,
            violating = result.violating_windows.len(),
            "validation finished"
        );
        Ok(result)
    }

    fn week_compliance(&mut self, week_start: Date, ctx: &ValidationContext) -> WeekCompliance {
        cached_week(&mut self.cache, week_start, ctx)
    }

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
        let policy = ctx.policy();
        let (evaluated, excluded) = if policy.evaluate_best_weeks_only {
            select_best_weeks(weeks, policy.best_weeks_count)
        } else {
            (weeks, Vec::new())
        };
        debug!(
            window_start,
            evaluated = evaluated.len(),
            excluded = excluded.len(),
            "window weeks selected"
        );
        let window =
            WindowCompliance::aggregate(window_start, window_size, evaluated, excluded, policy);
        self.cache.insert_window(window_size, window.clone());
        Ok(window)
    }

    fn reset(&mut self) {
        self.cache.clear();
    }
}

fn average_result(outcome: SlideOutcome, policy: &RtoPolicyConfig) -> Result<ValidationResult> {
    let representative = outcome
        .representative()
        .cloned()
        .ok_or_else(|| Error::InvariantViolation("no window was evaluated".into()))?;
    let SlideOutcome {
        compliant_windows,
        violating_windows,
        state,
    } = outcome;

    let is_valid = matches!(state, SlideState::AllCompliant);
    let avg = representative.average_office_days_per_week;
    let pct = representative.compliance_percentage;
    let (message, invalid_week) = if is_valid {
        (average_pass_message(avg, pct, policy), None)
    } else {
        invariant!(
            !representative.weeks.is_empty(),
            "violating window {}-{} has no evaluated weeks",
            representative.window_start,
            representative.window_end
        );
        (
            average_fail_message(
                representative.window_start + 1,
                representative.window_end + 1,
                avg,
                pct,
                policy,
            ),
            representative.weakest_week().cloned(),
        )
    };
    let evaluated_week_starts = representative.evaluated_week_starts();
    let window_week_starts = representative.window_week_starts();

    Ok(ValidationResult {
        is_valid,
        message,
        mode: ValidationMode::Average,
        overall_compliance: pct,
        average_office_days: avg,
        invalid_week_start: invalid_week.as_ref().map(WeekCompliance::week_start_millis),
        invalid_week,
        evaluated_week_starts,
        window_week_starts,
        compliant_windows,
        violating_windows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::DaySelection;
    use crate::reader::TrackedPeriod;
    use approx::assert_abs_diff_eq;
    use rto_time::NoHolidays;

    fn monday() -> Date {
        Date::from_ymd(2024, 1, 1).unwrap()
    }

    fn ctx(oof: &[u32], policy: RtoPolicyConfig) -> ValidationContext {
        let mut selections = Vec::new();
        for (i, n) in oof.iter().enumerate() {
            for d in 0..*n {
                let date = monday() + (7 * i as i32 + d as i32);
                selections.push(DaySelection::out_of_office(date, &NoHolidays));
            }
        }
        ValidationContext::new(selections, policy)
            .with_period(TrackedPeriod::new(monday(), oof.len()))
    }

    #[test]
    fn short_period_uses_single_window() {
        let mut s = AverageStrategy::new();
        let r = s.validate(&ctx(&[2; 8], RtoPolicyConfig::default())).unwrap();
        assert!(r.is_valid);
        assert_eq!(r.compliant_windows.len(), 1);
        assert_abs_diff_eq!(r.overall_compliance, 60.0, epsilon = 1e-9);
        assert_abs_diff_eq!(r.average_office_days, 3.0, epsilon = 1e-9);
        assert_eq!(r.evaluated_week_starts.len(), 8);
    }

    #[test]
    fn every_window_is_classified() {
        // 14 weeks, 12-week windows: 40/60, 38/60, then 33/60 once week 14 is empty
        let mut oof = vec![2; 14];
        oof[0] = 0;
        oof[1] = 0;
        oof[13] = 5;
        let mut s = AverageStrategy::new();
        let r = s.validate(&ctx(&oof, RtoPolicyConfig::default())).unwrap();
        assert!(!r.is_valid);
        let passing: Vec<_> = r.compliant_windows.iter().map(|w| w.window_start).collect();
        assert_eq!(passing, vec![0, 1]);
        assert_eq!(r.violating_windows.len(), 1);
        assert_eq!(r.violating_windows[0].window_start, 2);
        assert_abs_diff_eq!(r.overall_compliance, 55.0, epsilon = 1e-9);
        assert!(r.message.contains("weeks 3-14"));
        assert_eq!(r.invalid_week.as_ref().map(|w| w.week_number), Some(14));
    }

    #[test]
    fn reports_first_violating_window() {
        let mut oof = vec![0; 14];
        for w in &mut oof[1..=6] {
            *w = 5;
        }
        let mut s = AverageStrategy::new();
        let r = s.validate(&ctx(&oof, RtoPolicyConfig::default())).unwrap();
        assert!(!r.is_valid);
        let first = r.first_violation().unwrap();
        assert_eq!(first.window_start, 0);
        assert!(r.message.contains("weeks 1-12"));
        // weakest week is the earliest zero-office week
        assert_eq!(r.invalid_week.as_ref().map(|w| w.week_number), Some(2));
        assert_eq!(r.invalid_week_start, Some((monday() + 7).timestamp_millis()));
    }

    #[test]
    fn best_weeks_forgive_bad_weeks() {
        let mut oof = vec![0; 12];
        for w in &mut oof[8..] {
            *w = 5;
        }
        let policy = RtoPolicyConfig::default().with_best_weeks(8);
        let mut s = AverageStrategy::new();
        let r = s.validate(&ctx(&oof, policy)).unwrap();
        assert!(r.is_valid);
        assert_abs_diff_eq!(r.overall_compliance, 100.0, epsilon = 1e-9);
        assert_eq!(r.evaluated_week_starts.len(), 8);
        assert_eq!(r.window_week_starts.len(), 12);
        assert_eq!(r.compliant_windows[0].excluded_weeks.len(), 4);
    }

    #[test]
    fn overlapping_windows_share_cached_weeks() {
        let mut s = AverageStrategy::new();
        s.validate(&ctx(&[1; 20], RtoPolicyConfig::default())).unwrap();
        assert_eq!(s.cache().week_entries(), 20);
        assert_eq!(s.cache().window_entries(), 9);
    }
}
