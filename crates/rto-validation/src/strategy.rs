//! The strategy seam.
//!
//! A [`ValidationStrategy`] turns a [`ValidationContext`] into a
//! [`ValidationResult`].  Each strategy owns a [`ComplianceCache`], so
//! repeated week and window lookups within one run are computed once.  The
//! cache key does not name the dataset: call [`ValidationStrategy::reset`]
//! before running the same instance over different data.
//!
//! [`Strategy`] is the closed set of strategies the manager can select.

use crate::accounting::WeekTally;
use crate::average::AverageStrategy;
use crate::cache::ComplianceCache;
use crate::context::ValidationContext;
use crate::policy::ValidationMode;
use crate::result::ValidationResult;
use crate::strict::StrictStrategy;
use crate::week::{WeekCompliance, WindowCompliance};
use rto_core::errors::{Error, Result};
use rto_core::{invariant, Size};
use rto_time::Date;

/// A way of judging attendance against the policy.
pub trait ValidationStrategy: std::fmt::Debug {
    /// Mode this strategy implements.
    fn mode(&self) -> ValidationMode;

    /// Short name used in logs.
    fn name(&self) -> &'static str {
        self.mode().as_str()
    }

    /// Judge the whole tracked period.
    fn validate(&mut self, ctx: &ValidationContext) -> Result<ValidationResult>;

    /// Compliance of the week containing `week_start`.
    fn week_compliance(&mut self, week_start: Date, ctx: &ValidationContext) -> WeekCompliance;

    /// Compliance of the `window_size` weeks starting at week index
    /// `window_start`.
    ///
    /// Fails with [`Error::IndexOutOfRange`] if the window runs past the
    /// tracked period.
    fn window_compliance(
        &mut self,
        window_start: Size,
        window_size: Size,
        ctx: &ValidationContext,
    ) -> Result<WindowCompliance>;

    /// Whether there is anything to judge.
    fn is_applicable(&self, ctx: &ValidationContext) -> bool {
        !ctx.selections().is_empty()
    }

    /// Forget every cached result.
    fn reset(&mut self);
}

// ── Shared week / window plumbing ─────────────────────────────────────────────

pub(crate) fn cached_week(
    cache: &mut ComplianceCache,
    week_start: Date,
    ctx: &ValidationContext,
) -> WeekCompliance {
    let monday = week_start.week_start();
    if let Some(week) = cache.week(monday) {
        return week.clone();
    }
    let week = WeekTally::count(monday, ctx.oof_dates(), ctx.holidays())
        .compliance(ctx.week_number(monday), ctx.policy());
    cache.insert_week(week.clone());
    week
}

/// The weeks of one window, chronologically.
pub(crate) fn window_weeks(
    cache: &mut ComplianceCache,
    window_start: Size,
    window_size: Size,
    ctx: &ValidationContext,
) -> Result<Vec<WeekCompliance>> {
    invariant!(window_size > 0, "window size must be positive");
    let starts = ctx.week_starts();
    let end = window_start + window_size;
    if end > starts.len() {
        return Err(Error::IndexOutOfRange {
            index: end - 1,
            size: starts.len(),
        });
    }
    Ok(starts[window_start..end]
        .iter()
        .map(|d| cached_week(cache, *d, ctx))
        .collect())
}

// ── Strategy ──────────────────────────────────────────────────────────────────

/// Every strategy the manager can select.
#[derive(Debug)]
pub enum Strategy {
    /// Fail-fast, week-by-week minimum.
    Strict(StrictStrategy),
    /// Rolling-window average, optionally over the best weeks.
    Average(AverageStrategy),
}

impl Strategy {
    /// A fresh strategy for `mode`.
    pub fn for_mode(mode: ValidationMode) -> Self {
        match mode {
            ValidationMode::Strict => Strategy::Strict(StrictStrategy::new()),
            ValidationMode::Average => Strategy::Average(AverageStrategy::new()),
        }
    }

    fn inner(&self) -> &dyn ValidationStrategy {
        match self {
            Strategy::Strict(s) => s,
            Strategy::Average(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ValidationStrategy {
        match self {
            Strategy::Strict(s) => s,
            Strategy::Average(s) => s,
        }
    }
}

impl ValidationStrategy for Strategy {
    fn mode(&self) -> ValidationMode {
        self.inner().mode()
    }

    fn validate(&mut self, ctx: &ValidationContext) -> Result<ValidationResult> {
        self.inner_mut().validate(ctx)
    }

    fn week_compliance(&mut self, week_start: Date, ctx: &ValidationContext) -> WeekCompliance {
        self.inner_mut().week_compliance(week_start, ctx)
    }

    fn window_compliance(
        &mut self,
        window_start: Size,
        window_size: Size,
        ctx: &ValidationContext,
    ) -> Result<WindowCompliance> {
        self.inner_mut()
            .window_compliance(window_start, window_size, ctx)
    }

    fn is_applicable(&self, ctx: &ValidationContext) -> bool {
        self.inner().is_applicable(ctx)
    }

    fn reset(&mut self) {
        self.inner_mut().reset()
    }
}
