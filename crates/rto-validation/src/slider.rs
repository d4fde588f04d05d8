//! Walks every rolling window of the tracked period through a strategy.
//!
//! Windows are evaluated in chronological order.  The run ends in
//! [`SlideState::Violated`] (carrying the index of the first failing window)
//! or [`SlideState::AllCompliant`].  With `fail_fast` the walk stops at the
//! first failure; otherwise every window is classified so the display can
//! mark each one.

use crate::context::ValidationContext;
use crate::strategy::ValidationStrategy;
use crate::week::WindowCompliance;
use rto_core::errors::Result;
use rto_core::Size;
use tracing::debug;

/// Progress of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideState {
    /// No window evaluated yet.
    NotStarted,
    /// Evaluating the window starting at this week index.
    Evaluating(Size),
    /// Finished; the window starting at this index was the first to fail.
    Violated(Size),
    /// Finished; no window failed.
    AllCompliant,
}

impl SlideState {
    /// Whether the slide has finished.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SlideState::Violated(_) | SlideState::AllCompliant)
    }
}

/// Windows collected by a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideOutcome {
    /// Passing windows, in order.
    pub compliant_windows: Vec<WindowCompliance>,
    /// Failing windows, in order.
    pub violating_windows: Vec<WindowCompliance>,
    /// Final state.
    pub state: SlideState,
}

impl SlideOutcome {
    /// The earliest failing window.
    pub fn first_violation(&self) -> Option<&WindowCompliance> {
        self.violating_windows.first()
    }

    /// The window the verdict is reported against: the first violation if
    /// there is one, otherwise the first window.
    pub fn representative(&self) -> Option<&WindowCompliance> {
        self.first_violation()
            .or_else(|| self.compliant_windows.first())
    }

    /// Number of windows evaluated.
    pub fn evaluated(&self) -> Size {
        self.compliant_windows.len() + self.violating_windows.len()
    }
}

/// Drives a strategy over `window_size`-week windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSlider {
    window_size: Size,
    fail_fast: bool,
}

impl WindowSlider {
    /// Slide `window_size`-week windows, evaluating all of them.
    pub fn new(window_size: Size) -> Self {
        Self {
            window_size,
            fail_fast: false,
        }
    }

    /// Stop at the first failing window.
    pub fn fail_fast(mut self, on: bool) -> Self {
        self.fail_fast = on;
        self
    }

    /// Weeks per window.
    pub fn window_size(&self) -> Size {
        self.window_size
    }

    /// Number of window starts (`0..=total_weeks - window_size`).
    pub fn window_count(&self, total_weeks: Size) -> Size {
        if self.window_size == 0 || total_weeks < self.window_size {
            0
        } else {
            total_weeks - self.window_size + 1
        }
    }

    /// Run the slide.
    pub fn run<S>(&self, strategy: &mut S, ctx: &ValidationContext) -> Result<SlideOutcome>
    where
        S: ValidationStrategy + ?Sized,
    {
        let mut compliant_windows = Vec::new();
        let mut violating_windows: Vec<WindowCompliance> = Vec::new();
        let mut state = SlideState::NotStarted;
        let windows = self.window_count(ctx.week_count());
        debug!(?state, window_size = self.window_size, windows, "slide starting");

        for start in 0..windows {
            state = SlideState::Evaluating(start);
            let window = strategy.window_compliance(start, self.window_size, ctx)?;
            debug!(
                ?state,
                strategy = strategy.name(),
                pct = window.compliance_percentage,
                compliant = window.is_compliant,
                "window evaluated"
            );
            if window.is_compliant {
                compliant_windows.push(window);
                continue;
            }
            violating_windows.push(window);
            if self.fail_fast {
                break;
            }
        }

        state = match violating_windows.first() {
            Some(w) => SlideState::Violated(w.window_start),
            None => SlideState::AllCompliant,
        };
        let outcome = SlideOutcome {
            compliant_windows,
            violating_windows,
            state,
        };
        debug!(?state, windows = outcome.evaluated(), "slide finished");
        Ok(outcome)
    }
}
