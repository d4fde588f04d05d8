//! Per-strategy memo of week and window results.
//!
//! Keys are the week's Monday and the `(window_start, window_size)` pair.
//! Neither key names the dataset, so the cache must be cleared whenever the
//! selections, holidays, or policy change.  A tracked period holds at most a
//! few dozen weeks, so the maps are never evicted; [`ComplianceCache::clear`]
//! is the only bound.

use crate::week::{WeekCompliance, WindowCompliance};
use rto_core::Size;
use rto_time::Date;
use std::collections::HashMap;
use tracing::{debug, info};

/// Cached week and window results owned by one strategy instance.
#[derive(Debug, Clone, Default)]
pub struct ComplianceCache {
    weeks: HashMap<Date, WeekCompliance>,
    windows: HashMap<(Size, Size), WindowCompliance>,
}

impl ComplianceCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached week, if present.
    pub fn week(&self, week_start: Date) -> Option<&WeekCompliance> {
        let hit = self.weeks.get(&week_start);
        debug!(week = %week_start.to_iso(), hit = hit.is_some(), "week cache lookup");
        hit
    }

    /// Store a week result.
    pub fn insert_week(&mut self, week: WeekCompliance) {
        self.weeks.insert(week.week_start, week);
    }

    /// Cached window, if present.
    pub fn window(&self, window_start: Size, window_size: Size) -> Option<&WindowCompliance> {
        let hit = self.windows.get(&(window_start, window_size));
        debug!(window_start, window_size, hit = hit.is_some(), "window cache lookup");
        hit
    }

    /// Store a window result.
    pub fn insert_window(&mut self, window_size: Size, window: WindowCompliance) {
        self.windows.insert((window.window_start, window_size), window);
    }

    /// Number of cached weeks.
    pub fn week_entries(&self) -> usize {
        self.weeks.len()
    }

    /// Number of cached windows.
    pub fn window_entries(&self) -> usize {
        self.windows.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty() && self.windows.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        info!(
            weeks = self.weeks.len(),
            windows = self.windows.len(),
            "compliance cache cleared"
        );
        self.weeks.clear();
        self.windows.clear();
    }
}
