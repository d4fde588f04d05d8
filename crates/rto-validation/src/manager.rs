//! Orchestrator owning the active strategy.
//!
//! The manager is constructed explicitly and passed to whoever needs it;
//! there is no process-wide instance.

use crate::context::ValidationContext;
use crate::policy::{ValidationMode, ValidatorSettings};
use crate::result::ValidationResult;
use crate::strategy::{Strategy, ValidationStrategy};
use rto_core::errors::Result;
use tracing::info;

/// Runs validations with one selectable strategy.
#[derive(Debug)]
pub struct ValidationManager {
    strategy: Strategy,
}

impl Default for ValidationManager {
    fn default() -> Self {
        Self::new(ValidationMode::default())
    }
}

impl ValidationManager {
    /// A manager using `mode`.
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            strategy: Strategy::for_mode(mode),
        }
    }

    /// A manager for the mode named in persisted settings.
    pub fn from_settings(settings: &ValidatorSettings) -> Self {
        Self::new(settings.validation_mode)
    }

    /// A manager for a mode given by name.
    ///
    /// Fails with [`Error::UnsupportedMode`](rto_core::Error::UnsupportedMode)
    /// listing the valid modes.
    pub fn from_mode_name(name: &str) -> Result<Self> {
        Ok(Self::new(name.parse()?))
    }

    /// The active mode.
    pub fn mode(&self) -> ValidationMode {
        self.strategy.mode()
    }

    /// The active strategy.
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Switch strategy.  The new strategy starts with an empty cache.
    pub fn set_mode(&mut self, mode: ValidationMode) {
        if mode != self.mode() {
            info!(from = %self.mode(), to = %mode, "validation mode changed");
            self.strategy = Strategy::for_mode(mode);
        } else {
            self.strategy.reset();
        }
    }

    /// Validate `ctx` with the active strategy.
    ///
    /// Each call is a separate run: the strategy's cache is cleared first,
    /// so the same manager can be handed changed selections or holidays.
    pub fn validate(&mut self, ctx: &ValidationContext) -> Result<ValidationResult> {
        self.strategy.reset();
        self.strategy.validate(ctx)
    }

    /// Clear the active strategy's cache.
    pub fn reset(&mut self) {
        self.strategy.reset();
    }
}
