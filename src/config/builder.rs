//! Builder for constructing a validated configuration.

use super::error::BuildError;
use super::violations::validate;
use super::SignalConfig;
use crate::sequencer::PhaseOrder;
use crate::timing::TimingPolicy;
use stillwater::validation::Validation;

/// Builder for [`SignalConfig`] with a fluent API.
///
/// Every setting starts at its default; [`build`](Self::build) reports all
/// rule violations at once.
///
/// # Example
///
/// ```rust
/// use crosslight::config::SignalConfigBuilder;
///
/// let config = SignalConfigBuilder::new()
///     .rush_green(15)
///     .cycle_pause_secs(0)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.timing.rush_green, 15);
/// ```
#[derive(Debug, Default)]
pub struct SignalConfigBuilder {
    config: SignalConfig,
}

impl SignalConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole timing policy.
    pub fn timing(mut self, timing: TimingPolicy) -> Self {
        self.config.timing = timing;
        self
    }

    pub fn normal_green(mut self, seconds: u32) -> Self {
        self.config.timing.normal_green = seconds;
        self
    }

    pub fn rush_green(mut self, seconds: u32) -> Self {
        self.config.timing.rush_green = seconds;
        self
    }

    pub fn yellow(mut self, seconds: u32) -> Self {
        self.config.timing.yellow = seconds;
        self
    }

    /// Adaptive green is `base + min(vehicles / 5, max_extra)`.
    pub fn adaptive(mut self, base_green: u32, max_extra: u32) -> Self {
        self.config.timing.adaptive_base_green = base_green;
        self.config.timing.adaptive_max_extra = max_extra;
        self
    }

    /// Timings the roads carry before any mode has been chosen.
    pub fn initial_timings(mut self, green: u32, yellow: u32) -> Self {
        self.config.initial_green = green;
        self.config.initial_yellow = yellow;
        self
    }

    pub fn default_order(mut self, order: PhaseOrder) -> Self {
        self.config.default_order = order;
        self
    }

    pub fn cycle_pause_secs(mut self, seconds: u32) -> Self {
        self.config.cycle_pause_secs = seconds;
        self
    }

    pub fn invalid_choice_pause_secs(mut self, seconds: u32) -> Self {
        self.config.invalid_choice_pause_secs = seconds;
        self
    }

    pub fn clear_screen(mut self, enabled: bool) -> Self {
        self.config.clear_screen = enabled;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<SignalConfig, BuildError> {
        match validate(&self.config) {
            Validation::Success(_) => Ok(self.config),
            Validation::Failure(errors) => {
                Err(BuildError::Invalid(errors.iter().cloned().collect()))
            }
        }
    }
}
