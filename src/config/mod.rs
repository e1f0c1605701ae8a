//! Controller configuration.
//!
//! All tunables live in one serde-serializable [`SignalConfig`]. Build it
//! through [`SignalConfigBuilder`], which validates every rule with
//! stillwater's `Validation` so all problems are reported together.

mod builder;
mod error;
mod violations;

pub use builder::SignalConfigBuilder;
pub use error::BuildError;
pub use violations::{validate, ConfigCheck, ConfigViolation};

use crate::core::Intersection;
use crate::sequencer::{PhaseOrder, DEFAULT_ORDER};
use crate::timing::{TimingPolicy, DEFAULT_YELLOW_SECS};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalConfig {
    pub timing: TimingPolicy,
    /// Green carried by every road at startup
    pub initial_green: u32,
    /// Yellow carried by every road at startup
    pub initial_yellow: u32,
    pub default_order: PhaseOrder,
    /// Pause before the first phase and after the last
    pub cycle_pause_secs: u32,
    pub invalid_choice_pause_secs: u32,
    /// Clear the terminal before each screen
    pub clear_screen: bool,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            timing: TimingPolicy::default(),
            initial_green: 8,
            initial_yellow: DEFAULT_YELLOW_SECS,
            default_order: DEFAULT_ORDER,
            cycle_pause_secs: 2,
            invalid_choice_pause_secs: 2,
            clear_screen: true,
        }
    }
}

impl SignalConfig {
    pub fn builder() -> SignalConfigBuilder {
        SignalConfigBuilder::new()
    }

    /// A fresh all-red intersection carrying the initial timings.
    pub fn intersection(&self) -> Intersection {
        Intersection::new(self.initial_green, self.initial_yellow)
    }
}
