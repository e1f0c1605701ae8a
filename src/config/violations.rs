//! Configuration rules, checked with accumulating validation.

use super::SignalConfig;
use crate::core::LANES;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single problem found in a [`SignalConfig`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("{setting} green time must be at least 1 second")]
    ZeroGreen { setting: &'static str },

    #[error("default order names road {index}, which is not a road index")]
    OrderIndexOutOfRange { index: usize },

    #[error("default order visits road {index} more than once")]
    OrderDuplicate { index: usize },

    #[error("{setting} timings make a cycle longer than {max} seconds", max = u32::MAX)]
    CycleTooLong { setting: &'static str },
}

/// Outcome of one rule, or of all rules combined.
pub type ConfigCheck = Validation<(), NonEmptyVec<ConfigViolation>>;

fn nonzero_green(setting: &'static str, seconds: u32) -> ConfigCheck {
    if seconds == 0 {
        Validation::fail(ConfigViolation::ZeroGreen { setting })
    } else {
        Validation::success(())
    }
}

/// A full cycle of `LANES` phases at `green + yellow` must fit in `u32`.
fn cycle_fits(setting: &'static str, green: u64, yellow: u32) -> ConfigCheck {
    let cycle = (green + u64::from(yellow)) * LANES as u64;
    if cycle > u64::from(u32::MAX) {
        Validation::fail(ConfigViolation::CycleTooLong { setting })
    } else {
        Validation::success(())
    }
}

fn order_checks(order: &[usize; LANES]) -> Vec<ConfigCheck> {
    let mut seen = [false; LANES];
    let mut checks = Vec::new();
    for &index in order {
        let check = match seen.get_mut(index) {
            None => Validation::fail(ConfigViolation::OrderIndexOutOfRange { index }),
            Some(true) => Validation::fail(ConfigViolation::OrderDuplicate { index }),
            Some(slot) => {
                *slot = true;
                Validation::success(())
            }
        };
        checks.push(check);
    }
    checks
}

/// Check every rule, accumulating ALL violations.
pub fn validate(config: &SignalConfig) -> ConfigCheck {
    let timing = &config.timing;
    let mut checks = vec![
        nonzero_green("normal", timing.normal_green),
        nonzero_green("rush", timing.rush_green),
        nonzero_green("adaptive base", timing.adaptive_base_green),
        nonzero_green("initial", config.initial_green),
        cycle_fits("normal", timing.normal_green.into(), timing.yellow),
        cycle_fits("rush", timing.rush_green.into(), timing.yellow),
        cycle_fits(
            "adaptive",
            u64::from(timing.adaptive_base_green) + u64::from(timing.adaptive_max_extra),
            timing.yellow,
        ),
        cycle_fits("initial", config.initial_green.into(), config.initial_yellow),
    ];
    checks.extend(order_checks(&config.default_order));

    Validation::all_vec(checks).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&SignalConfig::default()).is_success());
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let mut config = SignalConfig::default();
        config.timing.normal_green = 0;
        config.timing.rush_green = 0;
        config.default_order = [0, 0, 7, 3];

        match validate(&config) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 4);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::OrderDuplicate { index: 0 })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::OrderIndexOutOfRange { index: 7 })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::ZeroGreen { setting: "rush" })));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn oversized_green_is_rejected() {
        let mut config = SignalConfig::default();
        config.timing.normal_green = u32::MAX / 2;

        match validate(&config) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::CycleTooLong { setting: "normal" })));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn adaptive_ceiling_counts_base_and_extra() {
        let mut config = SignalConfig::default();
        config.timing.adaptive_base_green = u32::MAX / 8;
        config.timing.adaptive_max_extra = u32::MAX / 8;

        match validate(&config) {
            Validation::Failure(errors) => {
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::CycleTooLong { setting: "adaptive" })));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn largest_fitting_cycle_is_accepted() {
        let mut config = SignalConfig::default();
        config.timing.yellow = 0;
        config.timing.rush_green = u32::MAX / LANES as u32;

        assert!(validate(&config).is_success());
    }

    #[test]
    fn zero_yellow_is_allowed() {
        let mut config = SignalConfig::default();
        config.timing.yellow = 0;

        assert!(validate(&config).is_success());
    }
}
