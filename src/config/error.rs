//! Build errors for the configuration builder.

use super::violations::ConfigViolation;
use thiserror::Error;

/// Errors that can occur when building a [`SignalConfig`](super::SignalConfig).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Invalid signal configuration: {}", render(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn render(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
