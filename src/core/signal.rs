//! Signal aspect shown by a single road.
//!
//! A road's signal moves through a fixed cycle: `Red -> Green -> Yellow -> Red`.
//! All methods are pure; the cycle engine decides when a move happens.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Aspect currently shown to one approach of the intersection.
///
/// # Example
///
/// ```rust
/// use crosslight::core::Signal;
///
/// let signal = Signal::Red;
/// assert_eq!(signal.next(), Signal::Green);
/// assert!(signal.next().is_active());
/// assert_eq!(Signal::Yellow.label(), "YELLOW");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Signal {
    #[default]
    Red,
    Yellow,
    Green,
}

impl Signal {
    /// Upper-case label used by presenters.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Red => "RED",
            Self::Yellow => "YELLOW",
            Self::Green => "GREEN",
        }
    }

    /// Whether the road may move traffic (GREEN or YELLOW).
    ///
    /// At most one road of an intersection is active at a time.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Green | Self::Yellow)
    }

    /// Successor in the signal cycle.
    pub fn next(&self) -> Self {
        match self {
            Self::Red => Self::Green,
            Self::Green => Self::Yellow,
            Self::Yellow => Self::Red,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
