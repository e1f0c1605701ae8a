//! Signal transition history tracking.
//!
//! Every signal change made by the cycle engine is recorded with the road and
//! a timestamp, so a finished cycle can be inspected after the fact.

use super::signal::Signal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single road changing its signal.
///
/// # Example
///
/// ```rust
/// use crosslight::core::{Signal, SignalTransition};
/// use chrono::Utc;
///
/// let transition = SignalTransition {
///     road: 0,
///     from: Signal::Red,
///     to: Signal::Green,
///     timestamp: Utc::now(),
/// };
/// assert!(transition.to.is_active());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignalTransition {
    /// Canonical index of the road that changed
    pub road: usize,
    /// The signal being left
    pub from: Signal,
    /// The signal being entered
    pub to: Signal,
    /// When the change occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of signal transitions.
///
/// History is immutable: [`record`](Self::record) returns a new history with
/// the transition appended.
///
/// # Example
///
/// ```rust
/// use crosslight::core::{CycleHistory, Signal, SignalTransition};
/// use chrono::Utc;
///
/// let history = CycleHistory::new();
/// let history = history.record(SignalTransition {
///     road: 2,
///     from: Signal::Red,
///     to: Signal::Green,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.visit_order(), vec![2]);
/// assert_eq!(history.get_path(2), vec![Signal::Red, Signal::Green]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleHistory {
    transitions: Vec<SignalTransition>,
}

impl CycleHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: SignalTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Signals one road passed through, starting with the first `from`.
    pub fn get_path(&self, road: usize) -> Vec<Signal> {
        let mut path = Vec::new();
        for transition in self.transitions.iter().filter(|t| t.road == road) {
            if path.is_empty() {
                path.push(transition.from);
            }
            path.push(transition.to);
        }
        path
    }

    /// Roads in the order they were given GREEN.
    pub fn visit_order(&self) -> Vec<usize> {
        self.transitions
            .iter()
            .filter(|t| t.to == Signal::Green)
            .map(|t| t.road)
            .collect()
    }

    /// Wall-clock span between the first and last transition.
    ///
    /// `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[SignalTransition] {
        &self.transitions
    }
}
