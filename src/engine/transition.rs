//! Legal signal transitions and the table that enforces them.

use crate::core::{Guard, Intersection, Signal, SignalTransition};
use chrono::Utc;

/// Errors that can occur when changing a road's signal
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("No road with index {road}")]
    UnknownRoad { road: usize },

    #[error("No transition available for road {road} from {from} to {to}")]
    NoTransition { road: usize, from: Signal, to: Signal },

    #[error("Guard blocked road {road} from {from} to {to}")]
    GuardBlocked { road: usize, from: Signal, to: Signal },
}

/// A permitted signal move, optionally guarded.
#[derive(Debug)]
pub struct Transition {
    pub from: Signal,
    pub to: Signal,
    pub guard: Option<Guard>,
}

impl Transition {
    pub fn new(from: Signal, to: Signal) -> Self {
        Self {
            from,
            to,
            guard: None,
        }
    }

    pub fn guarded(from: Signal, to: Signal, guard: Guard) -> Self {
        Self {
            from,
            to,
            guard: Some(guard),
        }
    }

    /// Check if this transition applies to `road` right now (pure)
    pub fn can_execute(&self, junction: &Intersection, road: usize) -> bool {
        self.guard.as_ref().is_none_or(|g| g.check(junction, road))
    }
}

/// Ordered set of permitted transitions.
///
/// The standard table is `Red -> Green` (only while every other road is red),
/// `Green -> Yellow` and `Yellow -> Red`.
#[derive(Debug)]
pub struct TransitionTable {
    transitions: Vec<Transition>,
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::new(vec![
            Transition::guarded(Signal::Red, Signal::Green, Guard::exclusive()),
            Transition::new(Signal::Green, Signal::Yellow),
            Transition::new(Signal::Yellow, Signal::Red),
        ])
    }
}

impl TransitionTable {
    pub fn new(transitions: Vec<Transition>) -> Self {
        Self { transitions }
    }

    /// Move `road` to `to`, returning the record of the change.
    pub fn apply(
        &self,
        junction: &mut Intersection,
        road: usize,
        to: Signal,
    ) -> Result<SignalTransition, TransitionError> {
        let from = junction
            .road(road)
            .map(|r| r.signal())
            .ok_or(TransitionError::UnknownRoad { road })?;

        let transition = self
            .transitions
            .iter()
            .find(|t| t.from == from && t.to == to)
            .ok_or(TransitionError::NoTransition { road, from, to })?;

        if !transition.can_execute(junction, road) {
            return Err(TransitionError::GuardBlocked { road, from, to });
        }

        if let Some(r) = junction.road_mut(road) {
            r.set_signal(to);
        }

        Ok(SignalTransition {
            road,
            from,
            to,
            timestamp: Utc::now(),
        })
    }
}
