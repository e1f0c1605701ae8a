//! Phase ordering.
//!
//! The sequencer owns the visiting order used by every cycle until an
//! operator override replaces it.

use crate::core::{LANES, ROAD_NAMES};
use tracing::{debug, info};

/// Permutation of road indices visited in one cycle.
pub type PhaseOrder = [usize; LANES];

/// North, East, South, West.
pub const DEFAULT_ORDER: PhaseOrder = [0, 2, 1, 3];

/// Whether `order` visits every road exactly once.
pub fn is_permutation(order: &PhaseOrder) -> bool {
    let mut seen = [false; LANES];
    order.iter().all(|&index| match seen.get_mut(index) {
        Some(slot) if !*slot => {
            *slot = true;
            true
        }
        _ => false,
    })
}

/// Build an order that starts at `first`, followed by the remaining roads in
/// ascending index order.
///
/// This is not a rotation: `order_starting_at(2)` is `[2, 0, 1, 3]`. An index
/// outside `0..LANES` falls back to 0.
///
/// # Example
///
/// ```rust
/// use crosslight::sequencer::order_starting_at;
///
/// assert_eq!(order_starting_at(2), [2, 0, 1, 3]);
/// assert_eq!(order_starting_at(9), [0, 1, 2, 3]);
/// assert_eq!(order_starting_at(-1), [0, 1, 2, 3]);
/// ```
pub fn order_starting_at(first: i64) -> PhaseOrder {
    let first = match usize::try_from(first) {
        Ok(index) if index < LANES => index,
        _ => {
            debug!(requested = first, "first road out of range, using 0");
            0
        }
    };

    let mut order = [first; LANES];
    let rest = (0..LANES).filter(|&i| i != first);
    for (slot, index) in order.iter_mut().skip(1).zip(rest) {
        *slot = index;
    }
    order
}

/// Holds the active visiting order across cycles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseSequencer {
    order: PhaseOrder,
}

impl Default for PhaseSequencer {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER)
    }
}

impl PhaseSequencer {
    pub fn new(order: PhaseOrder) -> Self {
        Self { order }
    }

    pub fn order(&self) -> &PhaseOrder {
        &self.order
    }

    /// Replace the active order with one starting at `first`.
    ///
    /// The new order persists for later cycles.
    pub fn override_first(&mut self, first: i64) -> &PhaseOrder {
        self.order = order_starting_at(first);
        info!(
            first = ROAD_NAMES[self.order[0]],
            order = ?self.order,
            "phase order overridden"
        );
        &self.order
    }

    /// Road names in visiting order.
    pub fn names(&self) -> [&'static str; LANES] {
        self.order.map(|i| ROAD_NAMES[i])
    }
}
