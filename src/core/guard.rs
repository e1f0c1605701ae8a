//! Guard predicates for controlling signal transitions.
//!
//! Guards are pure boolean functions over the intersection and the road about
//! to change. They keep transition pre-conditions declarative.

use super::road::Intersection;

/// Pure predicate that determines if a road's transition can execute.
///
/// # Example
///
/// ```rust
/// use crosslight::core::{Guard, Intersection};
///
/// let others_red = Guard::exclusive();
/// let junction = Intersection::default();
///
/// assert!(others_red.check(&junction, 0));
/// ```
pub struct Guard {
    predicate: Box<dyn Fn(&Intersection, usize) -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate receives the intersection and the index of the road
    /// whose signal is about to change.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Intersection, usize) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
        }
    }

    /// Passes only while no road other than `road` is GREEN or YELLOW.
    pub fn exclusive() -> Self {
        Self::new(|junction, road| {
            junction
                .roads()
                .iter()
                .enumerate()
                .all(|(i, r)| i == road || !r.signal().is_active())
        })
    }

    /// Evaluate the guard.
    pub fn check(&self, junction: &Intersection, road: usize) -> bool {
        (self.predicate)(junction, road)
    }
}

impl std::fmt::Debug for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
