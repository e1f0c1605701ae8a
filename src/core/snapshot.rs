//! Read-only views handed across the presentation boundary.

use super::road::Road;
use super::signal::Signal;
use serde::{Deserialize, Serialize};

/// The road currently holding the right of way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// Canonical index of the active road
    pub road: usize,
    /// GREEN or YELLOW
    pub signal: Signal,
}

/// Borrowed state of the whole intersection at one instant.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Snapshot<'a> {
    pub roads: &'a [Road],
    pub phase: Option<Phase>,
}

impl Snapshot<'_> {
    /// Road holding the active phase.
    pub fn active_road(&self) -> Option<&Road> {
        self.phase.and_then(|p| self.roads.get(p.road))
    }
}
