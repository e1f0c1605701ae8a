//! Core intersection types.
//!
//! This module contains the pure data of the signal controller:
//! - The `Signal` aspect and its cycle
//! - `Road` and the fixed-size `Intersection`
//! - Guard predicates for transition control
//! - Immutable transition history
//! - Snapshots handed to presenters
//!
//! Nothing here blocks or performs I/O.

mod guard;
mod history;
mod road;
mod signal;
mod snapshot;

pub use guard::Guard;
pub use history::{CycleHistory, SignalTransition};
pub use road::{Intersection, Road, LANES, ROAD_NAMES};
pub use signal::Signal;
pub use snapshot::{Phase, Snapshot};
