//! Signal cycle engine.
//!
//! This module is the imperative shell around the pure core: it mutates road
//! signals through a guarded transition table, blocks on a [`Clock`] for each
//! hold, and reports every step to a [`Presenter`](crate::present::Presenter).
//!
//! # Key Concepts
//!
//! - **Transitions**: the legal signal moves, with guards enforcing that only
//!   one road is ever GREEN or YELLOW
//! - **Cycle engine**: visits every road once per cycle in sequencer order
//! - **Clock**: real or virtual time for the GREEN/YELLOW holds

mod clock;
mod cycle;
mod transition;

pub use clock::{Clock, SystemClock, VirtualClock};
pub use cycle::{CycleEngine, CycleReport, EngineError};
pub use transition::{Transition, TransitionError, TransitionTable};
