//! Crosslight: traffic-signal control for a four-way intersection
//!
//! Four roads (North, South, East, West) take turns holding the right of way.
//! Each road cycles `RED -> GREEN -> YELLOW -> RED`, and exactly one road is
//! GREEN or YELLOW at any instant. Green times come from fixed plans
//! (normal, rush hour), from vehicle demand (adaptive), or from a manual
//! override that also picks which road goes first.
//!
//! # Core Concepts
//!
//! - **Roads**: per-approach signal, timings and demand in [`core`]
//! - **Timing policies**: pure functions in [`timing`] that derive green,
//!   yellow and red durations
//! - **Sequencer**: the visiting order of the roads in [`sequencer`]
//! - **Cycle engine**: the guarded state machine in [`engine`] that drives
//!   one full rotation
//! - **Presentation**: snapshot callbacks in [`present`]; the console
//!   renderer is one implementation
//!
//! # Example
//!
//! ```rust
//! use crosslight::core::{Intersection, Signal};
//! use crosslight::engine::{CycleEngine, VirtualClock};
//! use crosslight::present::NoopPresenter;
//! use crosslight::sequencer::PhaseSequencer;
//! use crosslight::timing::{FixedMode, TimingPolicy};
//!
//! let mut junction = Intersection::default();
//! let mut sequencer = PhaseSequencer::default();
//! let mut engine = CycleEngine::new(VirtualClock::new(), NoopPresenter);
//!
//! junction.set_demand(2, 30);
//! TimingPolicy::default().apply_adaptive(junction.roads_mut());
//! sequencer.override_first(2);
//!
//! let report = engine.run_cycle(&mut junction, sequencer.order()).unwrap();
//!
//! assert_eq!(report.visited, vec![2, 0, 1, 3]);
//! assert_eq!(junction.roads()[2].green_time(), 14);
//! assert!(junction.roads().iter().all(|r| r.signal() == Signal::Red));
//! ```

pub mod config;
pub mod control;
pub mod core;
pub mod engine;
pub mod present;
pub mod sequencer;
pub mod timing;

// Re-export commonly used types
pub use crate::config::{SignalConfig, SignalConfigBuilder};
pub use crate::core::{Intersection, Road, Signal};
pub use crate::engine::{CycleEngine, CycleReport};
pub use crate::sequencer::PhaseSequencer;
pub use crate::timing::{FixedMode, TimingPolicy};
