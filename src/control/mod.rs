//! Operator-facing control loop.
//!
//! Reads menu choices, road demand and override requests from a text source,
//! applies the chosen timing policy and hands each cycle to the engine.
//! Unreadable input ends the loop; out-of-range values are clamped.

mod input;
mod menu;
mod session;

pub use input::{collect_demand, DemandSource, InputError, OperatorInput};
pub use menu::MenuChoice;
pub use session::{ControlLoop, SessionEnd, SessionError};
