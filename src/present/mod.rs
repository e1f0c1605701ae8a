//! Presentation boundary.
//!
//! The cycle engine reports progress through [`Presenter`] callbacks, each
//! carrying a [`Snapshot`] of the intersection. Presenters decide how (or
//! whether) to show it: the console renderer redraws status tables, tests
//! record the snapshots, a headless run ignores them.

mod console;

pub use console::ConsolePresenter;

use crate::core::{Signal, Snapshot};
use crate::timing::CycleTotals;
use std::io;

/// Callbacks invoked by [`CycleEngine::run_cycle`](crate::engine::CycleEngine::run_cycle).
///
/// All methods default to no-ops so implementors only override what they
/// care about.
pub trait Presenter {
    /// Red times are fresh and no road is active yet.
    fn cycle_started(&mut self, _snapshot: &Snapshot<'_>, _totals: CycleTotals) -> io::Result<()> {
        Ok(())
    }

    /// A road just turned GREEN or YELLOW.
    fn phase_started(&mut self, _snapshot: &Snapshot<'_>) -> io::Result<()> {
        Ok(())
    }

    /// Once per second of a hold, with the seconds still remaining.
    fn countdown_tick(&mut self, _snapshot: &Snapshot<'_>, _remaining: u32) -> io::Result<()> {
        Ok(())
    }

    /// The hold for `signal` has elapsed.
    fn countdown_done(&mut self, _signal: Signal) -> io::Result<()> {
        Ok(())
    }

    /// Every road is back to RED.
    fn cycle_completed(&mut self, _snapshot: &Snapshot<'_>) -> io::Result<()> {
        Ok(())
    }
}

/// A [`Presenter`] that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopPresenter;

impl Presenter for NoopPresenter {}

impl<P: Presenter> Presenter for &mut P {
    fn cycle_started(&mut self, snapshot: &Snapshot<'_>, totals: CycleTotals) -> io::Result<()> {
        (**self).cycle_started(snapshot, totals)
    }

    fn phase_started(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        (**self).phase_started(snapshot)
    }

    fn countdown_tick(&mut self, snapshot: &Snapshot<'_>, remaining: u32) -> io::Result<()> {
        (**self).countdown_tick(snapshot, remaining)
    }

    fn countdown_done(&mut self, signal: Signal) -> io::Result<()> {
        (**self).countdown_done(signal)
    }

    fn cycle_completed(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        (**self).cycle_completed(snapshot)
    }
}
