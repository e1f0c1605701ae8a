//! Timed holds.
//!
//! A hold blocks the caller for a whole number of seconds, calling back once
//! per second with the seconds still remaining. There is no cancellation; a
//! hold simply elapses.

use std::io;
use std::thread;
use std::time::Duration;

/// Source of real or simulated time for the cycle engine.
pub trait Clock {
    /// Hold for `seconds`, calling `on_tick(remaining)` at the start of each
    /// second (`seconds, seconds - 1, ..., 1`). An error from `on_tick` ends
    /// the hold early and is returned.
    fn hold<F>(&mut self, seconds: u32, on_tick: F) -> io::Result<()>
    where
        F: FnMut(u32) -> io::Result<()>;

    /// Wait without ticking.
    fn pause(&mut self, seconds: u32);
}

/// Wall-clock time via `thread::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn hold<F>(&mut self, seconds: u32, mut on_tick: F) -> io::Result<()>
    where
        F: FnMut(u32) -> io::Result<()>,
    {
        for remaining in (1..=seconds).rev() {
            on_tick(remaining)?;
            thread::sleep(Duration::from_secs(1));
        }
        Ok(())
    }

    fn pause(&mut self, seconds: u32) {
        thread::sleep(Duration::from_secs(u64::from(seconds)));
    }
}

/// Advances virtual time instantly.
///
/// Holds and pauses are recorded so callers can assert on them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VirtualClock {
    elapsed: u64,
    holds: Vec<u32>,
    pauses: Vec<u32>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total virtual seconds spent in holds and pauses.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn holds(&self) -> &[u32] {
        &self.holds
    }

    pub fn pauses(&self) -> &[u32] {
        &self.pauses
    }
}

impl Clock for VirtualClock {
    fn hold<F>(&mut self, seconds: u32, mut on_tick: F) -> io::Result<()>
    where
        F: FnMut(u32) -> io::Result<()>,
    {
        self.holds.push(seconds);
        for remaining in (1..=seconds).rev() {
            on_tick(remaining)?;
            self.elapsed += 1;
        }
        Ok(())
    }

    fn pause(&mut self, seconds: u32) {
        self.pauses.push(seconds);
        self.elapsed += u64::from(seconds);
    }
}

impl<C: Clock> Clock for &mut C {
    fn hold<F>(&mut self, seconds: u32, on_tick: F) -> io::Result<()>
    where
        F: FnMut(u32) -> io::Result<()>,
    {
        (**self).hold(seconds, on_tick)
    }

    fn pause(&mut self, seconds: u32) {
        (**self).pause(seconds)
    }
}
