//! Timing policies.
//!
//! Each policy fills `green_time` / `yellow_time` for every road; red times
//! are always derived afterwards by [`compute_red_times`]. These functions
//! only touch timing fields, never demand or signals.

use crate::core::Road;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Yellow duration used by every fixed mode.
pub const DEFAULT_YELLOW_SECS: u32 = 3;

/// Vehicles that earn one extra second of adaptive green.
pub const VEHICLES_PER_EXTRA_SECOND: u32 = 5;

/// Fixed-cycle timing plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixedMode {
    Normal,
    Rush,
}

impl FixedMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Rush => "Rush Hour",
        }
    }
}

/// Set yellow to 3s and green to 8s (Normal) or 12s (Rush) on every road.
pub fn apply_fixed_timings(roads: &mut [Road], mode: FixedMode) {
    TimingPolicy::default().apply_fixed(roads, mode);
}

/// Demand-driven green: `base_green + min(vehicles / 5, max_extra)`.
///
/// Yellow is left as it is.
pub fn apply_adaptive_timings(roads: &mut [Road], base_green: u32, max_extra: u32) {
    for road in roads.iter_mut() {
        let extra = (road.vehicles_waiting() / VEHICLES_PER_EXTRA_SECOND).min(max_extra);
        road.set_green_time(base_green.saturating_add(extra));
    }
}

/// For each road, red time is the sum of all other roads' green + yellow.
///
/// Sums saturate at `u32::MAX`.
pub fn compute_red_times(roads: &mut [Road]) {
    let phase_times: Vec<u32> = roads.iter().map(Road::phase_time).collect();
    for (i, road) in roads.iter_mut().enumerate() {
        let red = phase_times
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .fold(0u32, |acc, (_, t)| acc.saturating_add(*t));
        road.set_red_time(red);
    }
    debug!(?phase_times, "red times recomputed");
}

fn saturating_total(roads: &[Road], seconds: fn(&Road) -> u32) -> u32 {
    roads
        .iter()
        .map(seconds)
        .fold(0, u32::saturating_add)
}

pub fn total_green(roads: &[Road]) -> u32 {
    saturating_total(roads, Road::green_time)
}

pub fn total_yellow(roads: &[Road]) -> u32 {
    saturating_total(roads, Road::yellow_time)
}

/// Green and yellow seconds summed over one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleTotals {
    pub green: u32,
    pub yellow: u32,
}

impl CycleTotals {
    pub fn of(roads: &[Road]) -> Self {
        Self {
            green: total_green(roads),
            yellow: total_yellow(roads),
        }
    }

    /// Length of one full cycle in seconds.
    pub fn cycle_secs(&self) -> u32 {
        self.green.saturating_add(self.yellow)
    }
}

/// Tunable timing constants for every mode.
///
/// The default reproduces the classic plan: 8s normal green, 12s rush green,
/// 3s yellow, adaptive 8s base with up to 8s extra.
///
/// # Example
///
/// ```rust
/// use crosslight::core::Intersection;
/// use crosslight::timing::{compute_red_times, FixedMode, TimingPolicy};
///
/// let mut junction = Intersection::default();
/// TimingPolicy::default().apply_fixed(junction.roads_mut(), FixedMode::Rush);
/// compute_red_times(junction.roads_mut());
///
/// assert_eq!(junction.roads()[0].green_time(), 12);
/// assert_eq!(junction.roads()[0].red_time(), 45);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingPolicy {
    pub normal_green: u32,
    pub rush_green: u32,
    pub yellow: u32,
    pub adaptive_base_green: u32,
    pub adaptive_max_extra: u32,
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self {
            normal_green: 8,
            rush_green: 12,
            yellow: DEFAULT_YELLOW_SECS,
            adaptive_base_green: 8,
            adaptive_max_extra: 8,
        }
    }
}

impl TimingPolicy {
    pub fn green_for(&self, mode: FixedMode) -> u32 {
        match mode {
            FixedMode::Normal => self.normal_green,
            FixedMode::Rush => self.rush_green,
        }
    }

    pub fn apply_fixed(&self, roads: &mut [Road], mode: FixedMode) {
        let green = self.green_for(mode);
        for road in roads.iter_mut() {
            road.set_yellow_time(self.yellow);
            road.set_green_time(green);
        }
    }

    /// Adaptive entry: yellow is reset to the configured value first so it
    /// never carries over from an earlier mode.
    pub fn apply_adaptive(&self, roads: &mut [Road]) {
        for road in roads.iter_mut() {
            road.set_yellow_time(self.yellow);
        }
        apply_adaptive_timings(roads, self.adaptive_base_green, self.adaptive_max_extra);
    }
}
