//! Roads and the intersection that owns them.

use super::signal::Signal;
use super::snapshot::{Phase, Snapshot};
use serde::Serialize;
use tracing::debug;

/// Number of approaches at the intersection.
pub const LANES: usize = 4;

/// Road names in canonical index order.
pub const ROAD_NAMES: [&str; LANES] = ["North", "South", "East", "West"];

/// One approach of the intersection.
///
/// Timings are written by the [`timing`](crate::timing) policies and the
/// signal by the cycle engine. `red_time` is derived and only ever written by
/// [`compute_red_times`](crate::timing::compute_red_times).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Road {
    name: String,
    signal: Signal,
    green_time: u32,
    yellow_time: u32,
    red_time: u32,
    vehicles_waiting: u32,
}

impl Road {
    /// Create a red road with the given timings and no demand.
    pub fn new(name: impl Into<String>, green_time: u32, yellow_time: u32) -> Self {
        Self {
            name: name.into(),
            signal: Signal::Red,
            green_time,
            yellow_time,
            red_time: 0,
            vehicles_waiting: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signal(&self) -> Signal {
        self.signal
    }

    pub fn green_time(&self) -> u32 {
        self.green_time
    }

    pub fn yellow_time(&self) -> u32 {
        self.yellow_time
    }

    pub fn red_time(&self) -> u32 {
        self.red_time
    }

    pub fn vehicles_waiting(&self) -> u32 {
        self.vehicles_waiting
    }

    /// Seconds this road holds the right of way in one cycle.
    pub fn phase_time(&self) -> u32 {
        self.green_time.saturating_add(self.yellow_time)
    }

    /// Store an operator-entered demand, clamping negatives to zero.
    ///
    /// Returns the value actually stored.
    pub fn set_vehicles_waiting(&mut self, vehicles: i64) -> u32 {
        let stored = u32::try_from(vehicles.max(0)).unwrap_or(u32::MAX);
        if vehicles < 0 {
            debug!(road = %self.name, entered = vehicles, "negative demand clamped to 0");
        }
        self.vehicles_waiting = stored;
        stored
    }

    pub(crate) fn set_signal(&mut self, signal: Signal) {
        self.signal = signal;
    }

    pub(crate) fn set_green_time(&mut self, seconds: u32) {
        self.green_time = seconds;
    }

    pub(crate) fn set_yellow_time(&mut self, seconds: u32) {
        self.yellow_time = seconds;
    }

    pub(crate) fn set_red_time(&mut self, seconds: u32) {
        self.red_time = seconds;
    }
}

/// The fixed set of four roads meeting at the junction.
///
/// The set is created once and never grows or shrinks. Indices follow
/// [`ROAD_NAMES`]: 0=North, 1=South, 2=East, 3=West.
///
/// # Example
///
/// ```rust
/// use crosslight::core::{Intersection, Signal};
///
/// let mut junction = Intersection::new(8, 3);
/// assert_eq!(junction.roads().len(), 4);
/// assert!(junction.roads().iter().all(|r| r.signal() == Signal::Red));
///
/// assert_eq!(junction.set_demand(1, -7), Some(0));
/// assert_eq!(junction.roads()[1].vehicles_waiting(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Intersection {
    roads: [Road; LANES],
}

impl Default for Intersection {
    fn default() -> Self {
        Self::new(8, 3)
    }
}

impl Intersection {
    /// All roads red, with the given starting timings.
    pub fn new(green_time: u32, yellow_time: u32) -> Self {
        Self {
            roads: ROAD_NAMES.map(|name| Road::new(name, green_time, yellow_time)),
        }
    }

    pub fn roads(&self) -> &[Road; LANES] {
        &self.roads
    }

    pub fn roads_mut(&mut self) -> &mut [Road; LANES] {
        &mut self.roads
    }

    pub fn road(&self, index: usize) -> Option<&Road> {
        self.roads.get(index)
    }

    pub(crate) fn road_mut(&mut self, index: usize) -> Option<&mut Road> {
        self.roads.get_mut(index)
    }

    /// Force every road back to RED.
    pub fn reset_to_red(&mut self) {
        for road in &mut self.roads {
            road.set_signal(Signal::Red);
        }
    }

    /// Number of roads currently GREEN or YELLOW.
    pub fn active_count(&self) -> usize {
        self.roads.iter().filter(|r| r.signal().is_active()).count()
    }

    /// The road holding the right of way, if any.
    pub fn active_phase(&self) -> Option<Phase> {
        self.roads
            .iter()
            .position(|r| r.signal().is_active())
            .map(|road| Phase {
                road,
                signal: self.roads[road].signal(),
            })
    }

    /// Set demand for one road. Returns the stored (clamped) value, or `None`
    /// if the index does not name a road.
    pub fn set_demand(&mut self, index: usize, vehicles: i64) -> Option<u32> {
        self.roads
            .get_mut(index)
            .map(|road| road.set_vehicles_waiting(vehicles))
    }

    /// Borrowed view for presenters.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            roads: &self.roads,
            phase: self.active_phase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_intersection_is_all_red_with_defaults() {
        let junction = Intersection::default();

        for (road, name) in junction.roads().iter().zip(ROAD_NAMES) {
            assert_eq!(road.name(), name);
            assert_eq!(road.signal(), Signal::Red);
            assert_eq!(road.green_time(), 8);
            assert_eq!(road.yellow_time(), 3);
            assert_eq!(road.red_time(), 0);
            assert_eq!(road.vehicles_waiting(), 0);
        }
    }

    #[test]
    fn negative_demand_is_stored_as_zero() {
        let mut road = Road::new("North", 8, 3);
        assert_eq!(road.set_vehicles_waiting(-12), 0);
        assert_eq!(road.vehicles_waiting(), 0);
    }

    #[test]
    fn positive_demand_is_stored_verbatim() {
        let mut road = Road::new("North", 8, 3);
        assert_eq!(road.set_vehicles_waiting(17), 17);
    }

    #[test]
    fn oversized_demand_saturates() {
        let mut road = Road::new("North", 8, 3);
        assert_eq!(road.set_vehicles_waiting(i64::MAX), u32::MAX);
    }

    #[test]
    fn set_demand_rejects_unknown_index() {
        let mut junction = Intersection::default();
        assert_eq!(junction.set_demand(LANES, 3), None);
    }

    #[test]
    fn reset_to_red_clears_active_road() {
        let mut junction = Intersection::default();
        junction.road_mut(2).unwrap().set_signal(Signal::Green);
        assert_eq!(junction.active_count(), 1);

        junction.reset_to_red();

        assert_eq!(junction.active_count(), 0);
        assert!(junction.active_phase().is_none());
    }

    #[test]
    fn active_phase_reports_road_and_signal() {
        let mut junction = Intersection::default();
        junction.road_mut(3).unwrap().set_signal(Signal::Yellow);

        let phase = junction.active_phase().unwrap();
        assert_eq!(phase.road, 3);
        assert_eq!(phase.signal, Signal::Yellow);
    }

    #[test]
    fn phase_time_sums_green_and_yellow() {
        let road = Road::new("East", 12, 3);
        assert_eq!(road.phase_time(), 15);
    }

    #[test]
    fn phase_time_saturates() {
        let road = Road::new("East", u32::MAX, 3);
        assert_eq!(road.phase_time(), u32::MAX);
    }

    #[test]
    fn serialized_road_carries_derived_red_time() {
        let mut junction = Intersection::default();
        crate::timing::compute_red_times(junction.roads_mut());

        let json = serde_json::to_value(&junction).unwrap();
        let north = &json["roads"][0];
        assert_eq!(north["name"], "North");
        assert_eq!(north["red_time"], 33);
        assert_eq!(north["signal"], "Red");
    }
}
