//! Property-based tests for timing, ordering and the cycle engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use crosslight::core::{Intersection, Signal, Snapshot, LANES};
use crosslight::engine::{CycleEngine, VirtualClock};
use crosslight::present::Presenter;
use crosslight::sequencer::{order_starting_at, PhaseSequencer};
use crosslight::timing::{
    apply_adaptive_timings, apply_fixed_timings, compute_red_times, FixedMode, TimingPolicy,
};
use proptest::prelude::*;
use std::io;

prop_compose! {
    fn arbitrary_mode()(rush in any::<bool>()) -> FixedMode {
        if rush { FixedMode::Rush } else { FixedMode::Normal }
    }
}

fn demand_strategy() -> impl Strategy<Value = [i64; LANES]> {
    prop::array::uniform4(-50i64..500)
}

fn junction_with(demand: [i64; LANES]) -> Intersection {
    let mut junction = Intersection::default();
    for (index, vehicles) in demand.into_iter().enumerate() {
        junction.set_demand(index, vehicles);
    }
    junction
}

/// Counts active roads at every callback of a cycle.
#[derive(Default)]
struct ExclusionMonitor {
    observations: usize,
    violations: usize,
}

impl ExclusionMonitor {
    fn observe(&mut self, snapshot: &Snapshot<'_>) {
        self.observations += 1;
        let active = snapshot.roads.iter().filter(|r| r.signal().is_active()).count();
        if active != 1 {
            self.violations += 1;
        }
    }
}

impl Presenter for ExclusionMonitor {
    fn phase_started(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        self.observe(snapshot);
        Ok(())
    }

    fn countdown_tick(&mut self, snapshot: &Snapshot<'_>, _remaining: u32) -> io::Result<()> {
        self.observe(snapshot);
        Ok(())
    }
}

proptest! {
    #[test]
    fn fixed_timings_match_mode(demand in demand_strategy(), mode in arbitrary_mode()) {
        let mut junction = junction_with(demand);
        apply_fixed_timings(junction.roads_mut(), mode);

        let expected_green = match mode {
            FixedMode::Normal => 8,
            FixedMode::Rush => 12,
        };
        for road in junction.roads() {
            prop_assert_eq!(road.yellow_time(), 3);
            prop_assert_eq!(road.green_time(), expected_green);
        }
    }

    #[test]
    fn adaptive_green_follows_formula(
        demand in demand_strategy(),
        base in 0u32..30,
        max_extra in 0u32..20,
    ) {
        let mut junction = junction_with(demand);
        apply_adaptive_timings(junction.roads_mut(), base, max_extra);

        for (road, entered) in junction.roads().iter().zip(demand) {
            let vehicles = entered.max(0) as u32;
            prop_assert_eq!(road.green_time(), base + (vehicles / 5).min(max_extra));
        }
    }

    #[test]
    fn red_time_is_sum_of_other_phases(
        demand in demand_strategy(),
        yellow in 0u32..10,
        mode in prop::option::of(arbitrary_mode()),
    ) {
        let policy = TimingPolicy { yellow, ..TimingPolicy::default() };
        let mut junction = junction_with(demand);
        match mode {
            Some(mode) => policy.apply_fixed(junction.roads_mut(), mode),
            None => policy.apply_adaptive(junction.roads_mut()),
        }
        compute_red_times(junction.roads_mut());

        let roads = junction.roads();
        for i in 0..LANES {
            let others: u32 = (0..LANES)
                .filter(|&j| j != i)
                .map(|j| roads[j].green_time() + roads[j].yellow_time())
                .sum();
            prop_assert_eq!(roads[i].red_time(), others);
        }
    }

    #[test]
    fn negative_demand_is_stored_as_zero(vehicles in i64::MIN..0, index in 0..LANES) {
        let mut junction = Intersection::default();
        prop_assert_eq!(junction.set_demand(index, vehicles), Some(0));
        prop_assert_eq!(junction.roads()[index].vehicles_waiting(), 0);
    }

    #[test]
    fn override_order_is_first_then_ascending(first in -10i64..10) {
        let order = order_starting_at(first);
        let expected_first = if (0..LANES as i64).contains(&first) { first as usize } else { 0 };

        prop_assert_eq!(order[0], expected_first);
        prop_assert!(order[1..].windows(2).all(|w| w[0] < w[1]));

        let mut sorted = order;
        sorted.sort_unstable();
        prop_assert_eq!(sorted, [0, 1, 2, 3]);
    }

    #[test]
    fn cycle_visits_each_road_once_exclusively(
        demand in demand_strategy(),
        first in 0i64..4,
        mode in prop::option::of(arbitrary_mode()),
    ) {
        let mut junction = junction_with(demand);
        let policy = TimingPolicy::default();
        match mode {
            Some(mode) => policy.apply_fixed(junction.roads_mut(), mode),
            None => policy.apply_adaptive(junction.roads_mut()),
        }
        let mut sequencer = PhaseSequencer::default();
        sequencer.override_first(first);

        let mut engine = CycleEngine::new(VirtualClock::new(), ExclusionMonitor::default());
        let report = engine.run_cycle(&mut junction, sequencer.order()).unwrap();

        prop_assert_eq!(&report.visited, &sequencer.order().to_vec());
        for road in 0..LANES {
            prop_assert_eq!(
                report.history.get_path(road),
                vec![Signal::Red, Signal::Green, Signal::Yellow, Signal::Red]
            );
        }
        prop_assert_eq!(report.held_secs, u64::from(report.totals.cycle_secs()));
        prop_assert!(engine.presenter().observations > 0);
        prop_assert_eq!(engine.presenter().violations, 0);
        prop_assert_eq!(junction.active_count(), 0);
    }
}
