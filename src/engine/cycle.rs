//! The cycle engine: drives every road through one full signal rotation.

use super::clock::Clock;
use super::transition::{TransitionError, TransitionTable};
use crate::core::{CycleHistory, Intersection, Signal};
use crate::present::Presenter;
use crate::sequencer::{is_permutation, PhaseOrder};
use crate::timing::{compute_red_times, CycleTotals};
use std::io;
use tracing::info;

/// Failure while running a cycle.
///
/// Inputs are clamped before a cycle starts, so the only ways out are an
/// order that is not a permutation, a broken presentation sink, or a
/// transition table that contradicts the engine's phase order.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("phase order {order:?} does not visit every road exactly once")]
    InvalidOrder { order: PhaseOrder },

    #[error("signal transition rejected: {0}")]
    Transition(#[from] TransitionError),

    #[error("presentation failed: {0}")]
    Presentation(#[from] io::Error),
}

/// Summary of a completed cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct CycleReport {
    /// Roads in the order they were given GREEN
    pub visited: Vec<usize>,
    pub totals: CycleTotals,
    /// Seconds spent in GREEN/YELLOW holds
    pub held_secs: u64,
    pub history: CycleHistory,
}

/// Runs phase rotations on an [`Intersection`].
///
/// The engine owns the clock and presenter; the intersection and the order
/// are lent to it per cycle.
///
/// # Example
///
/// ```rust
/// use crosslight::core::{Intersection, Signal};
/// use crosslight::engine::{CycleEngine, VirtualClock};
/// use crosslight::present::NoopPresenter;
/// use crosslight::sequencer::DEFAULT_ORDER;
///
/// let mut engine = CycleEngine::new(VirtualClock::new(), NoopPresenter);
/// let mut junction = Intersection::default();
///
/// let report = engine.run_cycle(&mut junction, &DEFAULT_ORDER).unwrap();
///
/// assert_eq!(report.visited, vec![0, 2, 1, 3]);
/// assert!(junction.roads().iter().all(|r| r.signal() == Signal::Red));
/// ```
pub struct CycleEngine<C: Clock, P: Presenter> {
    clock: C,
    presenter: P,
    transitions: TransitionTable,
    cycle_pause_secs: u32,
}

impl<C: Clock, P: Presenter> CycleEngine<C, P> {
    /// Engine with the standard transition table and no pauses.
    pub fn new(clock: C, presenter: P) -> Self {
        Self {
            clock,
            presenter,
            transitions: TransitionTable::default(),
            cycle_pause_secs: 0,
        }
    }

    /// Pause shown before the first phase and after the last.
    pub fn with_cycle_pause(mut self, seconds: u32) -> Self {
        self.cycle_pause_secs = seconds;
        self
    }

    pub fn with_transitions(mut self, transitions: TransitionTable) -> Self {
        self.transitions = transitions;
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_parts(self) -> (C, P) {
        (self.clock, self.presenter)
    }

    /// Run one full cycle in `order`.
    ///
    /// Red times are recomputed first. Each road is then given the right of
    /// way in turn: every road is forced RED, the road goes GREEN for its
    /// green time, YELLOW for its yellow time, and back to RED. Phases never
    /// overlap.
    ///
    /// An order that is not a permutation of the roads is rejected before
    /// anything changes.
    pub fn run_cycle(
        &mut self,
        junction: &mut Intersection,
        order: &PhaseOrder,
    ) -> Result<CycleReport, EngineError> {
        if !is_permutation(order) {
            return Err(EngineError::InvalidOrder { order: *order });
        }
        compute_red_times(junction.roads_mut());
        let totals = CycleTotals::of(junction.roads());
        info!(
            order = ?order,
            total_green = totals.green,
            total_yellow = totals.yellow,
            "cycle started"
        );

        self.presenter.cycle_started(&junction.snapshot(), totals)?;
        self.clock.pause(self.cycle_pause_secs);

        let mut history = CycleHistory::new();
        let mut held_secs = 0u64;
        for &road in order {
            let (phase_history, held) = self.run_phase(junction, road, history)?;
            history = phase_history;
            held_secs += held;
        }

        self.presenter.cycle_completed(&junction.snapshot())?;
        self.clock.pause(self.cycle_pause_secs);
        info!(held_secs, "cycle completed");

        Ok(CycleReport {
            visited: history.visit_order(),
            totals,
            held_secs,
            history,
        })
    }

    fn run_phase(
        &mut self,
        junction: &mut Intersection,
        road: usize,
        history: CycleHistory,
    ) -> Result<(CycleHistory, u64), EngineError> {
        junction.reset_to_red();
        let mut history = history.record(self.transitions.apply(junction, road, Signal::Green)?);
        let mut held = self.hold_current(junction, road)?;

        history = history.record(self.transitions.apply(junction, road, Signal::Yellow)?);
        held += self.hold_current(junction, road)?;

        history = history.record(self.transitions.apply(junction, road, Signal::Red)?);
        Ok((history, held))
    }

    /// Hold the road's current active signal for its configured time.
    fn hold_current(&mut self, junction: &Intersection, road: usize) -> Result<u64, EngineError> {
        let Some(current) = junction.road(road) else {
            return Err(TransitionError::UnknownRoad { road }.into());
        };
        let signal = current.signal();
        let seconds = match signal {
            Signal::Green => current.green_time(),
            Signal::Yellow => current.yellow_time(),
            Signal::Red => 0,
        };
        info!(road = current.name(), signal = signal.label(), seconds, "phase");

        let snapshot = junction.snapshot();
        self.presenter.phase_started(&snapshot)?;

        let presenter = &mut self.presenter;
        self.clock
            .hold(seconds, |remaining| presenter.countdown_tick(&snapshot, remaining))?;
        self.presenter.countdown_done(signal)?;

        Ok(u64::from(seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Guard, Snapshot};
    use crate::engine::{Transition, VirtualClock};
    use crate::present::NoopPresenter;
    use crate::sequencer::DEFAULT_ORDER;
    use crate::timing::{apply_fixed_timings, FixedMode};

    /// Records the active phase at every callback.
    #[derive(Default)]
    struct Recorder {
        phases: Vec<(usize, Signal)>,
        ticks: Vec<(usize, u32)>,
        max_active: usize,
        completed: bool,
    }

    impl Presenter for Recorder {
        fn phase_started(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
            let phase = snapshot.phase.expect("phase_started without active road");
            self.phases.push((phase.road, phase.signal));
            self.check(snapshot);
            Ok(())
        }

        fn countdown_tick(&mut self, snapshot: &Snapshot<'_>, remaining: u32) -> io::Result<()> {
            let phase = snapshot.phase.expect("tick without active road");
            self.ticks.push((phase.road, remaining));
            self.check(snapshot);
            Ok(())
        }

        fn cycle_completed(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
            assert!(snapshot.phase.is_none());
            self.completed = true;
            Ok(())
        }
    }

    impl Recorder {
        fn check(&mut self, snapshot: &Snapshot<'_>) {
            let active = snapshot.roads.iter().filter(|r| r.signal().is_active()).count();
            self.max_active = self.max_active.max(active);
            assert_eq!(active, 1);
        }
    }

    #[test]
    fn normal_cycle_visits_default_order() {
        let mut junction = Intersection::default();
        apply_fixed_timings(junction.roads_mut(), FixedMode::Normal);
        let mut engine = CycleEngine::new(VirtualClock::new(), Recorder::default());

        let report = engine.run_cycle(&mut junction, &DEFAULT_ORDER).unwrap();

        assert_eq!(report.visited, vec![0, 2, 1, 3]);
        assert_eq!(report.held_secs, 44);
        assert_eq!(engine.clock().holds(), &[8, 3, 8, 3, 8, 3, 8, 3]);

        let recorder = engine.presenter();
        assert_eq!(
            recorder.phases,
            vec![
                (0, Signal::Green),
                (0, Signal::Yellow),
                (2, Signal::Green),
                (2, Signal::Yellow),
                (1, Signal::Green),
                (1, Signal::Yellow),
                (3, Signal::Green),
                (3, Signal::Yellow),
            ]
        );
        assert_eq!(recorder.max_active, 1);
        assert!(recorder.completed);
        assert_eq!(junction.active_count(), 0);
    }

    #[test]
    fn each_road_goes_green_yellow_red() {
        let mut junction = Intersection::default();
        let mut engine = CycleEngine::new(VirtualClock::new(), NoopPresenter);

        let report = engine.run_cycle(&mut junction, &[3, 0, 1, 2]).unwrap();

        for road in 0..4 {
            assert_eq!(
                report.history.get_path(road),
                vec![Signal::Red, Signal::Green, Signal::Yellow, Signal::Red]
            );
        }
        assert_eq!(report.visited, vec![3, 0, 1, 2]);
    }

    #[test]
    fn red_times_are_refreshed_before_the_cycle() {
        let mut junction = Intersection::default();
        apply_fixed_timings(junction.roads_mut(), FixedMode::Rush);
        let mut engine = CycleEngine::new(VirtualClock::new(), NoopPresenter);

        engine.run_cycle(&mut junction, &DEFAULT_ORDER).unwrap();

        assert!(junction.roads().iter().all(|r| r.red_time() == 45));
    }

    #[test]
    fn stray_active_road_is_forced_red() {
        let mut junction = Intersection::default();
        junction.road_mut(3).unwrap().set_signal(Signal::Green);
        let mut engine = CycleEngine::new(VirtualClock::new(), Recorder::default());

        let report = engine.run_cycle(&mut junction, &DEFAULT_ORDER).unwrap();

        assert_eq!(report.visited, vec![0, 2, 1, 3]);
        assert_eq!(engine.presenter().max_active, 1);
    }

    #[test]
    fn countdown_ticks_once_per_second() {
        let mut junction = Intersection::default();
        let mut engine = CycleEngine::new(VirtualClock::new(), Recorder::default());

        engine.run_cycle(&mut junction, &DEFAULT_ORDER).unwrap();

        let first_road: Vec<u32> = engine
            .presenter()
            .ticks
            .iter()
            .filter(|(road, _)| *road == 0)
            .map(|(_, remaining)| *remaining)
            .collect();
        assert_eq!(first_road, vec![8, 7, 6, 5, 4, 3, 2, 1, 3, 2, 1]);
    }

    #[test]
    fn cycle_pause_brackets_the_cycle() {
        let mut junction = Intersection::default();
        let mut engine = CycleEngine::new(VirtualClock::new(), NoopPresenter).with_cycle_pause(2);

        engine.run_cycle(&mut junction, &DEFAULT_ORDER).unwrap();

        assert_eq!(engine.clock().pauses(), &[2, 2]);
        assert_eq!(engine.clock().elapsed(), 48);
    }

    #[test]
    fn contradictory_table_surfaces_transition_error() {
        let table = TransitionTable::new(vec![Transition::guarded(
            Signal::Red,
            Signal::Green,
            Guard::new(|_, _| false),
        )]);
        let mut junction = Intersection::default();
        let mut engine =
            CycleEngine::new(VirtualClock::new(), NoopPresenter).with_transitions(table);

        let result = engine.run_cycle(&mut junction, &DEFAULT_ORDER);

        assert!(matches!(
            result,
            Err(EngineError::Transition(TransitionError::GuardBlocked { road: 0, .. }))
        ));
    }

    #[test]
    fn order_with_repeated_road_is_rejected() {
        let mut junction = Intersection::default();
        let mut engine = CycleEngine::new(VirtualClock::new(), Recorder::default());

        let result = engine.run_cycle(&mut junction, &[0, 0, 1, 2]);

        assert!(matches!(
            result,
            Err(EngineError::InvalidOrder { order: [0, 0, 1, 2] })
        ));
        assert!(engine.clock().holds().is_empty());
        assert!(engine.presenter().phases.is_empty());
        assert!(junction.roads().iter().all(|r| r.red_time() == 0));
    }

    #[test]
    fn presentation_failure_is_reported() {
        struct Broken;
        impl Presenter for Broken {
            fn phase_started(&mut self, _snapshot: &Snapshot<'_>) -> io::Result<()> {
                Err(io::Error::other("stdout closed"))
            }
        }

        let mut junction = Intersection::default();
        let mut engine = CycleEngine::new(VirtualClock::new(), Broken);

        let result = engine.run_cycle(&mut junction, &DEFAULT_ORDER);
        assert!(matches!(result, Err(EngineError::Presentation(_))));
    }
}
