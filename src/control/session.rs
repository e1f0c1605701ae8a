//! The operator control loop.

use super::input::{collect_demand, DemandSource, InputError, OperatorInput};
use super::menu::MenuChoice;
use crate::config::SignalConfig;
use crate::core::{Intersection, Road, LANES};
use crate::engine::{Clock, CycleEngine, CycleReport, EngineError};
use crate::present::ConsolePresenter;
use crate::sequencer::PhaseSequencer;
use crate::timing::FixedMode;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{info, warn};

/// How a session ended. Both are ordinary exits.
#[derive(Debug)]
pub enum SessionEnd {
    /// The operator chose Exit
    Exit,
    /// Input could not be read as an integer; the loop stops
    MalformedInput(InputError),
}

/// Faults that abort the session abnormally.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("console output failed: {0}")]
    Output(#[from] io::Error),
}

enum Fault {
    Input(InputError),
    Session(SessionError),
}

impl From<InputError> for Fault {
    fn from(err: InputError) -> Self {
        Self::Input(err)
    }
}

impl From<EngineError> for Fault {
    fn from(err: EngineError) -> Self {
        Self::Session(err.into())
    }
}

impl From<io::Error> for Fault {
    fn from(err: io::Error) -> Self {
        Self::Session(err.into())
    }
}

/// Prompts each road's demand on the console.
struct ConsoleDemand<'a, R: BufRead, W: Write> {
    input: &'a mut OperatorInput<R>,
    console: &'a mut ConsolePresenter<W>,
}

impl<R: BufRead, W: Write> DemandSource for ConsoleDemand<'_, R, W> {
    fn vehicles_for(&mut self, _index: usize, road: &Road) -> Result<i64, InputError> {
        self.console.prompt(&format!("  {} vehicles: ", road.name()))?;
        self.input.read_integer("a vehicle count")
    }
}

/// Menu-driven controller owning the intersection, the sequencer and the
/// engine.
///
/// # Example
///
/// ```rust
/// use crosslight::config::SignalConfig;
/// use crosslight::control::{ControlLoop, SessionEnd};
/// use crosslight::engine::VirtualClock;
/// use std::io::Cursor;
///
/// let config = SignalConfig::builder().clear_screen(false).build().unwrap();
/// let script = Cursor::new("1\n0 0 0 0\n5\n");
/// let mut control = ControlLoop::new(config, script, Vec::new(), VirtualClock::new());
///
/// assert!(matches!(control.run().unwrap(), SessionEnd::Exit));
/// assert_eq!(control.last_report().unwrap().visited, vec![0, 2, 1, 3]);
/// ```
pub struct ControlLoop<R: BufRead, W: Write, C: Clock> {
    config: SignalConfig,
    junction: Intersection,
    sequencer: PhaseSequencer,
    input: OperatorInput<R>,
    engine: CycleEngine<C, ConsolePresenter<W>>,
    last_report: Option<CycleReport>,
}

impl<R: BufRead, W: Write, C: Clock> ControlLoop<R, W, C> {
    pub fn new(config: SignalConfig, input: R, output: W, clock: C) -> Self {
        let presenter = ConsolePresenter::new(output, config.clear_screen);
        let engine = CycleEngine::new(clock, presenter).with_cycle_pause(config.cycle_pause_secs);
        Self {
            junction: config.intersection(),
            sequencer: PhaseSequencer::new(config.default_order),
            input: OperatorInput::new(input),
            engine,
            last_report: None,
            config,
        }
    }

    pub fn intersection(&self) -> &Intersection {
        &self.junction
    }

    pub fn sequencer(&self) -> &PhaseSequencer {
        &self.sequencer
    }

    pub fn last_report(&self) -> Option<&CycleReport> {
        self.last_report.as_ref()
    }

    pub fn clock(&self) -> &C {
        self.engine.clock()
    }

    /// Consume the loop, returning the console sink.
    pub fn into_output(self) -> W {
        let (_, presenter) = self.engine.into_parts();
        presenter.into_inner()
    }

    /// Show the menu and serve choices until Exit or unreadable input.
    pub fn run(&mut self) -> Result<SessionEnd, SessionError> {
        loop {
            match self.step() {
                Ok(Some(end)) => return Ok(end),
                Ok(None) => {}
                Err(Fault::Input(err)) => {
                    warn!(error = %err, "unreadable operator input, stopping");
                    self.engine
                        .presenter_mut()
                        .notice("Invalid input. Exiting.")?;
                    return Ok(SessionEnd::MalformedInput(err));
                }
                Err(Fault::Session(err)) => return Err(err),
            }
        }
    }

    fn step(&mut self) -> Result<Option<SessionEnd>, Fault> {
        let console = self.engine.presenter_mut();
        console.screen(None, self.junction.roads())?;
        console.menu()?;

        let choice = MenuChoice::from(self.input.read_integer("a menu choice")?);
        match choice {
            MenuChoice::Exit => {
                self.engine.presenter_mut().notice("\nGoodbye!")?;
                info!("operator exit");
                return Ok(Some(SessionEnd::Exit));
            }
            MenuChoice::Fixed(mode) => {
                info!(mode = mode.label(), "fixed timing mode selected");
                self.config
                    .timing
                    .apply_fixed(self.junction.roads_mut(), mode);
                self.prompt_demand()?;
                self.run_cycle()?;
            }
            MenuChoice::Adaptive => {
                info!("adaptive timing mode selected");
                self.prompt_demand()?;
                self.config.timing.apply_adaptive(self.junction.roads_mut());
                self.run_cycle()?;
            }
            MenuChoice::ManualOverride => {
                let console = self.engine.presenter_mut();
                console.notice("\nChoose first GREEN road:")?;
                console.prompt("0=North, 1=South, 2=East, 3=West : ")?;
                let first = self.input.read_integer("a road index")?;
                self.sequencer.override_first(first);

                self.prompt_demand()?;
                self.config
                    .timing
                    .apply_fixed(self.junction.roads_mut(), FixedMode::Normal);
                self.run_cycle()?;
            }
            MenuChoice::Unknown(value) => {
                warn!(choice = value, "invalid menu choice");
                self.engine
                    .presenter_mut()
                    .notice("\nInvalid choice. Try again.")?;
                self.engine
                    .clock_mut()
                    .pause(self.config.invalid_choice_pause_secs);
            }
        }
        Ok(None)
    }

    fn prompt_demand(&mut self) -> Result<(), Fault> {
        self.engine
            .presenter_mut()
            .notice("\nEnter vehicles waiting on each road:")?;
        let mut source = ConsoleDemand {
            input: &mut self.input,
            console: self.engine.presenter_mut(),
        };
        collect_demand(&mut self.junction, &mut source)?;
        Ok(())
    }

    fn run_cycle(&mut self) -> Result<(), Fault> {
        let order = *self.sequencer.order();
        let report = self.engine.run_cycle(&mut self.junction, &order)?;
        debug_assert_eq!(report.visited.len(), LANES);
        self.last_report = Some(report);
        Ok(())
    }
}
