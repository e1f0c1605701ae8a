//! Terminal renderer: banner, status table and in-place countdown.

use super::Presenter;
use crate::core::{Road, Signal, Snapshot};
use crate::timing::CycleTotals;
use std::io::{self, Write};

const RULE: &str = "===============================================";
const TABLE_RULE: &str = "-----------------------------------------------";
const CLEAR: &str = "\x1B[2J\x1B[H";

/// Writes the operator console to any [`Write`] sink.
///
/// Besides the [`Presenter`] callbacks it renders the menu, prompts and
/// notices used by the control loop, so everything the operator sees goes
/// through one writer.
#[derive(Debug)]
pub struct ConsolePresenter<W: Write> {
    out: W,
    clear_screen: bool,
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        Self { out, clear_screen }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Clear, banner, optional lead line, status table.
    pub fn screen(&mut self, lead: Option<&str>, roads: &[Road]) -> io::Result<()> {
        if self.clear_screen {
            self.out.write_all(CLEAR.as_bytes())?;
        }
        self.header()?;
        if let Some(lead) = lead {
            writeln!(self.out, "{lead}\n")?;
        }
        self.status_table(roads)
    }

    pub fn header(&mut self) -> io::Result<()> {
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "   ROAD TRAFFIC CONTROL SYSTEM")?;
        writeln!(self.out, "   Simulation of 4-way intersection signals")?;
        writeln!(self.out, "{RULE}\n")
    }

    pub fn status_table(&mut self, roads: &[Road]) -> io::Result<()> {
        writeln!(self.out, "Intersection Status (N, S, E, W)")?;
        writeln!(self.out, "{TABLE_RULE}")?;
        writeln!(
            self.out,
            "{:<8} | {:<7} | {:<12} | {:<10}",
            "Road", "Signal", "VehiclesWait", "GreenTime"
        )?;
        writeln!(self.out, "{TABLE_RULE}")?;
        for road in roads {
            writeln!(
                self.out,
                "{:<8} | {:<7} | {:<12} | {:<10}",
                road.name(),
                road.signal().label(),
                road.vehicles_waiting(),
                road.green_time()
            )?;
        }
        writeln!(self.out, "{TABLE_RULE}\n")
    }

    pub fn menu(&mut self) -> io::Result<()> {
        writeln!(self.out, "\nMENU")?;
        writeln!(self.out, "1) Normal Mode (Fixed timings)")?;
        writeln!(self.out, "2) Rush Hour Mode (Longer green)")?;
        writeln!(self.out, "3) Adaptive Mode (Green depends on vehicles)")?;
        writeln!(self.out, "4) Manual Override (Choose first green road)")?;
        writeln!(self.out, "5) Exit")?;
        self.prompt("Choose: ")
    }

    /// Text without a trailing newline, flushed so it shows before input.
    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{text}")?;
        self.out.flush()
    }

    pub fn notice(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn cycle_started(&mut self, snapshot: &Snapshot<'_>, totals: CycleTotals) -> io::Result<()> {
        self.screen(Some("Starting full signal cycle..."), snapshot.roads)?;
        writeln!(
            self.out,
            "Cycle Info: Total Green={} sec, Total Yellow={} sec\n",
            totals.green, totals.yellow
        )?;
        self.out.flush()
    }

    fn phase_started(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        let lead = snapshot
            .active_road()
            .zip(snapshot.phase)
            .map(|(road, phase)| format!(">> Phase: {} {}", road.name(), phase.signal.label()));
        self.screen(lead.as_deref(), snapshot.roads)?;
        self.out.flush()
    }

    fn countdown_tick(&mut self, snapshot: &Snapshot<'_>, remaining: u32) -> io::Result<()> {
        let Some(phase) = snapshot.phase else {
            return Ok(());
        };
        write!(
            self.out,
            "\r{}: {remaining:2} sec remaining...",
            phase.signal.label()
        )?;
        self.out.flush()
    }

    fn countdown_done(&mut self, signal: Signal) -> io::Result<()> {
        writeln!(self.out, "\r{}: Done!                ", signal.label())?;
        self.out.flush()
    }

    fn cycle_completed(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        self.screen(Some("Cycle completed!"), snapshot.roads)?;
        self.out.flush()
    }
}
