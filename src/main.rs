//! Interactive intersection controller on stdin/stdout.
//!
//! Run with: cargo run

use std::io;

use anyhow::Result;
use tracing::Level;

use crosslight::control::{ControlLoop, SessionEnd};
use crosslight::engine::SystemClock;
use crosslight::SignalConfig;

fn main() -> Result<()> {
    // Diagnostics go to stderr so they never interleave with the console UI.
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let config = SignalConfig::builder().build()?;
    let mut control = ControlLoop::new(
        config,
        io::stdin().lock(),
        io::stdout().lock(),
        SystemClock,
    );

    match control.run()? {
        SessionEnd::Exit => {}
        SessionEnd::MalformedInput(err) => {
            tracing::debug!(error = %err, "session ended on unreadable input");
        }
    }
    Ok(())
}
