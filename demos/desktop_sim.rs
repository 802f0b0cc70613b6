//! Desktop simulator for the serial command protocol.
//!
//! Runs the driver against a simulated axis, reading the same line commands
//! the ESP32 firmware accepts from stdin:
//!
//! ```sh
//! RUST_LOG=debug cargo run --example desktop_sim
//! > home
//! ok home 20
//! > distance -30
//! ok home -30
//! > away
//! ok away 30
//! ```
//!
//! The home switch starts 20 step cycles counter-clockwise of the axis.
//! Set `AWAY_OFFSET` to change the initial offset.

use std::io::{self, BufRead, Write};

use log::{error, info, warn};
use two_position_stepper::hal::{MockPort, StdDelay};
use two_position_stepper::phase::Rotation;
use two_position_stepper::{CommandOutcome, SpeedPreset, StepperCommand, StepperConfig, StepperDriver};

/// Distance from the starting point to the simulated switch, in step cycles
const SWITCH_DISTANCE: u32 = 20;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let away_offset = std::env::var("AWAY_OFFSET")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(50);

    let port = MockPort::default().with_home_after(SWITCH_DISTANCE, Rotation::CounterClockwise);
    let config = StepperConfig::new([0, 1, 2, 3], 4, away_offset).with_speed(SpeedPreset::Fast);
    let mut driver = StepperDriver::new_checked(config, port, StdDelay::new())
        .map_err(|e| anyhow::anyhow!("stepper init failed: {}", e))?;
    info!("simulated stepper ready, offset {}", away_offset);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            match StepperCommand::from_text(&line) {
                Ok(cmd) => match driver.apply(cmd) {
                    Ok(CommandOutcome::Moved(report)) => {
                        writeln!(stdout, "ok {} {}", driver.position().as_str(), report.steps)?;
                        info!(
                            "axis at sub-step {}, switch {}",
                            driver.port().displacement(),
                            if driver.port().switch_pressed() { "pressed" } else { "open" }
                        );
                    }
                    Ok(CommandOutcome::Configured { away_offset }) => {
                        writeln!(stdout, "ok {} {}", driver.position().as_str(), away_offset)?;
                    }
                    Err(e) => {
                        error!("{} failed: {}", cmd, e);
                        writeln!(stdout, "err {}", e)?;
                    }
                },
                Err(e) => {
                    warn!("rejected {:?}: {}", line.trim(), e);
                    writeln!(stdout, "err {}", e)?;
                }
            }
        }
        write!(stdout, "> ")?;
        stdout.flush()?;
    }

    Ok(())
}
