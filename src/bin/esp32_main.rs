//! ESP32-C3 SuperMini two-position stepper controller.
//!
//! Reads one command per line from the USB serial console and executes it:
//!
//! ```text
//! home            drive to the home switch
//! away            drive to the away offset
//! distance <n>    set the away offset (signed step cycles)
//! ```
//!
//! Every command is answered with one line, `ok <position> <steps>` or
//! `err <reason>`. Diagnostics go to the ESP-IDF log.
//!
//! # Hardware Setup
//!
//! - ULN2003 IN1-IN4 on GPIO2-5
//! - Home switch on GPIO10, closing to GND
//!
//! # Build
//!
//! ```bash
//! AWAY_OFFSET=512 STEP_DELAY_US=2000 cargo build --release --features esp32 --bin esp32_main
//! espflash flash --monitor target/riscv32imc-esp-espidf/release/esp32_main
//! ```

use esp_idf_hal::delay::Delay;
use esp_idf_hal::gpio::{IOPin, OutputPin};
use esp_idf_hal::peripherals::Peripherals;
use log::{error, info, warn};
use std::io::{self, BufRead, ErrorKind};
use std::thread;
use std::time::Duration;
use two_position_stepper::hal::esp32::Esp32Port;
use two_position_stepper::hal::HalDelay;
use two_position_stepper::{
    CommandOutcome, SensorPolarity, StepperCommand, StepperConfig, StepperDriver,
};

/// Console poll interval while no input is pending
const IDLE_POLL_MS: u64 = 20;

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    // =========================================================================
    // Configuration
    // =========================================================================
    let defaults = StepperConfig::default();
    let away_offset = option_env!("AWAY_OFFSET")
        .and_then(|s| s.parse().ok())
        .unwrap_or(defaults.away_offset);
    let step_delay_us = option_env!("STEP_DELAY_US")
        .and_then(|s| s.parse().ok())
        .unwrap_or(defaults.step_delay_us);
    let polarity = option_env!("HOME_ACTIVE")
        .and_then(SensorPolarity::from_text)
        .unwrap_or_default();

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Initialize Port (ULN2003 on GPIO2-5, switch on GPIO10)
    // =========================================================================
    let port = Esp32Port::new(
        [
            peripherals.pins.gpio2.downgrade_output(),
            peripherals.pins.gpio3.downgrade_output(),
            peripherals.pins.gpio4.downgrade_output(),
            peripherals.pins.gpio5.downgrade_output(),
        ],
        peripherals.pins.gpio10.downgrade(),
        polarity,
    )?;

    let config = StepperConfig::new(port.phase_gpios(), port.home_gpio(), away_offset)
        .with_step_delay_us(step_delay_us)
        .with_polarity(polarity);
    config.validate()?;

    let mut driver = StepperDriver::new(config, port, HalDelay::new(Delay::new_default()))
        .map_err(|e| anyhow::anyhow!("Stepper init failed: {}", e))?;
    info!(
        "stepper ready: offset {}, {} us/sub-step, home {:?}",
        away_offset, step_delay_us, polarity
    );

    // =========================================================================
    // Command Loop
    // =========================================================================
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                thread::sleep(Duration::from_millis(IDLE_POLL_MS));
                continue;
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::Interrupted => {
                thread::sleep(Duration::from_millis(IDLE_POLL_MS));
                continue;
            }
            Err(e) => return Err(e.into()),
        }
        if line.trim().is_empty() {
            continue;
        }

        let cmd = match StepperCommand::from_text(&line) {
            Ok(cmd) => cmd,
            Err(e) => {
                warn!("rejected {:?}: {}", line.trim(), e);
                println!("err {}", e);
                continue;
            }
        };

        match driver.apply(cmd) {
            Ok(CommandOutcome::Moved(report)) => {
                println!(
                    "ok {} {}",
                    driver.position().as_str(),
                    report.steps + report.backoff_steps
                );
            }
            Ok(CommandOutcome::Configured { away_offset }) => {
                println!("ok {} {}", driver.position().as_str(), away_offset);
            }
            Err(e) => {
                error!("{} failed: {}", cmd, e);
                println!("err {}", e);
            }
        }
    }
}
