//! # two-position-stepper
//!
//! A driver for a four-wire stepper that shuttles an axis between two
//! positions: a home position found with a limit switch, and an away
//! position a fixed signed number of steps from it.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for line I/O and sub-step delays
//! - **Sensor-terminated homing**: The switch is sampled after every
//!   sub-step, so homing stops within one phase change of contact
//! - **Open-loop away moves**: Exactly `|offset|` full step cycles, direction
//!   from the sign of the offset
//! - **Host commands**: `home`, `away` and `distance <n>` as text lines, or
//!   wrapped in JSON with the `serde` feature
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Hardware abstractions
//! - `phase` - Drive tables and step vocabulary
//! - `driver` - The two-position state machine
//! - `commands` - Host command parsing
//! - `hal` - Concrete implementations (mock for testing, embedded-hal and
//!   esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use two_position_stepper::{
//!     Position, StepperCommand, StepperConfig, StepperDriver,
//!     hal::{MockDelay, MockPort},
//!     phase::Rotation,
//! };
//!
//! // Switch is 12 cycles counter-clockwise of where the axis starts
//! let port = MockPort::new([0, 1, 2, 3], 4).with_home_after(12, Rotation::CounterClockwise);
//! let config = StepperConfig::new([0, 1, 2, 3], 4, 50).with_step_delay_us(1);
//! let mut driver = StepperDriver::new(config, port, MockDelay::new()).unwrap();
//!
//! driver.drive_home().unwrap();
//! assert_eq!(driver.position(), Position::Home);
//!
//! // Commands arrive as text from a host
//! let cmd = StepperCommand::from_text("away").unwrap();
//! driver.apply(cmd).unwrap();
//! assert_eq!(driver.position(), Position::Away);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Host command parsing and command outcomes.
pub mod commands;
/// Shared configuration system for desktop and ESP32.
pub mod config;
/// Two-position driver state machine.
pub mod driver;
/// Error types.
pub mod error;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Drive tables, rotation and step outcomes.
pub mod phase;
/// Core traits for hardware abstraction.
pub mod traits;

/// Shared message types for a JSON command bridge (serde-based).
#[cfg(feature = "serde")]
pub mod messages;

// Re-exports for convenience
pub use commands::{CommandOutcome, StepperCommand};
pub use driver::{MoveReport, Position, StepperDriver, StepperState};
pub use error::{CommandParseError, ConfigError, StepperError};
pub use phase::{PhasePattern, Rotation, Sensitivity, StepOutcome};
pub use traits::{DigitalPort, Level, LineId, StepDelay};

// Config re-exports
pub use config::{SensorPolarity, SpeedPreset, StepperConfig};

// Message re-exports
#[cfg(feature = "serde")]
pub use messages::{CommandRequest, CommandResponse};

#[cfg(feature = "serde-json-core")]
pub use messages::{parse_command_request, write_response, write_state};
