//! Error types for the stepper driver.
//!
//! Almost every failure of a two-position stepper is physical (stall, dead
//! switch, swapped coil wires) and invisible to software. What is left:
//!
//! - [`StepperError::Io`]: the port reported an error on a line access
//! - [`StepperError::HomeNotFound`]: a homing step limit was configured and
//!   the switch never tripped within it
//! - [`CommandParseError`]: host text that is not a command
//! - [`ConfigError`]: rejected by [`StepperConfig::validate`], wrapped in
//!   [`StepperError::InvalidConfig`] by checked construction
//!
//! [`StepperConfig::validate`]: crate::config::StepperConfig::validate

use crate::traits::LineId;
use core::fmt;

/// Errors from drive operations.
///
/// `E` is the [`DigitalPort::Error`](crate::traits::DigitalPort::Error) of
/// the injected port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepperError<E> {
    /// A line read or write failed.
    Io(E),
    /// The home switch did not trip within the configured step limit.
    ///
    /// All phases have been de-energized and the position was not changed.
    HomeNotFound {
        /// Step cycles executed before giving up.
        steps: u32,
    },
    /// The configuration was rejected before any line was touched.
    InvalidConfig(ConfigError),
}

impl<E> From<E> for StepperError<E> {
    fn from(err: E) -> Self {
        StepperError::Io(err)
    }
}

impl<E: fmt::Debug> fmt::Display for StepperError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepperError::Io(err) => write!(f, "line I/O failed: {:?}", err),
            StepperError::HomeNotFound { steps } => {
                write!(f, "home switch not found after {} steps", steps)
            }
            StepperError::InvalidConfig(err) => write!(f, "invalid configuration: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for StepperError<E> {}

/// Configuration rejected by validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Away offset of zero leaves no direction to home in.
    ZeroOffset,
    /// Sub-step delay must be positive.
    ZeroStepDelay,
    /// A line is used twice across the phase and home pins.
    DuplicatePin(LineId),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroOffset => f.write_str("away offset must be non-zero"),
            ConfigError::ZeroStepDelay => f.write_str("step delay must be positive"),
            ConfigError::DuplicatePin(line) => write!(f, "line {} assigned more than once", line),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Host command text that could not be parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandParseError {
    /// Blank line.
    Empty,
    /// First word is not a known command.
    Unknown,
    /// `distance` without a value.
    MissingDistance,
    /// `distance` value is not an `i32`.
    InvalidDistance,
    /// Extra words after a complete command.
    TrailingInput,
}

impl fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CommandParseError::Empty => "empty command",
            CommandParseError::Unknown => "unknown command",
            CommandParseError::MissingDistance => "distance needs a value",
            CommandParseError::InvalidDistance => "distance is not a valid step count",
            CommandParseError::TrailingInput => "unexpected text after command",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CommandParseError {}
