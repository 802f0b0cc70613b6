//! Shared message types for a JSON command bridge.
//!
//! A host-side bridge (HTTP endpoint, MQTT topic) forwards the same text
//! commands the serial link carries, wrapped in a small JSON body. These
//! types are `no_std` compatible and can be used with either `serde_json`
//! (desktop) or `serde-json-core` (embedded).
//!
//! # Example
//!
//! ```
//! use two_position_stepper::messages::CommandRequest;
//! use two_position_stepper::StepperCommand;
//!
//! #[cfg(feature = "std")]
//! {
//!     let req: CommandRequest = serde_json::from_str(r#"{"command": "distance -25"}"#).unwrap();
//!     assert_eq!(req.to_command(), Ok(StepperCommand::SetDistance(-25)));
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::commands::{CommandOutcome, StepperCommand};
use crate::config::{short_string, ShortString};
use crate::driver::{Position, StepperState};
use crate::error::CommandParseError;

// ============================================================================
// Request Types
// ============================================================================

/// A command forwarded from a host bridge.
///
/// # JSON Examples
///
/// ```json
/// {"command": "home"}
/// {"command": "away"}
/// {"command": "distance 400"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    /// Command text, same syntax as a serial line
    pub command: ShortString,
}

impl CommandRequest {
    /// Create a request carrying `cmd` in text form.
    pub fn new(cmd: StepperCommand) -> Self {
        let mut command = ShortString::new();
        // "distance -2147483648" is well under the capacity
        let _ = core::fmt::write(&mut command, format_args!("{}", cmd));
        Self { command }
    }

    /// Create a request from raw command text.
    pub fn from_text(text: &str) -> Self {
        Self {
            command: short_string(text),
        }
    }

    /// Parse the carried text.
    pub fn to_command(&self) -> Result<StepperCommand, CommandParseError> {
        StepperCommand::from_text(&self.command)
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Reply to a [`CommandRequest`].
///
/// # JSON Example
///
/// ```json
/// {"position": "home", "away_offset": 200, "steps": 37}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    /// Position after the command
    pub position: Position,
    /// Away offset after the command
    pub away_offset: i32,
    /// Step cycles the command executed (0 for no-ops and offset changes)
    pub steps: u32,
}

impl CommandResponse {
    /// Build a reply from the outcome of a command and the state after it.
    pub fn new(outcome: &CommandOutcome, state: &StepperState) -> Self {
        let steps = match outcome {
            CommandOutcome::Moved(report) => report.steps + report.backoff_steps,
            CommandOutcome::Configured { .. } => 0,
        };
        Self {
            position: state.position,
            away_offset: state.away_offset,
            steps,
        }
    }
}

// ============================================================================
// Parsing Functions (using serde-json-core for no_std compatibility)
// ============================================================================

/// Parse a command request from JSON bytes.
///
/// # Example
///
/// ```
/// use two_position_stepper::messages::parse_command_request;
/// use two_position_stepper::StepperCommand;
///
/// let req = parse_command_request(br#"{"command": "home"}"#).unwrap();
/// assert_eq!(req.to_command(), Ok(StepperCommand::DriveHome));
/// ```
#[cfg(feature = "serde-json-core")]
pub fn parse_command_request(json: &[u8]) -> Option<CommandRequest> {
    serde_json_core::from_slice(json).ok().map(|(req, _)| req)
}

/// Serialize a driver state snapshot into `buf`, returning the bytes used.
///
/// Returns `None` if `buf` is too small.
#[cfg(feature = "serde-json-core")]
pub fn write_state(state: &StepperState, buf: &mut [u8]) -> Option<usize> {
    serde_json_core::to_slice(state, buf).ok()
}

/// Serialize a command reply into `buf`, returning the bytes used.
///
/// Returns `None` if `buf` is too small.
#[cfg(feature = "serde-json-core")]
pub fn write_response(response: &CommandResponse, buf: &mut [u8]) -> Option<usize> {
    serde_json_core::to_slice(response, buf).ok()
}
