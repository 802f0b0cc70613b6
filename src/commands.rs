//! Host commands for the stepper driver.
//!
//! A host (sequencer script, serial terminal, HTTP bridge) talks to the
//! driver with three commands, one per line of text:
//!
//! | Text | Short | Command |
//! |------|-------|---------|
//! | `home` | `h` | [`StepperCommand::DriveHome`] |
//! | `away` | `a` | [`StepperCommand::DriveAway`] |
//! | `distance <n>` | `d <n>` | [`StepperCommand::SetDistance`] |
//!
//! Keywords are case-insensitive and surrounding whitespace is ignored.
//!
//! ```rust
//! use two_position_stepper::StepperCommand;
//!
//! assert_eq!(StepperCommand::from_text("HOME\r\n"), Ok(StepperCommand::DriveHome));
//! assert_eq!(StepperCommand::from_text("d -40"), Ok(StepperCommand::SetDistance(-40)));
//! assert!(StepperCommand::from_text("spin").is_err());
//! ```

use core::fmt;
use core::str::FromStr;

use crate::driver::MoveReport;
use crate::error::CommandParseError;

/// One host command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepperCommand {
    /// Drive to the home switch.
    DriveHome,
    /// Drive to the away offset.
    DriveAway,
    /// Change the away offset for later moves.
    SetDistance(i32),
}

impl StepperCommand {
    /// Parses one line of host text.
    pub fn from_text(text: &str) -> Result<Self, CommandParseError> {
        let mut words = text.split_whitespace();
        let keyword = words.next().ok_or(CommandParseError::Empty)?;

        let cmd = if keyword.eq_ignore_ascii_case("home") || keyword.eq_ignore_ascii_case("h") {
            StepperCommand::DriveHome
        } else if keyword.eq_ignore_ascii_case("away") || keyword.eq_ignore_ascii_case("a") {
            StepperCommand::DriveAway
        } else if keyword.eq_ignore_ascii_case("distance") || keyword.eq_ignore_ascii_case("d") {
            let value = words.next().ok_or(CommandParseError::MissingDistance)?;
            let offset = value
                .parse::<i32>()
                .map_err(|_| CommandParseError::InvalidDistance)?;
            StepperCommand::SetDistance(offset)
        } else {
            return Err(CommandParseError::Unknown);
        };

        if words.next().is_some() {
            return Err(CommandParseError::TrailingInput);
        }
        Ok(cmd)
    }

    /// Returns the command keyword.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            StepperCommand::DriveHome => "home",
            StepperCommand::DriveAway => "away",
            StepperCommand::SetDistance(_) => "distance",
        }
    }

    /// Returns `true` for commands that move the motor.
    #[inline]
    pub const fn moves(&self) -> bool {
        !matches!(self, StepperCommand::SetDistance(_))
    }
}

impl FromStr for StepperCommand {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

/// Formats the command in the text form [`StepperCommand::from_text`] accepts.
impl fmt::Display for StepperCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepperCommand::SetDistance(offset) => write!(f, "distance {}", offset),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Result of applying a [`StepperCommand`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CommandOutcome {
    /// A drive operation ran (possibly as a no-op).
    Moved(MoveReport),
    /// The away offset was changed.
    Configured {
        /// New away offset.
        away_offset: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keywords() {
        assert_eq!(StepperCommand::from_text("home"), Ok(StepperCommand::DriveHome));
        assert_eq!(StepperCommand::from_text("h"), Ok(StepperCommand::DriveHome));
        assert_eq!(StepperCommand::from_text("away"), Ok(StepperCommand::DriveAway));
        assert_eq!(StepperCommand::from_text("A"), Ok(StepperCommand::DriveAway));
    }

    #[test]
    fn parse_trims_and_ignores_case() {
        assert_eq!(StepperCommand::from_text("  Home \n"), Ok(StepperCommand::DriveHome));
        assert_eq!(
            StepperCommand::from_text("\tDISTANCE   250\r\n"),
            Ok(StepperCommand::SetDistance(250))
        );
    }

    #[test]
    fn parse_distance() {
        assert_eq!(
            StepperCommand::from_text("distance -5"),
            Ok(StepperCommand::SetDistance(-5))
        );
        assert_eq!(StepperCommand::from_text("d 0"), Ok(StepperCommand::SetDistance(0)));
        assert_eq!(
            StepperCommand::from_text("distance"),
            Err(CommandParseError::MissingDistance)
        );
        assert_eq!(
            StepperCommand::from_text("distance far"),
            Err(CommandParseError::InvalidDistance)
        );
        assert_eq!(
            StepperCommand::from_text("distance 99999999999"),
            Err(CommandParseError::InvalidDistance)
        );
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(StepperCommand::from_text(""), Err(CommandParseError::Empty));
        assert_eq!(StepperCommand::from_text("   "), Err(CommandParseError::Empty));
        assert_eq!(StepperCommand::from_text("stop"), Err(CommandParseError::Unknown));
        assert_eq!(
            StepperCommand::from_text("home now"),
            Err(CommandParseError::TrailingInput)
        );
    }

    #[test]
    fn from_str_matches_from_text() {
        let cmd: StepperCommand = "d 12".parse().unwrap();
        assert_eq!(cmd, StepperCommand::SetDistance(12));
    }

    #[test]
    fn display_is_parseable() {
        for cmd in [
            StepperCommand::DriveHome,
            StepperCommand::DriveAway,
            StepperCommand::SetDistance(-120),
        ] {
            let text = cmd.to_string();
            assert_eq!(StepperCommand::from_text(&text), Ok(cmd));
        }
        assert_eq!(StepperCommand::SetDistance(7).to_string(), "distance 7");
    }

    #[test]
    fn moves_flag() {
        assert!(StepperCommand::DriveHome.moves());
        assert!(StepperCommand::DriveAway.moves());
        assert!(!StepperCommand::SetDistance(1).moves());
    }
}
