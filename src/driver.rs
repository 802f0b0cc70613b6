//! Two-position stepper driver.
//!
//! This module provides [`StepperDriver`], the state machine that moves a
//! four-wire stepper between a switch-located home and a fixed away offset.
//!
//! # Overview
//!
//! - [`drive_home`](StepperDriver::drive_home) steps toward the switch one
//!   interruptible cycle at a time until it trips
//! - [`drive_away`](StepperDriver::drive_away) performs exactly
//!   `|away_offset|` uninterruptible cycles
//! - Both are no-ops when already at their target
//! - Position only changes when a move finishes
//!
//! # Example
//!
//! ```rust
//! use two_position_stepper::{Position, StepperConfig, StepperDriver};
//! use two_position_stepper::hal::{MockDelay, MockPort};
//! use two_position_stepper::phase::Rotation;
//!
//! let config = StepperConfig::new([0, 1, 2, 3], 4, 10).with_step_delay_us(1);
//! let port = MockPort::new([0, 1, 2, 3], 4).with_home_after(7, Rotation::CounterClockwise);
//! let mut driver = StepperDriver::new(config, port, MockDelay::new()).unwrap();
//! assert_eq!(driver.position(), Position::Unknown);
//!
//! assert_eq!(driver.drive_home().unwrap().steps, 7);
//! assert_eq!(driver.drive_away().unwrap().steps, 10);
//! assert_eq!(driver.drive_away().unwrap().steps, 0);
//! assert_eq!(driver.position(), Position::Away);
//! ```
//!
//! # Homing never gives up by default
//!
//! Without a [`homing_step_limit`](StepperConfig::homing_step_limit) a
//! dead or disconnected switch makes `drive_home` spin forever. Set a limit
//! to turn that into [`StepperError::HomeNotFound`].
//!
//! # Raw steps stay inside the crate
//!
//! Single step cycles are not exposed, so nothing outside the driver can
//! move the axis without the position being updated:
//!
//! ```compile_fail
//! use two_position_stepper::{Rotation, Sensitivity, StepperConfig, StepperDriver};
//! use two_position_stepper::hal::{MockDelay, MockPort};
//!
//! let config = StepperConfig::new([0, 1, 2, 3], 4, 10);
//! let mut driver = StepperDriver::new(config, MockPort::default(), MockDelay::new()).unwrap();
//! driver.step(Rotation::Clockwise, Sensitivity::Uninterruptible).unwrap();
//! ```

use log::{debug, info, warn};

use crate::commands::{CommandOutcome, StepperCommand};
use crate::config::{SensorPolarity, StepperConfig};
use crate::error::StepperError;
use crate::phase::{PhasePattern, Rotation, Sensitivity, StepOutcome};
use crate::traits::{DigitalPort, StepDelay};

/// Logical position of the axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Position {
    /// Not homed since construction.
    #[default]
    Unknown,
    /// Parked on the home switch.
    Home,
    /// Parked at the away offset.
    Away,
}

impl Position {
    /// Returns the position as a lowercase string.
    ///
    /// ```
    /// use two_position_stepper::Position;
    ///
    /// assert_eq!(Position::Home.as_str(), "home");
    /// assert_eq!(Position::Away.as_str(), "away");
    /// assert_eq!(Position::Unknown.as_str(), "unknown");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Position::Unknown => "unknown",
            Position::Home => "home",
            Position::Away => "away",
        }
    }
}

/// What a drive operation did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveReport {
    /// Position the move was aiming for.
    pub target: Position,
    /// Direction of travel toward the target.
    pub rotation: Rotation,
    /// Step cycles executed toward the target, including an interrupted one.
    pub steps: u32,
    /// Step cycles executed back off the home switch.
    pub backoff_steps: u32,
}

impl MoveReport {
    fn idle(target: Position, rotation: Rotation) -> Self {
        Self {
            target,
            rotation,
            steps: 0,
            backoff_steps: 0,
        }
    }

    /// Returns `true` if the move was skipped because the axis was already
    /// at its target.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.steps == 0 && self.backoff_steps == 0
    }
}

/// Two-position stepper driver.
///
/// Owns the [`DigitalPort`] carrying the coil and switch lines and the
/// [`StepDelay`] used between sub-steps.
///
/// # Type Parameters
///
/// - `P`: The line I/O implementation ([`DigitalPort`] trait)
/// - `D`: The sub-step delay implementation ([`StepDelay`] trait)
///
/// # Thread Safety
///
/// Moves block the caller and take `&mut self`. To command the motor from
/// several threads, wrap the driver in a `Mutex`.
pub struct StepperDriver<P: DigitalPort, D: StepDelay> {
    port: P,
    delay: D,
    config: StepperConfig,
    position: Position,
    last_move: Option<MoveReport>,
}

impl<P: DigitalPort, D: StepDelay> StepperDriver<P, D> {
    /// Create a driver and put the coils in a known state.
    ///
    /// Configures the phase lines as outputs and the home line as input,
    /// writes the all-off pattern, and starts at [`Position::Unknown`]. The
    /// configuration is taken as-is; see [`new_checked`](Self::new_checked).
    pub fn new(config: StepperConfig, port: P, delay: D) -> Result<Self, StepperError<P::Error>> {
        let mut driver = Self {
            port,
            delay,
            config,
            position: Position::Unknown,
            last_move: None,
        };

        for line in driver.config.phase_pins {
            driver.port.set_output(line)?;
        }
        driver.port.set_input(driver.config.home_pin)?;
        driver.de_energize()?;

        debug!(
            "stepper ready: phases {:?}, home {}, offset {}",
            driver.config.phase_pins, driver.config.home_pin, driver.config.away_offset
        );
        Ok(driver)
    }

    /// Like [`new`](Self::new), but rejects a zero offset, a zero delay, or
    /// a line used twice before touching any hardware.
    pub fn new_checked(
        config: StepperConfig,
        port: P,
        delay: D,
    ) -> Result<Self, StepperError<P::Error>> {
        config.validate().map_err(StepperError::InvalidConfig)?;
        Self::new(config, port, delay)
    }

    /// Move to the away position.
    ///
    /// Does nothing if already away. Otherwise runs exactly `|away_offset|`
    /// uninterruptible cycles in the offset's direction, de-energizes, and
    /// records [`Position::Away`]. The offset is read once at the start.
    pub fn drive_away(&mut self) -> Result<MoveReport, StepperError<P::Error>> {
        let offset = self.config.away_offset;
        let rotation = Rotation::away_for(offset);

        if self.position == Position::Away {
            debug!("already away");
            return Ok(self.record(MoveReport::idle(Position::Away, rotation)));
        }
        if self.position == Position::Unknown {
            warn!("driving away without homing first; away position is relative to an unknown start");
        }

        let steps = offset.unsigned_abs();
        info!("moving away: {} steps {}", steps, rotation.as_str());
        for _ in 0..steps {
            self.step(rotation, Sensitivity::Uninterruptible)?;
        }
        self.de_energize()?;
        self.position = Position::Away;

        Ok(self.record(MoveReport {
            target: Position::Away,
            rotation,
            steps,
            backoff_steps: 0,
        }))
    }

    /// Move to the home position.
    ///
    /// Does nothing if already home. Otherwise runs interruptible cycles
    /// against the away direction until the switch trips, optionally backs
    /// off by [`home_backoff_steps`](StepperConfig::home_backoff_steps),
    /// de-energizes, and records [`Position::Home`].
    ///
    /// # Errors
    ///
    /// [`StepperError::HomeNotFound`] if a homing step limit is configured
    /// and the switch did not trip within it. Coils are de-energized and the
    /// position is left as it was.
    pub fn drive_home(&mut self) -> Result<MoveReport, StepperError<P::Error>> {
        let rotation = Rotation::home_for(self.config.away_offset);

        if self.position == Position::Home {
            debug!("already home");
            return Ok(self.record(MoveReport::idle(Position::Home, rotation)));
        }

        info!("moving home {}", rotation.as_str());
        let limit = self.config.homing_step_limit;
        let mut steps: u32 = 0;
        loop {
            if limit.is_some_and(|limit| steps >= limit) {
                self.de_energize()?;
                warn!("home switch not found after {} steps", steps);
                return Err(StepperError::HomeNotFound { steps });
            }
            steps = steps.saturating_add(1);
            if let StepOutcome::Interrupted { sub_step } =
                self.step(rotation, Sensitivity::Interruptible)?
            {
                info!("interrupted at step {} sub-step {}", steps, sub_step);
                break;
            }
        }

        let backoff_steps = self.config.home_backoff_steps;
        for _ in 0..backoff_steps {
            self.step(rotation.reversed(), Sensitivity::Uninterruptible)?;
        }
        self.de_energize()?;
        self.position = Position::Home;

        Ok(self.record(MoveReport {
            target: Position::Home,
            rotation,
            steps,
            backoff_steps,
        }))
    }

    /// Change the away offset used by later moves.
    ///
    /// The recorded position is not touched, so after changing the offset
    /// while away the axis is still reported as [`Position::Away`] even
    /// though it sits at the old offset.
    pub fn set_distance_from_home(&mut self, offset: i32) {
        if offset == 0 {
            warn!("away offset set to 0; drive_away will not move");
        }
        debug!("away offset {} -> {}", self.config.away_offset, offset);
        self.config.away_offset = offset;
    }

    /// Run one step cycle.
    ///
    /// Writes the four patterns of `rotation`, waiting the configured delay
    /// after each. With [`Sensitivity::Interruptible`] the home switch is
    /// sampled after every write and the cycle stops at once, without the
    /// trailing delay, when it reads as triggered.
    pub(crate) fn step(
        &mut self,
        rotation: Rotation,
        sensitivity: Sensitivity,
    ) -> Result<StepOutcome, StepperError<P::Error>> {
        for (i, pattern) in rotation.sequence().iter().enumerate() {
            self.write_pattern(pattern)?;
            if sensitivity == Sensitivity::Interruptible && self.home_triggered()? {
                return Ok(StepOutcome::Interrupted { sub_step: i as u8 });
            }
            self.delay.delay_us(self.config.step_delay_us);
        }
        Ok(StepOutcome::Completed)
    }

    /// Sample the home switch, applying the configured polarity.
    pub fn home_triggered(&mut self) -> Result<bool, StepperError<P::Error>> {
        let level = self.port.read(self.config.home_pin)?;
        Ok(self.config.polarity.is_triggered(level))
    }

    /// Switch all four coils off.
    pub fn de_energize(&mut self) -> Result<(), StepperError<P::Error>> {
        self.write_pattern(&PhasePattern::OFF)
    }

    /// Execute one host command.
    pub fn apply(&mut self, cmd: StepperCommand) -> Result<CommandOutcome, StepperError<P::Error>> {
        match cmd {
            StepperCommand::DriveHome => self.drive_home().map(CommandOutcome::Moved),
            StepperCommand::DriveAway => self.drive_away().map(CommandOutcome::Moved),
            StepperCommand::SetDistance(offset) => {
                self.set_distance_from_home(offset);
                Ok(CommandOutcome::Configured { away_offset: offset })
            }
        }
    }

    /// Get the current state for logs/API
    pub fn state(&self) -> StepperState {
        StepperState {
            position: self.position,
            away_offset: self.config.away_offset,
            step_delay_us: self.config.step_delay_us,
            hold_at_home: self.config.hold_at_home,
            polarity: self.config.polarity,
            last_move: self.last_move,
        }
    }

    /// Get just the current position
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Get the current away offset
    #[inline]
    pub fn away_offset(&self) -> i32 {
        self.config.away_offset
    }

    /// Get the hold-at-home flag
    #[inline]
    pub fn hold_at_home(&self) -> bool {
        self.config.hold_at_home
    }

    /// Get the full configuration
    #[inline]
    pub fn config(&self) -> &StepperConfig {
        &self.config
    }

    /// Get the report of the last drive operation
    #[inline]
    pub fn last_move(&self) -> Option<MoveReport> {
        self.last_move
    }

    /// Borrow the port, e.g. to inspect a mock
    #[inline]
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Mutably borrow the port, e.g. to inject faults into a mock
    #[inline]
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Borrow the delay
    #[inline]
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Give back the port and delay. Lines keep their last levels.
    pub fn release(self) -> (P, D) {
        (self.port, self.delay)
    }

    fn write_pattern(&mut self, pattern: &PhasePattern) -> Result<(), StepperError<P::Error>> {
        for (line, level) in self.config.phase_pins.iter().zip(pattern.0.iter()) {
            self.port.write(*line, *level)?;
        }
        Ok(())
    }

    fn record(&mut self, report: MoveReport) -> MoveReport {
        self.last_move = Some(report);
        report
    }
}

/// Full state snapshot for logs/API.
///
/// Implements `serde::Serialize` when the `serde` feature is enabled.
///
/// # Example
///
/// ```rust
/// use two_position_stepper::{Position, StepperConfig, StepperDriver};
/// use two_position_stepper::hal::{MockDelay, MockPort};
///
/// let driver = StepperDriver::new(StepperConfig::default(), MockPort::default(), MockDelay::new()).unwrap();
///
/// let state = driver.state();
/// assert_eq!(state.position, Position::Unknown);
/// assert!(state.last_move.is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepperState {
    /// Current logical position.
    pub position: Position,
    /// Signed away offset in step cycles.
    pub away_offset: i32,
    /// Sub-step delay in microseconds.
    pub step_delay_us: u32,
    /// Hold-at-home flag as configured.
    pub hold_at_home: bool,
    /// Home switch polarity.
    pub polarity: SensorPolarity,
    /// Report of the last drive operation, if any.
    pub last_move: Option<MoveReport>,
}
