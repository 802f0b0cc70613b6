//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for the hardware traits, enabling
//! development and testing on desktop without a motor attached.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockPort`] | [`DigitalPort`] | Records line writes, simulates the axis and its home switch |
//! | [`MockDelay`] | [`StepDelay`] | Counts requested delays instead of sleeping |
//!
//! # Simulated axis
//!
//! [`MockPort`] decodes every complete phase pattern written to its four
//! phase lines into a signed sub-step displacement, the way the rotor would
//! follow it. A full step cycle moves the displacement by 4 (positive =
//! clockwise). The home switch sits at a fixed displacement and reads as
//! pressed whenever the axis is at or beyond it.
//!
//! # Example
//!
//! ```rust
//! use two_position_stepper::{StepperDriver, StepperConfig, Position};
//! use two_position_stepper::hal::{MockDelay, MockPort};
//! use two_position_stepper::phase::Rotation;
//!
//! let config = StepperConfig::new([0, 1, 2, 3], 4, 10).with_step_delay_us(1);
//! let port = MockPort::new([0, 1, 2, 3], 4).with_home_after(7, Rotation::CounterClockwise);
//! let mut driver = StepperDriver::new(config, port, MockDelay::new()).unwrap();
//!
//! let report = driver.drive_home().unwrap();
//! assert_eq!(report.steps, 7);
//! assert_eq!(driver.position(), Position::Home);
//! ```
//!
//! [`DigitalPort`]: crate::traits::DigitalPort
//! [`StepDelay`]: crate::traits::StepDelay

extern crate alloc;
use alloc::vec::Vec;

use crate::config::SensorPolarity;
use crate::phase::{PhasePattern, Rotation, CLOCKWISE};
use crate::traits::{DigitalPort, Level, LineId, StepDelay};

// ============================================================================
// Port Mock
// ============================================================================

/// Mock digital port with a simulated axis and home switch.
///
/// Every write is kept in [`writes`](Self::writes) and every complete
/// phase pattern in [`patterns`](Self::patterns) for verification.
#[derive(Debug, Clone)]
pub struct MockPort {
    phase_lines: [LineId; 4],
    home_line: LineId,
    levels: [Level; 256],
    polarity: SensorPolarity,
    last_energized: Option<PhasePattern>,
    displacement: i64,
    switch_at: Option<i64>,
    forced_switch: Option<bool>,
    fail_writes: bool,
    /// Lines configured through `set_output`.
    pub outputs: Vec<LineId>,
    /// Lines configured through `set_input`.
    pub inputs: Vec<LineId>,
    /// Every `write` call in order.
    pub writes: Vec<(LineId, Level)>,
    /// Every complete pattern on the phase lines, including all-off.
    pub patterns: Vec<PhasePattern>,
    /// Number of `read` calls on the home line.
    pub read_count: usize,
}

impl MockPort {
    /// Creates a port for the given phase and home lines.
    ///
    /// No home switch is placed: the sensor never trips until one is
    /// configured or forced.
    pub fn new(phase_lines: [LineId; 4], home_line: LineId) -> Self {
        Self {
            phase_lines,
            home_line,
            levels: [Level::Low; 256],
            polarity: SensorPolarity::default(),
            last_energized: None,
            displacement: 0,
            switch_at: None,
            forced_switch: None,
            fail_writes: false,
            outputs: Vec::new(),
            inputs: Vec::new(),
            writes: Vec::new(),
            patterns: Vec::new(),
            read_count: 0,
        }
    }

    /// Sets how a pressed switch appears on the home line.
    pub fn with_polarity(mut self, polarity: SensorPolarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Places the home switch `steps` full step cycles from the current
    /// displacement in `rotation`.
    pub fn with_home_after(mut self, steps: u32, rotation: Rotation) -> Self {
        self.place_home(steps, rotation);
        self
    }

    /// Places the switch at an absolute sub-step displacement.
    pub fn with_switch_at(mut self, displacement: i64) -> Self {
        self.switch_at = Some(displacement);
        self
    }

    /// See [`with_home_after`](Self::with_home_after).
    pub fn place_home(&mut self, steps: u32, rotation: Rotation) {
        let delta = i64::from(steps) * 4;
        self.switch_at = Some(match rotation {
            Rotation::Clockwise => self.displacement + delta,
            Rotation::CounterClockwise => self.displacement - delta,
        });
    }

    /// Removes the home switch; the sensor never trips.
    pub fn remove_switch(&mut self) {
        self.switch_at = None;
    }

    /// Forces the switch state regardless of the axis.
    pub fn force_switch(&mut self, pressed: bool) {
        self.forced_switch = Some(pressed);
    }

    /// Returns the switch to axis-driven behavior.
    pub fn clear_forced_switch(&mut self) {
        self.forced_switch = None;
    }

    /// Makes every following `write` fail.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Current sub-step displacement of the simulated axis.
    #[inline]
    pub fn displacement(&self) -> i64 {
        self.displacement
    }

    /// Last level written to a line.
    #[inline]
    pub fn level(&self, line: LineId) -> Level {
        self.levels[line as usize]
    }

    /// Current levels of the four phase lines.
    pub fn phase_levels(&self) -> PhasePattern {
        PhasePattern(self.phase_lines.map(|line| self.level(line)))
    }

    /// Returns `true` if the simulated switch is pressed.
    pub fn switch_pressed(&self) -> bool {
        if let Some(pressed) = self.forced_switch {
            return pressed;
        }
        match self.switch_at {
            Some(at) if at < 0 => self.displacement <= at,
            Some(at) if at > 0 => self.displacement >= at,
            Some(_) => self.displacement == 0,
            None => false,
        }
    }

    /// Number of energized patterns written.
    pub fn energized_count(&self) -> usize {
        self.patterns.iter().filter(|p| !p.is_off()).count()
    }

    // Follow the rotor: one sub-step per adjacent pattern. From rest, the
    // first pattern of either drive table counts as a sub-step into it.
    fn track(&mut self, pattern: PhasePattern) {
        if pattern.is_off() {
            self.last_energized = None;
            return;
        }
        let Some(idx) = pattern.clockwise_index() else {
            self.last_energized = None;
            return;
        };
        let delta = match self.last_energized.and_then(|p| p.clockwise_index()) {
            Some(prev) if idx == (prev + 1) % 4 => 1,
            Some(prev) if idx == (prev + 3) % 4 => -1,
            Some(_) => 0,
            None if idx == 0 => 1,
            None if idx == 3 => -1,
            None => 0,
        };
        self.displacement += delta;
        self.last_energized = Some(pattern);
    }

    fn switch_level(&self) -> Level {
        let pressed = self.switch_pressed();
        match self.polarity {
            SensorPolarity::ActiveLow => Level::from(!pressed),
            SensorPolarity::ActiveHigh => Level::from(pressed),
        }
    }
}

impl Default for MockPort {
    fn default() -> Self {
        Self::new([0, 1, 2, 3], 4)
    }
}

impl DigitalPort for MockPort {
    type Error = ();

    fn set_output(&mut self, line: LineId) -> Result<(), ()> {
        self.outputs.push(line);
        Ok(())
    }

    fn set_input(&mut self, line: LineId) -> Result<(), ()> {
        self.inputs.push(line);
        Ok(())
    }

    fn write(&mut self, line: LineId, level: Level) -> Result<(), ()> {
        if self.fail_writes {
            return Err(());
        }
        self.levels[line as usize] = level;
        self.writes.push((line, level));
        // The pattern is complete once the last phase line is written.
        if line == self.phase_lines[3] {
            let pattern = self.phase_levels();
            self.patterns.push(pattern);
            self.track(pattern);
        }
        Ok(())
    }

    fn read(&mut self, line: LineId) -> Result<Level, ()> {
        if line == self.home_line {
            self.read_count += 1;
            Ok(self.switch_level())
        } else {
            Ok(self.level(line))
        }
    }
}

// ============================================================================
// Delay Mock
// ============================================================================

/// Mock delay for testing.
///
/// Records requested delays instead of blocking.
///
/// # Example
///
/// ```rust
/// use two_position_stepper::hal::MockDelay;
/// use two_position_stepper::traits::StepDelay;
///
/// let mut delay = MockDelay::new();
/// delay.delay_us(250);
/// delay.delay_us(250);
///
/// assert_eq!(delay.call_count, 2);
/// assert_eq!(delay.total_us, 500);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MockDelay {
    /// Number of `delay_us` calls.
    pub call_count: usize,
    /// Sum of all requested delays in microseconds.
    pub total_us: u64,
    /// Last requested delay.
    pub last_us: Option<u32>,
}

impl MockDelay {
    /// Creates a new mock delay with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StepDelay for MockDelay {
    fn delay_us(&mut self, us: u32) {
        self.call_count += 1;
        self.total_us += u64::from(us);
        self.last_us = Some(us);
    }
}

// ============================================================================
// Tests
// ============================================================================
