//! Hardware abstraction traits for digital lines and step timing.
//!
//! This module defines the two capabilities a [`StepperDriver`] needs from
//! the platform. Everything above these traits is plain logic and runs on
//! desktop against the mocks in [`crate::hal::mock`].
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`DigitalPort`] | Drive coil phase lines, sample the home switch |
//! | [`StepDelay`] | Block between phase sub-steps |
//!
//! # Example
//!
//! ```rust
//! use two_position_stepper::traits::{DigitalPort, Level};
//! use two_position_stepper::hal::MockPort;
//!
//! let mut port = MockPort::new([0, 1, 2, 3], 4);
//! port.write(0, Level::High).unwrap();
//! assert_eq!(port.level(0), Level::High);
//! ```
//!
//! [`StepperDriver`]: crate::StepperDriver

/// Identifier of one digital line on a [`DigitalPort`].
///
/// What the number means is up to the port: a GPIO number on a bare board,
/// an index into an array of pin drivers on a HAL adapter.
pub type LineId = u8;

/// Logic level of a digital line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// Logic low (coil off, or switch line pulled down).
    #[default]
    Low,
    /// Logic high.
    High,
}

impl Level {
    /// Returns `true` for [`Level::High`].
    #[inline]
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// Returns `true` for [`Level::Low`].
    #[inline]
    pub const fn is_low(self) -> bool {
        matches!(self, Level::Low)
    }
}

impl From<bool> for Level {
    /// `true` maps to [`Level::High`].
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

/// Digital I/O port trait - abstracts raw pin access.
///
/// The driver only ever writes its four phase lines and reads its one home
/// line. Lines are configured once at construction through
/// [`set_output`](Self::set_output) and [`set_input`](Self::set_input); ports
/// whose pins are already configured by type (most HALs) can keep the
/// default no-op implementations.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use two_position_stepper::traits::{DigitalPort, Level, LineId};
///
/// struct MyBoard { /* register handles */ }
///
/// impl DigitalPort for MyBoard {
///     type Error = ();
///
///     fn write(&mut self, line: LineId, level: Level) -> Result<(), ()> {
///         // Set or clear the output bit...
///         Ok(())
///     }
///
///     fn read(&mut self, line: LineId) -> Result<Level, ()> {
///         // Sample the input register...
///         Ok(Level::Low)
///     }
/// }
/// ```
pub trait DigitalPort {
    /// Error type for line operations.
    type Error;

    /// Configure a line as a push-pull output.
    fn set_output(&mut self, _line: LineId) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Configure a line as an input.
    fn set_input(&mut self, _line: LineId) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Drive an output line to `level`.
    fn write(&mut self, line: LineId, level: Level) -> Result<(), Self::Error>;

    /// Sample an input line.
    fn read(&mut self, line: LineId) -> Result<Level, Self::Error>;
}

/// Blocking delay between phase sub-steps.
///
/// On hardware this is a busy-wait or a sleep; in tests it just records the
/// requested durations.
pub trait StepDelay {
    /// Block the calling thread for `us` microseconds.
    fn delay_us(&mut self, us: u32);
}

impl<T: StepDelay + ?Sized> StepDelay for &mut T {
    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_default_is_low() {
        assert_eq!(Level::default(), Level::Low);
    }

    #[test]
    fn level_from_bool() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
        assert!(bool::from(Level::High));
        assert!(!bool::from(Level::Low));
    }

    #[test]
    fn level_predicates() {
        assert!(Level::High.is_high());
        assert!(!Level::High.is_low());
        assert!(Level::Low.is_low());
    }

    // =========================================================================
    // DigitalPort Default Methods Tests
    // =========================================================================

    struct TestPort {
        last_write: Option<(LineId, Level)>,
    }

    impl DigitalPort for TestPort {
        type Error = ();

        fn write(&mut self, line: LineId, level: Level) -> Result<(), ()> {
            self.last_write = Some((line, level));
            Ok(())
        }

        fn read(&mut self, _line: LineId) -> Result<Level, ()> {
            Ok(Level::High)
        }
    }

    #[test]
    fn digital_port_configuration_defaults_are_noops() {
        let mut port = TestPort { last_write: None };
        assert!(port.set_output(3).is_ok());
        assert!(port.set_input(4).is_ok());
        assert!(port.last_write.is_none());
    }

    struct CountingDelay(u64);

    impl StepDelay for CountingDelay {
        fn delay_us(&mut self, us: u32) {
            self.0 += u64::from(us);
        }
    }

    #[test]
    fn step_delay_through_mut_ref() {
        fn run<D: StepDelay>(mut delay: D) {
            delay.delay_us(10);
            delay.delay_us(5);
        }

        let mut delay = CountingDelay(0);
        run(&mut delay);
        assert_eq!(delay.0, 15);
    }
}
