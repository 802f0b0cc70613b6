//! Adapters from `embedded-hal` 1.0 to the driver traits.
//!
//! Any board whose HAL implements `embedded_hal::digital::{OutputPin, InputPin}`
//! and `embedded_hal::delay::DelayNs` can run the driver through these.
//!
//! [`HalPort`] owns exactly the five pins a driver needs and addresses them
//! by fixed line numbers: [`HalPort::PHASE_LINES`] for the coils and
//! [`HalPort::HOME_LINE`] for the switch. Use [`HalPort::stepper_config`]
//! to get a matching configuration.
//!
//! ```rust,ignore
//! use two_position_stepper::hal::{HalDelay, HalPort};
//! use two_position_stepper::StepperDriver;
//!
//! let port = HalPort::new([in1, in2, in3, in4], home_switch);
//! let config = HalPort::<_, _>::stepper_config(200);
//! let mut driver = StepperDriver::new(config, port, HalDelay::new(delay))?;
//! driver.drive_home()?;
//! ```

use crate::config::StepperConfig;
use crate::traits::{DigitalPort, Level, LineId, StepDelay};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin, PinState};

/// Error from a [`HalPort`] line access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HalPortError<OE, IE> {
    /// A phase output pin failed.
    Output(OE),
    /// The home input pin failed.
    Input(IE),
    /// The line number is not one of this port's lines.
    UnknownLine(LineId),
}

/// Four output pins and one input pin as a [`DigitalPort`].
pub struct HalPort<O, I> {
    phases: [O; 4],
    home: I,
}

impl<O, I> HalPort<O, I>
where
    O: OutputPin,
    I: InputPin,
{
    /// Line numbers of the phase outputs, in drive-table order.
    pub const PHASE_LINES: [LineId; 4] = [0, 1, 2, 3];

    /// Line number of the home input.
    pub const HOME_LINE: LineId = 4;

    /// Wraps the coil pins (drive-table order) and the switch pin.
    pub fn new(phases: [O; 4], home: I) -> Self {
        Self { phases, home }
    }

    /// Configuration with this port's line numbering.
    pub fn stepper_config(away_offset: i32) -> StepperConfig {
        StepperConfig::new(Self::PHASE_LINES, Self::HOME_LINE, away_offset)
    }

    /// Gives back the pins.
    pub fn release(self) -> ([O; 4], I) {
        (self.phases, self.home)
    }
}

impl<O, I> DigitalPort for HalPort<O, I>
where
    O: OutputPin,
    I: InputPin,
{
    type Error = HalPortError<O::Error, I::Error>;

    fn write(&mut self, line: LineId, level: Level) -> Result<(), Self::Error> {
        let pin = self
            .phases
            .get_mut(line as usize)
            .ok_or(HalPortError::UnknownLine(line))?;
        let state = if level.is_high() {
            PinState::High
        } else {
            PinState::Low
        };
        pin.set_state(state).map_err(HalPortError::Output)
    }

    fn read(&mut self, line: LineId) -> Result<Level, Self::Error> {
        if line != Self::HOME_LINE {
            return Err(HalPortError::UnknownLine(line));
        }
        self.home
            .is_high()
            .map(Level::from)
            .map_err(HalPortError::Input)
    }
}

/// [`StepDelay`] over any `embedded-hal` delay provider.
pub struct HalDelay<T>(T);

impl<T: DelayNs> HalDelay<T> {
    /// Wraps a HAL delay.
    pub fn new(delay: T) -> Self {
        Self(delay)
    }

    /// Gives back the HAL delay.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: DelayNs> StepDelay for HalDelay<T> {
    fn delay_us(&mut self, us: u32) {
        self.0.delay_us(us);
    }
}
