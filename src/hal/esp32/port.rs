//! ESP32 GPIO port for a four-wire stepper and its home switch.
//!
//! Phase lines are driven through ULN2003-style driver inputs (IN1-IN4), the
//! home switch is read on one GPIO with the internal pull resistor chosen
//! from the configured polarity:
//!
//! - Active-low (switch to GND): pull-up
//! - Active-high (switch or opto output to 3.3V): pull-down
//!
//! Lines are addressed by GPIO number, so a [`StepperConfig`] built from the
//! constants in [`super::pins`] matches this port directly.
//!
//! [`StepperConfig`]: crate::config::StepperConfig

use crate::config::SensorPolarity;
use crate::traits::{DigitalPort, Level, LineId};
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Input, Output, PinDriver, Pull};
use esp_idf_hal::sys::{EspError, ESP_ERR_INVALID_ARG};

/// ESP32 stepper port.
///
/// # Example
///
/// ```ignore
/// use two_position_stepper::hal::esp32::{pins, Esp32Port};
/// use two_position_stepper::config::SensorPolarity;
///
/// let peripherals = Peripherals::take()?;
/// let port = Esp32Port::new(
///     [
///         peripherals.pins.gpio2.downgrade_output(),
///         peripherals.pins.gpio3.downgrade_output(),
///         peripherals.pins.gpio4.downgrade_output(),
///         peripherals.pins.gpio5.downgrade_output(),
///     ],
///     peripherals.pins.gpio10.downgrade(),
///     SensorPolarity::ActiveLow,
/// )?;
/// ```
pub struct Esp32Port<'d> {
    /// Coil outputs, drive-table order
    phases: [PinDriver<'d, AnyOutputPin, Output>; 4],
    /// Limit switch input
    home: PinDriver<'d, AnyIOPin, Input>,
    /// GPIO numbers of `phases`
    phase_gpios: [LineId; 4],
    /// GPIO number of `home`
    home_gpio: LineId,
}

impl<'d> Esp32Port<'d> {
    /// Creates the port, configuring outputs and the switch input.
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO initialization fails.
    pub fn new(
        phase_pins: [AnyOutputPin; 4],
        home_pin: AnyIOPin,
        polarity: SensorPolarity,
    ) -> Result<Self, EspError> {
        let [p1, p2, p3, p4] = phase_pins;
        let phases = [
            PinDriver::output(p1)?,
            PinDriver::output(p2)?,
            PinDriver::output(p3)?,
            PinDriver::output(p4)?,
        ];

        let mut home = PinDriver::input(home_pin)?;
        home.set_pull(match polarity {
            SensorPolarity::ActiveLow => Pull::Up,
            SensorPolarity::ActiveHigh => Pull::Down,
        })?;

        let phase_gpios = [
            phases[0].pin() as LineId,
            phases[1].pin() as LineId,
            phases[2].pin() as LineId,
            phases[3].pin() as LineId,
        ];
        let home_gpio = home.pin() as LineId;

        Ok(Self {
            phases,
            home,
            phase_gpios,
            home_gpio,
        })
    }

    /// GPIO numbers of the coil outputs, drive-table order.
    #[inline]
    pub fn phase_gpios(&self) -> [LineId; 4] {
        self.phase_gpios
    }

    /// GPIO number of the switch input.
    #[inline]
    pub fn home_gpio(&self) -> LineId {
        self.home_gpio
    }

    fn unknown_line() -> EspError {
        EspError::from_infallible::<ESP_ERR_INVALID_ARG>()
    }
}

impl DigitalPort for Esp32Port<'_> {
    type Error = EspError;

    fn write(&mut self, line: LineId, level: Level) -> Result<(), Self::Error> {
        let idx = self
            .phase_gpios
            .iter()
            .position(|gpio| *gpio == line)
            .ok_or_else(Self::unknown_line)?;
        let level = if level.is_high() {
            esp_idf_hal::gpio::Level::High
        } else {
            esp_idf_hal::gpio::Level::Low
        };
        self.phases[idx].set_level(level)
    }

    fn read(&mut self, line: LineId) -> Result<Level, Self::Error> {
        if line != self.home_gpio {
            return Err(Self::unknown_line());
        }
        Ok(Level::from(self.home.is_high()))
    }
}
