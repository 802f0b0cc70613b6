//! Property tests for step counts and drive tables

use proptest::prelude::*;
use two_position_stepper::{
    hal::{MockDelay, MockPort},
    phase::{CLOCKWISE, COUNTER_CLOCKWISE},
    Position, Rotation, StepperConfig, StepperDriver,
};

const PINS: [u8; 4] = [0, 1, 2, 3];
const HOME: u8 = 4;

fn offset() -> impl Strategy<Value = i32> {
    prop_oneof![-300i32..=-1, 1i32..=300]
}

proptest! {
    #[test]
    fn away_moves_exactly_offset_cycles(d in offset(), switch in 1u32..60) {
        let port = MockPort::new(PINS, HOME).with_home_after(switch, Rotation::home_for(d));
        let config = StepperConfig::new(PINS, HOME, d).with_step_delay_us(1);
        let mut driver = StepperDriver::new(config, port, MockDelay::new()).unwrap();

        prop_assert_eq!(driver.drive_home().unwrap().steps, switch);
        let home_at = driver.port().displacement();
        let energized = driver.port().energized_count();

        let report = driver.drive_away().unwrap();
        prop_assert_eq!(report.steps, d.unsigned_abs());
        prop_assert_eq!(report.rotation, Rotation::away_for(d));
        prop_assert_eq!(driver.position(), Position::Away);
        prop_assert_eq!(
            driver.port().energized_count() - energized,
            4 * d.unsigned_abs() as usize
        );
        prop_assert_eq!(
            (driver.port().displacement() - home_at).abs(),
            4 * i64::from(d.unsigned_abs())
        );

        // Second call is a no-op
        let writes = driver.port().writes.len();
        prop_assert!(driver.drive_away().unwrap().is_noop());
        prop_assert_eq!(driver.port().writes.len(), writes);
    }

    #[test]
    fn homing_stops_on_switch(d in offset(), switch in 1u32..200) {
        let port = MockPort::new(PINS, HOME).with_home_after(switch, Rotation::home_for(d));
        let config = StepperConfig::new(PINS, HOME, d)
            .with_step_delay_us(1)
            .with_homing_step_limit(switch + 5);
        let mut driver = StepperDriver::new(config, port, MockDelay::new()).unwrap();

        let report = driver.drive_home().unwrap();
        prop_assert_eq!(report.steps, switch);
        prop_assert_eq!(report.rotation, Rotation::home_for(d));
        prop_assert!(driver.port().switch_pressed());
        prop_assert_eq!(driver.port().read_count, 4 * switch as usize);
    }

    #[test]
    fn home_away_cycles_stay_consistent(d in offset(), rounds in 1usize..5) {
        let port = MockPort::new(PINS, HOME).with_home_after(3, Rotation::home_for(d));
        let config = StepperConfig::new(PINS, HOME, d).with_step_delay_us(1);
        let mut driver = StepperDriver::new(config, port, MockDelay::new()).unwrap();
        driver.drive_home().unwrap();
        let home_at = driver.port().displacement();

        for _ in 0..rounds {
            prop_assert_eq!(driver.drive_away().unwrap().steps, d.unsigned_abs());
            prop_assert_eq!(driver.drive_home().unwrap().steps, d.unsigned_abs());
            prop_assert_eq!(driver.port().displacement(), home_at);
        }
    }

    #[test]
    fn tables_are_reverses(i in 0usize..4) {
        prop_assert_eq!(CLOCKWISE[i], COUNTER_CLOCKWISE[3 - i]);
    }
}
