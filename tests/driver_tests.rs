//! Integration tests for the two-position driver

use two_position_stepper::{
    hal::{MockDelay, MockPort},
    phase::{CLOCKWISE, COUNTER_CLOCKWISE},
    CommandOutcome, PhasePattern, Position, Rotation, SensorPolarity, StepperCommand,
    StepperConfig, StepperDriver,
};

const PINS: [u8; 4] = [0, 1, 2, 3];
const HOME: u8 = 4;

fn driver(offset: i32, port: MockPort) -> StepperDriver<MockPort, MockDelay> {
    let config = StepperConfig::new(PINS, HOME, offset).with_step_delay_us(1);
    StepperDriver::new(config, port, MockDelay::new()).unwrap()
}

/// Patterns written since `from`, energized only
fn energized_since(port: &MockPort, from: usize) -> Vec<PhasePattern> {
    port.patterns[from..]
        .iter()
        .copied()
        .filter(|p| !p.is_off())
        .collect()
}

#[test]
fn positive_offset_scenario() {
    let port = MockPort::new(PINS, HOME).with_home_after(7, Rotation::CounterClockwise);
    let mut driver = driver(10, port);
    assert_eq!(driver.position(), Position::Unknown);

    // Home: exactly 7 counter-clockwise cycles
    let report = driver.drive_home().unwrap();
    assert_eq!(report.steps, 7);
    assert_eq!(report.rotation, Rotation::CounterClockwise);
    assert_eq!(driver.position(), Position::Home);
    assert_eq!(driver.port().displacement(), -28);

    // Away: exactly 10 clockwise cycles
    let before = driver.port().patterns.len();
    let report = driver.drive_away().unwrap();
    assert_eq!(report.steps, 10);
    assert_eq!(report.rotation, Rotation::Clockwise);
    assert_eq!(driver.position(), Position::Away);
    let written = energized_since(driver.port(), before);
    assert_eq!(written.len(), 40);
    for cycle in written.chunks(4) {
        assert_eq!(cycle, &CLOCKWISE);
    }
    assert_eq!(driver.port().displacement(), 12);

    // Away again: no-op
    let writes = driver.port().writes.len();
    let report = driver.drive_away().unwrap();
    assert_eq!(report.steps, 0);
    assert!(report.is_noop());
    assert_eq!(driver.port().writes.len(), writes);
    assert_eq!(driver.position(), Position::Away);
}

#[test]
fn negative_offset_scenario() {
    let port = MockPort::new(PINS, HOME).with_home_after(3, Rotation::Clockwise);
    let mut driver = driver(-5, port);

    let before = driver.port().patterns.len();
    let report = driver.drive_home().unwrap();
    assert_eq!(report.rotation, Rotation::Clockwise);
    assert_eq!(report.steps, 3);
    for cycle in energized_since(driver.port(), before).chunks(4) {
        assert_eq!(cycle, &CLOCKWISE);
    }

    let before = driver.port().patterns.len();
    let report = driver.drive_away().unwrap();
    assert_eq!(report.rotation, Rotation::CounterClockwise);
    assert_eq!(report.steps, 5);
    let written = energized_since(driver.port(), before);
    assert_eq!(written.len(), 20);
    for cycle in written.chunks(4) {
        assert_eq!(cycle, &COUNTER_CLOCKWISE);
    }
    assert_eq!(driver.port().displacement(), 12 - 20);
}

#[test]
fn home_when_home_is_noop() {
    let port = MockPort::new(PINS, HOME).with_home_after(4, Rotation::CounterClockwise);
    let mut driver = driver(10, port);
    driver.drive_home().unwrap();

    let writes = driver.port().writes.len();
    let reads = driver.port().read_count;
    for _ in 0..3 {
        assert!(driver.drive_home().unwrap().is_noop());
    }
    assert_eq!(driver.port().writes.len(), writes);
    assert_eq!(driver.port().read_count, reads);
}

#[test]
fn round_trips_return_to_switch() {
    let port = MockPort::new(PINS, HOME).with_home_after(7, Rotation::CounterClockwise);
    let mut driver = driver(10, port);
    driver.drive_home().unwrap();

    for _ in 0..3 {
        assert_eq!(driver.drive_away().unwrap().steps, 10);
        assert!(!driver.port().switch_pressed());
        // Coming back covers the full offset to reach the switch again
        assert_eq!(driver.drive_home().unwrap().steps, 10);
        assert!(driver.port().switch_pressed());
        assert_eq!(driver.position(), Position::Home);
    }
}

#[test]
fn homing_reads_after_every_sub_step() {
    let port = MockPort::new(PINS, HOME).with_home_after(5, Rotation::CounterClockwise);
    let mut driver = driver(10, port);
    driver.drive_home().unwrap();
    assert_eq!(driver.port().read_count, 20);
}

#[test]
fn away_move_never_reads_switch() {
    let port = MockPort::new(PINS, HOME).with_home_after(1, Rotation::CounterClockwise);
    let mut driver = driver(25, port);
    driver.drive_home().unwrap();
    let reads = driver.port().read_count;

    driver.drive_away().unwrap();
    assert_eq!(driver.port().read_count, reads);
}

#[test]
fn delay_between_sub_steps() {
    let port = MockPort::new(PINS, HOME).with_home_after(7, Rotation::CounterClockwise);
    let config = StepperConfig::new(PINS, HOME, 10).with_step_delay_us(250);
    let mut driver = StepperDriver::new(config, port, MockDelay::new()).unwrap();

    // The interrupting sub-step skips its delay
    driver.drive_home().unwrap();
    assert_eq!(driver.delay().call_count, 6 * 4 + 3);

    driver.drive_away().unwrap();
    assert_eq!(driver.delay().call_count, 27 + 40);
    assert_eq!(driver.delay().total_us, 67 * 250);
    assert_eq!(driver.delay().last_us, Some(250));
}

#[test]
fn offset_change_applies_to_next_move() {
    let port = MockPort::new(PINS, HOME).with_home_after(2, Rotation::CounterClockwise);
    let mut driver = driver(10, port);
    driver.drive_home().unwrap();
    assert_eq!(driver.drive_away().unwrap().steps, 10);

    // Changing the offset while away does not move or re-label the axis
    driver.set_distance_from_home(3);
    assert_eq!(driver.position(), Position::Away);
    assert_eq!(driver.away_offset(), 3);
    assert!(driver.drive_away().unwrap().is_noop());

    assert_eq!(driver.drive_home().unwrap().steps, 10);
    assert_eq!(driver.drive_away().unwrap().steps, 3);
}

#[test]
fn homing_direction_follows_current_offset() {
    // Switch clockwise of the axis, offset changed before the first home
    let port = MockPort::new(PINS, HOME).with_home_after(2, Rotation::Clockwise);
    let mut driver = driver(10, port);
    driver.set_distance_from_home(-4);

    let report = driver.drive_home().unwrap();
    assert_eq!(report.rotation, Rotation::Clockwise);
    assert_eq!(report.steps, 2);

    let report = driver.drive_away().unwrap();
    assert_eq!(report.rotation, Rotation::CounterClockwise);
    assert_eq!(report.steps, 4);
    assert!(!driver.port().switch_pressed());
}

#[test]
fn active_high_sensor() {
    let port = MockPort::new(PINS, HOME)
        .with_polarity(SensorPolarity::ActiveHigh)
        .with_home_after(5, Rotation::CounterClockwise);
    let config = StepperConfig::new(PINS, HOME, 10)
        .with_step_delay_us(1)
        .with_polarity(SensorPolarity::ActiveHigh);
    let mut driver = StepperDriver::new(config, port, MockDelay::new()).unwrap();

    assert_eq!(driver.drive_home().unwrap().steps, 5);
}

#[test]
fn hold_at_home_is_carried_but_coils_release() {
    let port = MockPort::new(PINS, HOME).with_home_after(2, Rotation::CounterClockwise);
    let config = StepperConfig::new(PINS, HOME, 10)
        .with_step_delay_us(1)
        .with_hold_at_home(true);
    let mut driver = StepperDriver::new(config, port, MockDelay::new()).unwrap();

    driver.drive_home().unwrap();
    assert!(driver.hold_at_home());
    assert!(driver.state().hold_at_home);
    assert_eq!(driver.port().phase_levels(), PhasePattern::OFF);
}

#[test]
fn every_move_ends_de_energized() {
    let port = MockPort::new(PINS, HOME).with_home_after(3, Rotation::CounterClockwise);
    let mut driver = driver(6, port);

    driver.drive_home().unwrap();
    assert_eq!(driver.port().patterns.last(), Some(&PhasePattern::OFF));
    driver.drive_away().unwrap();
    assert_eq!(driver.port().patterns.last(), Some(&PhasePattern::OFF));
}

#[test]
fn construction_releases_coils() {
    let driver = driver(10, MockPort::new(PINS, HOME));
    assert_eq!(driver.port().outputs, PINS.to_vec());
    assert_eq!(driver.port().inputs, vec![HOME]);
    assert_eq!(driver.port().patterns, vec![PhasePattern::OFF]);
    assert_eq!(driver.port().energized_count(), 0);
}

#[test]
fn text_commands_drive_motor() {
    let port = MockPort::new(PINS, HOME).with_home_after(4, Rotation::CounterClockwise);
    let mut driver = driver(10, port);

    let mut steps = Vec::new();
    for line in ["home\n", "d 6\n", "away\n", "away\n", "h\n"] {
        let cmd = StepperCommand::from_text(line).unwrap();
        if let CommandOutcome::Moved(report) = driver.apply(cmd).unwrap() {
            steps.push(report.steps);
        }
    }
    assert_eq!(steps, vec![4, 6, 0, 6]);
    assert_eq!(driver.position(), Position::Home);
    assert_eq!(driver.away_offset(), 6);
}

#[test]
fn last_move_tracks_reports() {
    let port = MockPort::new(PINS, HOME).with_home_after(2, Rotation::CounterClockwise);
    let mut driver = driver(10, port);
    assert!(driver.last_move().is_none());

    let report = driver.drive_home().unwrap();
    assert_eq!(driver.last_move(), Some(report));
    let report = driver.drive_away().unwrap();
    assert_eq!(driver.last_move(), Some(report));
    assert_eq!(driver.state().last_move.map(|m| m.target), Some(Position::Away));
}
