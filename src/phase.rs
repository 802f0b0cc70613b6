//! Coil phase drive tables.
//!
//! A step cycle walks four patterns, each energizing two adjacent phases
//! (the standard 4-4 "two-phase-on" table). Counter-clockwise is the
//! clockwise table traversed backwards.
//!
//! ```rust
//! use two_position_stepper::phase::{Rotation, CLOCKWISE, COUNTER_CLOCKWISE};
//!
//! for i in 0..4 {
//!     assert_eq!(CLOCKWISE[i], COUNTER_CLOCKWISE[3 - i]);
//! }
//! assert_eq!(Rotation::Clockwise.reversed(), Rotation::CounterClockwise);
//! ```

use crate::traits::Level;

/// Levels for the four phase lines during one sub-step, in pin order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhasePattern(pub [Level; 4]);

impl PhasePattern {
    /// All four phases de-energized.
    pub const OFF: PhasePattern = PhasePattern([Level::Low; 4]);

    const fn from_bits(bits: [bool; 4]) -> Self {
        let mut levels = [Level::Low; 4];
        let mut i = 0;
        while i < 4 {
            if bits[i] {
                levels[i] = Level::High;
            }
            i += 1;
        }
        PhasePattern(levels)
    }

    /// Number of energized phases.
    pub fn energized(&self) -> usize {
        self.0.iter().filter(|l| l.is_high()).count()
    }

    /// Returns `true` if no phase is energized.
    pub fn is_off(&self) -> bool {
        self.energized() == 0
    }

    /// Position of this pattern in the clockwise table, if it is one of them.
    pub fn clockwise_index(&self) -> Option<usize> {
        CLOCKWISE.iter().position(|p| p == self)
    }
}

/// Clockwise drive table.
pub const CLOCKWISE: [PhasePattern; 4] = [
    PhasePattern::from_bits([true, true, false, false]),
    PhasePattern::from_bits([false, true, true, false]),
    PhasePattern::from_bits([false, false, true, true]),
    PhasePattern::from_bits([true, false, false, true]),
];

/// Counter-clockwise drive table.
pub const COUNTER_CLOCKWISE: [PhasePattern; 4] = [
    CLOCKWISE[3],
    CLOCKWISE[2],
    CLOCKWISE[1],
    CLOCKWISE[0],
];

/// Rotational direction of a step cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rotation {
    /// Walk [`CLOCKWISE`]. Used to move away for positive offsets.
    Clockwise,
    /// Walk [`COUNTER_CLOCKWISE`].
    CounterClockwise,
}

impl Rotation {
    /// Direction that moves from home to away for the given offset.
    ///
    /// Positive offsets map to clockwise; zero and negative offsets to
    /// counter-clockwise, so homing with a zero offset steps clockwise.
    #[inline]
    pub const fn away_for(offset: i32) -> Self {
        if offset > 0 {
            Rotation::Clockwise
        } else {
            Rotation::CounterClockwise
        }
    }

    /// Direction that retraces the path back to home for the given offset.
    #[inline]
    pub const fn home_for(offset: i32) -> Self {
        Self::away_for(offset).reversed()
    }

    /// The opposite direction.
    #[inline]
    pub const fn reversed(self) -> Self {
        match self {
            Rotation::Clockwise => Rotation::CounterClockwise,
            Rotation::CounterClockwise => Rotation::Clockwise,
        }
    }

    /// The four sub-step patterns for one cycle in this direction.
    #[inline]
    pub const fn sequence(self) -> &'static [PhasePattern; 4] {
        match self {
            Rotation::Clockwise => &CLOCKWISE,
            Rotation::CounterClockwise => &COUNTER_CLOCKWISE,
        }
    }

    /// Short lowercase name, for logs and JSON.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Rotation::Clockwise => "cw",
            Rotation::CounterClockwise => "ccw",
        }
    }
}

/// Whether a step cycle watches the home switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sensitivity {
    /// Sample the switch after every sub-step and stop as soon as it trips.
    Interruptible,
    /// Never sample the switch; always finish the cycle.
    Uninterruptible,
}

/// Result of one step cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// All four sub-steps were applied.
    Completed,
    /// The home switch tripped after the given sub-step (0-3).
    Interrupted {
        /// Index of the last pattern written.
        sub_step: u8,
    },
}

impl StepOutcome {
    /// Returns `true` if the cycle stopped on the home switch.
    #[inline]
    pub const fn is_interrupted(&self) -> bool {
        matches!(self, StepOutcome::Interrupted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_exact_reverses() {
        for i in 0..4 {
            assert_eq!(CLOCKWISE[i], COUNTER_CLOCKWISE[3 - i]);
        }
    }

    #[test]
    fn every_pattern_energizes_two_adjacent_phases() {
        for pattern in CLOCKWISE.iter() {
            assert_eq!(pattern.energized(), 2);
            let high: [bool; 4] = pattern.0.map(bool::from);
            let adjacent = (0..4).any(|i| high[i] && high[(i + 1) % 4]);
            assert!(adjacent, "{:?} is not an adjacent pair", pattern);
        }
    }

    #[test]
    fn clockwise_table_matches_wiring_order() {
        use Level::{High as H, Low as L};
        assert_eq!(CLOCKWISE[0].0, [H, H, L, L]);
        assert_eq!(CLOCKWISE[1].0, [L, H, H, L]);
        assert_eq!(CLOCKWISE[2].0, [L, L, H, H]);
        assert_eq!(CLOCKWISE[3].0, [H, L, L, H]);
    }

    #[test]
    fn off_pattern() {
        assert!(PhasePattern::OFF.is_off());
        assert_eq!(PhasePattern::OFF.clockwise_index(), None);
        assert_eq!(CLOCKWISE[2].clockwise_index(), Some(2));
    }

    #[test]
    fn rotation_for_offset_sign() {
        assert_eq!(Rotation::away_for(10), Rotation::Clockwise);
        assert_eq!(Rotation::home_for(10), Rotation::CounterClockwise);
        assert_eq!(Rotation::away_for(-5), Rotation::CounterClockwise);
        assert_eq!(Rotation::home_for(-5), Rotation::Clockwise);
        assert_eq!(Rotation::away_for(0), Rotation::CounterClockwise);
        assert_eq!(Rotation::home_for(0), Rotation::Clockwise);
    }

    #[test]
    fn rotation_sequence_selects_table() {
        assert_eq!(Rotation::Clockwise.sequence(), &CLOCKWISE);
        assert_eq!(Rotation::CounterClockwise.sequence(), &COUNTER_CLOCKWISE);
        assert_eq!(Rotation::Clockwise.reversed().reversed(), Rotation::Clockwise);
    }

    #[test]
    fn step_outcome_interrupted() {
        assert!(StepOutcome::Interrupted { sub_step: 2 }.is_interrupted());
        assert!(!StepOutcome::Completed.is_interrupted());
    }
}
