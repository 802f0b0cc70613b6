//! Driver configuration for desktop and ESP32.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use two_position_stepper::config::{SensorPolarity, SpeedPreset, StepperConfig};
//!
//! // Use defaults
//! let config = StepperConfig::default();
//!
//! // Or customize
//! let config = StepperConfig::new([25, 26, 27, 14], 12, -400)
//!     .with_speed(SpeedPreset::Fast)
//!     .with_polarity(SensorPolarity::ActiveHigh);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::ConfigError;
use crate::traits::{Level, LineId};
use heapless::String as HString;

/// Maximum length for short strings (host command text)
pub const MAX_SHORT_STRING: usize = 64;

/// Type alias for short strings
pub type ShortString = HString<MAX_SHORT_STRING>;

// ============================================================================
// Helper for creating heapless strings
// ============================================================================

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    // Last char boundary that still fits
    let valid_end = s
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|end| *end <= MAX_SHORT_STRING)
        .last()
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Sensor Polarity
// ============================================================================

/// Which logic level on the home line means "switch tripped".
///
/// Depends on how the limit switch is wired (pull-up to a normally-open
/// switch reads low when pressed; an optical interrupter module usually
/// drives high).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SensorPolarity {
    /// Low level reads as triggered.
    #[default]
    ActiveLow,
    /// High level reads as triggered.
    ActiveHigh,
}

impl SensorPolarity {
    /// Interpret a raw line level.
    #[inline]
    pub const fn is_triggered(self, level: Level) -> bool {
        match self {
            SensorPolarity::ActiveLow => level.is_low(),
            SensorPolarity::ActiveHigh => level.is_high(),
        }
    }

    /// Parse `"low"`/`"active_low"` or `"high"`/`"active_high"`.
    pub fn from_text(s: &str) -> Option<Self> {
        let s = s.trim();
        if ["low", "active_low", "active-low"].iter().any(|n| s.eq_ignore_ascii_case(n)) {
            Some(SensorPolarity::ActiveLow)
        } else if ["high", "active_high", "active-high"].iter().any(|n| s.eq_ignore_ascii_case(n)) {
            Some(SensorPolarity::ActiveHigh)
        } else {
            None
        }
    }
}

// ============================================================================
// Speed Presets
// ============================================================================

/// Common sub-step delays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SpeedPreset {
    /// 25 ms per sub-step.
    Slow,
    /// 8 ms per sub-step.
    Normal,
    /// 2 ms per sub-step.
    Fast,
}

impl SpeedPreset {
    /// Sub-step delay in microseconds.
    pub const fn delay_us(self) -> u32 {
        match self {
            SpeedPreset::Slow => 25_000,
            SpeedPreset::Normal => 8_000,
            SpeedPreset::Fast => 2_000,
        }
    }
}

// ============================================================================
// Stepper Config
// ============================================================================

/// Wiring and motion parameters for one [`StepperDriver`](crate::StepperDriver).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepperConfig {
    /// Coil phase output lines, in drive-table order
    pub phase_pins: [LineId; 4],
    /// Home limit switch input line
    pub home_pin: LineId,
    /// Signed step count from home to away (sign = direction)
    pub away_offset: i32,
    /// Delay between phase sub-steps in microseconds
    pub step_delay_us: u32,
    /// Keep coils energized while parked at home (stored, reported)
    pub hold_at_home: bool,
    /// Which level on `home_pin` means triggered
    pub polarity: SensorPolarity,
    /// Give up homing after this many step cycles (`None` = never)
    pub homing_step_limit: Option<u32>,
    /// Step cycles to back off the switch after homing (0 = stay on it)
    pub home_backoff_steps: u32,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            phase_pins: [0, 1, 2, 3],
            home_pin: 4,
            away_offset: 200,
            step_delay_us: SpeedPreset::Normal.delay_us(),
            hold_at_home: false,
            polarity: SensorPolarity::default(),
            homing_step_limit: None,
            home_backoff_steps: 0,
        }
    }
}

impl StepperConfig {
    /// Create a configuration for the given wiring and away offset
    pub fn new(phase_pins: [LineId; 4], home_pin: LineId, away_offset: i32) -> Self {
        Self {
            phase_pins,
            home_pin,
            away_offset,
            ..Default::default()
        }
    }

    /// Set the away offset
    pub fn with_away_offset(mut self, offset: i32) -> Self {
        self.away_offset = offset;
        self
    }

    /// Set the sub-step delay
    pub fn with_step_delay_us(mut self, us: u32) -> Self {
        self.step_delay_us = us;
        self
    }

    /// Set the sub-step delay from a preset
    pub fn with_speed(mut self, preset: SpeedPreset) -> Self {
        self.step_delay_us = preset.delay_us();
        self
    }

    /// Set the hold-at-home flag
    pub fn with_hold_at_home(mut self, hold: bool) -> Self {
        self.hold_at_home = hold;
        self
    }

    /// Set the home switch polarity
    pub fn with_polarity(mut self, polarity: SensorPolarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Cap the homing search
    pub fn with_homing_step_limit(mut self, limit: u32) -> Self {
        self.homing_step_limit = Some(limit);
        self
    }

    /// Set the post-homing backoff
    pub fn with_home_backoff_steps(mut self, steps: u32) -> Self {
        self.home_backoff_steps = steps;
        self
    }

    /// Check the values the hardware cannot check for us.
    ///
    /// [`StepperDriver::new`](crate::StepperDriver::new) does not call this;
    /// use [`StepperDriver::new_checked`](crate::StepperDriver::new_checked)
    /// to reject a bad configuration up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.away_offset == 0 {
            return Err(ConfigError::ZeroOffset);
        }
        if self.step_delay_us == 0 {
            return Err(ConfigError::ZeroStepDelay);
        }
        let lines = [
            self.phase_pins[0],
            self.phase_pins[1],
            self.phase_pins[2],
            self.phase_pins[3],
            self.home_pin,
        ];
        for (i, line) in lines.iter().enumerate() {
            if lines[i + 1..].contains(line) {
                return Err(ConfigError::DuplicatePin(*line));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
