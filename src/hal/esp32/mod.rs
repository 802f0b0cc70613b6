//! ESP32-C3 SuperMini hardware abstraction layer for a two-position stepper.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-C3 SuperMini (RISC-V 160MHz, 4MB Flash)
//! - **Motor Driver**: ULN2003 darlington array (28BYJ-48 class motor)
//! - **Home Sensor**: microswitch or slotted opto interrupter
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments matching the SuperMini layout.

mod port;

pub use port::Esp32Port;

/// Pin assignments for SuperMini ESP32-C3.
pub mod pins {
    use crate::traits::LineId;

    // =========================================================================
    // Coil Phases (ULN2003 IN1-IN4)
    // =========================================================================

    /// Phase A (IN1)
    pub const IN1: LineId = 2;

    /// Phase B (IN2)
    pub const IN2: LineId = 3;

    /// Phase C (IN3)
    pub const IN3: LineId = 4;

    /// Phase D (IN4)
    pub const IN4: LineId = 5;

    /// All phases in drive-table order
    pub const PHASES: [LineId; 4] = [IN1, IN2, IN3, IN4];

    // =========================================================================
    // Home Sensor
    // =========================================================================

    /// Home limit switch input
    pub const HOME: LineId = 10;
}
