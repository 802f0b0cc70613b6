//! Trait definitions for hardware abstraction.
//!
//! These are the seams that let the stepping state machine run on an ESP32,
//! on any `embedded-hal` board, or on desktop against a simulated switch.
//!
//! - [`DigitalPort`]: write coil phase lines, read the home switch line
//! - [`StepDelay`]: blocking sub-step delay

/// Digital line and delay traits.
pub mod hardware;

pub use hardware::*;
