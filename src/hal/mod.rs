//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits
//! defined in [`crate::traits`] for various platforms.
//!
//! # Available Implementations
//!
//! - `mock`: Test implementations with a simulated axis and home switch
//! - `std_delay`: Thread-sleep delay for desktop (requires `std` feature)
//! - `embedded`: Adapters over `embedded-hal` 1.0 pins and delays (requires `embedded-hal` feature)
//! - `esp32`: ESP32 GPIO port (requires `esp32` feature)

pub mod mock;

#[cfg(feature = "std")]
pub mod std_delay;

#[cfg(feature = "embedded-hal")]
pub mod embedded;

#[cfg(feature = "esp32")]
pub mod esp32;

pub use mock::*;

#[cfg(feature = "std")]
pub use std_delay::StdDelay;

#[cfg(feature = "embedded-hal")]
pub use embedded::{HalDelay, HalPort, HalPortError};

#[cfg(feature = "esp32")]
pub use esp32::*;
