//! Desktop delay backed by `std::thread::sleep`.

use crate::traits::StepDelay;
use std::time::Duration;

/// Sub-step delay that sleeps the calling thread.
///
/// Sleep granularity on a desktop OS is far coarser than a microsecond, so
/// this is only suitable for slow speeds or simulation.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl StdDelay {
    /// Creates a new sleeping delay.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl StepDelay for StdDelay {
    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(u64::from(us)));
    }
}
