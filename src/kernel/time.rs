use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Logical clock frame. All simulated delays are expressed in ticks so the
/// stores can be fast-forwarded without touching the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Tick {
    pub frame: u64,
}

pub const TICK_MS: u64 = 100;

impl Tick {
    pub fn new() -> Self {
        Tick { frame: 0 }
    }

    pub fn next(&self) -> Self {
        Tick { frame: self.frame + 1 }
    }

    /// Tick reached once `delay` has elapsed from `self`.
    pub fn after(&self, delay: Duration) -> Self {
        Tick { frame: self.frame + ticks_for(delay) }
    }

    pub fn elapsed_since(&self, earlier: Tick) -> u64 {
        self.frame.saturating_sub(earlier.frame)
    }
}

/// Whole ticks covering `delay`. A non-zero delay never rounds down to zero.
pub fn ticks_for(delay: Duration) -> u64 {
    let ms = delay.as_millis() as u64;
    ms.div_ceil(TICK_MS)
}
