use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Source of the cosmetic randomness used by demo mode (interval length,
/// metric increments). Injected so tests can pin it.
pub trait Jitter: Send {
    /// Next value in `[0.0, 1.0)`.
    fn next_unit(&mut self) -> f64;

    /// Integer in `[low, high)`. Returns `low` for an empty range.
    fn next_in(&mut self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }
        let span = (high - low) as f64;
        low + ((self.next_unit() * span) as u64).min(high - low - 1)
    }
}

/// Hash-mixed counter. Not cryptographic, only needs to look uneven.
#[derive(Debug, Clone)]
pub struct HashJitter {
    seed: u64,
    counter: u64,
}

impl HashJitter {
    pub fn new(seed: u64) -> Self {
        Self { seed, counter: 0 }
    }

    /// Seeded from the current time.
    pub fn from_clock() -> Self {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        Self::new(nanos as u64)
    }
}

impl Jitter for HashJitter {
    fn next_unit(&mut self) -> f64 {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        self.counter.hash(&mut hasher);
        self.counter += 1;
        // 53 bits of mantissa
        (hasher.finish() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Always yields the same value. Clamped into `[0.0, 1.0)`.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl Jitter for FixedJitter {
    fn next_unit(&mut self) -> f64 {
        self.0.clamp(0.0, 0.999_999)
    }
}
