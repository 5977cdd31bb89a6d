//! Small deterministic PRNG for animations

const DEFAULT_SEED: u32 = 0x2F6B_9A31;

/// Linear congruential generator
///
/// Low bits of an LCG cycle with a short period, so results are taken from
/// the upper half of the state.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u32,
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Rng {
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        self.state
    }

    /// Uniform-ish value in `0..max`; zero when `max` is zero
    pub fn range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u32() >> 16) % max
    }

    pub fn coin_flip(&mut self) -> bool {
        self.range(2) == 0
    }
}
