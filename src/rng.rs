//! Deterministic random number generation.
//!
//! All randomness in the crate flows through the [`Rng`] trait so acquisition
//! runs are reproducible under a fixed seed. [`XorShift64`] is the default
//! implementation; an `Acquirer` owns its own instance rather than touching
//! any process-global generator state.

/// Simple random number generator trait.
pub trait Rng {
    /// Generate uniform random in [0, 1).
    fn gen_f64(&mut self) -> f64;

    /// Generate random f64 in range [low, high).
    fn gen_f64_range(&mut self, low: f64, high: f64) -> f64 {
        low + self.gen_f64() * (high - low)
    }

    /// Generate random usize in range [0, len).
    fn gen_usize(&mut self, len: usize) -> usize;

    /// Draw `count` distinct indices from `0..n` without replacement.
    ///
    /// Uses a partial Fisher-Yates shuffle; `count` is clamped to `n`.
    fn sample_indices(&mut self, n: usize, count: usize) -> Vec<usize> {
        let count = count.min(n);
        let mut pool: Vec<usize> = (0..n).collect();
        for i in 0..count {
            let j = i + self.gen_usize(n - i);
            pool.swap(i, j);
        }
        pool.truncate(count);
        pool
    }
}

/// Simple xorshift64 RNG for deterministic reproducibility.
#[derive(Debug, Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Create RNG with seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Generate next u64.
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl Rng for XorShift64 {
    fn gen_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn gen_usize(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u64() as usize) % len
    }
}
