// rng.rs -- xorshift64 generator for sampling and random colors.
//
// Deterministic for a given seed, which keeps RANSAC runs reproducible.

/// xorshift64 pseudo random generator.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// A zero seed is remapped to 1 (xorshift never leaves zero).
    pub fn new(seed: u64) -> Self {
        Rng { state: seed.max(1) }
    }

    /// Seed from the system clock.
    pub fn from_time() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9E37_79B9_7F4A_7C15);
        Rng::new(nanos)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Index in [0, n). `n` must be non-zero.
    pub fn next_usize(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    /// Uniform in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// `k` distinct indices from [0, n). Returns fewer when k > n.
    pub fn sample_distinct(&mut self, n: usize, k: usize) -> Vec<usize> {
        let k = k.min(n);
        let mut sample = Vec::with_capacity(k);
        while sample.len() < k {
            let idx = self.next_usize(n);
            // k is a minimal sample size, a linear scan is fine.
            if !sample.contains(&idx) {
                sample.push(idx);
            }
        }
        sample
    }
}
