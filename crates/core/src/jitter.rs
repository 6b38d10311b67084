use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Randomness seam for the default provider. Repeated quotes should not come
/// out byte-identical, but tests need the variation pinned, so every consumer
/// takes a `Jitter` instead of reaching for an ambient RNG.
pub trait Jitter: Send {
    /// Uniform value in `[lo, hi]`.
    fn factor(&mut self, lo: f64, hi: f64) -> f64;
    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool;
}

/// Production jitter backed by a seedable `StdRng`.
pub struct StdJitter {
    rng: StdRng,
}

impl StdJitter {
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Jitter for StdJitter {
    fn factor(&mut self, lo: f64, hi: f64) -> f64 {
        self.rng.gen_range(lo..=hi)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }
}

/// Jitter pinned to fixed outcomes. `factor` returns the pinned value clamped
/// into the requested range; `chance` always answers `include_optional`.
pub struct PinnedJitter {
    pub factor: f64,
    pub include_optional: bool,
}

impl PinnedJitter {
    pub fn neutral() -> Self {
        Self { factor: 1.0, include_optional: false }
    }
}

impl Jitter for PinnedJitter {
    fn factor(&mut self, lo: f64, hi: f64) -> f64 {
        self.factor.clamp(lo, hi)
    }

    fn chance(&mut self, _p: f64) -> bool {
        self.include_optional
    }
}
