use rand::SeedableRng;
use rand::rngs::StdRng;

/// A randomness source that services take by value, so tests can pin it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Entropy {
    #[default]
    Default,
    Seeded(u64),
}

impl Entropy {
    /// Returns an entropy source seeded from the operating system.
    #[must_use]
    pub fn default_entropy() -> Self {
        Self::Default
    }

    /// Returns an entropy source that replays the same sequence for `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(seed)
    }

    /// Build a fresh generator.
    ///
    /// A seeded source restarts its sequence on every call.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self {
            Entropy::Default => StdRng::from_os_rng(),
            Entropy::Seeded(seed) => StdRng::seed_from_u64(*seed),
        }
    }

    #[must_use]
    pub fn is_seeded(&self) -> bool {
        matches!(self, Entropy::Seeded(_))
    }
}

/// Seed used by tests and doc examples.
pub const FIXED_TEST_SEED: u64 = 0x5EED_CAFE;

/// Returns an `Entropy` pinned to the test seed.
#[must_use]
pub fn fixed_entropy() -> Entropy {
    Entropy::seeded(FIXED_TEST_SEED)
}
