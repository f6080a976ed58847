use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::catalog::Catalog;
use super::data::{ImageKey, Round, Tile, TILE_COUNT};

/// Environment variable holding a fixed seed for reproducible rounds
pub const SEED_ENV: &str = "TILE_CHECK_SEED";

/// Source of uniform random draws for round generation.
///
/// Production code uses [`SystemRandom`]; tests substitute a scripted
/// sequence to pin the duplicate and the permutation.
pub trait RandomSource {
    /// Uniform integer in `0..bound`. `bound` is always at least 1.
    fn below(&mut self, bound: usize) -> usize;
}

/// OS-seeded small PRNG
#[derive(Debug, Clone)]
pub struct SystemRandom(SmallRng);

impl SystemRandom {
    pub fn new() -> Self {
        Self(SmallRng::from_os_rng())
    }

    /// Deterministic generator, for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    /// Seeded from `$TILE_CHECK_SEED` when it holds a number, OS-seeded otherwise
    pub fn from_env() -> Self {
        match std::env::var(SEED_ENV).ok().and_then(|s| s.trim().parse().ok()) {
            Some(seed) => {
                tracing::info!(seed, "using fixed round seed");
                Self::seeded(seed)
            }
            None => Self::new(),
        }
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SystemRandom {
    fn below(&mut self, bound: usize) -> usize {
        self.0.random_range(0..bound)
    }
}

/// Build a fresh round: one tile per catalog key, plus a second copy of a
/// randomly chosen key, in uniformly random order.
///
/// Draws one value for the duplicate, then runs Fisher-Yates from the last
/// position down.
pub fn generate_round(catalog: &Catalog, random: &mut dyn RandomSource) -> Round {
    let duplicate = ImageKey::ALL[random.below(ImageKey::ALL.len())];

    let mut tiles: [Tile; TILE_COUNT] = std::array::from_fn(|i| {
        let key = ImageKey::ALL.get(i).copied().unwrap_or(duplicate);
        Tile {
            key,
            uri: catalog.uri(key).to_string(),
        }
    });

    shuffle(&mut tiles, random);

    tracing::debug!(duplicate = %duplicate, "generated round");
    Round::new(tiles)
}

/// In-place Fisher-Yates; every permutation is equally likely
fn shuffle<T>(items: &mut [T], random: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = random.below(i + 1);
        items.swap(i, j);
    }
}
