use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::domain::Pet;
use super::ids::PetId;

/// Picks the candidate an adoption request is evaluated against.
pub trait CandidateSelector {
    fn choose(&mut self, pool: &[&Pet]) -> Option<PetId>;
}

/// Uniform random choice over the candidate pool.
#[derive(Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl CandidateSelector for RandomSelector {
    fn choose(&mut self, pool: &[&Pet]) -> Option<PetId> {
        if pool.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..pool.len());
        Some(pool[index].id())
    }
}

/// Deterministic choice of the lowest identifier in the pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowestIdSelector;

impl CandidateSelector for LowestIdSelector {
    fn choose(&mut self, pool: &[&Pet]) -> Option<PetId> {
        pool.iter().map(|pet| pet.id()).min()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionStrategy {
    #[default]
    Random,
    LowestId,
}

impl SelectionStrategy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "random" => Some(Self::Random),
            "lowest_id" | "lowest-id" | "lowest" => Some(Self::LowestId),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::LowestId => "lowest_id",
        }
    }

    pub fn build(self, seed: Option<u64>) -> Box<dyn CandidateSelector> {
        match (self, seed) {
            (Self::Random, Some(seed)) => Box::new(RandomSelector::seeded(seed)),
            (Self::Random, None) => Box::new(RandomSelector::from_entropy()),
            (Self::LowestId, _) => Box::new(LowestIdSelector),
        }
    }
}
