//! Proposal strategies for the parameter search.

use super::tpe::TpeSampler;
use super::Trial;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Proposes the next point of `[0, 1]^dims` given the trials so far.
///
/// Implementations should bias proposals toward regions where `history`
/// recorded high objective values.
pub trait Sampler {
    /// Next point to evaluate. Every coordinate must lie in [0, 1].
    fn sample(&mut self, history: &[Trial], dims: usize) -> Vec<f64>;
}

/// Independent uniform sampling. Ignores history.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    rng: ChaCha8Rng,
}

impl RandomSampler {
    /// Seeded for reproducibility, or from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        Self { rng: rng_from(seed) }
    }
}

impl Sampler for RandomSampler {
    fn sample(&mut self, _history: &[Trial], dims: usize) -> Vec<f64> {
        (0..dims).map(|_| self.rng.gen_range(0.0..=1.0)).collect()
    }
}

/// Named sampler choice for configs and the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplerKind {
    /// [`RandomSampler`].
    Random,
    /// [`TpeSampler`].
    #[default]
    Tpe,
}

impl SamplerKind {
    /// Instantiate the sampler.
    pub fn build(self, seed: Option<u64>) -> Box<dyn Sampler> {
        match self {
            Self::Random => Box::new(RandomSampler::new(seed)),
            Self::Tpe => Box::new(TpeSampler::new(seed)),
        }
    }
}

impl fmt::Display for SamplerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Random => "random",
            Self::Tpe => "tpe",
        })
    }
}

impl FromStr for SamplerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "tpe" => Ok(Self::Tpe),
            _ => Err(Error::InvalidParameter(format!("unknown sampler '{s}'"))),
        }
    }
}

pub(crate) fn rng_from(seed: Option<u64>) -> ChaCha8Rng {
    seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64)
}
