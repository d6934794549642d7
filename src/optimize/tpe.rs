//! Tree-structured Parzen Estimator.
//!
//! After a number of random start-up trials, history is split into the best
//! `γ(n) = min(⌈0.1·n⌉, 25)` trials ("good") and the rest ("bad"). Each
//! dimension gets two Parzen estimators, `l(x)` over good points and `g(x)`
//! over bad points: mixtures of Gaussians truncated to [0, 1], one per point
//! plus a flat prior component. Candidates are drawn from `l` and the one
//! maximizing `log l(x) − log g(x)` is proposed.
//!
//! Dimensions are modelled independently.
//!
//! # References
//!
//! - Bergstra, Bardenet, Bengio & Kégl (2011). "Algorithms for Hyper-Parameter Optimization"

use super::sampler::{rng_from, Sampler};
use super::Trial;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::cmp::Ordering;

/// TPE configuration.
#[derive(Debug, Clone, Copy)]
pub struct TpeConfig {
    /// Purely random trials before the model is used.
    pub n_startup_trials: usize,
    /// Candidates drawn from `l(x)` per dimension.
    pub n_ei_candidates: usize,
    /// Upper bound on the number of good trials.
    pub max_good: usize,
    /// Fraction of trials treated as good.
    pub gamma: f64,
}

impl Default for TpeConfig {
    fn default() -> Self {
        Self {
            n_startup_trials: 10,
            n_ei_candidates: 24,
            max_good: 25,
            gamma: 0.1,
        }
    }
}

/// TPE sampler over the unit cube.
#[derive(Debug, Clone)]
pub struct TpeSampler {
    config: TpeConfig,
    rng: ChaCha8Rng,
}

impl TpeSampler {
    /// Default configuration, seeded or from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_config(TpeConfig::default(), seed)
    }

    /// Custom configuration.
    pub fn with_config(config: TpeConfig, seed: Option<u64>) -> Self {
        Self {
            config,
            rng: rng_from(seed),
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn n_good(&self, n: usize) -> usize {
        let g = (self.config.gamma * n as f64).ceil() as usize;
        g.clamp(1, self.config.max_good).min(n)
    }
}

impl Sampler for TpeSampler {
    fn sample(&mut self, history: &[Trial], dims: usize) -> Vec<f64> {
        let usable: Vec<&Trial> = history
            .iter()
            .filter(|t| t.point.len() == dims && t.value.is_finite())
            .collect();
        if usable.len() < self.config.n_startup_trials.max(2) {
            return (0..dims).map(|_| self.rng.gen_range(0.0..=1.0)).collect();
        }

        // Stable sort keeps earlier trials first among equal values.
        let mut ranked = usable;
        ranked.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
        let (good, bad) = ranked.split_at(self.n_good(ranked.len()));

        (0..dims)
            .map(|d| {
                let l = Parzen::fit(good.iter().map(|t| t.point[d]));
                let g = Parzen::fit(bad.iter().map(|t| t.point[d]));
                let mut best = (f64::NEG_INFINITY, 0.5);
                for _ in 0..self.config.n_ei_candidates {
                    let x = l.sample(&mut self.rng);
                    let score = l.log_pdf(x) - g.log_pdf(x);
                    if score > best.0 {
                        best = (score, x);
                    }
                }
                best.1
            })
            .collect()
    }
}

/// Equal-weight mixture of Gaussians truncated to [0, 1].
#[derive(Debug, Clone)]
struct Parzen {
    mus: Vec<f64>,
    sigmas: Vec<f64>,
}

impl Parzen {
    const PRIOR_MU: f64 = 0.5;
    const PRIOR_SIGMA: f64 = 1.0;

    /// One component per observation plus the prior. Each bandwidth is the
    /// larger gap to its sorted neighbours (bounds included), clipped.
    #[allow(clippy::cast_precision_loss)]
    fn fit(points: impl Iterator<Item = f64>) -> Self {
        let mut mus: Vec<f64> = points.collect();
        mus.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let n = mus.len();
        let min_sigma = 1.0 / (2.0 + n as f64).min(100.0);
        let mut sigmas: Vec<f64> = (0..n)
            .map(|i| {
                let left = if i == 0 { mus[i] } else { mus[i] - mus[i - 1] };
                let right = if i + 1 == n { 1.0 - mus[i] } else { mus[i + 1] - mus[i] };
                left.max(right).clamp(min_sigma, 1.0)
            })
            .collect();

        mus.push(Self::PRIOR_MU);
        sigmas.push(Self::PRIOR_SIGMA);
        Self { mus, sigmas }
    }

    fn sample(&self, rng: &mut ChaCha8Rng) -> f64 {
        let k = rng.gen_range(0..self.mus.len());
        let (mu, sigma) = (self.mus[k], self.sigmas[k]);
        if let Ok(normal) = Normal::new(mu, sigma) {
            for _ in 0..64 {
                let x: f64 = normal.sample(rng);
                if (0.0..=1.0).contains(&x) {
                    return x;
                }
            }
        }
        mu.clamp(0.0, 1.0)
    }

    #[allow(clippy::cast_precision_loss)]
    fn log_pdf(&self, x: f64) -> f64 {
        let density: f64 = self
            .mus
            .iter()
            .zip(&self.sigmas)
            .map(|(&mu, &sigma)| {
                let mass = normal_cdf((1.0 - mu) / sigma) - normal_cdf(-mu / sigma);
                normal_pdf((x - mu) / sigma) / (sigma * mass.max(1e-12))
            })
            .sum::<f64>()
            / self.mus.len() as f64;
        density.max(1e-300).ln()
    }
}

fn normal_pdf(z: f64) -> f64 {
    (-0.5 * z * z).exp() / (2.0 * std::f64::consts::PI).sqrt()
}

fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + libm::erf(z / std::f64::consts::SQRT_2))
}
