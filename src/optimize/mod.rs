//! Black-box search for scoring parameters.
//!
//! Each trial asks a [`Sampler`] for a point of the unit cube, maps it to a
//! [`ParameterVector`], scores the graph, and evaluates the selected
//! distribution against the key / non-key labels. Trials are sequential: the
//! sampler sees the full history before every proposal. The best trial is the
//! first one reaching the maximum value.
//!
//! Motif enumeration runs once per optimization; every trial reuses the same
//! [`MotifProfile`](crate::scoring::MotifProfile).
//!
//! ```no_run
//! use motifrank::optimize::{OptimizerConfig, ParameterOptimizer};
//! use motifrank::{BaseScores, Graph};
//!
//! let g = Graph::from_edges([("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")]);
//! let config = OptimizerConfig { n_trials: 20, seed: Some(7), ..Default::default() };
//! let outcome = ParameterOptimizer::new(config)
//!     .optimize(&g, &BaseScores::default(), &["c"], None)
//!     .unwrap();
//! println!("{} -> {:.3}", outcome.best_params, outcome.best_value);
//! ```

mod sampler;
mod tpe;

pub use sampler::{RandomSampler, Sampler, SamplerKind};
pub use tpe::{TpeConfig, TpeSampler};

use crate::error::Result;
use crate::evaluate::{Labels, Metric};
use crate::params::ParameterVector;
use crate::scoring::{BaseScores, CentralityScorer, RankType};
use crate::Graph;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Optimizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Number of trials.
    pub n_trials: usize,
    /// Objective metric.
    pub metric: Metric,
    /// F1 threshold; `None` sweeps every observed score.
    pub threshold: Option<f64>,
    /// Which distribution is evaluated.
    pub rank_type: RankType,
    /// Clique size bound; `None` detects the largest clique once.
    pub max_clique: Option<usize>,
    /// Sampler seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Proposal strategy.
    pub sampler: SamplerKind,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            n_trials: 50,
            metric: Metric::Ap,
            threshold: None,
            rank_type: RankType::Csr,
            max_clique: None,
            seed: None,
            sampler: SamplerKind::Tpe,
        }
    }
}

/// One evaluated parameter vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    /// 0-based trial number.
    pub number: usize,
    /// Unit-cube coordinates proposed by the sampler.
    pub point: Vec<f64>,
    /// Parameters the point maps to.
    pub params: ParameterVector,
    /// Objective value.
    pub value: f64,
}

/// Result of an optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    /// Parameters of the best trial.
    pub best_params: ParameterVector,
    /// Objective value of the best trial.
    pub best_value: f64,
    /// Number of the best trial.
    pub best_trial: usize,
    /// Every trial, in order.
    pub trials: Vec<Trial>,
}

/// Sequential parameter search.
pub struct ParameterOptimizer {
    config: OptimizerConfig,
    sampler: Box<dyn Sampler>,
}

impl ParameterOptimizer {
    /// Build with the sampler named in `config`.
    pub fn new(config: OptimizerConfig) -> Self {
        let sampler = config.sampler.build(config.seed);
        Self { config, sampler }
    }

    /// Build with a caller-supplied sampler; `config.sampler` and `config.seed` are ignored.
    pub fn with_sampler(config: OptimizerConfig, sampler: Box<dyn Sampler>) -> Self {
        Self { config, sampler }
    }

    /// Settings in use.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Run the search.
    ///
    /// `non_key_nodes` defaults to every graph node not in `key_nodes`. With
    /// `n_trials = 0` the default parameters are scored once and reported as
    /// trial 0.
    ///
    /// # Errors
    ///
    /// Propagates base-score resolution errors (`Error::MissingScore`).
    pub fn optimize<S: AsRef<str>>(
        &mut self,
        graph: &Graph,
        base: &BaseScores,
        key_nodes: &[S],
        non_key_nodes: Option<&[S]>,
    ) -> Result<OptimizationOutcome> {
        let scorer = CentralityScorer::new(graph, base, self.config.max_clique)?;
        let max_clique = scorer.max_clique();
        let labels = Labels::from_graph(graph, key_nodes, non_key_nodes);
        let dims = ParameterVector::dimensions(max_clique);

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            max_clique,
            motifs = scorer.profile().motifs().len(),
            key = labels.key().len(),
            non_key = labels.non_key().len(),
            trials = self.config.n_trials,
            metric = %self.config.metric,
            rank_type = %self.config.rank_type,
            "starting parameter search"
        );

        let objective = |params: &ParameterVector| {
            let scores = scorer.score_rank(params, self.config.rank_type);
            labels.evaluate(&scores, self.config.metric, self.config.threshold)
        };

        let mut trials: Vec<Trial> = Vec::with_capacity(self.config.n_trials);
        for number in 0..self.config.n_trials {
            let point = self.sampler.sample(&trials, dims);
            let params = ParameterVector::from_point(&point, max_clique)?;
            let value = objective(&params);
            debug!(trial = number, value, params = %params, "trial finished");
            trials.push(Trial {
                number,
                point,
                params,
                value,
            });
        }

        if trials.is_empty() {
            let params = ParameterVector::uniform(max_clique);
            let value = objective(&params);
            trials.push(Trial {
                number: 0,
                point: params.to_point(max_clique),
                params,
                value,
            });
        }

        let mut best = 0;
        for (i, t) in trials.iter().enumerate() {
            if t.value > trials[best].value {
                best = i;
            }
        }
        let best_trial = &trials[best];

        info!(
            best_trial = best_trial.number,
            best_value = best_trial.value,
            best_params = %best_trial.params,
            "parameter search finished"
        );

        Ok(OptimizationOutcome {
            best_params: best_trial.params.clone(),
            best_value: best_trial.value,
            best_trial: best_trial.number,
            trials,
        })
    }
}
