//! Simulation orchestration across both constraint regimes.
//!
//! One run draws a single return sample, generates `weight_count` random
//! allocations per regime, evaluates every allocation against the shared
//! sample, and concatenates the rows in a fixed order: all shorts-allowed
//! portfolios first, then all long-only portfolios, each in generation
//! order. The shared sample is what makes the two regimes comparable;
//! regenerating returns per regime would be a behavioral change, not a
//! refactor.

use crate::evaluate::{self, PortfolioResult};
use crate::params::DistributionParameters;
use crate::sample::{self, SampleError};
use crate::weights::{self, Regime, WeightError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by a simulation run.
///
/// Upstream failures propagate unmodified; the runner adds no failure
/// modes of its own, and a failed run yields no partial dataset.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Return sampling failed.
    #[error("sampling error: {0}")]
    Sample(#[from] SampleError),

    /// Weight generation failed.
    #[error("weight generation error: {0}")]
    Weight(#[from] WeightError),
}

/// Configuration for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of return vectors in the shared sample.
    pub sample_size: usize,

    /// Number of weight vectors generated per regime.
    pub weight_count: usize,

    /// Seed for the return sampler.
    pub sample_seed: u64,

    /// Seed for the shorts-allowed weight stream.
    pub shorts_seed: u64,

    /// Seed for the long-only weight stream.
    pub long_only_seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sample_size: 700,
            weight_count: 700,
            sample_seed: 1111,
            shorts_seed: 9999,
            long_only_seed: 9999,
        }
    }
}

/// The immutable output of a run: one row per simulated portfolio.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultDataset {
    results: Vec<PortfolioResult>,
}

impl ResultDataset {
    /// Total number of rows across both regimes.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// All rows in concatenation order.
    pub fn results(&self) -> &[PortfolioResult] {
        &self.results
    }

    /// Iterate over all rows in concatenation order.
    pub fn iter(&self) -> std::slice::Iter<'_, PortfolioResult> {
        self.results.iter()
    }

    /// Rows belonging to one regime, in generation order.
    pub fn by_regime(&self, regime: Regime) -> impl Iterator<Item = &PortfolioResult> + '_ {
        self.results.iter().filter(move |r| r.regime() == regime)
    }
}

impl<'a> IntoIterator for &'a ResultDataset {
    type Item = &'a PortfolioResult;
    type IntoIter = std::slice::Iter<'a, PortfolioResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// Run the full simulation and assemble the opportunity-set dataset.
///
/// Bit-for-bit reproducible for identical `(params, config)`: the sampler
/// and each weight stream own an explicitly seeded generator, and the
/// evaluation order is fixed.
///
/// # Errors
/// Propagates [`SampleError`] and [`WeightError`] from the components
/// unmodified.
pub fn run(
    params: &DistributionParameters,
    config: &SimulationConfig,
) -> Result<ResultDataset, SimulationError> {
    let n_assets = params.n_assets();

    let sample = sample::sample(params, config.sample_size, config.sample_seed)?;
    tracing::debug!(
        sample_size = config.sample_size,
        n_assets,
        "return sample drawn"
    );

    let shorts = weights::generate(
        config.weight_count,
        n_assets,
        Regime::ShortsAllowed,
        config.shorts_seed,
    )?;
    let long_only = weights::generate(
        config.weight_count,
        n_assets,
        Regime::LongOnly,
        config.long_only_seed,
    )?;

    let mut results = Vec::with_capacity(shorts.len() + long_only.len());
    for w in &shorts {
        results.push(evaluate::evaluate(w, &sample, Regime::ShortsAllowed));
    }
    for w in &long_only {
        results.push(evaluate::evaluate(w, &sample, Regime::LongOnly));
    }
    tracing::debug!(rows = results.len(), "simulation complete");

    Ok(ResultDataset { results })
}
