//! Per-portfolio risk/return evaluation.
//!
//! Portfolio risk is the analytic quadratic form applied to the *sample's
//! realized* covariance matrix, not the target covariance:
//!
//! Var(R_p) = wᵀ · S · w
//!
//! so the plotted risk reflects the finite-sample draw shared by every
//! portfolio in a run.

use crate::sample::ReturnSample;
use crate::weights::{Regime, WeightVector};

/// Risk/return outcome for a single simulated portfolio.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioResult {
    weights: WeightVector,
    has_short: bool,
    mean_return: f64,
    return_std_dev: f64,
    regime: Regime,
}

impl PortfolioResult {
    /// The evaluated allocation.
    pub const fn weights(&self) -> &WeightVector {
        &self.weights
    }

    /// True iff any weight is ≤ 0.
    pub const fn has_short(&self) -> bool {
        self.has_short
    }

    /// Mean of the per-draw portfolio returns.
    pub const fn mean_return(&self) -> f64 {
        self.mean_return
    }

    /// √(wᵀ·S·w) against the sample's realized covariance; never negative.
    pub const fn return_std_dev(&self) -> f64 {
        self.return_std_dev
    }

    /// Constraint regime the allocation was generated under.
    pub const fn regime(&self) -> Regime {
        self.regime
    }
}

/// Evaluate one weight vector against a shared return sample.
///
/// Pure: neither input is mutated, and re-evaluating the same pair yields
/// an identical result. A portfolio variance that comes out negative under
/// floating-point error is clamped to zero and reported as a non-fatal
/// warning.
///
/// # Panics
/// Panics if the weight vector's length differs from the sample's asset
/// count.
pub fn evaluate(weights: &WeightVector, sample: &ReturnSample, regime: Regime) -> PortfolioResult {
    assert_eq!(
        weights.len(),
        sample.n_assets(),
        "weight vector length {} does not match sample asset count {}",
        weights.len(),
        sample.n_assets()
    );

    let w = weights.as_array();
    let per_draw = sample.returns().dot(w);
    let mean_return = per_draw.sum() / per_draw.len() as f64;

    let mut variance = w.dot(&sample.sample_covariance().dot(w));
    if variance < 0.0 {
        tracing::warn!(variance, "clamping negative portfolio variance to zero");
        variance = 0.0;
    }

    PortfolioResult {
        weights: weights.clone(),
        has_short: weights.has_short(),
        mean_return,
        return_std_dev: variance.sqrt(),
        regime,
    }
}
