//! Multivariate-normal return sampling.
//!
//! Draws a fixed number of N-dimensional return vectors from the
//! distribution described by [`DistributionParameters`], by applying the
//! Cholesky factor of the covariance matrix to independent standard-normal
//! draws: r = μ + L·z. The sample also carries its *realized* covariance
//! matrix, which downstream evaluation uses instead of the target
//! covariance so that reported risk reflects the finite draw actually used.

use crate::linalg::{self, LinalgError};
use crate::params::DistributionParameters;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use thiserror::Error;

/// Errors raised while drawing a return sample.
#[derive(Debug, Error)]
pub enum SampleError {
    /// The covariance matrix has no Cholesky factor.
    ///
    /// Unreachable for parameters that passed validation.
    #[error("covariance matrix is not decomposable: {0}")]
    NotDecomposable(#[from] LinalgError),

    /// A sample must contain at least one draw.
    #[error("sample size must be at least 1")]
    EmptySample,
}

/// A fixed set of simulated return vectors, drawn once per run.
///
/// Immutable after creation; every portfolio in a run is evaluated against
/// the same sample for comparability.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSample {
    returns: Array2<f64>,
    sample_covariance: Array2<f64>,
}

impl ReturnSample {
    /// Number of draws (rows).
    pub fn sample_size(&self) -> usize {
        self.returns.nrows()
    }

    /// Number of assets (columns).
    pub fn n_assets(&self) -> usize {
        self.returns.ncols()
    }

    /// The sample_size × N matrix of simulated returns.
    pub const fn returns(&self) -> &Array2<f64> {
        &self.returns
    }

    /// Covariance of the realized rows (unbiased, n−1 denominator).
    ///
    /// A single-row sample yields the zero matrix.
    pub const fn sample_covariance(&self) -> &Array2<f64> {
        &self.sample_covariance
    }
}

/// Draw `sample_size` return vectors from the parameterized distribution.
///
/// Exactly reproducible for fixed `(params, sample_size, seed)`: the
/// generator is a [`StdRng`] seeded from `seed`, and draw order is fixed
/// (row by row, assets in vector order). The input parameters are not
/// mutated.
///
/// # Errors
/// Returns [`SampleError::NotDecomposable`] if the covariance matrix has no
/// Cholesky factor, and [`SampleError::EmptySample`] for `sample_size == 0`.
pub fn sample(
    params: &DistributionParameters,
    sample_size: usize,
    seed: u64,
) -> Result<ReturnSample, SampleError> {
    if sample_size == 0 {
        return Err(SampleError::EmptySample);
    }

    let n = params.n_assets();
    let factor = linalg::cholesky(params.covariance())?;
    let means = params.means();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut returns = Array2::<f64>::zeros((sample_size, n));
    let mut z = vec![0.0; n];
    for mut row in returns.rows_mut() {
        for value in z.iter_mut() {
            *value = rng.sample(StandardNormal);
        }
        for i in 0..n {
            let mut correlated = 0.0;
            for j in 0..=i {
                correlated += factor[[i, j]] * z[j];
            }
            row[i] = means[i] + correlated;
        }
    }

    let sample_covariance = realized_covariance(&returns);

    Ok(ReturnSample {
        returns,
        sample_covariance,
    })
}

/// Unbiased covariance of the realized rows.
fn realized_covariance(returns: &Array2<f64>) -> Array2<f64> {
    let (rows, cols) = returns.dim();
    let mut covariance = Array2::<f64>::zeros((cols, cols));
    if rows < 2 {
        return covariance;
    }

    let mut means = vec![0.0; cols];
    for r in 0..rows {
        for c in 0..cols {
            means[c] += returns[[r, c]];
        }
    }
    for mean in means.iter_mut() {
        *mean /= rows as f64;
    }

    let denominator = (rows - 1) as f64;
    for i in 0..cols {
        for j in i..cols {
            let mut acc = 0.0;
            for r in 0..rows {
                acc += (returns[[r, i]] - means[i]) * (returns[[r, j]] - means[j]);
            }
            let value = acc / denominator;
            covariance[[i, j]] = value;
            covariance[[j, i]] = value;
        }
    }

    covariance
}
