//! Distribution parameters for the return-generating process.
//!
//! Holds the mean vector μ, standard-deviation vector σ, and correlation
//! matrix C supplied by the caller, and derives the covariance matrix
//! Σ = diag(σ)·C·diag(σ) at construction. Validation rejects anything that
//! would make Σ unusable downstream, so later stages can assume a
//! well-formed, decomposable covariance.

use crate::linalg::{self, LinalgError};
use ndarray::{Array1, Array2};
use thiserror::Error;

/// Tolerance for symmetry and unit-diagonal checks.
const VALIDATION_TOLERANCE: f64 = 1e-10;

/// Errors raised while validating distribution parameters.
#[derive(Debug, Error)]
pub enum ParameterError {
    /// Parameter vectors are empty.
    #[error("parameter vectors are empty")]
    Empty,

    /// Mean and standard-deviation vectors disagree in length.
    #[error("dimension mismatch: {means} means vs {std_devs} standard deviations")]
    DimensionMismatch {
        /// Length of the mean vector
        means: usize,
        /// Length of the standard-deviation vector
        std_devs: usize,
    },

    /// A standard deviation is zero, negative, or non-finite.
    #[error("standard deviation for asset {index} is {value}, must be > 0")]
    NonPositiveStdDev {
        /// Asset index
        index: usize,
        /// Offending value
        value: f64,
    },

    /// The correlation matrix has the wrong shape.
    #[error("correlation matrix is {rows}x{cols}, expected {expected}x{expected}")]
    CorrelationShape {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
        /// Expected dimension
        expected: usize,
    },

    /// The correlation matrix is not symmetric.
    #[error("correlation matrix is not symmetric at ({i}, {j})")]
    NotSymmetric {
        /// Row index
        i: usize,
        /// Column index
        j: usize,
    },

    /// A diagonal element of the correlation matrix differs from 1.
    #[error("correlation diagonal at index {index} is {value}, expected 1")]
    InvalidDiagonal {
        /// Diagonal index
        index: usize,
        /// Offending value
        value: f64,
    },

    /// An off-diagonal correlation lies outside [-1, 1].
    #[error("correlation at ({i}, {j}) is {value}, must be in [-1, 1]")]
    OutOfRange {
        /// Row index
        i: usize,
        /// Column index
        j: usize,
        /// Offending value
        value: f64,
    },

    /// The derived covariance matrix has no Cholesky factor.
    #[error("covariance matrix is not positive semi-definite: {0}")]
    NotPositiveSemiDefinite(#[from] LinalgError),
}

/// Validated parameters of an N-asset multivariate-normal return model.
///
/// The covariance matrix is derived once at construction and guaranteed to
/// be symmetric and Cholesky-decomposable.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionParameters {
    means: Array1<f64>,
    std_devs: Array1<f64>,
    correlation: Array2<f64>,
    covariance: Array2<f64>,
}

impl DistributionParameters {
    /// Construct and validate distribution parameters.
    ///
    /// # Arguments
    /// * `means` - Expected returns, one per asset
    /// * `std_devs` - Return standard deviations, all strictly positive
    /// * `correlation` - Symmetric correlation matrix with unit diagonal
    ///
    /// # Errors
    /// Returns a [`ParameterError`] describing the first violated
    /// requirement: dimension mismatch, non-positive standard deviation,
    /// malformed correlation matrix, or a covariance that fails the
    /// Cholesky decomposability check.
    pub fn new(
        means: Array1<f64>,
        std_devs: Array1<f64>,
        correlation: Array2<f64>,
    ) -> Result<Self, ParameterError> {
        let n = means.len();
        if n == 0 {
            return Err(ParameterError::Empty);
        }
        if std_devs.len() != n {
            return Err(ParameterError::DimensionMismatch {
                means: n,
                std_devs: std_devs.len(),
            });
        }

        for (index, &value) in std_devs.iter().enumerate() {
            if value <= 0.0 || !value.is_finite() {
                return Err(ParameterError::NonPositiveStdDev { index, value });
            }
        }

        if correlation.nrows() != n || correlation.ncols() != n {
            return Err(ParameterError::CorrelationShape {
                rows: correlation.nrows(),
                cols: correlation.ncols(),
                expected: n,
            });
        }

        for i in 0..n {
            let diagonal = correlation[[i, i]];
            if (diagonal - 1.0).abs() > VALIDATION_TOLERANCE {
                return Err(ParameterError::InvalidDiagonal {
                    index: i,
                    value: diagonal,
                });
            }
            for j in (i + 1)..n {
                let upper = correlation[[i, j]];
                let lower = correlation[[j, i]];
                if (upper - lower).abs() > VALIDATION_TOLERANCE {
                    return Err(ParameterError::NotSymmetric { i, j });
                }
                if !(-1.0..=1.0).contains(&upper) {
                    return Err(ParameterError::OutOfRange {
                        i,
                        j,
                        value: upper,
                    });
                }
            }
        }

        // Σ = diag(σ) · C · diag(σ)
        let mut covariance = Array2::<f64>::zeros((n, n));
        for i in 0..n {
            for j in 0..n {
                covariance[[i, j]] = std_devs[i] * std_devs[j] * correlation[[i, j]];
            }
        }

        // Decomposability stands in for the positive semi-definite check;
        // the sampler relies on this factor existing.
        linalg::cholesky(&covariance)?;

        Ok(Self {
            means,
            std_devs,
            correlation,
            covariance,
        })
    }

    /// Number of assets N.
    pub fn n_assets(&self) -> usize {
        self.means.len()
    }

    /// Mean-return vector.
    pub const fn means(&self) -> &Array1<f64> {
        &self.means
    }

    /// Standard-deviation vector.
    pub const fn std_devs(&self) -> &Array1<f64> {
        &self.std_devs
    }

    /// Correlation matrix.
    pub const fn correlation(&self) -> &Array2<f64> {
        &self.correlation
    }

    /// Derived covariance matrix Σ = diag(σ)·C·diag(σ).
    pub const fn covariance(&self) -> &Array2<f64> {
        &self.covariance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rstest::rstest;

    fn reference() -> DistributionParameters {
        DistributionParameters::new(
            array![0.02, 0.07, 0.15, 0.20],
            array![0.05, 0.12, 0.17, 0.25],
            array![
                [1.00, 0.62, 0.58, 0.47],
                [0.62, 1.00, 0.54, 0.46],
                [0.58, 0.54, 1.00, 0.52],
                [0.47, 0.46, 0.52, 1.00],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_covariance_diagonal_is_variance() {
        let params = reference();
        // 0.05 * 0.05 * 1 exactly
        assert_eq!(params.covariance()[[0, 0]], 0.0025);
        assert_eq!(params.covariance()[[3, 3]], 0.25 * 0.25);
    }

    #[test]
    fn test_covariance_off_diagonal() {
        let params = reference();
        assert_abs_diff_eq!(
            params.covariance()[[0, 1]],
            0.05 * 0.12 * 0.62,
            epsilon = 1e-15
        );
        assert_eq!(params.covariance()[[0, 1]], params.covariance()[[1, 0]]);
    }

    #[test]
    fn test_zero_std_dev_rejected() {
        let result = DistributionParameters::new(
            array![0.10, 0.10],
            array![0.0, 0.0],
            array![[1.0, 0.0], [0.0, 1.0]],
        );
        assert!(matches!(
            result,
            Err(ParameterError::NonPositiveStdDev { index: 0, .. })
        ));
    }

    #[rstest]
    #[case(-0.05)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_invalid_std_dev_rejected(#[case] bad: f64) {
        let result = DistributionParameters::new(
            array![0.10, 0.10],
            array![0.05, bad],
            array![[1.0, 0.0], [0.0, 1.0]],
        );
        assert!(matches!(
            result,
            Err(ParameterError::NonPositiveStdDev { index: 1, .. })
        ));
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let result = DistributionParameters::new(
            array![0.10, 0.10, 0.10],
            array![0.05, 0.05],
            array![[1.0, 0.0], [0.0, 1.0]],
        );
        assert!(matches!(
            result,
            Err(ParameterError::DimensionMismatch {
                means: 3,
                std_devs: 2
            })
        ));
    }

    #[test]
    fn test_correlation_shape_rejected() {
        let result = DistributionParameters::new(
            array![0.10, 0.10],
            array![0.05, 0.05],
            array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        );
        assert!(matches!(
            result,
            Err(ParameterError::CorrelationShape { expected: 2, .. })
        ));
    }

    #[test]
    fn test_asymmetric_correlation_rejected() {
        let result = DistributionParameters::new(
            array![0.10, 0.10],
            array![0.05, 0.05],
            array![[1.0, 0.5], [0.3, 1.0]],
        );
        assert!(matches!(
            result,
            Err(ParameterError::NotSymmetric { i: 0, j: 1 })
        ));
    }

    #[test]
    fn test_bad_diagonal_rejected() {
        let result = DistributionParameters::new(
            array![0.10, 0.10],
            array![0.05, 0.05],
            array![[0.9, 0.5], [0.5, 1.0]],
        );
        assert!(matches!(
            result,
            Err(ParameterError::InvalidDiagonal { index: 0, .. })
        ));
    }

    #[test]
    fn test_out_of_range_correlation_rejected() {
        let result = DistributionParameters::new(
            array![0.10, 0.10],
            array![0.05, 0.05],
            array![[1.0, 1.5], [1.5, 1.0]],
        );
        assert!(matches!(
            result,
            Err(ParameterError::OutOfRange { i: 0, j: 1, .. })
        ));
    }

    #[test]
    fn test_singular_correlation_rejected() {
        // Perfectly correlated assets make the covariance singular
        let result = DistributionParameters::new(
            array![0.10, 0.10],
            array![0.05, 0.05],
            array![[1.0, 1.0], [1.0, 1.0]],
        );
        assert!(matches!(
            result,
            Err(ParameterError::NotPositiveSemiDefinite(_))
        ));
    }

    #[test]
    fn test_empty_rejected() {
        let result = DistributionParameters::new(
            Array1::<f64>::zeros(0),
            Array1::<f64>::zeros(0),
            Array2::<f64>::zeros((0, 0)),
        );
        assert!(matches!(result, Err(ParameterError::Empty)));
    }
}
