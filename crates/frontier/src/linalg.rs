//! Dense matrix helpers for covariance handling.
//!
//! Provides the Cholesky factorization used both to validate that a
//! covariance matrix is decomposable and to turn independent standard
//! normals into correlated draws (W = L·Z with Σ = L·Lᵀ).

use ndarray::Array2;
use thiserror::Error;

/// Errors raised by matrix factorization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinalgError {
    /// The matrix is not square.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// The matrix has no real Cholesky factor.
    #[error("matrix is not positive definite: pivot {pivot} at row {row}")]
    NotPositiveDefinite {
        /// Row at which factorization failed
        row: usize,
        /// Offending pivot value
        pivot: f64,
    },
}

/// Compute the lower-triangular Cholesky factor L with A = L·Lᵀ.
///
/// # Arguments
/// * `matrix` - Symmetric matrix to factor
///
/// # Returns
/// * Lower-triangular factor, or `NotPositiveDefinite` if a pivot is ≤ 0
pub fn cholesky(matrix: &Array2<f64>) -> Result<Array2<f64>, LinalgError> {
    let n = matrix.nrows();
    if matrix.ncols() != n {
        return Err(LinalgError::NotSquare {
            rows: n,
            cols: matrix.ncols(),
        });
    }

    let mut lower = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for k in 0..j {
                sum += lower[[i, k]] * lower[[j, k]];
            }

            if i == j {
                let pivot = matrix[[j, j]] - sum;
                if pivot <= 0.0 {
                    return Err(LinalgError::NotPositiveDefinite { row: j, pivot });
                }
                lower[[j, j]] = pivot.sqrt();
            } else {
                lower[[i, j]] = (matrix[[i, j]] - sum) / lower[[j, j]];
            }
        }
    }

    Ok(lower)
}
