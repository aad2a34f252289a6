//! Parameter estimation from return history.
//!
//! Mirrors the original parameter-preparation step: periodic (daily) simple
//! returns are annualized with `mean × 252` and `std × √252`, and the
//! correlation matrix is the sample correlation of the return columns.

use crate::error::{DataError, Result};
use crate::files::LabeledParameters;
use frontier::DistributionParameters;
use ndarray::{Array1, Array2};

/// Trading periods per year used for annualization.
pub const PERIODS_PER_YEAR: f64 = 252.0;

/// Convert a price history to simple periodic returns: r = p₁/p₀ − 1.
///
/// # Errors
/// Fails with [`DataError::InsufficientHistory`] for fewer than two rows
/// and [`DataError::NonPositivePrice`] if any price is ≤ 0.
pub fn simple_returns(prices: &Array2<f64>) -> Result<Array2<f64>> {
    let (rows, cols) = prices.dim();
    if rows < 2 {
        return Err(DataError::InsufficientHistory {
            required: 2,
            actual: rows,
        });
    }

    for row in 0..rows {
        for column in 0..cols {
            let value = prices[[row, column]];
            if value <= 0.0 || !value.is_finite() {
                return Err(DataError::NonPositivePrice { row, column, value });
            }
        }
    }

    let mut returns = Array2::<f64>::zeros((rows - 1, cols));
    for row in 0..rows - 1 {
        for column in 0..cols {
            returns[[row, column]] = prices[[row + 1, column]] / prices[[row, column]] - 1.0;
        }
    }
    Ok(returns)
}

/// Estimate annualized distribution parameters from periodic returns.
///
/// # Errors
/// Fails if `labels` does not match the column count, on fewer than two
/// return rows, if any column has zero variance (its correlations are
/// undefined), or if the assembled parameters fail validation.
pub fn estimate_parameters(
    returns: &Array2<f64>,
    labels: Vec<String>,
) -> Result<LabeledParameters> {
    let (rows, cols) = returns.dim();
    if labels.len() != cols {
        return Err(DataError::Shape {
            file: "returns".to_string(),
            message: format!("{} labels for {} return columns", labels.len(), cols),
        });
    }
    if rows < 2 {
        return Err(DataError::InsufficientHistory {
            required: 2,
            actual: rows,
        });
    }

    let mut means = vec![0.0; cols];
    for row in 0..rows {
        for column in 0..cols {
            means[column] += returns[[row, column]];
        }
    }
    for mean in means.iter_mut() {
        *mean /= rows as f64;
    }

    // Unbiased column standard deviations
    let denominator = (rows - 1) as f64;
    let mut std_devs = vec![0.0; cols];
    for (column, std_dev) in std_devs.iter_mut().enumerate() {
        let mut acc = 0.0;
        for row in 0..rows {
            let deviation = returns[[row, column]] - means[column];
            acc += deviation * deviation;
        }
        *std_dev = (acc / denominator).sqrt();
        if *std_dev == 0.0 {
            return Err(DataError::ZeroVariance {
                label: labels[column].clone(),
            });
        }
    }

    let mut correlation = Array2::<f64>::zeros((cols, cols));
    for i in 0..cols {
        correlation[[i, i]] = 1.0;
        for j in (i + 1)..cols {
            let mut acc = 0.0;
            for row in 0..rows {
                acc += (returns[[row, i]] - means[i]) * (returns[[row, j]] - means[j]);
            }
            let value = (acc / denominator) / (std_devs[i] * std_devs[j]);
            correlation[[i, j]] = value;
            correlation[[j, i]] = value;
        }
    }

    let annual_means: Vec<f64> = means.iter().map(|m| m * PERIODS_PER_YEAR).collect();
    let annual_std_devs: Vec<f64> = std_devs
        .iter()
        .map(|s| s * PERIODS_PER_YEAR.sqrt())
        .collect();

    let parameters = DistributionParameters::new(
        Array1::from(annual_means),
        Array1::from(annual_std_devs),
        correlation,
    )?;

    Ok(LabeledParameters { labels, parameters })
}
