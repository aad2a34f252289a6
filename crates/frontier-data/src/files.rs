//! CSV parameter-file loading and writing.
//!
//! A scenario is described by three files, in the layout the original
//! parameter-preparation step emits:
//!
//! - mean returns: header row, then one `label,value` row per asset;
//! - volatilities: same layout;
//! - correlation matrix: a header of asset labels, then one labeled row per
//!   asset.
//!
//! Labels must agree, in order, across all three files.

use crate::error::{DataError, Result};
use frontier::DistributionParameters;
use ndarray::{Array1, Array2};
use std::path::Path;

/// Column header written for mean-return files.
const MEAN_COLUMN: &str = "MeanAnnualReturn";

/// Column header written for volatility files.
const VOLATILITY_COLUMN: &str = "AnnualizedVolatility";

/// Distribution parameters together with their asset labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledParameters {
    /// Asset labels in vector order.
    pub labels: Vec<String>,
    /// Validated distribution parameters.
    pub parameters: DistributionParameters,
}

/// Load and validate a scenario from its three parameter files.
///
/// # Errors
/// Fails on unreadable or malformed files, on label disagreement between
/// the files, or if the assembled parameters fail validation.
pub fn load_parameters(
    mean_path: &Path,
    volatility_path: &Path,
    correlation_path: &Path,
) -> Result<LabeledParameters> {
    let (mean_labels, means) = load_vector(mean_path)?;
    let (volatility_labels, std_devs) = load_vector(volatility_path)?;
    if mean_labels != volatility_labels {
        return Err(DataError::LabelMismatch {
            left: mean_path.display().to_string(),
            right: volatility_path.display().to_string(),
        });
    }

    let (correlation_labels, correlation) = load_matrix(correlation_path)?;
    if correlation_labels != mean_labels {
        return Err(DataError::LabelMismatch {
            left: mean_path.display().to_string(),
            right: correlation_path.display().to_string(),
        });
    }

    let parameters =
        DistributionParameters::new(Array1::from(means), Array1::from(std_devs), correlation)?;

    Ok(LabeledParameters {
        labels: mean_labels,
        parameters,
    })
}

/// Write a scenario back out as the three parameter files.
///
/// # Errors
/// Fails if any of the files cannot be created or written.
pub fn write_parameters(
    labeled: &LabeledParameters,
    mean_path: &Path,
    volatility_path: &Path,
    correlation_path: &Path,
) -> Result<()> {
    let params = &labeled.parameters;
    write_vector(mean_path, MEAN_COLUMN, &labeled.labels, params.means())?;
    write_vector(
        volatility_path,
        VOLATILITY_COLUMN,
        &labeled.labels,
        params.std_devs(),
    )?;
    write_matrix(correlation_path, &labeled.labels, params.correlation())?;
    Ok(())
}

/// Load a wide CSV of periodic returns: a header of asset labels, then one
/// row of values per period.
///
/// A leading index column (empty header cell, or one named `Date`) is
/// skipped.
///
/// # Errors
/// Fails on unreadable files, ragged rows, or unparseable values.
pub fn load_returns(path: &Path) -> Result<(Vec<String>, Array2<f64>)> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let skip_first = headers
        .get(0)
        .is_some_and(|h| h.trim().is_empty() || h.trim().eq_ignore_ascii_case("date"));
    let offset = usize::from(skip_first);

    let labels: Vec<String> = headers
        .iter()
        .skip(offset)
        .map(|h| h.trim().to_string())
        .collect();
    if labels.is_empty() {
        return Err(DataError::Shape {
            file: path.display().to_string(),
            message: "no asset columns in header".to_string(),
        });
    }

    let mut values = Vec::new();
    let mut rows = 0;
    for record in reader.records() {
        let record = record?;
        if record.len() != labels.len() + offset {
            return Err(DataError::Shape {
                file: path.display().to_string(),
                message: format!(
                    "row {} has {} fields, expected {}",
                    rows + 1,
                    record.len(),
                    labels.len() + offset
                ),
            });
        }
        for field in record.iter().skip(offset) {
            values.push(parse_value(path, field)?);
        }
        rows += 1;
    }

    let matrix = Array2::from_shape_vec((rows, labels.len()), values).map_err(|e| {
        DataError::Shape {
            file: path.display().to_string(),
            message: e.to_string(),
        }
    })?;
    Ok((labels, matrix))
}

/// Load a `label,value` vector file, skipping the header row.
fn load_vector(path: &Path) -> Result<(Vec<String>, Vec<f64>)> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut labels = Vec::new();
    let mut values = Vec::new();

    for record in reader.records() {
        let record = record?;
        if record.len() != 2 {
            return Err(DataError::Shape {
                file: path.display().to_string(),
                message: format!("expected 2 fields per row, got {}", record.len()),
            });
        }
        labels.push(record[0].trim().to_string());
        values.push(parse_value(path, &record[1])?);
    }

    if labels.is_empty() {
        return Err(DataError::Shape {
            file: path.display().to_string(),
            message: "file contains no data rows".to_string(),
        });
    }
    Ok((labels, values))
}

/// Load a labeled square matrix file; row labels must match the header.
fn load_matrix(path: &Path) -> Result<(Vec<String>, Array2<f64>)> {
    let mut reader = csv::Reader::from_path(path)?;
    let labels: Vec<String> = reader
        .headers()?
        .iter()
        .skip(1)
        .map(|h| h.trim().to_string())
        .collect();
    let n = labels.len();
    if n == 0 {
        return Err(DataError::Shape {
            file: path.display().to_string(),
            message: "no labels in header".to_string(),
        });
    }

    let mut matrix = Array2::<f64>::zeros((n, n));
    let mut row = 0;
    for record in reader.records() {
        let record = record?;
        if row >= n {
            return Err(DataError::Shape {
                file: path.display().to_string(),
                message: format!("more than {n} data rows"),
            });
        }
        if record.len() != n + 1 {
            return Err(DataError::Shape {
                file: path.display().to_string(),
                message: format!("row {} has {} fields, expected {}", row + 1, record.len(), n + 1),
            });
        }
        if record[0].trim() != labels[row] {
            return Err(DataError::Parse {
                file: path.display().to_string(),
                message: format!(
                    "row label {:?} does not match header label {:?}",
                    record[0].trim(),
                    labels[row]
                ),
            });
        }
        for (col, field) in record.iter().skip(1).enumerate() {
            matrix[[row, col]] = parse_value(path, field)?;
        }
        row += 1;
    }

    if row != n {
        return Err(DataError::Shape {
            file: path.display().to_string(),
            message: format!("expected {n} data rows, got {row}"),
        });
    }
    Ok((labels, matrix))
}

fn write_vector(path: &Path, column: &str, labels: &[String], values: &Array1<f64>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["", column])?;
    for (label, value) in labels.iter().zip(values.iter()) {
        let rendered = value.to_string();
        writer.write_record([label.as_str(), rendered.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_matrix(path: &Path, labels: &[String], matrix: &Array2<f64>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut header = vec![String::new()];
    header.extend(labels.iter().cloned());
    writer.write_record(&header)?;

    for (row, label) in labels.iter().enumerate() {
        let mut record = vec![label.clone()];
        for col in 0..labels.len() {
            record.push(matrix[[row, col]].to_string());
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn parse_value(path: &Path, field: &str) -> Result<f64> {
    field.trim().parse::<f64>().map_err(|_| DataError::Parse {
        file: path.display().to_string(),
        message: format!("cannot parse {:?} as a number", field.trim()),
    })
}
