//! Export functionality for simulation datasets.
//!
//! Renders a [`ResultDataset`] as CSV or JSON with the schema expected by
//! downstream plotting tools: `w1..wN, has_short, mean_return,
//! return_std_dev, regime`, one row per simulated portfolio, in the
//! dataset's concatenation order.

use frontier::{PortfolioResult, ResultDataset};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// One exported dataset row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioRecord {
    /// Portfolio weights in asset order.
    pub weights: Vec<f64>,

    /// Whether any weight is ≤ 0.
    pub has_short: bool,

    /// Realized mean portfolio return.
    pub mean_return: f64,

    /// Realized portfolio return standard deviation.
    pub return_std_dev: f64,

    /// Constraint regime label.
    pub regime: String,
}

impl From<&PortfolioResult> for PortfolioRecord {
    fn from(result: &PortfolioResult) -> Self {
        Self {
            weights: result.weights().as_array().to_vec(),
            has_short: result.has_short(),
            mean_return: result.mean_return(),
            return_std_dev: result.return_std_dev(),
            regime: result.regime().label().to_string(),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl Exporter for ResultDataset {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let n_assets = self
                    .results()
                    .first()
                    .map_or(0, |row| row.weights().len());

                let mut wtr = csv::Writer::from_writer(vec![]);
                let mut header: Vec<String> =
                    (1..=n_assets).map(|i| format!("w{i}")).collect();
                header.extend(
                    ["has_short", "mean_return", "return_std_dev", "regime"]
                        .map(String::from),
                );
                wtr.write_record(&header)?;

                for row in self.iter() {
                    let mut record: Vec<String> = row
                        .weights()
                        .as_array()
                        .iter()
                        .map(|w| w.to_string())
                        .collect();
                    record.push(row.has_short().to_string());
                    record.push(row.mean_return().to_string());
                    record.push(row.return_std_dev().to_string());
                    record.push(row.regime().label().to_string());
                    wtr.write_record(&record)?;
                }

                let data =
                    String::from_utf8(wtr.into_inner().map_err(|e| e.into_error())?).unwrap();
                Ok(data)
            }
            ExportFormat::Json => {
                let records: Vec<PortfolioRecord> =
                    self.iter().map(PortfolioRecord::from).collect();
                Ok(serde_json::to_string(&records)?)
            }
            ExportFormat::PrettyJson => {
                let records: Vec<PortfolioRecord> =
                    self.iter().map(PortfolioRecord::from).collect();
                Ok(serde_json::to_string_pretty(&records)?)
            }
        }
    }
}
