//! Descriptive statistics over a simulation dataset.
//!
//! Summarizes each regime's rows for terminal display: row counts, the
//! spread of realized mean returns and volatilities, and how many
//! portfolios contain short positions.

use frontier::{Regime, ResultDataset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Descriptive statistics for one regime's rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegimeSummary {
    /// Regime label.
    pub regime: String,

    /// Number of portfolios.
    pub count: usize,

    /// Portfolios containing at least one short position.
    pub short_count: usize,

    /// Average realized mean return.
    pub mean_return_avg: f64,

    /// Smallest realized mean return.
    pub mean_return_min: f64,

    /// Largest realized mean return.
    pub mean_return_max: f64,

    /// Average realized volatility.
    pub std_dev_avg: f64,

    /// Smallest realized volatility.
    pub std_dev_min: f64,

    /// Largest realized volatility.
    pub std_dev_max: f64,
}

impl fmt::Display for RegimeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({} portfolios, {} with shorts)",
            self.regime, self.count, self.short_count
        )?;
        writeln!(
            f,
            "  mean return: avg {:.4}, min {:.4}, max {:.4}",
            self.mean_return_avg, self.mean_return_min, self.mean_return_max
        )?;
        write!(
            f,
            "  volatility:  avg {:.4}, min {:.4}, max {:.4}",
            self.std_dev_avg, self.std_dev_min, self.std_dev_max
        )
    }
}

/// Summarize a dataset per regime, shorts-allowed first.
///
/// Regimes with no rows are omitted.
pub fn generate_summary(dataset: &ResultDataset) -> Vec<RegimeSummary> {
    [Regime::ShortsAllowed, Regime::LongOnly]
        .iter()
        .filter_map(|&regime| summarize_regime(dataset, regime))
        .collect()
}

fn summarize_regime(dataset: &ResultDataset, regime: Regime) -> Option<RegimeSummary> {
    let mut count = 0;
    let mut short_count = 0;
    let mut return_sum = 0.0;
    let mut return_min = f64::INFINITY;
    let mut return_max = f64::NEG_INFINITY;
    let mut std_dev_sum = 0.0;
    let mut std_dev_min = f64::INFINITY;
    let mut std_dev_max = f64::NEG_INFINITY;

    for row in dataset.by_regime(regime) {
        count += 1;
        if row.has_short() {
            short_count += 1;
        }
        let mean_return = row.mean_return();
        return_sum += mean_return;
        return_min = return_min.min(mean_return);
        return_max = return_max.max(mean_return);

        let std_dev = row.return_std_dev();
        std_dev_sum += std_dev;
        std_dev_min = std_dev_min.min(std_dev);
        std_dev_max = std_dev_max.max(std_dev);
    }

    if count == 0 {
        return None;
    }

    Some(RegimeSummary {
        regime: regime.label().to_string(),
        count,
        short_count,
        mean_return_avg: return_sum / count as f64,
        mean_return_min: return_min,
        mean_return_max: return_max,
        std_dev_avg: std_dev_sum / count as f64,
        std_dev_min,
        std_dev_max,
    })
}
