#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/frontier-sim/frontier/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod evaluate;
pub mod linalg;
pub mod params;
pub mod runner;
pub mod sample;
pub mod weights;

// Re-export main types
pub use evaluate::PortfolioResult;
pub use params::{DistributionParameters, ParameterError};
pub use runner::{ResultDataset, SimulationConfig, SimulationError};
pub use sample::{ReturnSample, SampleError};
pub use weights::{Regime, WeightError, WeightVector};
