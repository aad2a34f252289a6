#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/frontier-sim/frontier/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod estimate;
pub mod files;

pub use error::{DataError, Result};
pub use estimate::{PERIODS_PER_YEAR, estimate_parameters, simple_returns};
pub use files::{LabeledParameters, load_parameters, load_returns, write_parameters};
