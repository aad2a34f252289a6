#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/frontier-sim/frontier/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod summary;

pub use export::{ExportError, ExportFormat, Exporter, PortfolioRecord};
pub use summary::{RegimeSummary, generate_summary};
