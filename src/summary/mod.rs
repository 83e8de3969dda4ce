//! Call-accuracy aggregation.
//!
//! This module turns loaded stat records into per-region, per-record,
//! per-bucket summaries.

pub mod aggregator;

pub use aggregator::{summarize, EmptyBucketPolicy, SummaryError};
