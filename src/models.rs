//! Data models for the call-accuracy summarizer.
//!
//! This module contains the structures deserialized from the stats file
//! (records and their per-call entries) and the structures the summarizer
//! produces for rendering (per-bucket, per-record, per-region summaries).

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Outcome key whose sum becomes the "right" column of the report.
pub const OUTCOME_CORRECT: &str = "correct";
/// Outcome key counted into the "wrong" column of the report.
pub const OUTCOME_WRONG: &str = "wrong";
/// Outcome key combined with `wrong` for reporting purposes.
pub const OUTCOME_PARTIAL: &str = "partial";

/// One observed call outcome at a given evidence percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallEntry {
    /// Fraction of supporting evidence for this call, in [0, 100].
    #[serde(deserialize_with = "lenient_f64")]
    pub percent: f64,
    /// Outcome counters keyed by kind (`correct`, `wrong`, `partial`, ...).
    ///
    /// Every numeric field other than `percent` lands here, so new outcome
    /// kinds in the input are summed without a code change.
    #[serde(flatten)]
    pub outcomes: BTreeMap<String, u64>,
}

impl CallEntry {
    /// Count for a single outcome kind, 0 if absent.
    pub fn outcome(&self, kind: &str) -> u64 {
        self.outcomes.get(kind).copied().unwrap_or(0)
    }
}

/// Statistics for one (region, quality, k-mer) parameter combination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatRecord {
    /// Region label this record belongs to (e.g. "rt", "gag").
    pub region: String,
    /// Quality threshold used for this run.
    #[serde(deserialize_with = "lenient_f64")]
    pub qual: f64,
    /// K-mer size used for this run.
    #[serde(deserialize_with = "lenient_f64")]
    pub kmer: f64,
    /// Observed calls at each confidence level.
    #[serde(default)]
    pub calls: Vec<CallEntry>,
}

/// Deserialize a float that upstream tooling may have written as a string.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(v) => Ok(v),
        Raw::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// One of the three confidence buckets a call falls into.
///
/// The predicates are mutually exclusive and cover all of [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    /// Exactly 100% supporting evidence.
    #[serde(rename = "single")]
    Single,
    /// At least 5% but below 100%.
    #[serde(rename = ">=5%")]
    AtLeast5,
    /// Below 5%.
    #[serde(rename = "<5%")]
    Below5,
}

impl Bucket {
    /// All buckets in report order.
    pub const ALL: [Bucket; 3] = [Bucket::Single, Bucket::AtLeast5, Bucket::Below5];

    /// The label used in the text report.
    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Single => "single",
            Bucket::AtLeast5 => ">=5%",
            Bucket::Below5 => "<5%",
        }
    }

    /// Classify an evidence percentage into its bucket.
    pub fn classify(percent: f64) -> Bucket {
        if percent == 100.0 {
            Bucket::Single
        } else if percent >= 5.0 {
            Bucket::AtLeast5
        } else {
            Bucket::Below5
        }
    }

    /// Whether a percentage falls in this bucket.
    pub fn contains(&self, percent: f64) -> bool {
        Bucket::classify(percent) == *self
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Accumulated totals for one bucket of one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketSummary {
    /// Which bucket these totals cover.
    pub bucket: Bucket,
    /// Summed outcome counters across all calls in the bucket.
    pub outcomes: BTreeMap<String, u64>,
    /// Summed `correct` count.
    pub right: u64,
    /// Summed `wrong` + `partial` count.
    pub wrong: u64,
    /// Sum of all outcome counters, the percentage denominator.
    pub total: u64,
    /// `right` as a percentage of `total` (0.0 when the bucket is empty).
    pub right_pct: f64,
    /// `wrong` as a percentage of `total` (0.0 when the bucket is empty).
    pub wrong_pct: f64,
    /// True when no call fell in this bucket.
    pub no_data: bool,
}

impl BucketSummary {
    /// Build a summary from accumulated outcome counters.
    pub fn from_outcomes(bucket: Bucket, outcomes: BTreeMap<String, u64>) -> Self {
        let right = outcomes.get(OUTCOME_CORRECT).copied().unwrap_or(0);
        let wrong = outcomes.get(OUTCOME_WRONG).copied().unwrap_or(0)
            + outcomes.get(OUTCOME_PARTIAL).copied().unwrap_or(0);
        let total: u64 = outcomes.values().sum();

        let (right_pct, wrong_pct) = if total > 0 {
            (
                right as f64 / total as f64 * 100.0,
                wrong as f64 / total as f64 * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            bucket,
            outcomes,
            right,
            wrong,
            total,
            right_pct,
            wrong_pct,
            no_data: total == 0,
        }
    }
}

/// Summary of one record, buckets in report order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSummary {
    /// Quality threshold of the record.
    pub qual: f64,
    /// K-mer size of the record.
    pub kmer: f64,
    /// Per-bucket totals; buckets dropped by the `skip` policy are absent.
    pub buckets: Vec<BucketSummary>,
}

/// Summary of one region: its records sorted by `(qual, kmer)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionSummary {
    /// Region label.
    pub region: String,
    /// Record summaries in ascending `(qual, kmer)` order.
    pub records: Vec<RecordSummary>,
}

/// The complete summarizer output for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// One entry per configured region, in the configured order.
    pub regions: Vec<RegionSummary>,
    /// Records whose region matched none of the configured labels.
    pub skipped_records: usize,
}
