//! Aggregation of call outcomes into confidence buckets.
//!
//! This is the core of the tool: filter records by region, sort each
//! region's records by their quality and k-mer parameters, and sum every
//! outcome counter of every call into the bucket its percentage falls in.

use crate::models::{
    Bucket, BucketSummary, RecordSummary, RegionSummary, StatRecord, Summary,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// How to report a bucket no call fell into.
///
/// The percentage denominator is zero for such a bucket, so it cannot be
/// reported like the others; the policy picks one of three resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EmptyBucketPolicy {
    /// Report the bucket with zero counts, 0.0% and a "no data" marker.
    #[default]
    Zero,
    /// Omit the bucket from the record's output.
    Skip,
    /// Fail the run with a [`SummaryError::EmptyBucket`].
    Error,
}

/// Errors produced while summarizing.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// A bucket had no calls and the policy was [`EmptyBucketPolicy::Error`].
    #[error(
        "no calls in bucket '{bucket}' for region '{region}' (quality {qual}, kmer {kmer})"
    )]
    EmptyBucket {
        region: String,
        bucket: &'static str,
        qual: f64,
        kmer: f64,
    },
}

/// Summarize records into per-region bucket totals.
///
/// Regions are reported in the order given; records matching none of the
/// configured labels are excluded and counted in
/// [`Summary::skipped_records`].
pub fn summarize(
    records: &[StatRecord],
    regions: &[String],
    policy: EmptyBucketPolicy,
) -> Result<Summary, SummaryError> {
    let mut region_summaries = Vec::with_capacity(regions.len());

    for region in regions {
        let mut matching: Vec<&StatRecord> =
            records.iter().filter(|r| &r.region == region).collect();
        sort_by_parameters(&mut matching);

        let mut record_summaries = Vec::with_capacity(matching.len());
        for record in matching {
            record_summaries.push(summarize_record(record, policy)?);
        }

        region_summaries.push(RegionSummary {
            region: region.clone(),
            records: record_summaries,
        });
    }

    let skipped = records
        .iter()
        .filter(|r| !regions.contains(&r.region))
        .count();
    if skipped > 0 {
        debug!("excluded {} records outside configured regions", skipped);
    }

    Ok(Summary {
        regions: region_summaries,
        skipped_records: skipped,
    })
}

/// Sort records ascending by `(qual, kmer)`, numeric comparison.
fn sort_by_parameters(records: &mut [&StatRecord]) {
    records.sort_by(|a, b| {
        a.qual
            .partial_cmp(&b.qual)
            .unwrap_or(Ordering::Equal)
            .then(a.kmer.partial_cmp(&b.kmer).unwrap_or(Ordering::Equal))
    });
}

/// Summarize one record's calls into the three confidence buckets.
fn summarize_record(
    record: &StatRecord,
    policy: EmptyBucketPolicy,
) -> Result<RecordSummary, SummaryError> {
    let mut buckets = Vec::with_capacity(Bucket::ALL.len());

    for bucket in Bucket::ALL {
        let mut outcomes: BTreeMap<String, u64> = BTreeMap::new();
        for call in record.calls.iter().filter(|c| bucket.contains(c.percent)) {
            for (kind, count) in &call.outcomes {
                *outcomes.entry(kind.clone()).or_default() += count;
            }
        }

        let summary = BucketSummary::from_outcomes(bucket, outcomes);
        if summary.no_data {
            match policy {
                EmptyBucketPolicy::Zero => buckets.push(summary),
                EmptyBucketPolicy::Skip => {}
                EmptyBucketPolicy::Error => {
                    return Err(SummaryError::EmptyBucket {
                        region: record.region.clone(),
                        bucket: bucket.label(),
                        qual: record.qual,
                        kmer: record.kmer,
                    });
                }
            }
        } else {
            buckets.push(summary);
        }
    }

    Ok(RecordSummary {
        qual: record.qual,
        kmer: record.kmer,
        buckets,
    })
}
