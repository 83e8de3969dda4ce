//! Text and JSON report generation.
//!
//! The text layout follows the historical summary output: one region label
//! line, then per record a parameter header and one line per confidence
//! bucket with correct/wrong counts and percentages.

use crate::models::{BucketSummary, RecordSummary, RegionSummary, Summary};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Generate the complete plain-text report.
pub fn generate_text_report(summary: &Summary) -> String {
    let mut output = String::new();

    for region in &summary.regions {
        output.push_str(&generate_region_section(region));
    }

    output
}

/// Generate the section for one region.
fn generate_region_section(region: &RegionSummary) -> String {
    let mut section = String::new();

    section.push_str(&region.region);
    section.push('\n');

    for record in &region.records {
        section.push_str(&generate_record_section(record));
    }

    section
}

/// Generate the header and bucket lines for one record.
fn generate_record_section(record: &RecordSummary) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        " quality: {}, kmer {}\n",
        format_parameter(record.qual),
        format_parameter(record.kmer)
    ));

    for bucket in &record.buckets {
        section.push_str(&generate_bucket_line(bucket));
    }

    section
}

/// Generate one bucket line.
fn generate_bucket_line(bucket: &BucketSummary) -> String {
    let mut line = format!(
        "{:>8}:  Correct {:>4} ({:.1}%); Wrong {:>3} ({:.1}%)",
        bucket.bucket.label(),
        bucket.right,
        bucket.right_pct,
        bucket.wrong,
        bucket.wrong_pct
    );

    if bucket.no_data {
        line.push_str(" [no data]");
    }
    line.push('\n');

    line
}

/// Render a parameter value the way the input wrote it: integral values
/// without a trailing ".0".
fn format_parameter(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Generate a JSON report.
pub fn generate_json_report(summary: &Summary) -> Result<String> {
    serde_json::to_string_pretty(summary).map_err(Into::into)
}

/// Write a rendered report to a file, or to stdout when no path is given.
pub fn write_report(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write report to {}", path.display())),
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(content.as_bytes())
                .context("Failed to write report to stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CallEntry, StatRecord};
    use crate::summary::{summarize, EmptyBucketPolicy};
    use std::collections::BTreeMap;

    fn call(percent: f64, correct: u64, wrong: u64, partial: u64) -> CallEntry {
        let mut outcomes = BTreeMap::new();
        outcomes.insert("correct".to_string(), correct);
        outcomes.insert("wrong".to_string(), wrong);
        outcomes.insert("partial".to_string(), partial);
        CallEntry { percent, outcomes }
    }

    fn example_summary(policy: EmptyBucketPolicy) -> Summary {
        let records = vec![StatRecord {
            region: "rt".to_string(),
            qual: 20.0,
            kmer: 31.0,
            calls: vec![call(100.0, 10, 0, 0), call(3.0, 1, 4, 0)],
        }];
        summarize(&records, &["rt".to_string(), "gag".to_string()], policy).unwrap()
    }

    #[test]
    fn test_text_report_layout() {
        let report = generate_text_report(&example_summary(EmptyBucketPolicy::Zero));

        let expected = "rt\n quality: 20, kmer 31\n  single:  Correct   10 (100.0%); Wrong   0 (0.0%)\n    >=5%:  Correct    0 (0.0%); Wrong   0 (0.0%) [no data]\n     <5%:  Correct    1 (20.0%); Wrong   4 (80.0%)\ngag\n";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_skip_policy_omits_bucket_line() {
        let report = generate_text_report(&example_summary(EmptyBucketPolicy::Skip));
        assert!(!report.contains(">=5%"));
        assert!(report.contains("single"));
        assert!(report.contains("<5%"));
    }

    #[test]
    fn test_report_is_idempotent() {
        let summary = example_summary(EmptyBucketPolicy::Zero);
        assert_eq!(generate_text_report(&summary), generate_text_report(&summary));
    }

    #[test]
    fn test_format_parameter() {
        assert_eq!(format_parameter(20.0), "20");
        assert_eq!(format_parameter(31.0), "31");
        assert_eq!(format_parameter(12.5), "12.5");
    }

    #[test]
    fn test_json_report_round_trips() {
        let summary = example_summary(EmptyBucketPolicy::Zero);
        let json = generate_json_report(&summary).unwrap();

        let parsed: Summary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.regions.len(), 2);
        assert_eq!(parsed.regions[0].region, "rt");
        assert_eq!(parsed.regions[0].records[0].buckets[0].right, 10);
        assert_eq!(parsed.skipped_records, 0);
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");

        write_report("rt\n", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "rt\n");
    }
}
