//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function.

pub mod annotate;
pub mod classes;
pub mod classify;
pub mod config;
pub mod term;

use crate::session::ResolvedBatch;
use colored::Colorize;
use gofn_core::RuleOverlapReport;

/// Ids listed per overlap before the rest is summarized.
const MAX_LISTED_IDS: usize = 8;

/// Human-readable overlap report, one block per overlapping pair.
pub fn format_overlap_report(reports: &[RuleOverlapReport]) -> String {
    if reports.is_empty() {
        return "No overlapping classes.".to_string();
    }

    let mut out = format!("{} overlapping class pair(s):\n", reports.len());
    for report in reports {
        let listed: Vec<&str> = report.ids.iter().take(MAX_LISTED_IDS).map(String::as_str).collect();
        let rest = report.ids.len().saturating_sub(MAX_LISTED_IDS);

        out.push_str(&format!("  {} / {}: {}", report.first, report.second, listed.join(", ")));
        if rest > 0 {
            out.push_str(&format!(" and {} more", rest));
        }
        out.push('\n');
    }
    out
}

/// Print what could not be resolved to stderr.
pub(crate) fn report_failures(batch: &ResolvedBatch) {
    if batch.failures.is_empty() {
        return;
    }

    eprintln!(
        "{} {} protein(s) skipped:",
        "⚠".yellow(),
        batch.failures.len()
    );
    for (protein_id, error) in &batch.failures {
        eprintln!("  {} {}", protein_id.yellow(), error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_overlap_report_truncates_long_lists() {
        let ids: BTreeSet<String> = (0..10).map(|i| format!("GO:000000{}", i)).collect();
        let report = format_overlap_report(&[RuleOverlapReport {
            first: "Kinase".into(),
            second: "Transferase".into(),
            ids,
        }]);

        assert!(report.starts_with("1 overlapping class pair(s):"));
        assert!(report.contains("Kinase / Transferase: GO:0000000, GO:0000001"));
        assert!(report.contains(" and 2 more"));
    }

    #[test]
    fn test_empty_overlap_report() {
        assert_eq!(format_overlap_report(&[]), "No overlapping classes.");
    }
}
