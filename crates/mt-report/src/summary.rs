//! Aggregation of reports across a Monte Carlo batch.

use crate::finding::CheckKind;
use crate::report::Report;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Aggregate figures for one check across a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckSummary {
    /// Total findings across all runs.
    pub events: usize,
    /// Number of runs with at least one finding.
    pub runs_affected: usize,
    /// `runs_affected` over the batch size.
    pub run_fraction: f64,
    /// Finding counts keyed by "believed-state on action".
    pub by_context: BTreeMap<String, usize>,
}

/// Batch-level aggregation of per-run reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of reports aggregated.
    pub total_runs: usize,
    /// Runs where no check found anything.
    pub clean_runs: usize,
    /// Per-check figures, keyed by report name; checks with zero events
    /// across the whole batch are omitted.
    pub checks: BTreeMap<String, CheckSummary>,
}

fn context_key(believed: Option<&str>, action: Option<&str>) -> String {
    format!(
        "{} on {}",
        believed.unwrap_or("-"),
        action.unwrap_or("-")
    )
}

/// Aggregate a batch of reports.
pub fn summarize<'a>(reports: impl IntoIterator<Item = &'a Report>) -> Summary {
    let mut summary = Summary::default();

    for report in reports {
        summary.total_runs += 1;
        if report.is_clean() {
            summary.clean_runs += 1;
            continue;
        }
        for kind in CheckKind::ALL {
            let findings = report.findings(kind);
            if findings.is_empty() {
                continue;
            }
            let entry = summary.checks.entry(kind.as_str().to_string()).or_default();
            entry.events += findings.len();
            entry.runs_affected += 1;
            for finding in findings {
                *entry
                    .by_context
                    .entry(context_key(
                        finding.believed.as_deref(),
                        finding.action.as_deref(),
                    ))
                    .or_default() += 1;
            }
        }
    }

    if summary.total_runs > 0 {
        for check in summary.checks.values_mut() {
            check.run_fraction = check.runs_affected as f64 / summary.total_runs as f64;
        }
    }
    summary
}

/// Render a summary as a human-readable text report.
pub fn render_text(summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total runs analyzed: {}", summary.total_runs);
    let _ = writeln!(
        out,
        "Clean runs: {} ({:.2}%)",
        summary.clean_runs,
        percent(summary.clean_runs, summary.total_runs)
    );

    if summary.checks.is_empty() {
        let _ = writeln!(out, "\nNo discrepancies found in any run.");
        return out;
    }

    let _ = writeln!(out, "\nRuns affected per check:");
    for kind in CheckKind::ALL {
        if let Some(check) = summary.checks.get(kind.as_str()) {
            let _ = writeln!(
                out,
                "  {}: {:.2}% of runs ({} events)",
                kind,
                check.run_fraction * 100.0,
                check.events
            );
        }
    }

    let _ = writeln!(out, "\nBreakdown by believed state and action:");
    for kind in CheckKind::ALL {
        if let Some(check) = summary.checks.get(kind.as_str()) {
            let _ = writeln!(out, "  {kind}:");
            for (context, count) in &check.by_context {
                let _ = writeln!(out, "    {context}: {count}");
            }
        }
    }
    out
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
