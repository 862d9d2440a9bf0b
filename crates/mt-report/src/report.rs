//! Per-run discrepancy reports.

use crate::error::Result;
use crate::finding::{CheckKind, Finding};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The discrepancy report for one run: check name → findings.
///
/// Checks that found nothing are absent from the map, so a clean run
/// serializes as the empty object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    checks: BTreeMap<String, Vec<Finding>>,
}

impl Report {
    /// Empty (clean) report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the findings of one check. Empty findings are dropped so the
    /// check's key never appears with an empty list.
    pub fn record(&mut self, kind: CheckKind, findings: Vec<Finding>) {
        if !findings.is_empty() {
            self.checks.insert(kind.as_str().to_string(), findings);
        }
    }

    /// Findings of one check; empty when the check found nothing.
    pub fn findings(&self, kind: CheckKind) -> &[Finding] {
        self.checks
            .get(kind.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All recorded checks with their findings.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Finding])> {
        self.checks.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Whether no check found anything.
    pub fn is_clean(&self) -> bool {
        self.checks.is_empty()
    }

    /// Total number of findings across all checks.
    pub fn total_events(&self) -> usize {
        self.checks.values().map(Vec::len).sum()
    }

    /// The earliest flagged step of one check.
    pub fn first_step(&self, kind: CheckKind) -> Option<usize> {
        self.findings(kind).iter().map(|f| f.step).min()
    }

    /// A copy with every finding after `step` removed.
    ///
    /// Post-processing for batch analysis: once the operator believes no
    /// change is possible, later findings restate the same breakdown.
    pub fn truncated_at(&self, step: usize) -> Report {
        let checks = self
            .checks
            .iter()
            .filter_map(|(name, findings)| {
                let kept: Vec<Finding> = findings
                    .iter()
                    .filter(|f| f.step <= step)
                    .cloned()
                    .collect();
                (!kept.is_empty()).then(|| (name.clone(), kept))
            })
            .collect();
        Report { checks }
    }

    /// Load a report from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the report as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
