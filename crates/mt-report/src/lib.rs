//! Discrepancy report model for Mismatch Triage.
//!
//! A [`Report`] maps check names to the findings that check produced for one
//! run; checks with zero findings are omitted entirely, so a clean run
//! serializes as `{}`. [`summary`] aggregates reports across a Monte Carlo
//! batch into per-check totals and affected-run fractions.

pub mod error;
pub mod finding;
pub mod report;
pub mod summary;

pub use error::{ReportError, Result};
pub use finding::{CheckKind, Finding};
pub use report::Report;
pub use summary::{render_text, summarize, CheckSummary, Summary};
