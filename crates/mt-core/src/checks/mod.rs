//! Discrepancy checkers.
//!
//! Sixteen checks over the aligned belief and ground-truth histories:
//! {dominant, threshold} × {state, task} × {error, nondeterministic
//! confusion, vacuous confusion, blocking}. State and task variants share
//! the same parameterized functions; the task variants simply run them over
//! the task-level histories.
//!
//! Conventions (uniform across every check):
//! - A finding's `step` is the belief-history index at which the condition
//!   holds; blocking findings carry the index *before* the ground-truth
//!   change.
//! - Dominant selection breaks ties toward the lexicographically first key
//!   ([`MembershipVec::dominant`]).
//! - Histories must be index-aligned; a length mismatch is a fatal contract
//!   violation, never silently truncated.

pub mod blocking;
pub mod confusion;
pub mod mismatch;

pub use blocking::{mass_blocking, set_blocking};
pub use confusion::{dominant_ties, threshold_ties, vacuous};
pub use mismatch::{dominant_mismatch, threshold_mismatch};

use crate::engine::Evolution;
use crate::sim::Trajectory;
use mt_math::MembershipVec;
use mt_report::{CheckKind, Finding, Report};
use thiserror::Error;

/// Fatal input-contract violations in checker inputs.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Two histories that must be index-aligned have different lengths.
    #[error("{left_name} and {right_name} must be index-aligned: {left} vs {right} entries")]
    LengthMismatch {
        left_name: &'static str,
        right_name: &'static str,
        left: usize,
        right: usize,
    },

    /// A blocking record lacks task masses although task histories exist.
    #[error("blocking record at step {step} carries no task masses")]
    IncompleteTaskRecord { step: usize },
}

/// Result type for checker operations.
pub type Result<T> = std::result::Result<T, CheckError>;

/// Membership cutoffs for the threshold check variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Grades strictly above this count as "possible enough" for threshold
    /// error checks.
    pub error: f64,
    /// Cutoff for threshold nondeterministic confusion.
    pub confusion: f64,
    /// Maximum grade at or below this flags threshold vacuous confusion.
    pub vacuous: f64,
    /// Cutoff for the above-threshold set in threshold blocking.
    pub blocking: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            error: 0.7,
            confusion: 0.7,
            vacuous: 0.3,
            blocking: 0.7,
        }
    }
}

fn ensure_aligned(
    left_name: &'static str,
    left: usize,
    right_name: &'static str,
    right: usize,
) -> Result<()> {
    if left != right {
        return Err(CheckError::LengthMismatch {
            left_name,
            right_name,
            left,
            right,
        });
    }
    Ok(())
}

/// Run every applicable check and assemble the report.
///
/// State-level checks always run; task-level checks run iff the evolution
/// carries task histories *and* the trajectory carries task labels. Each
/// finding is decorated with the input event applied at its step and, when
/// the check did not already record one, the dominant believed entry of the
/// relevant history.
pub fn run_checks(
    evolution: &Evolution,
    trajectory: &Trajectory,
    thresholds: &Thresholds,
) -> Result<Report> {
    let truth_states = trajectory.state_labels();
    ensure_aligned(
        "belief history",
        evolution.beliefs.len(),
        "ground-truth trajectory",
        truth_states.len(),
    )?;
    ensure_aligned(
        "blocking history",
        evolution.blocking.len() + 1,
        "belief history",
        evolution.beliefs.len(),
    )?;

    let decorate = |findings: Vec<Finding>, history: &[MembershipVec]| -> Vec<Finding> {
        findings
            .into_iter()
            .map(|mut finding| {
                if finding.action.is_none() {
                    finding.action = evolution.inputs.get(finding.step).cloned();
                }
                if finding.believed.is_none() {
                    finding.believed = history
                        .get(finding.step)
                        .and_then(|belief| belief.dominant())
                        .map(|(key, _)| key.to_string());
                }
                finding
            })
            .collect()
    };

    let beliefs = &evolution.beliefs;
    let mut report = Report::new();

    report.record(
        CheckKind::DominantStateError,
        decorate(dominant_mismatch(beliefs, &truth_states)?, beliefs),
    );
    report.record(
        CheckKind::ThresholdStateError,
        decorate(
            threshold_mismatch(beliefs, &truth_states, thresholds.error)?,
            beliefs,
        ),
    );
    report.record(
        CheckKind::DominantStateConfusion,
        decorate(dominant_ties(beliefs), beliefs),
    );
    report.record(
        CheckKind::ThresholdStateConfusion,
        decorate(threshold_ties(beliefs, thresholds.confusion), beliefs),
    );
    report.record(
        CheckKind::VacuousStateConfusion,
        decorate(vacuous(beliefs, 0.0), beliefs),
    );
    report.record(
        CheckKind::ThresholdVacuousStateConfusion,
        decorate(vacuous(beliefs, thresholds.vacuous), beliefs),
    );

    let state_masses: Vec<(f64, f64)> =
        evolution.blocking.iter().map(|r| (r.b, r.c)).collect();
    report.record(
        CheckKind::DominantStateBlocking,
        decorate(mass_blocking(&state_masses, &truth_states)?, beliefs),
    );
    report.record(
        CheckKind::ThresholdStateBlocking,
        decorate(
            set_blocking(beliefs, &truth_states, thresholds.blocking)?,
            beliefs,
        ),
    );

    let (Some(task_beliefs), Some(truth_tasks)) =
        (&evolution.task_beliefs, trajectory.task_labels())
    else {
        return Ok(report);
    };

    ensure_aligned(
        "task belief history",
        task_beliefs.len(),
        "ground-truth task labels",
        truth_tasks.len(),
    )?;

    report.record(
        CheckKind::DominantTaskError,
        decorate(dominant_mismatch(task_beliefs, &truth_tasks)?, task_beliefs),
    );
    report.record(
        CheckKind::ThresholdTaskError,
        decorate(
            threshold_mismatch(task_beliefs, &truth_tasks, thresholds.error)?,
            task_beliefs,
        ),
    );
    report.record(
        CheckKind::DominantTaskConfusion,
        decorate(dominant_ties(task_beliefs), task_beliefs),
    );
    report.record(
        CheckKind::ThresholdTaskConfusion,
        decorate(threshold_ties(task_beliefs, thresholds.confusion), task_beliefs),
    );
    report.record(
        CheckKind::VacuousTaskConfusion,
        decorate(vacuous(task_beliefs, 0.0), task_beliefs),
    );
    report.record(
        CheckKind::ThresholdVacuousTaskConfusion,
        decorate(vacuous(task_beliefs, thresholds.vacuous), task_beliefs),
    );

    let task_masses: Vec<(f64, f64)> = evolution
        .blocking
        .iter()
        .enumerate()
        .map(|(step, record)| match (record.b_task, record.c_task) {
            (Some(b), Some(c)) => Ok((b, c)),
            _ => Err(CheckError::IncompleteTaskRecord { step }),
        })
        .collect::<Result<_>>()?;
    report.record(
        CheckKind::DominantTaskBlocking,
        decorate(mass_blocking(&task_masses, &truth_tasks)?, task_beliefs),
    );
    report.record(
        CheckKind::ThresholdTaskBlocking,
        decorate(
            set_blocking(task_beliefs, &truth_tasks, thresholds.blocking)?,
            task_beliefs,
        ),
    );

    Ok(report)
}
