//! Error checks: the believed state or task contradicts the ground truth.

use super::{ensure_aligned, Result};
use mt_math::MembershipVec;
use mt_report::Finding;

/// Dominant error check.
///
/// Flags every index where the dominant believed entry differs from the
/// ground-truth label. The membership snapshot carries the believed entry's
/// grade and the grade the belief assigns to the actual label.
pub fn dominant_mismatch(history: &[MembershipVec], truth: &[&str]) -> Result<Vec<Finding>> {
    ensure_aligned("belief history", history.len(), "ground truth", truth.len())?;

    let mut findings = Vec::new();
    for (step, (belief, actual)) in history.iter().zip(truth).enumerate() {
        let Some((believed, grade)) = belief.dominant() else {
            continue;
        };
        if believed != *actual {
            let mut snapshot = MembershipVec::new();
            snapshot.set(believed, grade);
            snapshot.set(*actual, belief.grade(actual));
            findings.push(
                Finding::at(step)
                    .with_believed(believed)
                    .with_actual(*actual)
                    .with_memberships(snapshot),
            );
        }
    }
    Ok(findings)
}

/// Threshold error check.
///
/// Flags every index where some entry strictly above `threshold` differs
/// from the ground-truth label. This covers both failure shapes: a wrong
/// entry considered possible enough, and an ambiguous above-threshold set
/// (more than one entry clears the cutoff, so at least one is wrong). An
/// empty above-threshold set is not an error — that is vacuous confusion's
/// territory.
pub fn threshold_mismatch(
    history: &[MembershipVec],
    truth: &[&str],
    threshold: f64,
) -> Result<Vec<Finding>> {
    ensure_aligned("belief history", history.len(), "ground truth", truth.len())?;

    let mut findings = Vec::new();
    for (step, (belief, actual)) in history.iter().zip(truth).enumerate() {
        let above = belief.above(threshold);
        if above.iter().any(|(key, _)| key != actual) {
            let snapshot: MembershipVec = above
                .iter()
                .map(|(key, grade)| (key.to_string(), *grade))
                .collect();
            findings.push(
                Finding::at(step)
                    .with_actual(*actual)
                    .with_memberships(snapshot),
            );
        }
    }
    Ok(findings)
}
