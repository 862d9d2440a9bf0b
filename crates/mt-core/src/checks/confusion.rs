//! Confusion checks: indecision between entries, or no confident entry.
//!
//! These checks consume a single membership history and need no ground
//! truth, so they carry no alignment contract.

use mt_math::MembershipVec;
use mt_report::Finding;

/// Dominant nondeterministic confusion: two or more entries are *exactly*
/// tied at the maximum grade, so the operator cannot settle on one
/// candidate. The snapshot carries the tied entries.
pub fn dominant_ties(history: &[MembershipVec]) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (step, belief) in history.iter().enumerate() {
        let tied = belief.tied_at_max();
        if tied.len() > 1 {
            let snapshot: MembershipVec = tied
                .iter()
                .map(|(key, grade)| (key.to_string(), *grade))
                .collect();
            findings.push(Finding::at(step).with_memberships(snapshot));
        }
    }
    findings
}

/// Threshold nondeterministic confusion: two or more entries clear the
/// cutoff, so more than one candidate is considered seriously possible.
pub fn threshold_ties(history: &[MembershipVec], threshold: f64) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (step, belief) in history.iter().enumerate() {
        let above = belief.above(threshold);
        if above.len() > 1 {
            let snapshot: MembershipVec = above
                .iter()
                .map(|(key, grade)| (key.to_string(), *grade))
                .collect();
            findings.push(Finding::at(step).with_memberships(snapshot));
        }
    }
    findings
}

/// Vacuous confusion: the maximum grade is at or below `threshold` — the
/// operator holds no confident belief in anything. The dominant variant is
/// this check at threshold 0. The snapshot carries the whole vector.
pub fn vacuous(history: &[MembershipVec], threshold: f64) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (step, belief) in history.iter().enumerate() {
        if belief.max_grade() <= threshold {
            findings.push(Finding::at(step).with_memberships(belief.clone()));
        }
    }
    findings
}
