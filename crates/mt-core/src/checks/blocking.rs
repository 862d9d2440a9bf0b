//! Blocking checks: the operator expects no change while the machine moves.

use super::{ensure_aligned, Result};
use mt_math::MembershipVec;
use mt_report::Finding;

/// Dominant (mass-based) blocking check.
///
/// `masses[i]` is the (B, C) pair computed from the belief at index `i`;
/// there is one pair per transition, so `masses.len() == truth.len() - 1`.
/// Index `i` is flagged when `B > C` — the operator's dominant expectation
/// is "nothing changes" — yet the ground truth differs between `i` and
/// `i + 1`. The snapshot carries the two masses.
pub fn mass_blocking(masses: &[(f64, f64)], truth: &[&str]) -> Result<Vec<Finding>> {
    ensure_aligned(
        "blocking history",
        masses.len() + 1,
        "ground truth",
        truth.len(),
    )?;

    let mut findings = Vec::new();
    for (step, ((b, c), window)) in masses.iter().zip(truth.windows(2)).enumerate() {
        if b > c && window[0] != window[1] {
            let mut snapshot = MembershipVec::new();
            snapshot.set("B", *b);
            snapshot.set("C", *c);
            findings.push(
                Finding::at(step)
                    .with_actual(window[1])
                    .with_memberships(snapshot),
            );
        }
    }
    Ok(findings)
}

/// Threshold (set-based) blocking check.
///
/// Index `i` is flagged when the set of entries strictly above `threshold`
/// is unchanged from `i` to `i + 1` while the ground-truth label changes:
/// nothing the operator seriously entertains moved, but the machine did.
pub fn set_blocking(
    history: &[MembershipVec],
    truth: &[&str],
    threshold: f64,
) -> Result<Vec<Finding>> {
    ensure_aligned("belief history", history.len(), "ground truth", truth.len())?;

    let mut findings = Vec::new();
    for (step, (beliefs, window)) in history.windows(2).zip(truth.windows(2)).enumerate() {
        let unchanged = beliefs[0].above_set(threshold) == beliefs[1].above_set(threshold);
        if unchanged && window[0] != window[1] {
            let snapshot: MembershipVec = beliefs[0]
                .above(threshold)
                .iter()
                .map(|(key, grade)| (key.to_string(), *grade))
                .collect();
            findings.push(
                Finding::at(step)
                    .with_actual(window[1])
                    .with_memberships(snapshot),
            );
        }
    }
    Ok(findings)
}
