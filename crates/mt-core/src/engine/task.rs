//! Task-label aggregation: lifting state beliefs to task beliefs.

use mt_math::{fuzzy_and, fuzzy_or, MembershipVec};
use std::collections::BTreeMap;

/// Lift a belief over states to a belief over task labels.
///
/// Each task's grade is the fuzzy OR over all states of
/// `and(belief[state], task_map[task][state])` — the same
/// conjoin-then-disjoin rationale as belief propagation, one abstraction
/// level up. States absent from a task's row contribute 0.
pub fn task_membership(
    belief: &MembershipVec,
    task_map: &BTreeMap<String, MembershipVec>,
) -> MembershipVec {
    task_map
        .iter()
        .map(|(task, members)| {
            let contributions: Vec<f64> = belief
                .iter()
                .map(|(state, grade)| fuzzy_and(&[grade, members.grade(state)]))
                .collect();
            (task.clone(), fuzzy_or(&contributions))
        })
        .collect()
}
