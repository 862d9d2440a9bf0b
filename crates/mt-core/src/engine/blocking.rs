//! Blocking-mass computation.
//!
//! Partitions one step's propagation mass into B (self-transition, "nothing
//! changes") and C (state-changing) aggregates. `B > C` means the
//! operator's dominant expectation is that the applied input has no effect —
//! the precondition for a blocking mismatch if the real machine did change.

use super::{task_membership, EngineError, Result};
use mt_config::ModelConfig;
use mt_math::{fuzzy_and, fuzzy_or, MembershipVec};
use serde::{Deserialize, Serialize};

/// Per-step blocking masses, computed from the belief vector *before* it is
/// advanced. Task masses are present iff the model declares a task map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockingRecord {
    /// Self-transition mass: belief consistent with "nothing changes".
    #[serde(rename = "B")]
    pub b: f64,
    /// State-changing mass: belief consistent with "something changes".
    #[serde(rename = "C")]
    pub c: f64,
    /// Task-level self-transition mass.
    #[serde(rename = "B_task", default, skip_serializing_if = "Option::is_none")]
    pub b_task: Option<f64>,
    /// Task-level task-changing mass.
    #[serde(rename = "C_task", default, skip_serializing_if = "Option::is_none")]
    pub c_task: Option<f64>,
}

/// State-level blocking masses (B, C) for one step under `event`.
///
/// Uses the same conjunctions as belief propagation, partitioned by whether
/// the target state equals the source state.
pub fn blocking_masses(
    belief: &MembershipVec,
    model: &ModelConfig,
    event: &str,
) -> Result<(f64, f64)> {
    if belief.is_empty() {
        return Err(EngineError::EmptyBelief);
    }
    let fuzzified = model
        .input_fuzzified
        .get(event)
        .ok_or_else(|| EngineError::UnknownEvent(event.to_string()))?;

    let states: Vec<&str> = belief.keys().collect();
    let mut self_values = Vec::new();
    let mut change_values = Vec::new();
    for &current in &states {
        let current_grade = belief.grade(current);
        for (condition, input_grade) in fuzzified.iter() {
            for &target in &states {
                let mass = model.transition_mass(current, condition, target);
                let and_value = fuzzy_and(&[current_grade, input_grade, mass]);
                if target == current {
                    self_values.push(and_value);
                } else {
                    change_values.push(and_value);
                }
            }
        }
    }
    Ok((fuzzy_or(&self_values), fuzzy_or(&change_values)))
}

/// Task-level blocking masses (B_task, C_task) for one step under `event`.
///
/// The state-level computation lifted one abstraction level: for every
/// (current task `p`, current state `q`, input condition `σ`), the would-be
/// next-state vector of `(q, σ)` is lifted to task memberships, and each
/// resulting task `p'` contributes
/// `and(task_belief[p], belief[q], input[σ], next_tasks[p'])`
/// to B when `p' == p`, to C otherwise.
pub fn task_blocking_masses(
    belief: &MembershipVec,
    task_belief: &MembershipVec,
    model: &ModelConfig,
    event: &str,
) -> Result<(f64, f64)> {
    if belief.is_empty() {
        return Err(EngineError::EmptyBelief);
    }
    let task_map = model
        .task_labels
        .as_ref()
        .ok_or(EngineError::MissingTaskMap)?;
    let fuzzified = model
        .input_fuzzified
        .get(event)
        .ok_or_else(|| EngineError::UnknownEvent(event.to_string()))?;

    let states: Vec<&str> = belief.keys().collect();
    let mut self_values = Vec::new();
    let mut change_values = Vec::new();
    for (task, task_grade) in task_belief.iter() {
        for (state, state_grade) in belief.iter() {
            for (condition, input_grade) in fuzzified.iter() {
                let next_states: MembershipVec = states
                    .iter()
                    .map(|t| (t.to_string(), model.transition_mass(state, condition, t)))
                    .collect();
                let next_tasks = task_membership(&next_states, task_map);
                for (next_task, next_grade) in next_tasks.iter() {
                    let and_value =
                        fuzzy_and(&[task_grade, state_grade, input_grade, next_grade]);
                    if next_task == task {
                        self_values.push(and_value);
                    } else {
                        change_values.push(and_value);
                    }
                }
            }
        }
    }
    Ok((fuzzy_or(&self_values), fuzzy_or(&change_values)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mt_config::ScheduleEntry;
    use std::collections::BTreeMap;

    fn crisp_model(self_loop: bool) -> ModelConfig {
        let mut input_fuzzified = BTreeMap::new();
        input_fuzzified.insert("x".to_string(), MembershipVec::from([("x", 1.0)]));

        let target = if self_loop { "a" } else { "b" };
        let mut transitions = BTreeMap::new();
        let mut a_row = BTreeMap::new();
        a_row.insert("x".to_string(), MembershipVec::from([(target, 1.0)]));
        transitions.insert("a".to_string(), a_row);
        transitions.insert("b".to_string(), BTreeMap::new());

        ModelConfig {
            initial_belief: MembershipVec::from([("a", 1.0), ("b", 0.0)]),
            input_fuzzified,
            transitions,
            schedule: vec![ScheduleEntry::new("x", 1)],
            task_labels: None,
        }
    }

    #[test]
    fn crisp_self_loop_blocks_fully() {
        let model = crisp_model(true);
        let (b, c) = blocking_masses(&model.initial_belief, &model, "x").unwrap();
        assert_eq!(b, 1.0);
        assert_eq!(c, 0.0);
    }

    #[test]
    fn crisp_change_carries_no_blocking_mass() {
        let model = crisp_model(false);
        let (b, c) = blocking_masses(&model.initial_belief, &model, "x").unwrap();
        assert_eq!(b, 0.0);
        assert_eq!(c, 1.0);
    }

    #[test]
    fn masses_stay_in_unit_interval() {
        let mut model = crisp_model(true);
        model.initial_belief = MembershipVec::from([("a", 0.6), ("b", 0.7)]);
        let mut b_row = BTreeMap::new();
        b_row.insert(
            "x".to_string(),
            MembershipVec::from([("a", 0.5), ("b", 0.5)]),
        );
        model.transitions.insert("b".to_string(), b_row);

        let (b, c) = blocking_masses(&model.initial_belief, &model, "x").unwrap();
        // Self values: 0.6 (a stays) and 0.35 (b stays at half mass);
        // change values: 0.35 (b moves to a).
        assert!((b - 0.74).abs() < 1e-12, "b={b}");
        assert!((c - 0.35).abs() < 1e-12, "c={c}");
        // Fuzzy aggregates, not probabilities: B + C exceeds 1 here.
        assert!(b + c > 1.0);
    }

    #[test]
    fn task_masses_require_a_task_map() {
        let model = crisp_model(true);
        let task_belief = MembershipVec::from([("t", 1.0)]);
        let err =
            task_blocking_masses(&model.initial_belief, &task_belief, &model, "x").unwrap_err();
        assert!(matches!(err, EngineError::MissingTaskMap), "{err}");
    }

    #[test]
    fn task_level_self_loop_blocks_fully() {
        // Both states belong to the same task, so even a state change is a
        // task-level self-transition.
        let mut model = crisp_model(false);
        model.task_labels = Some(BTreeMap::from([(
            "running".to_string(),
            MembershipVec::from([("a", 1.0), ("b", 1.0)]),
        )]));
        let task_belief = task_membership(&model.initial_belief, model.task_labels.as_ref().unwrap());

        let (b_task, c_task) =
            task_blocking_masses(&model.initial_belief, &task_belief, &model, "x").unwrap();
        assert_eq!(b_task, 1.0);
        assert_eq!(c_task, 0.0);
    }

    #[test]
    fn task_level_change_is_detected() {
        // a and b carry different task labels; the crisp a->b transition is
        // a task change.
        let mut model = crisp_model(false);
        model.task_labels = Some(BTreeMap::from([
            ("idle".to_string(), MembershipVec::from([("a", 1.0)])),
            ("busy".to_string(), MembershipVec::from([("b", 1.0)])),
        ]));
        let task_belief = task_membership(&model.initial_belief, model.task_labels.as_ref().unwrap());

        let (b_task, c_task) =
            task_blocking_masses(&model.initial_belief, &task_belief, &model, "x").unwrap();
        assert_eq!(b_task, 0.0);
        assert_eq!(c_task, 1.0);
    }
}
