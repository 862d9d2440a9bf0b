//! Single-step belief propagation.

use super::{EngineError, Result};
use mt_config::ModelConfig;
use mt_math::{fuzzy_and, fuzzy_or, MembershipVec};

/// Advance a belief vector by one step under `event`.
///
/// For every target state `t`, every (current state `s`, input condition
/// `c`) pair contributes
///
/// ```text
/// and(belief[s], fuzzified[event][c], transition[s][c][t])
/// ```
///
/// and the new grade of `t` is the fuzzy OR of all contributions. Missing
/// transition entries contribute 0 by the declared sparsity policy. In the
/// fully crisp case (all grades in {0, 1}) this degenerates to a
/// deterministic one-hot table lookup.
pub fn next_belief(
    belief: &MembershipVec,
    model: &ModelConfig,
    event: &str,
) -> Result<MembershipVec> {
    if belief.is_empty() {
        return Err(EngineError::EmptyBelief);
    }
    let fuzzified = model
        .input_fuzzified
        .get(event)
        .ok_or_else(|| EngineError::UnknownEvent(event.to_string()))?;

    let states: Vec<&str> = belief.keys().collect();
    let mut next = MembershipVec::new();
    for &target in &states {
        let mut contributions = Vec::with_capacity(states.len() * fuzzified.len());
        for &current in &states {
            let current_grade = belief.grade(current);
            for (condition, input_grade) in fuzzified.iter() {
                let mass = model.transition_mass(current, condition, target);
                contributions.push(fuzzy_and(&[current_grade, input_grade, mass]));
            }
        }
        next.set(target, fuzzy_or(&contributions));
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mt_config::ScheduleEntry;
    use std::collections::BTreeMap;

    /// Two states, one crisp self-loop on "x" from A. The §8-style baseline:
    /// belief must stay pinned on A.
    fn self_loop_model() -> ModelConfig {
        let mut input_fuzzified = BTreeMap::new();
        input_fuzzified.insert("x".to_string(), MembershipVec::from([("x", 1.0)]));

        let mut transitions = BTreeMap::new();
        let mut a_row = BTreeMap::new();
        a_row.insert("x".to_string(), MembershipVec::from([("a", 1.0)]));
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
    fn crisp_self_loop_is_a_fixpoint() {
        let model = self_loop_model();
        let next = next_belief(&model.initial_belief, &model, "x").unwrap();
        assert_eq!(next.grade("a"), 1.0);
        assert_eq!(next.grade("b"), 0.0);
    }

    #[test]
    fn symmetric_swap_preserves_split_belief() {
        // a <-> b under "x", belief split 0.5/0.5: the swap is symmetric, so
        // the belief must come back unchanged.
        let mut model = self_loop_model();
        let mut a_row = BTreeMap::new();
        a_row.insert("x".to_string(), MembershipVec::from([("b", 1.0)]));
        let mut b_row = BTreeMap::new();
        b_row.insert("x".to_string(), MembershipVec::from([("a", 1.0)]));
        model.transitions.insert("a".to_string(), a_row);
        model.transitions.insert("b".to_string(), b_row);
        let belief = MembershipVec::from([("a", 0.5), ("b", 0.5)]);

        let next = next_belief(&belief, &model, "x").unwrap();
        assert_eq!(next.grade("a"), 0.5);
        assert_eq!(next.grade("b"), 0.5);
    }

    #[test]
    fn ambiguous_input_splits_mass() {
        // The observed event half-resembles a second condition that routes
        // to b; both targets should gather mass, each below certainty.
        let mut model = self_loop_model();
        model
            .input_fuzzified
            .insert("y".to_string(), MembershipVec::from([("y", 1.0)]));
        model.input_fuzzified.insert(
            "x".to_string(),
            MembershipVec::from([("x", 1.0), ("y", 0.5)]),
        );
        model
            .transitions
            .get_mut("a")
            .unwrap()
            .insert("y".to_string(), MembershipVec::from([("b", 1.0)]));

        let next = next_belief(&model.initial_belief, &model, "x").unwrap();
        assert_eq!(next.grade("a"), 1.0);
        assert_eq!(next.grade("b"), 0.5);
    }

    #[test]
    fn unknown_event_is_fatal() {
        let model = self_loop_model();
        let err = next_belief(&model.initial_belief, &model, "zap").unwrap_err();
        assert!(matches!(err, EngineError::UnknownEvent(_)), "{err}");
    }

    #[test]
    fn empty_belief_is_fatal() {
        let model = self_loop_model();
        let err = next_belief(&MembershipVec::new(), &model, "x").unwrap_err();
        assert!(matches!(err, EngineError::EmptyBelief), "{err}");
    }

    #[test]
    fn grades_stay_in_unit_interval() {
        let mut model = self_loop_model();
        model.initial_belief = MembershipVec::from([("a", 0.9), ("b", 0.8)]);
        let mut a_row = BTreeMap::new();
        a_row.insert(
            "x".to_string(),
            MembershipVec::from([("a", 0.7), ("b", 0.6)]),
        );
        let mut b_row = BTreeMap::new();
        b_row.insert(
            "x".to_string(),
            MembershipVec::from([("a", 0.5), ("b", 0.4)]),
        );
        model.transitions.insert("a".to_string(), a_row);
        model.transitions.insert("b".to_string(), b_row);

        let next = next_belief(&model.initial_belief, &model, "x").unwrap();
        for (_, grade) in next.iter() {
            assert!((0.0..=1.0).contains(&grade), "grade {grade}");
        }
    }
}
