//! Property-based tests for engine invariants.

use mt_config::{ModelConfig, ScheduleEntry};
use mt_core::engine::{blocking_masses, next_belief, task_membership};
use mt_math::MembershipVec;
use proptest::prelude::*;
use std::collections::BTreeMap;

const STATES: [&str; 3] = ["s0", "s1", "s2"];

fn model_from(
    belief: [f64; 3],
    input_grade: f64,
    masses: [[f64; 3]; 3],
) -> (MembershipVec, ModelConfig) {
    let belief_vec: MembershipVec = STATES
        .iter()
        .zip(belief)
        .map(|(s, g)| (s.to_string(), g))
        .collect();

    let mut input_fuzzified = BTreeMap::new();
    input_fuzzified.insert("e".to_string(), MembershipVec::from([("e", input_grade)]));

    let mut transitions = BTreeMap::new();
    for (i, state) in STATES.iter().enumerate() {
        let targets: MembershipVec = STATES
            .iter()
            .zip(masses[i])
            .map(|(s, g)| (s.to_string(), g))
            .collect();
        let mut row = BTreeMap::new();
        row.insert("e".to_string(), targets);
        transitions.insert(state.to_string(), row);
    }

    let model = ModelConfig {
        initial_belief: belief_vec.clone(),
        input_fuzzified,
        transitions,
        schedule: vec![ScheduleEntry::new("e", 1)],
        task_labels: None,
    };
    (belief_vec, model)
}

fn unit() -> impl Strategy<Value = f64> + Clone {
    0.0f64..=1.0
}

fn unit_triple() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(unit())
}

fn mass_matrix() -> impl Strategy<Value = [[f64; 3]; 3]> {
    prop::array::uniform3(prop::array::uniform3(unit()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Propagated grades stay in [0, 1] for any tables in [0, 1].
    #[test]
    fn propagation_stays_in_unit_interval(
        belief in unit_triple(),
        input_grade in unit(),
        masses in mass_matrix(),
    ) {
        let (belief, model) = model_from(belief, input_grade, masses);
        let next = next_belief(&belief, &model, "e").unwrap();
        prop_assert_eq!(next.len(), 3);
        for (state, grade) in next.iter() {
            prop_assert!((0.0..=1.0).contains(&grade), "{state}={grade}");
        }
    }

    /// Blocking masses stay in [0, 1]; they are not complementary.
    #[test]
    fn blocking_masses_stay_in_unit_interval(
        belief in unit_triple(),
        input_grade in unit(),
        masses in mass_matrix(),
    ) {
        let (belief, model) = model_from(belief, input_grade, masses);
        let (b, c) = blocking_masses(&belief, &model, "e").unwrap();
        prop_assert!((0.0..=1.0).contains(&b), "B={b}");
        prop_assert!((0.0..=1.0).contains(&c), "C={c}");
    }

    /// A zero input grade kills every contribution: next belief is all
    /// zeros and both blocking masses vanish.
    #[test]
    fn zero_input_contributes_nothing(
        belief in unit_triple(),
        masses in mass_matrix(),
    ) {
        let (belief, model) = model_from(belief, 0.0, masses);
        let next = next_belief(&belief, &model, "e").unwrap();
        for (_, grade) in next.iter() {
            prop_assert_eq!(grade, 0.0);
        }
        let (b, c) = blocking_masses(&belief, &model, "e").unwrap();
        prop_assert_eq!(b, 0.0);
        prop_assert_eq!(c, 0.0);
    }

    /// Crisp degeneracy: a one-hot belief pushed through an arbitrary crisp
    /// transition function lands one-hot on the function's target.
    #[test]
    fn crisp_function_maps_one_hot_to_one_hot(
        source in 0usize..3,
        targets in prop::array::uniform3(0usize..3),
    ) {
        let mut belief = [0.0; 3];
        belief[source] = 1.0;
        let mut masses = [[0.0; 3]; 3];
        for (from, to) in targets.iter().enumerate() {
            masses[from][*to] = 1.0;
        }
        let (belief, model) = model_from(belief, 1.0, masses);

        let next = next_belief(&belief, &model, "e").unwrap();
        let expected = STATES[targets[source]];
        for (state, grade) in next.iter() {
            prop_assert_eq!(grade, if state == expected { 1.0 } else { 0.0 });
        }
    }

    /// Lifting a one-hot belief reduces to that state's column of the task
    /// map.
    #[test]
    fn one_hot_lift_reads_the_task_column(
        source in 0usize..3,
        column in prop::array::uniform2(unit()),
    ) {
        let mut belief = [0.0; 3];
        belief[source] = 1.0;
        let belief: MembershipVec = STATES
            .iter()
            .zip(belief)
            .map(|(s, g)| (s.to_string(), g))
            .collect();

        let task_map = BTreeMap::from([
            (
                "t0".to_string(),
                MembershipVec::from([(STATES[source], column[0])]),
            ),
            (
                "t1".to_string(),
                MembershipVec::from([(STATES[source], column[1])]),
            ),
        ]);

        let tasks = task_membership(&belief, &task_map);
        prop_assert_eq!(tasks.grade("t0"), column[0]);
        prop_assert_eq!(tasks.grade("t1"), column[1]);
    }
}
