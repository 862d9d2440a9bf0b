//! Property-based tests for the fuzzy membership operators.
//!
//! Uses proptest to verify the operator laws hold across many random inputs.

use mt_math::{fuzzy_and, fuzzy_or, MembershipVec};
use proptest::prelude::*;

/// Tolerance for floating point comparisons.
const TOL: f64 = 1e-12;

fn grades() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..=1.0, 1..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Both operators stay inside [0, 1] for inputs in [0, 1].
    #[test]
    fn operators_stay_in_unit_interval(values in grades()) {
        let and = fuzzy_and(&values);
        let or = fuzzy_or(&values);
        prop_assert!((0.0..=1.0).contains(&and), "and={and}");
        prop_assert!((0.0..=1.0).contains(&or), "or={or}");
    }

    /// Conjunction is zero whenever any input is zero.
    #[test]
    fn and_is_zero_absorbing(values in grades(), position in 0usize..12) {
        let mut values = values;
        let idx = position % values.len();
        values[idx] = 0.0;
        prop_assert_eq!(fuzzy_and(&values), 0.0);
    }

    /// Conjoining one more grade can only shrink or hold the result.
    #[test]
    fn and_is_non_increasing(values in grades(), extra in 0.0f64..=1.0) {
        let before = fuzzy_and(&values);
        let mut values = values;
        values.push(extra);
        prop_assert!(fuzzy_and(&values) <= before + TOL);
    }

    /// Disjunction is zero iff every input is zero.
    #[test]
    fn or_zero_iff_all_zero(values in grades()) {
        let or = fuzzy_or(&values);
        let all_zero = values.iter().all(|v| *v == 0.0);
        if all_zero {
            prop_assert_eq!(or, 0.0);
        } else {
            prop_assert!(or > 0.0, "or={or} for {values:?}");
        }
    }

    /// Disjoining one more grade can only grow or hold the result.
    #[test]
    fn or_is_non_decreasing(values in grades(), extra in 0.0f64..=1.0) {
        let before = fuzzy_or(&values);
        let mut values = values;
        values.push(extra);
        prop_assert!(fuzzy_or(&values) >= before - TOL);
    }

    /// A full-confidence input saturates the disjunction.
    #[test]
    fn or_saturates_on_certain_input(values in grades()) {
        let mut values = values;
        values.push(1.0);
        prop_assert!((fuzzy_or(&values) - 1.0).abs() <= TOL);
    }

    /// Both operators are order-independent.
    #[test]
    fn operators_are_commutative(values in grades()) {
        let mut reversed = values.clone();
        reversed.reverse();
        prop_assert!((fuzzy_and(&values) - fuzzy_and(&reversed)).abs() <= TOL);
        prop_assert!((fuzzy_or(&values) - fuzzy_or(&reversed)).abs() <= TOL);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// The dominant entry always carries the maximum grade, and on ties the
    /// lexicographically first key wins.
    #[test]
    fn dominant_is_max_with_stable_tie_break(
        grades in prop::collection::vec(0.0f64..=1.0, 1..6),
    ) {
        let vec: MembershipVec = grades
            .iter()
            .enumerate()
            .map(|(i, g)| (format!("s{i}"), *g))
            .collect();
        let (key, grade) = vec.dominant().expect("non-empty vector");
        prop_assert_eq!(grade, vec.max_grade());
        // The dominant entry is the first key (ascending order) at the max.
        let first_at_max = vec
            .iter()
            .find(|(_, g)| *g == grade)
            .map(|(k, _)| k)
            .expect("max exists");
        prop_assert_eq!(key, first_at_max);
    }
}
