//! Fuzzy conjunction and disjunction over membership grades.
//!
//! Grades live in [0, 1] and are *possibilities*, not probabilities: a
//! membership vector need not sum to 1. Conjunction is the product t-norm;
//! disjunction is the probabilistic sum (algebraic) s-norm:
//!
//! ```text
//! and(v_1..v_n) = Π v_i
//! or(v_1..v_n)  = 1 − Π (1 − v_i)
//! ```
//!
//! The algebraic OR is a deliberate choice over max-based OR: many weak
//! contributing paths accumulate toward a confident grade instead of being
//! capped at the strongest single path.

/// Product t-norm over one or more membership grades.
///
/// Zero-absorbing (any zero input yields zero) and non-increasing as more
/// grades are conjoined.
///
/// # Panics
///
/// Panics on an empty slice. An empty conjunction is a caller contract
/// violation; every call site conjoins at least one grade.
pub fn fuzzy_and(values: &[f64]) -> f64 {
    assert!(
        !values.is_empty(),
        "fuzzy_and requires at least one membership grade"
    );
    values.iter().product()
}

/// Probabilistic-sum s-norm over membership grades.
///
/// Returns a grade in [0, 1] for inputs in [0, 1]; zero iff every input is
/// zero; non-decreasing as more grades are disjoined. The empty disjunction
/// is 0.0 — "no contributing paths" carries no belief mass.
pub fn fuzzy_or(values: &[f64]) -> f64 {
    1.0 - values.iter().map(|v| 1.0 - v).product::<f64>()
}

/// Whether a value is a valid membership grade (finite, in [0, 1]).
pub fn is_grade(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}
