//! Check kinds and individual findings.

use mt_math::MembershipVec;
use serde::{Deserialize, Serialize};

/// The sixteen discrepancy checks: {dominant, threshold} × {state, task} ×
/// {error, nondeterministic confusion, vacuous confusion, blocking}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckKind {
    DominantStateError,
    ThresholdStateError,
    DominantTaskError,
    ThresholdTaskError,
    DominantStateConfusion,
    ThresholdStateConfusion,
    DominantTaskConfusion,
    ThresholdTaskConfusion,
    VacuousStateConfusion,
    ThresholdVacuousStateConfusion,
    VacuousTaskConfusion,
    ThresholdVacuousTaskConfusion,
    DominantStateBlocking,
    ThresholdStateBlocking,
    DominantTaskBlocking,
    ThresholdTaskBlocking,
}

impl CheckKind {
    /// All check kinds, in report order.
    pub const ALL: [CheckKind; 16] = [
        CheckKind::DominantStateError,
        CheckKind::ThresholdStateError,
        CheckKind::DominantTaskError,
        CheckKind::ThresholdTaskError,
        CheckKind::DominantStateConfusion,
        CheckKind::ThresholdStateConfusion,
        CheckKind::DominantTaskConfusion,
        CheckKind::ThresholdTaskConfusion,
        CheckKind::VacuousStateConfusion,
        CheckKind::ThresholdVacuousStateConfusion,
        CheckKind::VacuousTaskConfusion,
        CheckKind::ThresholdVacuousTaskConfusion,
        CheckKind::DominantStateBlocking,
        CheckKind::ThresholdStateBlocking,
        CheckKind::DominantTaskBlocking,
        CheckKind::ThresholdTaskBlocking,
    ];

    /// The stable report key for this check.
    pub fn as_str(self) -> &'static str {
        match self {
            CheckKind::DominantStateError => "Dominant State Error",
            CheckKind::ThresholdStateError => "Threshold State Error",
            CheckKind::DominantTaskError => "Dominant Task Error",
            CheckKind::ThresholdTaskError => "Threshold Task Error",
            CheckKind::DominantStateConfusion => "Dominant Nondeterministic State Confusion",
            CheckKind::ThresholdStateConfusion => "Threshold Nondeterministic State Confusion",
            CheckKind::DominantTaskConfusion => "Dominant Nondeterministic Task Confusion",
            CheckKind::ThresholdTaskConfusion => "Threshold Nondeterministic Task Confusion",
            CheckKind::VacuousStateConfusion => "Vacuous State Confusion",
            CheckKind::ThresholdVacuousStateConfusion => "Threshold Vacuous State Confusion",
            CheckKind::VacuousTaskConfusion => "Vacuous Task Confusion",
            CheckKind::ThresholdVacuousTaskConfusion => "Threshold Vacuous Task Confusion",
            CheckKind::DominantStateBlocking => "Dominant Blocking State",
            CheckKind::ThresholdStateBlocking => "Threshold Blocking State",
            CheckKind::DominantTaskBlocking => "Dominant Blocking Task",
            CheckKind::ThresholdTaskBlocking => "Threshold Blocking Task",
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One flagged step.
///
/// `step` is the belief-history index at which the condition holds; blocking
/// findings carry the index before the ground-truth change. The remaining
/// fields are the human-readable snapshot of the mismatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Belief-history index of the flagged step.
    pub step: usize,

    /// Input event applied at the flagged step, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    /// Dominant believed state or task at the flagged step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub believed: Option<String>,

    /// Ground-truth state or task at the flagged step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,

    /// Membership snapshot supporting the finding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memberships: Option<MembershipVec>,
}

impl Finding {
    /// A finding at `step` with no snapshot yet.
    pub fn at(step: usize) -> Self {
        Self {
            step,
            action: None,
            believed: None,
            actual: None,
            memberships: None,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_believed(mut self, believed: impl Into<String>) -> Self {
        self.believed = Some(believed.into());
        self
    }

    pub fn with_actual(mut self, actual: impl Into<String>) -> Self {
        self.actual = Some(actual.into());
        self
    }

    pub fn with_memberships(mut self, memberships: MembershipVec) -> Self {
        self.memberships = Some(memberships);
        self
    }
}
