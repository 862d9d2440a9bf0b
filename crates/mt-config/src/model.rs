//! The fuzzy mental-model document.

use crate::schedule::ScheduleEntry;
use crate::validate::{ValidationError, ValidationResult};
use mt_math::MembershipVec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Configuration of a fuzzy mental model: how an operator's belief over
/// automation states evolves under fuzzified inputs.
///
/// The declared state set is the key set of `initial_belief`; the declared
/// input-event set is the key set of `input_fuzzified`. Every other table is
/// validated against those two sets at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Operator belief over states at step 0.
    pub initial_belief: MembershipVec,

    /// Input event → membership over canonical input conditions.
    ///
    /// Conditions are themselves declared input events; the vector expresses
    /// how much an observed event resembles each canonical one.
    pub input_fuzzified: BTreeMap<String, MembershipVec>,

    /// State → input condition → membership over next states.
    ///
    /// Sparse by design: a missing condition row or next-state entry
    /// contributes 0 mass. Every declared state must have a (possibly
    /// empty-rowed) entry.
    pub transitions: BTreeMap<String, BTreeMap<String, MembershipVec>>,

    /// The action schedule driving the evolution.
    pub schedule: Vec<ScheduleEntry>,

    /// Optional task abstraction: task label → state → membership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_labels: Option<BTreeMap<String, MembershipVec>>,
}

impl ModelConfig {
    /// Declared states, in ascending order.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.initial_belief.keys()
    }

    /// Declared input events, in ascending order.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.input_fuzzified.keys().map(String::as_str)
    }

    /// Transition mass for `state --condition--> next`.
    ///
    /// Missing condition rows and next-state entries yield 0.0 (the declared
    /// default-to-zero sparsity policy).
    pub fn transition_mass(&self, state: &str, condition: &str, next: &str) -> f64 {
        self.transitions
            .get(state)
            .and_then(|row| row.get(condition))
            .map(|targets| targets.grade(next))
            .unwrap_or(0.0)
    }

    /// Load and validate a model document from a JSON file.
    pub fn load(path: &Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ValidationError::Io(format!("{}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| ValidationError::Parse(format!("{}: {e}", path.display())))?;
        crate::validate::validate_model(&config)?;
        Ok(config)
    }

    /// Write the document as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> ValidationResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ValidationError::Parse(e.to_string()))?;
        std::fs::write(path, content)
            .map_err(|e| ValidationError::Io(format!("{}: {e}", path.display())))
    }
}
