//! The deterministic ground-truth system document.

use crate::schedule::ScheduleEntry;
use crate::validate::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Configuration of the actual automation: a deterministic state machine
/// driven by the same action schedule as the fuzzy model.
///
/// The declared state set is the key set of `transitions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Ground-truth state at step 0.
    pub initial_state: String,

    /// State → event → next state. Total over everything the schedule can
    /// reach; a miss during simulation is a fatal contract violation.
    pub transitions: BTreeMap<String, BTreeMap<String, String>>,

    /// The action schedule driving the simulation.
    pub schedule: Vec<ScheduleEntry>,

    /// Optional task abstraction: state → task label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_labels: Option<BTreeMap<String, String>>,
}

impl SystemConfig {
    /// Declared states, in ascending order.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.transitions.keys().map(String::as_str)
    }

    /// Successor of `state` under `event`, if the table has an entry.
    pub fn next(&self, state: &str, event: &str) -> Option<&str> {
        self.transitions
            .get(state)
            .and_then(|row| row.get(event))
            .map(String::as_str)
    }

    /// Task label of `state`, if a task map is configured.
    pub fn task_of(&self, state: &str) -> Option<&str> {
        self.task_labels
            .as_ref()
            .and_then(|labels| labels.get(state))
            .map(String::as_str)
    }

    /// Load and validate a system document from a JSON file.
    pub fn load(path: &Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ValidationError::Io(format!("{}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| ValidationError::Parse(format!("{}: {e}", path.display())))?;
        crate::validate::validate_system(&config)?;
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

#[cfg(test)]
mod tests {
    use super::*;

    fn toggle_system() -> SystemConfig {
        let mut transitions = BTreeMap::new();
        transitions.insert(
            "on".to_string(),
            BTreeMap::from([("press".to_string(), "off".to_string())]),
        );
        transitions.insert(
            "off".to_string(),
            BTreeMap::from([("press".to_string(), "on".to_string())]),
        );
        SystemConfig {
            initial_state: "off".to_string(),
            transitions,
            schedule: vec![ScheduleEntry::new("press", 1)],
            task_labels: Some(BTreeMap::from([
                ("on".to_string(), "running".to_string()),
                ("off".to_string(), "idle".to_string()),
            ])),
        }
    }

    #[test]
    fn next_follows_the_table() {
        let system = toggle_system();
        assert_eq!(system.next("off", "press"), Some("on"));
        assert_eq!(system.next("on", "press"), Some("off"));
        assert_eq!(system.next("on", "hold"), None);
    }

    #[test]
    fn task_lookup() {
        let system = toggle_system();
        assert_eq!(system.task_of("on"), Some("running"));
        assert_eq!(system.task_of("nowhere"), None);
    }
}
