//! Deterministic ground-truth simulator.
//!
//! Runs the same action schedule as the fuzzy engine against the machine's
//! actual transition table. The result is the reference trajectory the
//! discrepancy checkers compare beliefs against.

use mt_config::{expand_schedule, SystemConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the ground-truth simulator.
#[derive(Debug, Error)]
pub enum SimError {
    /// The transition table has no entry for the reached (state, action)
    /// pair. The ground-truth table is total by contract; a miss here is a
    /// configuration bug, not sparsity.
    #[error("no ground-truth transition from state `{state}` on action `{action}`")]
    MissingTransition { state: String, action: String },

    /// A visited state is missing from the task map.
    #[error("no task label for ground-truth state `{state}`")]
    MissingTaskLabel { state: String },
}

/// Result type for simulator operations.
pub type Result<T> = std::result::Result<T, SimError>;

/// One step of the ground-truth trajectory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryStep {
    /// The machine's actual state.
    pub state: String,
    /// The state's task label, when the system declares a task map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
}

/// The machine's actual state sequence: one entry per belief-history index
/// (initial state included).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory {
    pub steps: Vec<TrajectoryStep>,
}

impl Trajectory {
    /// Number of entries (1 + driven steps).
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// State labels in step order.
    pub fn state_labels(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.state.as_str()).collect()
    }

    /// Task labels in step order; `None` unless every step carries one.
    pub fn task_labels(&self) -> Option<Vec<&str>> {
        self.steps
            .iter()
            .map(|s| s.task.as_deref())
            .collect::<Option<Vec<_>>>()
    }
}

/// Simulate the system's schedule to completion.
pub fn simulate(system: &SystemConfig) -> Result<Trajectory> {
    let inputs = expand_schedule(&system.schedule);
    let mut steps = Vec::with_capacity(inputs.len() + 1);

    let mut current = system.initial_state.clone();
    steps.push(TrajectoryStep {
        task: task_of(system, &current)?,
        state: current.clone(),
    });

    for event in &inputs {
        let next = system
            .next(&current, event)
            .ok_or_else(|| SimError::MissingTransition {
                state: current.clone(),
                action: event.clone(),
            })?
            .to_string();
        current = next;
        steps.push(TrajectoryStep {
            task: task_of(system, &current)?,
            state: current.clone(),
        });
    }

    Ok(Trajectory { steps })
}

fn task_of(system: &SystemConfig, state: &str) -> Result<Option<String>> {
    match &system.task_labels {
        Some(labels) => labels
            .get(state)
            .cloned()
            .map(Some)
            .ok_or_else(|| SimError::MissingTaskLabel {
                state: state.to_string(),
            }),
        None => Ok(None),
    }
}
