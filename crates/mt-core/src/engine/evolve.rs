//! The evolution driver: iterate propagation over an action schedule.

use super::blocking::{blocking_masses, task_blocking_masses, BlockingRecord};
use super::propagate::next_belief;
use super::task::task_membership;
use super::Result;
use mt_config::{expand_schedule, ModelConfig};
use mt_math::MembershipVec;
use serde::{Deserialize, Serialize};

/// The three aligned histories produced by one evolution, plus the expanded
/// schedule that drove them.
///
/// `beliefs` (and `task_beliefs`, when present) have one more entry than
/// `inputs` and `blocking`: index 0 is the initial vector, and
/// `blocking[i]` describes the step from belief `i` to belief `i + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evolution {
    /// One input event per step, in order.
    pub inputs: Vec<String>,
    /// Belief over states, step by step, starting with the initial vector.
    pub beliefs: Vec<MembershipVec>,
    /// Blocking masses, computed from each pre-step belief.
    pub blocking: Vec<BlockingRecord>,
    /// Belief over task labels, present iff the model declares a task map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_beliefs: Option<Vec<MembershipVec>>,
}

impl Evolution {
    /// Number of steps driven (one less than the belief-history length).
    pub fn steps(&self) -> usize {
        self.inputs.len()
    }
}

/// Run the model's schedule to completion.
///
/// Per step: record blocking masses from the *current* vector (task masses
/// included when a task map is configured), then advance the belief, then
/// lift the *new* vector to task beliefs. All table lookups follow the
/// default-to-zero sparsity policy; the only fatal conditions are an
/// unfuzzified event or an empty belief vector.
pub fn evolve(model: &ModelConfig) -> Result<Evolution> {
    let inputs = expand_schedule(&model.schedule);
    let task_map = model.task_labels.as_ref();

    let mut beliefs = Vec::with_capacity(inputs.len() + 1);
    let mut blocking = Vec::with_capacity(inputs.len());
    let mut task_beliefs =
        task_map.map(|map| vec![task_membership(&model.initial_belief, map)]);

    let mut current = model.initial_belief.clone();
    beliefs.push(current.clone());

    for event in &inputs {
        let (b, c) = blocking_masses(&current, model, event)?;
        let (b_task, c_task) = match task_map {
            Some(map) => {
                let current_tasks = task_membership(&current, map);
                let (bt, ct) = task_blocking_masses(&current, &current_tasks, model, event)?;
                (Some(bt), Some(ct))
            }
            None => (None, None),
        };
        blocking.push(BlockingRecord { b, c, b_task, c_task });

        current = next_belief(&current, model, event)?;
        beliefs.push(current.clone());
        if let (Some(map), Some(history)) = (task_map, task_beliefs.as_mut()) {
            history.push(task_membership(&current, map));
        }
    }

    Ok(Evolution {
        inputs,
        beliefs,
        blocking,
        task_beliefs,
    })
}
