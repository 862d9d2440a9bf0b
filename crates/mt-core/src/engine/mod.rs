//! The fuzzy belief-propagation engine.
//!
//! One discrete step combines three tables: the operator's current belief
//! over states, the fuzzified reading of the applied input event, and the
//! fuzzy transition table. Every (current state, input condition) pair that
//! can reach a target state contributes the conjunction of its three grades;
//! contributions are disjoined per target because the scenarios are not
//! mutually exclusive.

pub mod blocking;
pub mod evolve;
pub mod propagate;
pub mod task;

pub use blocking::{blocking_masses, task_blocking_masses, BlockingRecord};
pub use evolve::{evolve, Evolution};
pub use propagate::next_belief;
pub use task::task_membership;

use thiserror::Error;

/// Errors from the propagation engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The fuzzified-input table has no entry for a scheduled event.
    #[error("no fuzzified-input entry for event `{0}`")]
    UnknownEvent(String),

    /// The belief vector declares no states.
    #[error("belief vector is empty; at least one state is required")]
    EmptyBelief,

    /// A task-level operation was requested on a model with no task map.
    #[error("model declares no task_labels; task-level masses are undefined")]
    MissingTaskMap,
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
