//! Semantic validation against the declared state and event sets.
//!
//! The tables are sparse by design — a missing transition entry contributes
//! 0 belief mass. Validation therefore never demands completeness, but it
//! does demand that every key *mentioned* belongs to a declared set, so a
//! typo fails at load time instead of silently contributing nothing.

use crate::model::ModelConfig;
use crate::system::SystemConfig;
use mt_math::{is_grade, MembershipVec};
use std::collections::BTreeSet;
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration contract violations.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("semantic validation failed: {0}")]
    Semantic(String),
}

fn check_grades(field: &str, vec: &MembershipVec) -> ValidationResult<()> {
    for (key, grade) in vec.iter() {
        if !is_grade(grade) {
            return Err(ValidationError::InvalidValue {
                field: format!("{field}.{key}"),
                message: format!("membership grade must be in [0, 1], got {grade}"),
            });
        }
    }
    Ok(())
}

fn check_declared(
    field: &str,
    name: &str,
    declared: &BTreeSet<&str>,
    kind: &str,
) -> ValidationResult<()> {
    if !declared.contains(name) {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!(
                "unknown {kind} `{name}`; declared: {}",
                declared.iter().cloned().collect::<Vec<_>>().join(", ")
            ),
        });
    }
    Ok(())
}

/// Validate a fuzzy mental-model document.
pub fn validate_model(config: &ModelConfig) -> ValidationResult<()> {
    if config.initial_belief.is_empty() {
        return Err(ValidationError::MissingField(
            "initial_belief must declare at least one state".to_string(),
        ));
    }
    check_grades("initial_belief", &config.initial_belief)?;

    let states: BTreeSet<&str> = config.states().collect();
    let events: BTreeSet<&str> = config.events().collect();

    if config.input_fuzzified.is_empty() {
        return Err(ValidationError::MissingField(
            "input_fuzzified must declare at least one input event".to_string(),
        ));
    }
    for (event, vec) in &config.input_fuzzified {
        let field = format!("input_fuzzified.{event}");
        if vec.is_empty() {
            return Err(ValidationError::InvalidValue {
                field,
                message: "fuzzified vector must contain at least one condition".to_string(),
            });
        }
        check_grades(&field, vec)?;
        for (condition, _) in vec.iter() {
            check_declared(&field, condition, &events, "input condition")?;
        }
    }

    for state in &states {
        if !config.transitions.contains_key(*state) {
            return Err(ValidationError::MissingField(format!(
                "transitions.{state}"
            )));
        }
    }
    for (state, row) in &config.transitions {
        check_declared("transitions", state, &states, "state")?;
        for (condition, targets) in row {
            let field = format!("transitions.{state}.{condition}");
            check_declared(&field, condition, &events, "input condition")?;
            check_grades(&field, targets)?;
            for (next, _) in targets.iter() {
                check_declared(&field, next, &states, "state")?;
            }
        }
    }

    validate_schedule("schedule", &config.schedule, &events)?;

    if let Some(task_labels) = &config.task_labels {
        if task_labels.is_empty() {
            return Err(ValidationError::MissingField(
                "task_labels must declare at least one task".to_string(),
            ));
        }
        for (task, members) in task_labels {
            let field = format!("task_labels.{task}");
            check_grades(&field, members)?;
            for (state, _) in members.iter() {
                check_declared(&field, state, &states, "state")?;
            }
        }
    }

    Ok(())
}

/// Validate a deterministic system document.
pub fn validate_system(config: &SystemConfig) -> ValidationResult<()> {
    if config.transitions.is_empty() {
        return Err(ValidationError::MissingField(
            "transitions must declare at least one state".to_string(),
        ));
    }
    let states: BTreeSet<&str> = config.states().collect();

    check_declared("initial_state", &config.initial_state, &states, "state")?;

    let mut events: BTreeSet<&str> = BTreeSet::new();
    for (state, row) in &config.transitions {
        for (event, next) in row {
            events.insert(event.as_str());
            check_declared(
                &format!("transitions.{state}.{event}"),
                next,
                &states,
                "state",
            )?;
        }
    }

    validate_schedule("schedule", &config.schedule, &events)?;

    if let Some(task_labels) = &config.task_labels {
        // The simulator labels every visited state, so the map must be total.
        for state in &states {
            if !task_labels.contains_key(*state) {
                return Err(ValidationError::MissingField(format!(
                    "task_labels.{state}"
                )));
            }
        }
        for state in task_labels.keys() {
            check_declared("task_labels", state, &states, "state")?;
        }
    }

    Ok(())
}

fn validate_schedule(
    field: &str,
    schedule: &[crate::schedule::ScheduleEntry],
    events: &BTreeSet<&str>,
) -> ValidationResult<()> {
    for (idx, entry) in schedule.iter().enumerate() {
        if entry.steps == 0 {
            return Err(ValidationError::InvalidValue {
                field: format!("{field}[{idx}]"),
                message: "repeat count must be at least 1".to_string(),
            });
        }
        check_declared(&format!("{field}[{idx}]"), &entry.event, events, "event")?;
    }
    Ok(())
}

/// Validate that a model and a system document describe the same machine.
///
/// Required before checkers can compare the two trajectories: same state
/// set, same schedule length, and task layers either both present (with the
/// system's labels drawn from the model's task set) or both absent.
pub fn validate_pair(model: &ModelConfig, system: &SystemConfig) -> ValidationResult<()> {
    let model_states: BTreeSet<&str> = model.states().collect();
    let system_states: BTreeSet<&str> = system.states().collect();
    if model_states != system_states {
        let only_model: Vec<_> = model_states.difference(&system_states).cloned().collect();
        let only_system: Vec<_> = system_states.difference(&model_states).cloned().collect();
        return Err(ValidationError::Semantic(format!(
            "model and system disagree on the state set (model-only: [{}], system-only: [{}])",
            only_model.join(", "),
            only_system.join(", ")
        )));
    }

    let model_steps = crate::schedule::total_steps(&model.schedule);
    let system_steps = crate::schedule::total_steps(&system.schedule);
    if model_steps != system_steps {
        return Err(ValidationError::Semantic(format!(
            "model schedule drives {model_steps} steps but system schedule drives {system_steps}"
        )));
    }

    match (&model.task_labels, &system.task_labels) {
        (Some(model_tasks), Some(system_tasks)) => {
            let tasks: BTreeSet<&str> = model_tasks.keys().map(String::as_str).collect();
            for (state, task) in system_tasks {
                if !tasks.contains(task.as_str()) {
                    return Err(ValidationError::Semantic(format!(
                        "system labels state `{state}` with task `{task}`, \
                         which the model's task map does not declare"
                    )));
                }
            }
        }
        (None, None) => {}
        (Some(_), None) => {
            return Err(ValidationError::Semantic(
                "model declares task_labels but the system document does not".to_string(),
            ));
        }
        (None, Some(_)) => {
            return Err(ValidationError::Semantic(
                "system declares task_labels but the model document does not".to_string(),
            ));
        }
    }

    Ok(())
}
