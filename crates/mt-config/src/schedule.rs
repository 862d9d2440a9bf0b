//! Action schedules: ordered (event, repeat) pairs.

use serde::{Deserialize, Serialize};

/// One schedule entry: apply `event` for `steps` consecutive steps.
///
/// Serialized as a two-element array `["event", steps]` so hand-written
/// schedule documents stay compact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, u32)", into = "(String, u32)")]
pub struct ScheduleEntry {
    pub event: String,
    pub steps: u32,
}

impl ScheduleEntry {
    pub fn new(event: impl Into<String>, steps: u32) -> Self {
        Self {
            event: event.into(),
            steps,
        }
    }
}

impl From<(String, u32)> for ScheduleEntry {
    fn from((event, steps): (String, u32)) -> Self {
        Self { event, steps }
    }
}

impl From<ScheduleEntry> for (String, u32) {
    fn from(entry: ScheduleEntry) -> Self {
        (entry.event, entry.steps)
    }
}

/// Total number of discrete steps the schedule drives.
pub fn total_steps(schedule: &[ScheduleEntry]) -> usize {
    schedule.iter().map(|e| e.steps as usize).sum()
}

/// Expand the schedule into one event per step.
pub fn expand_schedule(schedule: &[ScheduleEntry]) -> Vec<String> {
    let mut expanded = Vec::with_capacity(total_steps(schedule));
    for entry in schedule {
        for _ in 0..entry.steps {
            expanded.push(entry.event.clone());
        }
    }
    expanded
}
