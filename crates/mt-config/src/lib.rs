//! Mismatch Triage configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for the fuzzy mental-model document and the
//!   deterministic system document
//! - JSON loading and saving
//! - Semantic validation against the declared state/event sets, so a
//!   mistyped key fails at load time instead of silently contributing 0

pub mod model;
pub mod schedule;
pub mod system;
pub mod validate;

pub use model::ModelConfig;
pub use schedule::{expand_schedule, total_steps, ScheduleEntry};
pub use system::SystemConfig;
pub use validate::{
    validate_model, validate_pair, validate_system, ValidationError, ValidationResult,
};
