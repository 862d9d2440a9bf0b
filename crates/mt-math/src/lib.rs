//! Mismatch Triage membership math.

pub mod math;

pub use math::fuzzy::*;
pub use math::membership::*;
