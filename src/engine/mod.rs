//! Validation engine module.
//!
//! Provides entry validation orchestration and result aggregation.

pub mod orchestrator;
pub mod result;
