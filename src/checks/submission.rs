//! Submission shape check (SUB-001).
//!
//! Only the last registry entry is validated, which assumes the pull request
//! appended exactly one entry and left the others alone. When the registry
//! at the base revision is available, this check verifies that assumption.

use super::{elapsed_ms, CheckContext};
use crate::data::entry::RegistryDocument;
use crate::{Check, CheckCategory, CheckResult};
use std::time::Instant;

/// Registry at the pull request's base revision
#[derive(Debug, Clone)]
pub enum BaseRevision {
    Parsed(RegistryDocument),
    /// Could not be read or parsed; the message is reported as-is
    Unavailable(String),
}

/// SUB-001: Single New Entry
pub fn create_sub001_check() -> Check {
    Check {
        id: "SUB-001".to_string(),
        name: "Single New Entry".to_string(),
        category: CheckCategory::Document,
        description: "Verify the submission appends exactly one entry to the base registry"
            .to_string(),
        result: None,
    }
}

/// Execute SUB-001: Single New Entry
pub fn run_sub001(ctx: &mut CheckContext<'_>) -> CheckResult {
    let start = Instant::now();

    match ctx.base {
        None => CheckResult::Skip {
            reason: "No base revision supplied".to_string(),
        },
        Some(BaseRevision::Unavailable(message)) => {
            CheckResult::from_errors(vec![message.clone()], elapsed_ms(start))
        }
        Some(BaseRevision::Parsed(base)) => {
            CheckResult::from_errors(submission_errors(base, ctx.document), elapsed_ms(start))
        }
    }
}

/// Compare head with base: prefix untouched, one entry added
pub fn submission_errors(base: &RegistryDocument, head: &RegistryDocument) -> Vec<String> {
    let mut errors = Vec::new();

    for (i, (before, after)) in base.entries().iter().zip(head.entries()).enumerate() {
        if before != after {
            errors.push(format!(
                "Existing registry entry #{} ({}) was modified; submissions may only append a new entry",
                i + 1,
                before.display_name()
            ));
        }
    }

    let added = head.len() as i64 - base.len() as i64;
    if added != 1 {
        errors.push(format!(
            "Expected exactly one new registry entry, found {} (base has {}, head has {})",
            added,
            base.len(),
            head.len()
        ));
    }

    errors
}
