//! Account handle checks (ID-001, ID-002).
//!
//! GitHub handles must be non-blank and resolve to an existing account.
//! X handles are format-checked only; there is no lookup for them.

use super::{elapsed_ms, CheckContext};
use crate::data::entry::value_kind;
use crate::platform::github::{GitHubApi, GitHubError};
use crate::{Check, CheckCategory, CheckResult};
use serde_yaml::Value;
use std::time::Instant;
use tracing::debug;

/// ID-001: GitHub Accounts
pub fn create_id001_check() -> Check {
    Check {
        id: "ID-001".to_string(),
        name: "GitHub Accounts".to_string(),
        category: CheckCategory::Identity,
        description: "Verify every github handle names an existing GitHub account".to_string(),
        result: None,
    }
}

/// ID-002: X Handles
pub fn create_id002_check() -> Check {
    Check {
        id: "ID-002".to_string(),
        name: "X Handles".to_string(),
        category: CheckCategory::Identity,
        description: "Verify optional x handles are non-blank strings".to_string(),
        result: None,
    }
}

/// Execute ID-001: GitHub Accounts
pub fn run_id001(ctx: &mut CheckContext<'_>) -> CheckResult {
    let start = Instant::now();

    let Some(handles) = ctx.entry.github() else {
        return CheckResult::Skip {
            reason: "No github list to check".to_string(),
        };
    };

    let errors = github_handle_errors(handles, ctx.api);
    CheckResult::from_errors(errors, elapsed_ms(start))
}

/// Execute ID-002: X Handles
pub fn run_id002(ctx: &mut CheckContext<'_>) -> CheckResult {
    let start = Instant::now();

    let handles = match ctx.entry.field("x") {
        None | Some(Value::Null) => {
            return CheckResult::Skip {
                reason: "No x handles declared".to_string(),
            }
        }
        Some(Value::Sequence(handles)) => handles,
        Some(other) => {
            return CheckResult::from_errors(
                vec![format!(
                    "Invalid field: x must be a list of handles, found {}",
                    value_kind(other)
                )],
                elapsed_ms(start),
            )
        }
    };

    let errors = handles
        .iter()
        .enumerate()
        .filter(|(_, handle)| non_blank(handle).is_none())
        .map(|(i, _)| format!("Invalid X handle at x[{}]: must be a non-empty string", i))
        .collect();

    CheckResult::from_errors(errors, elapsed_ms(start))
}

/// Format-check each handle, then look it up; one message per bad handle
pub fn github_handle_errors(handles: &[Value], api: &dyn GitHubApi) -> Vec<String> {
    let mut errors = Vec::new();

    for (i, handle) in handles.iter().enumerate() {
        let Some(login) = non_blank(handle) else {
            errors.push(format!(
                "Invalid GitHub username at github[{}]: must be a non-empty string",
                i
            ));
            continue;
        };

        match api.user_exists(login) {
            Ok(()) => debug!(login, "GitHub account exists"),
            Err(e) => errors.push(user_lookup_error(login, &e)),
        }
    }

    errors
}

fn user_lookup_error(login: &str, error: &GitHubError) -> String {
    if error.is_not_found() {
        format!("GitHub user not found: {}", login)
    } else {
        format!("Could not verify GitHub user {}: {}", login, error)
    }
}

fn non_blank(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}
