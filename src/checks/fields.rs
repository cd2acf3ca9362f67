//! Required field check (FLD-001).
//!
//! `name` must be a non-empty string; `github` and `repos` must be non-empty
//! lists. Under `WalletPolicy::Required` the `wallets` block and its `evm` and
//! `flow` addresses must be present too. Item types inside the lists and the
//! wallet address formats belong to the later checks.

use super::{elapsed_ms, CheckContext};
use crate::data::entry::{value_kind, RegistryEntry};
use crate::{Check, CheckCategory, CheckResult, WalletPolicy};
use serde_yaml::Value;
use std::time::Instant;

/// FLD-001: Required Fields
pub fn create_fld001_check() -> Check {
    Check {
        id: "FLD-001".to_string(),
        name: "Required Fields".to_string(),
        category: CheckCategory::Fields,
        description: "Verify name, github and repos are present and well typed".to_string(),
        result: None,
    }
}

/// Execute FLD-001: Required Fields
pub fn run_fld001(ctx: &mut CheckContext<'_>) -> CheckResult {
    let start = Instant::now();
    let errors = required_field_errors(ctx.entry, ctx.options.wallet_policy);
    CheckResult::from_errors(errors, elapsed_ms(start))
}

/// Collect one message per missing or invalid required field
pub fn required_field_errors(entry: &RegistryEntry, policy: WalletPolicy) -> Vec<String> {
    let mut errors = Vec::new();

    match entry.field("name") {
        None | Some(Value::Null) => errors.push(missing("name")),
        Some(Value::String(name)) if !name.trim().is_empty() => {}
        Some(Value::String(_)) => {
            errors.push("Invalid field: name must be a non-empty string".to_string())
        }
        Some(other) => errors.push(format!(
            "Invalid field: name must be a non-empty string, found {}",
            value_kind(other)
        )),
    }

    check_list(entry, "github", "GitHub usernames", &mut errors);
    check_list(entry, "repos", "repository URLs", &mut errors);

    if policy == WalletPolicy::Required {
        match entry.wallets() {
            None | Some(Value::Null) => errors.push(missing("wallets")),
            // Non-mapping blocks are reported by the wallet check
            Some(Value::Mapping(wallets)) => {
                for key in ["evm", "flow"] {
                    if matches!(wallets.get(key), None | Some(Value::Null)) {
                        errors.push(missing(&format!("wallets.{}", key)));
                    }
                }
            }
            Some(_) => {}
        }
    }

    errors
}

fn check_list(entry: &RegistryEntry, key: &str, what: &str, errors: &mut Vec<String>) {
    match entry.field(key) {
        None | Some(Value::Null) => errors.push(missing(key)),
        Some(Value::Sequence(items)) if !items.is_empty() => {}
        Some(Value::Sequence(_)) => errors.push(format!(
            "Invalid field: {} must be a non-empty list of {}",
            key, what
        )),
        Some(other) => errors.push(format!(
            "Invalid field: {} must be a non-empty list of {}, found {}",
            key,
            what,
            value_kind(other)
        )),
    }
}

fn missing(field: &str) -> String {
    format!("Missing required field: {}", field)
}
