//! Wallet address check (WAL-001).

use super::{elapsed_ms, CheckContext};
use crate::data::entry::value_kind;
use crate::{Check, CheckCategory, CheckResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::time::Instant;

static EVM_ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("EVM address pattern is valid"));

static FLOW_ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{16}$").expect("Flow address pattern is valid"));

/// WAL-001: Wallet Addresses
pub fn create_wal001_check() -> Check {
    Check {
        id: "WAL-001".to_string(),
        name: "Wallet Addresses".to_string(),
        category: CheckCategory::Wallet,
        description: "Verify declared EVM and Flow addresses are well formed".to_string(),
        result: None,
    }
}

/// Execute WAL-001: Wallet Addresses
pub fn run_wal001(ctx: &mut CheckContext<'_>) -> CheckResult {
    let start = Instant::now();

    match ctx.entry.wallets() {
        None | Some(Value::Null) => CheckResult::Skip {
            reason: "No wallets declared".to_string(),
        },
        Some(Value::Mapping(wallets)) => {
            CheckResult::from_errors(wallet_errors(wallets), elapsed_ms(start))
        }
        Some(other) => CheckResult::from_errors(
            vec![format!(
                "Invalid field: wallets must be a mapping with evm and flow addresses, found {}",
                value_kind(other)
            )],
            elapsed_ms(start),
        ),
    }
}

/// One message per malformed address; absent addresses are not checked here
pub fn wallet_errors(wallets: &Mapping) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(message) = check_address(wallets.get("evm"), "EVM", &EVM_ADDRESS, 40) {
        errors.push(message);
    }
    if let Some(message) = check_address(wallets.get("flow"), "Flow", &FLOW_ADDRESS, 16) {
        errors.push(message);
    }

    errors
}

pub fn is_valid_evm_address(address: &str) -> bool {
    EVM_ADDRESS.is_match(address)
}

pub fn is_valid_flow_address(address: &str) -> bool {
    FLOW_ADDRESS.is_match(address)
}

fn check_address(
    value: Option<&Value>,
    label: &str,
    pattern: &Regex,
    hex_len: usize,
) -> Option<String> {
    let expected = format!("expected 0x followed by {} hex characters", hex_len);

    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(address)) if pattern.is_match(address) => None,
        Some(Value::String(address)) => Some(format!(
            "Invalid {} wallet address: {} ({})",
            label, address, expected
        )),
        // Unquoted hex is read as a YAML integer and loses its formatting
        Some(Value::Number(number)) => Some(format!(
            "Invalid {} wallet address: {} ({}; quote the address in YAML)",
            label, number, expected
        )),
        Some(other) => Some(format!(
            "Invalid {} wallet address: found {} ({})",
            label,
            value_kind(other),
            expected
        )),
    }
}
