//! Output formatting tests.
//!
//! Format reports produced by real validation runs.

use crate::mocks::MockGitHub;
use flow_registry_check::cli::args::OutputFormat;
use flow_registry_check::cli::output::{get_formatter, JsonFormatter, OutputFormatter, TerminalFormatter};
use flow_registry_check::engine::result::ValidationReport;
use flow_registry_check::{ValidationOptions, Validator};

fn report(yaml: &str) -> ValidationReport {
    let api = MockGitHub::flow_team();
    Validator::new(&api, ValidationOptions::default()).validate_str(yaml, None)
}

fn invalid_report() -> ValidationReport {
    report("- name: Team\n  github: [alice, ghost]\n  repos: [https://github.com/acme/widget]\n  wallets:\n    evm: '0x123'\n")
}

#[test]
fn test_terminal_groups_checks_by_category() {
    let output = TerminalFormatter::new(false, false, false).format(&invalid_report());

    let order = [
        "DOCUMENT CHECKS",
        "FIELD CHECKS",
        "IDENTITY CHECKS",
        "REPOSITORY CHECKS",
        "ECOSYSTEM CHECKS",
        "WALLET CHECKS",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|header| output.find(header).unwrap_or_else(|| panic!("missing {}", header)))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    assert!(output.contains("Entry: Team"));
    assert!(output.contains("[SKIP] SUB-001: Single New Entry (No base revision supplied)"));
    assert!(output.contains("- GitHub user not found: ghost"));
    assert!(output.contains("Result: INVALID (2 errors)"));
}

#[test]
fn test_terminal_quiet_shows_only_failures() {
    let output = TerminalFormatter::new(false, false, true).format(&invalid_report());
    assert!(!output.contains("[PASS]"));
    assert!(!output.contains("[SKIP]"));
    assert!(output.contains("[FAIL] ID-001"));
    assert!(output.contains("[FAIL] WAL-001"));
}

#[test]
fn test_terminal_verbose_shows_timings() {
    let output = TerminalFormatter::new(false, true, false).format(&invalid_report());
    assert!(output.contains("Total time:"));
    assert!(output.contains("ms)"));
}

#[test]
fn test_json_matches_artifact() {
    let report = invalid_report();
    let output = JsonFormatter::new(true).format(&report);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    let result = report.result();
    assert_eq!(value["isValid"], result.is_valid());
    assert_eq!(value["errors"], serde_json::json!(result.errors()));
    assert_eq!(value["summary"]["errors"], 2);
    assert_eq!(value["checks"].as_array().unwrap().len(), report.checks.len());
    assert_eq!(value["checks"][0]["id"], "DOC-001");
}

#[test]
fn test_document_failure_output() {
    let report = report("- [broken\n");
    let output = TerminalFormatter::new(false, false, false).format(&report);
    assert!(output.contains("[FAIL] DOC-001: Registry Document (1 error)"));
    assert!(output.contains("Registry document unavailable"));
    assert!(!output.contains("Entry:"));
}

#[test]
fn test_get_formatter_selects_format() {
    let report = report("- name: Team\n  github: [alice]\n  repos: [https://github.com/acme/widget]\n");

    let text = get_formatter(OutputFormat::Text, true, false, false).format(&report);
    assert!(text.contains("Result: VALID"));

    let json = get_formatter(OutputFormat::Json, true, false, false).format(&report);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["isValid"], true);
}
