//! CLI integration tests.
//!
//! Tests for argument parsing and for the exit codes and artifact of the
//! `registry-check` binary.

use crate::mocks::{contents_body, StubServer};
use clap::Parser;
use flow_registry_check::cli::args::{Args, Command, OutputFormat};
use flow_registry_check::{ValidatorConfig, WalletPolicy};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command as Process, Output};

const VALID_ENTRY: &str = "- name: Team\n  github: [alice]\n  repos: [https://github.com/acme/widget]\n";

fn run_binary(args: &[&str]) -> Output {
    Process::new(env!("CARGO_BIN_EXE_registry-check"))
        .args(args)
        .env_remove("REGISTRY_FILE")
        .env_remove("GITHUB_TOKEN")
        .env_remove("GITHUB_API_URL")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

fn team_server() -> StubServer {
    StubServer::start(vec![
        ("/users/alice", 200, "{}".to_string()),
        ("/repos/acme/widget", 200, "{}".to_string()),
        (
            "/repos/acme/widget/contents/README.md",
            200,
            contents_body("Built on Flow"),
        ),
    ])
}

fn read_artifact(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_config_from_args() {
    let args = Args::try_parse_from([
        "registry-check",
        "teams.yaml",
        "--require-wallets",
        "--skip-ecosystem",
        "--token",
        "  ",
        "--api-url",
        "https://ghe.example.com/api/v3",
    ])
    .unwrap();
    let config = ValidatorConfig::from_args(args.check_args());

    assert_eq!(config.registry_path, PathBuf::from("teams.yaml"));
    assert_eq!(config.options.wallet_policy, WalletPolicy::Required);
    assert!(!config.options.check_ecosystem);
    assert_eq!(config.github.token, None);
    assert_eq!(config.github.api_url, "https://ghe.example.com/api/v3");
}

#[test]
fn test_check_subcommand_equivalent_to_default() {
    let implicit = Args::try_parse_from(["registry-check", "r.yaml", "--format", "json"]).unwrap();
    let explicit =
        Args::try_parse_from(["registry-check", "check", "r.yaml", "--format", "json"]).unwrap();

    assert!(matches!(explicit.command, Some(Command::Check(_))));
    assert_eq!(implicit.check_args(), explicit.check_args());
    assert_eq!(implicit.check_args().format, OutputFormat::Json);
}

#[test]
fn test_valid_entry_exits_zero() {
    let server = team_server();
    let dir = tempfile::tempdir().unwrap();
    let registry = dir.path().join("registry.yaml");
    let artifact = dir.path().join("out").join("validation-result.json");
    fs::write(&registry, VALID_ENTRY).unwrap();

    let output = run_binary(&[
        registry.to_str().unwrap(),
        "--api-url",
        server.url(),
        "-o",
        artifact.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(0), "{:?}", output);
    let value = read_artifact(&artifact);
    assert_eq!(value["isValid"], true);
    assert_eq!(value["errors"], serde_json::json!([]));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Result: VALID"));
}

#[test]
fn test_invalid_entry_exits_one() {
    let server = team_server();
    let dir = tempfile::tempdir().unwrap();
    let registry = dir.path().join("registry.yaml");
    let artifact = dir.path().join("result.json");
    fs::write(
        &registry,
        format!("{}  wallets:\n    evm: '0x123'\n", VALID_ENTRY),
    )
    .unwrap();

    let output = run_binary(&[
        registry.to_str().unwrap(),
        "--api-url",
        server.url(),
        "--output",
        artifact.to_str().unwrap(),
        "--format",
        "json",
    ]);

    assert_eq!(output.status.code(), Some(1), "{:?}", output);
    let value = read_artifact(&artifact);
    assert_eq!(value["isValid"], false);
    assert_eq!(value["errors"].as_array().unwrap().len(), 1);

    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed["errors"], value["errors"]);
}

#[test]
fn test_missing_registry_exits_one_with_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("result.json");

    let output = run_binary(&[
        dir.path().join("absent.yaml").to_str().unwrap(),
        "--api-url",
        "http://127.0.0.1:9",
        "-o",
        artifact.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1), "{:?}", output);
    let value = read_artifact(&artifact);
    assert_eq!(value["isValid"], false);
    assert!(value["errors"][0]
        .as_str()
        .unwrap()
        .starts_with("Error reading registry file"));
}

#[test]
fn test_runtime_error_exits_three() {
    let dir = tempfile::tempdir().unwrap();
    let registry = dir.path().join("registry.yaml");
    fs::write(&registry, VALID_ENTRY).unwrap();

    let output = run_binary(&[
        registry.to_str().unwrap(),
        "--api-url",
        "not a url",
        "-o",
        dir.path().join("result.json").to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(3), "{:?}", output);

    let value = read_artifact(&dir.path().join("result.json"));
    assert_eq!(value["isValid"], false);
    assert_eq!(value["errors"].as_array().unwrap().len(), 1);
    assert!(value["errors"][0]
        .as_str()
        .unwrap()
        .starts_with("Validation could not run:"));
}

#[test]
fn test_usage_error_exits_three() {
    let output = run_binary(&["--format", "xml"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_list_and_version_commands() {
    let list = run_binary(&["list"]);
    assert_eq!(list.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&list.stdout);
    for id in ["SUB-001", "FLD-001", "ID-001", "ID-002", "REPO-001", "ECO-001", "WAL-001"] {
        assert!(stdout.contains(id), "missing {} in {}", id, stdout);
    }

    let version = run_binary(&["version"]);
    assert_eq!(version.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&version.stdout).starts_with("registry-check "));
}
