//! Flow ecosystem requirement (ECO-001).
//!
//! Every verified repository must show at least one Flow marker. Probes run
//! in a fixed order and stop at the first hit:
//! 1. README.md mentions "on Flow" or "Flow blockchain"
//! 2. package.json depends on @onflow/fcl or @onflow/kit
//! 3. go.mod requires the Flow Go SDK
//! 4. A Hardhat/Foundry/Truffle config in the root points at a Flow EVM endpoint
//!
//! A probe that cannot fetch its file (missing, private, rate limited, network
//! failure) simply does not confirm. Only exhausting all four is an error.

use super::{elapsed_ms, CheckContext};
use crate::data::markers::{self, GO_MODULE_FILE, PACKAGE_MANIFEST, README_FILE};
use crate::platform::github::{GitHubApi, RepoRef};
use crate::{Check, CheckCategory, CheckResult};
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

/// Marker that satisfied the requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvidence {
    Readme,
    NpmPackage,
    GoModule,
    /// Name of the tooling config that references Flow EVM
    EvmConfig(String),
}

impl fmt::Display for FlowEvidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowEvidence::Readme => write!(f, "{} mentions Flow", README_FILE),
            FlowEvidence::NpmPackage => write!(f, "{} uses a Flow SDK", PACKAGE_MANIFEST),
            FlowEvidence::GoModule => write!(f, "{} uses the Flow Go SDK", GO_MODULE_FILE),
            FlowEvidence::EvmConfig(file) => write!(f, "{} targets Flow EVM", file),
        }
    }
}

/// ECO-001: Flow Ecosystem Requirement
pub fn create_eco001_check() -> Check {
    Check {
        id: "ECO-001".to_string(),
        name: "Flow Ecosystem Requirement".to_string(),
        category: CheckCategory::Ecosystem,
        description: "Verify each repository shows it is built on Flow".to_string(),
        result: None,
    }
}

/// Execute ECO-001: Flow Ecosystem Requirement
pub fn run_eco001(ctx: &mut CheckContext<'_>) -> CheckResult {
    let start = Instant::now();

    if !ctx.options.check_ecosystem {
        return CheckResult::Skip {
            reason: "Flow ecosystem check disabled".to_string(),
        };
    }
    if ctx.verified_repos.is_empty() {
        return CheckResult::Skip {
            reason: "No verified repositories to probe".to_string(),
        };
    }

    let mut errors = Vec::new();

    for verified in &ctx.verified_repos {
        match find_flow_evidence(ctx.api, &verified.repo) {
            Some(evidence) => {
                info!(repo = %verified.repo, %evidence, "Flow ecosystem requirement met")
            }
            None => errors.push(requirement_error(&verified.url)),
        }
    }

    CheckResult::from_errors(errors, elapsed_ms(start))
}

/// Run the probes in order; `None` if none confirmed
pub fn find_flow_evidence(api: &dyn GitHubApi, repo: &RepoRef) -> Option<FlowEvidence> {
    if fetch(api, repo, README_FILE).is_some_and(|text| markers::readme_mentions_flow(&text)) {
        return Some(FlowEvidence::Readme);
    }

    if fetch(api, repo, PACKAGE_MANIFEST).is_some_and(|text| markers::manifest_uses_flow_sdk(&text))
    {
        return Some(FlowEvidence::NpmPackage);
    }

    if fetch(api, repo, GO_MODULE_FILE).is_some_and(|text| markers::go_mod_uses_flow_sdk(&text)) {
        return Some(FlowEvidence::GoModule);
    }

    probe_evm_configs(api, repo).map(FlowEvidence::EvmConfig)
}

fn probe_evm_configs(api: &dyn GitHubApi, repo: &RepoRef) -> Option<String> {
    let root = match api.list_root(repo) {
        Ok(names) => names,
        Err(e) => {
            debug!(%repo, error = %e, "root listing unavailable");
            return None;
        }
    };

    root.into_iter()
        .filter(|name| markers::is_evm_config(name))
        .find(|config| {
            fetch(api, repo, config).is_some_and(|text| markers::config_targets_flow_evm(&text))
        })
}

fn fetch(api: &dyn GitHubApi, repo: &RepoRef, path: &str) -> Option<String> {
    match api.file_contents(repo, path) {
        Ok(text) => Some(text),
        Err(e) => {
            debug!(%repo, path, error = %e, "probe file unavailable");
            None
        }
    }
}

fn requirement_error(url: &str) -> String {
    format!(
        "Repository {} does not show that it is built on Flow. Either mention \"on Flow\" or \
         \"Flow blockchain\" in README.md, or use Flow tooling: @onflow/fcl or @onflow/kit in \
         package.json, {} in go.mod, or a Flow EVM endpoint in a Hardhat, Foundry or Truffle config",
        url,
        markers::FLOW_GO_SDK_MODULE
    )
}
