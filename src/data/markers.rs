//! Flow ecosystem markers
//!
//! Static tables of what counts as evidence that a repository builds on Flow,
//! plus the pure matchers used by the ecosystem check.

use serde::Deserialize;

pub const README_FILE: &str = "README.md";

/// Phrases matched case-insensitively against the README
pub const README_PHRASES: &[&str] = &["on flow", "flow blockchain"];

pub const PACKAGE_MANIFEST: &str = "package.json";

/// npm packages that indicate a Flow client
pub const FLOW_NPM_PACKAGES: &[&str] = &["@onflow/fcl", "@onflow/kit"];

pub const GO_MODULE_FILE: &str = "go.mod";

pub const FLOW_GO_SDK_MODULE: &str = "github.com/onflow/flow-go-sdk";

/// Solidity tooling configs inspected for a Flow EVM endpoint
pub const EVM_CONFIG_FILES: &[&str] = &[
    "hardhat.config.js",
    "hardhat.config.ts",
    "hardhat.config.cjs",
    "hardhat.config.mjs",
    "foundry.toml",
    "truffle-config.js",
    "truffle.js",
];

/// Public Flow EVM RPC hosts
pub const FLOW_EVM_ENDPOINTS: &[&str] = &[
    "mainnet.evm.nodes.onflow.org",
    "testnet.evm.nodes.onflow.org",
];

/// Dependency tables are kept raw; a non-object table counts as empty
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageManifest {
    dependencies: Option<serde_json::Value>,
    dev_dependencies: Option<serde_json::Value>,
}

impl PackageManifest {
    fn declares(&self, package: &str) -> bool {
        [&self.dependencies, &self.dev_dependencies]
            .into_iter()
            .flatten()
            .any(|table| table.as_object().is_some_and(|deps| deps.contains_key(package)))
    }
}

/// README mentions building on Flow
pub fn readme_mentions_flow(text: &str) -> bool {
    let lower = text.to_lowercase();
    README_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// package.json depends on a Flow client library.
///
/// An unparseable manifest never matches.
pub fn manifest_uses_flow_sdk(text: &str) -> bool {
    match serde_json::from_str::<PackageManifest>(text) {
        Ok(manifest) => FLOW_NPM_PACKAGES
            .iter()
            .any(|package| manifest.declares(package)),
        Err(_) => false,
    }
}

/// go.mod requires the Flow Go SDK
pub fn go_mod_uses_flow_sdk(text: &str) -> bool {
    text.contains(FLOW_GO_SDK_MODULE)
}

pub fn is_evm_config(file_name: &str) -> bool {
    EVM_CONFIG_FILES.contains(&file_name)
}

/// Tooling config points at a Flow EVM network
pub fn config_targets_flow_evm(text: &str) -> bool {
    FLOW_EVM_ENDPOINTS
        .iter()
        .any(|endpoint| text.contains(endpoint))
}
