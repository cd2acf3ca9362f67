//! flow-registry-check library
//!
//! Pull-request validation for the Flow builders team registry.
//!
//! A submission appends one team entry to a YAML registry. This library
//! validates the newest entry:
//! - Required fields (`name`, `github`, `repos`)
//! - GitHub and X handles, with GitHub account lookups
//! - Repository URLs, with repository lookups
//! - The Flow ecosystem requirement (README, npm, Go module, or EVM config markers)
//! - Wallet address formats
//!
//! # Example
//!
//! ```no_run
//! use flow_registry_check::{run_validation, ValidatorConfig};
//!
//! let config = ValidatorConfig::default();
//! let report = run_validation(&config).expect("validation could not run");
//! let result = report.result();
//! println!("valid: {}, errors: {}", result.is_valid(), result.errors().len());
//! ```

pub mod checks;
pub mod cli;
pub mod data;
pub mod engine;
pub mod platform;
pub mod version;

use cli::args::CheckArgs;
use engine::orchestrator::EntryValidator;
use engine::result::ValidationReport;
use platform::github::{GitHubClient, GitHubConfig, GitHubError};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// Re-exports for public API
pub use engine::orchestrator::EntryValidator as Validator;
pub use engine::result::{ResultSummary, ValidationResult};

/// Result of a single validation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CheckResult {
    /// Check passed
    Pass {
        #[serde(rename = "durationMs")]
        duration_ms: u64,
    },
    /// Check found one or more problems
    Fail {
        errors: Vec<String>,
        #[serde(rename = "durationMs")]
        duration_ms: u64,
    },
    /// Check did not apply to this entry
    Skip { reason: String },
}

impl CheckResult {
    /// Build a result from the problems a check collected.
    pub fn from_errors(errors: Vec<String>, duration_ms: u64) -> Self {
        if errors.is_empty() {
            CheckResult::Pass { duration_ms }
        } else {
            CheckResult::Fail { errors, duration_ms }
        }
    }

    /// Problems reported by this result (empty unless it failed).
    pub fn errors(&self) -> &[String] {
        match self {
            CheckResult::Fail { errors, .. } => errors,
            _ => &[],
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckResult::Pass { .. } => write!(f, "PASS"),
            CheckResult::Fail { errors, .. } => write!(f, "FAIL: {}", errors.join("; ")),
            CheckResult::Skip { reason } => write!(f, "SKIP: {}", reason),
        }
    }
}

/// Check category for grouping related checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckCategory {
    /// Registry document and submission shape
    Document,
    /// Required entry fields
    Fields,
    /// GitHub and X accounts
    Identity,
    /// Repository URLs and existence
    Repository,
    /// Flow ecosystem markers
    Ecosystem,
    /// Reward wallet addresses
    Wallet,
}

impl fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckCategory::Document => write!(f, "Document"),
            CheckCategory::Fields => write!(f, "Fields"),
            CheckCategory::Identity => write!(f, "Identity"),
            CheckCategory::Repository => write!(f, "Repository"),
            CheckCategory::Ecosystem => write!(f, "Ecosystem"),
            CheckCategory::Wallet => write!(f, "Wallet"),
        }
    }
}

/// A validation check with its result.
#[derive(Debug, Clone, Serialize)]
pub struct Check {
    /// Unique identifier (e.g., "FLD-001")
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Check category
    pub category: CheckCategory,
    /// Description of what this check validates
    pub description: String,
    /// Result of the check (None if not yet executed)
    pub result: Option<CheckResult>,
}

/// Error types for registry-check runs.
///
/// These cover failures of the tool itself. Problems with the submitted
/// entry are never errors; they are collected into the [`ValidationResult`].
#[derive(Debug, Error)]
pub enum RegistryCheckError {
    /// File could not be read or written
    #[error("I/O error in {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    /// Registry document could not be parsed
    #[error("parse error: {0}")]
    Parse(String),
    /// Result could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// GitHub client could not be set up
    #[error("GitHub client error: {0}")]
    Client(#[from] GitHubError),
}

/// How strictly the `wallets` block is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalletPolicy {
    /// Wallets may be omitted; declared addresses must be well-formed.
    #[default]
    Optional,
    /// `wallets.evm` and `wallets.flow` must both be present.
    Required,
}

/// Options that change what the validator checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    pub wallet_policy: WalletPolicy,
    /// Probe repositories for Flow ecosystem markers
    pub check_ecosystem: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions {
            wallet_policy: WalletPolicy::Optional,
            check_ecosystem: true,
        }
    }
}

/// Default location of the registry document.
pub const DEFAULT_REGISTRY_PATH: &str = "registry.yaml";

/// Default location of the result artifact consumed by CI.
pub const DEFAULT_OUTPUT_PATH: &str = "validation-result.json";

/// Configuration for a validation run.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Registry document to validate
    pub registry_path: PathBuf,
    /// Registry document at the pull request's base revision
    pub base_path: Option<PathBuf>,
    /// Where the `{ isValid, errors }` artifact is written
    pub output_path: PathBuf,
    pub github: GitHubConfig,
    pub options: ValidationOptions,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            registry_path: PathBuf::from(DEFAULT_REGISTRY_PATH),
            base_path: None,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            github: GitHubConfig::default(),
            options: ValidationOptions::default(),
        }
    }
}

impl ValidatorConfig {
    /// Create configuration from command line arguments
    pub fn from_args(args: &CheckArgs) -> Self {
        let wallet_policy = if args.require_wallets {
            WalletPolicy::Required
        } else {
            WalletPolicy::Optional
        };

        ValidatorConfig {
            registry_path: args.registry.clone(),
            base_path: args.base.clone(),
            output_path: args.output.clone(),
            github: GitHubConfig {
                api_url: args.api_url.clone(),
                token: args.token.clone().filter(|t| !t.trim().is_empty()),
                timeout_ms: args.timeout_ms,
            },
            options: ValidationOptions {
                wallet_policy,
                check_ecosystem: !args.skip_ecosystem,
            },
        }
    }
}

/// Validate the newest entry of the configured registry file.
///
/// Builds a GitHub client from `config.github` and runs every check against
/// the last entry of `config.registry_path`. Problems with the entry end up
/// in the returned report; an `Err` means the run itself could not start.
///
/// # Example
///
/// ```no_run
/// use flow_registry_check::{run_validation, ValidatorConfig, WalletPolicy};
///
/// let mut config = ValidatorConfig::default();
/// config.options.wallet_policy = WalletPolicy::Required;
///
/// match run_validation(&config) {
///     Ok(report) => println!("{} errors", report.result().errors().len()),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_validation(config: &ValidatorConfig) -> Result<ValidationReport, RegistryCheckError> {
    let client = GitHubClient::new(&config.github)?;
    let validator = EntryValidator::new(&client, config.options.clone());

    Ok(validator.validate_file(&config.registry_path, config.base_path.as_deref()))
}
