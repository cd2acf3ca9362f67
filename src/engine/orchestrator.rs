//! Entry validation orchestrator.
//!
//! Parses the registry, isolates the entry under test, and runs every
//! registered check against it in a fixed order.
//!
//! # Graceful Degradation
//!
//! This module handles errors gracefully:
//! - Unreadable or unparsable registry: single DOC-001 failure, remaining checks skipped
//! - Registry with no mapping entries: single DOC-001 failure, remaining checks skipped
//! - Check panics: caught via std::panic::catch_unwind, converted to one error
//! - Unreadable base revision: reported by SUB-001 only
//!
//! Checks run sequentially and each GitHub request completes before the next
//! starts, so two runs over the same input and responses report identical
//! errors in identical order.

use crate::checks::{
    ecosystem, fields, handles, repos, submission, wallets, BaseRevision, CheckContext,
};
use crate::data::entry::RegistryDocument;
use crate::engine::result::{ResultAggregator, ValidationReport};
use crate::platform::github::GitHubApi;
use crate::{Check, CheckCategory, CheckResult, ValidationOptions};
use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Check function signature
pub type CheckFn = fn(&mut CheckContext<'_>) -> CheckResult;

/// A registered check with its execution function
pub struct RegisteredCheck {
    pub id: String,
    pub name: String,
    pub category: CheckCategory,
    pub description: String,
    pub check_fn: CheckFn,
}

impl RegisteredCheck {
    fn from_check(check: Check, check_fn: CheckFn) -> Self {
        RegisteredCheck {
            id: check.id,
            name: check.name,
            category: check.category,
            description: check.description,
            check_fn,
        }
    }

    fn to_check(&self, result: CheckResult) -> Check {
        Check {
            id: self.id.clone(),
            name: self.name.clone(),
            category: self.category,
            description: self.description.clone(),
            result: Some(result),
        }
    }
}

/// DOC-001: Registry Document
pub fn create_doc001_check() -> Check {
    Check {
        id: "DOC-001".to_string(),
        name: "Registry Document".to_string(),
        category: CheckCategory::Document,
        description: "Parse the registry and select the newest entry".to_string(),
        result: None,
    }
}

/// Validates the newest registry entry
pub struct EntryValidator<'a> {
    api: &'a dyn GitHubApi,
    options: ValidationOptions,
    checks: Vec<RegisteredCheck>,
}

impl<'a> EntryValidator<'a> {
    /// Create a validator with all built-in checks registered
    pub fn new(api: &'a dyn GitHubApi, options: ValidationOptions) -> Self {
        Self::with_checks(api, options, create_all_checks())
    }

    /// Create a validator running only the given checks
    pub fn with_checks(
        api: &'a dyn GitHubApi,
        options: ValidationOptions,
        checks: Vec<RegisteredCheck>,
    ) -> Self {
        EntryValidator {
            api,
            options,
            checks,
        }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Validate the registry file at `path`, optionally against a base revision
    pub fn validate_file(&self, path: &Path, base_path: Option<&Path>) -> ValidationReport {
        let start = Instant::now();
        info!(registry = %path.display(), "validating registry");

        let mut report = match fs::read_to_string(path) {
            Ok(text) => {
                let base = base_path.map(load_base);
                self.validate_str(&text, base.as_ref())
            }
            Err(e) => self.document_failure(
                format!("Error reading registry file {}: {}", path.display(), e),
                start,
            ),
        };

        report.source = Some(path.display().to_string());
        report
    }

    /// Validate registry text
    pub fn validate_str(&self, text: &str, base: Option<&BaseRevision>) -> ValidationReport {
        let start = Instant::now();

        let document = match RegistryDocument::parse(text) {
            Ok(document) => document,
            Err(e) => {
                return self.document_failure(format!("Error parsing registry file: {}", e), start)
            }
        };

        let Some(entry) = document.latest() else {
            return self.document_failure("Registry file contains no entries".to_string(), start);
        };

        debug!(
            entries = document.len(),
            entry = entry.display_name(),
            "selected newest entry"
        );

        let mut aggregator = ResultAggregator::new();
        aggregator.add_result(Check {
            result: Some(CheckResult::Pass {
                duration_ms: start.elapsed().as_millis() as u64,
            }),
            ..create_doc001_check()
        });

        let mut ctx = CheckContext {
            entry,
            document: &document,
            base,
            api: self.api,
            options: &self.options,
            verified_repos: Vec::new(),
        };

        for check in &self.checks {
            let result = self.execute_check(check, &mut ctx);
            aggregator.add_result(check.to_check(result));
        }

        aggregator.set_metadata(
            Some(entry.display_name().to_string()),
            start.elapsed().as_millis() as u64,
        );
        aggregator.into_report()
    }

    /// Execute a single check, converting a panic into one error
    fn execute_check(&self, check: &RegisteredCheck, ctx: &mut CheckContext<'_>) -> CheckResult {
        let start = Instant::now();
        debug!(check = %check.id, "running check");

        match panic::catch_unwind(AssertUnwindSafe(|| (check.check_fn)(ctx))) {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(check = %check.id, %message, "check panicked");
                CheckResult::Fail {
                    errors: vec![format!(
                        "Internal error while running {} ({}): {}",
                        check.name, check.id, message
                    )],
                    duration_ms: start.elapsed().as_millis() as u64,
                }
            }
        }
    }

    /// Report a document-level failure as the run's only error
    fn document_failure(&self, message: String, start: Instant) -> ValidationReport {
        let mut aggregator = ResultAggregator::new();
        aggregator.add_result(Check {
            result: Some(CheckResult::Fail {
                errors: vec![message],
                duration_ms: start.elapsed().as_millis() as u64,
            }),
            ..create_doc001_check()
        });

        for check in &self.checks {
            aggregator.add_result(check.to_check(CheckResult::Skip {
                reason: "Registry document unavailable".to_string(),
            }));
        }

        aggregator.set_metadata(None, start.elapsed().as_millis() as u64);
        aggregator.into_report()
    }
}

/// Read and parse the base revision; failures become SUB-001 errors
fn load_base(path: &Path) -> BaseRevision {
    match fs::read_to_string(path) {
        Ok(text) => match RegistryDocument::parse(&text) {
            Ok(document) => BaseRevision::Parsed(document),
            Err(e) => BaseRevision::Unavailable(format!(
                "Error parsing base registry file {}: {}",
                path.display(),
                e
            )),
        },
        Err(e) => BaseRevision::Unavailable(format!(
            "Error reading base registry file {}: {}",
            path.display(),
            e
        )),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Create all registered checks with their execution functions, in run order
pub fn create_all_checks() -> Vec<RegisteredCheck> {
    vec![
        RegisteredCheck::from_check(submission::create_sub001_check(), submission::run_sub001),
        RegisteredCheck::from_check(fields::create_fld001_check(), fields::run_fld001),
        RegisteredCheck::from_check(handles::create_id001_check(), handles::run_id001),
        RegisteredCheck::from_check(handles::create_id002_check(), handles::run_id002),
        RegisteredCheck::from_check(repos::create_repo001_check(), repos::run_repo001),
        RegisteredCheck::from_check(ecosystem::create_eco001_check(), ecosystem::run_eco001),
        RegisteredCheck::from_check(wallets::create_wal001_check(), wallets::run_wal001),
    ]
}
