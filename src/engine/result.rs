//! Result aggregation and reporting.
//!
//! Collects check results into a report and flattens them into the
//! `{ isValid, errors }` artifact consumed by CI.

use crate::{Check, CheckCategory, CheckResult, RegistryCheckError};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Outcome of a validation run as seen by CI.
///
/// `is_valid` is derived from `errors` and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<String>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<String>) -> Self {
        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Problems in the order the checks found them
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn to_json(&self) -> Result<String, RegistryCheckError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the artifact, creating parent directories as needed
    pub fn write_to(&self, path: &Path) -> Result<(), RegistryCheckError> {
        let io_err = |source| RegistryCheckError::Io {
            context: format!("writing {}", path.display()),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut json = self.to_json()?;
        json.push('\n');
        fs::write(path, json).map_err(io_err)
    }
}

/// Result summary statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub total: u32,
    /// Individual problems across all failed checks
    pub errors: u32,
    pub total_duration_ms: u64,
}

/// Validation report containing all check results
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Registry file the entry came from, when validated from disk
    pub source: Option<String>,
    /// Name of the entry under test
    pub entry: Option<String>,
    pub checks: Vec<Check>,
    pub total_duration_ms: u64,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate summary statistics
    pub fn summary(&self) -> ResultSummary {
        let mut summary = ResultSummary::default();

        for check in &self.checks {
            summary.total += 1;

            match &check.result {
                Some(CheckResult::Pass { duration_ms }) => {
                    summary.passed += 1;
                    summary.total_duration_ms += duration_ms;
                }
                Some(CheckResult::Fail {
                    errors,
                    duration_ms,
                }) => {
                    summary.failed += 1;
                    summary.errors += errors.len() as u32;
                    summary.total_duration_ms += duration_ms;
                }
                Some(CheckResult::Skip { .. }) | None => {
                    summary.skipped += 1;
                }
            }
        }

        summary
    }

    /// Flatten into the CI artifact, preserving check order
    pub fn result(&self) -> ValidationResult {
        let errors = self
            .checks
            .iter()
            .filter_map(|c| c.result.as_ref())
            .flat_map(|r| r.errors().iter().cloned())
            .collect();
        ValidationResult::from_errors(errors)
    }

    /// Get checks by category
    pub fn by_category(&self, category: CheckCategory) -> Vec<&Check> {
        self.checks
            .iter()
            .filter(|c| c.category == category)
            .collect()
    }

    /// Get only failed checks
    pub fn failures(&self) -> Vec<&Check> {
        self.checks
            .iter()
            .filter(|c| matches!(&c.result, Some(CheckResult::Fail { .. })))
            .collect()
    }
}

/// Result aggregator for collecting check results
#[derive(Debug, Default)]
pub struct ResultAggregator {
    entry: Option<String>,
    checks: Vec<Check>,
    total_duration_ms: u64,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set report metadata
    pub fn set_metadata(&mut self, entry: Option<String>, total_duration_ms: u64) {
        self.entry = entry;
        self.total_duration_ms = total_duration_ms;
    }

    /// Add a completed check result
    pub fn add_result(&mut self, check: Check) {
        if let Some(result) = &check.result {
            for error in result.errors() {
                info!(check = %check.id, %error, "validation error");
            }
        }
        self.checks.push(check);
    }

    /// Check if there are any failures
    pub fn has_failures(&self) -> bool {
        self.checks
            .iter()
            .any(|c| matches!(&c.result, Some(CheckResult::Fail { .. })))
    }

    /// Create final validation report
    pub fn into_report(self) -> ValidationReport {
        ValidationReport {
            source: None,
            entry: self.entry,
            checks: self.checks,
            total_duration_ms: self.total_duration_ms,
        }
    }
}
