//! Validation check modules.
//!
//! This module contains all entry checks, in the order they run:
//! - Submission: the pull request appends exactly one entry (only with a base revision)
//! - Fields: required fields are present and well typed
//! - Handles: GitHub accounts exist, X handles are non-blank
//! - Repos: repository URLs are well formed and exist
//! - Ecosystem: each repository shows a Flow marker
//! - Wallets: declared addresses are well formed
//!
//! # Error Collection
//!
//! Checks never stop at the first problem. Every problem becomes one message
//! in the check's `CheckResult::Fail`, in the order it was found:
//! - Wrong type or missing field: reported by the check that owns the field
//! - Failed account/repository lookup: reported (existence is mandatory)
//! - Failed ecosystem probe: logged and treated as "not confirmed"
//! - Field the check cannot apply to: `CheckResult::Skip` with reason

pub mod ecosystem;
pub mod fields;
pub mod handles;
pub mod repos;
pub mod submission;
pub mod wallets;

use crate::data::entry::{RegistryDocument, RegistryEntry};
use crate::platform::github::{GitHubApi, RepoRef};
use crate::{Check, CheckCategory, ValidationOptions};
use std::time::Instant;

pub use submission::BaseRevision;

/// A repository URL whose existence was confirmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedRepo {
    /// URL as written in the entry
    pub url: String,
    pub repo: RepoRef,
}

/// State shared by the checks of one validation run.
pub struct CheckContext<'a> {
    /// The entry under test
    pub entry: &'a RegistryEntry,
    /// The whole head registry document
    pub document: &'a RegistryDocument,
    /// Registry at the base revision, when supplied
    pub base: Option<&'a BaseRevision>,
    pub api: &'a dyn GitHubApi,
    pub options: &'a ValidationOptions,
    /// Filled by the repository check, read by the ecosystem check
    pub verified_repos: Vec<VerifiedRepo>,
}

/// Get metadata for all checks, in execution order
pub fn get_all_checks() -> Vec<Check> {
    vec![
        submission::create_sub001_check(),
        fields::create_fld001_check(),
        handles::create_id001_check(),
        handles::create_id002_check(),
        repos::create_repo001_check(),
        ecosystem::create_eco001_check(),
        wallets::create_wal001_check(),
    ]
}

/// Get checks for a specific category
pub fn get_checks_by_category(category: CheckCategory) -> Vec<Check> {
    get_all_checks()
        .into_iter()
        .filter(|c| c.category == category)
        .collect()
}

pub(crate) fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
