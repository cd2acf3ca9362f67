//! Repository URL check (REPO-001).
//!
//! Each `repos` item must have the shape `https://github.com/<owner>/<repo>`
//! (a trailing `.git` or `/` is tolerated and stripped). Well-formed URLs are
//! looked up on GitHub; confirmed repositories are handed to the ecosystem
//! check through `CheckContext::verified_repos`.

use super::{elapsed_ms, CheckContext, VerifiedRepo};
use crate::platform::github::RepoRef;
use crate::{Check, CheckCategory, CheckResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Instant;
use tracing::debug;

static REPO_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://github\.com/([A-Za-z0-9][A-Za-z0-9-]*)/([A-Za-z0-9._-]+?)(?:\.git)?/?$")
        .expect("repository URL pattern is valid")
});

/// REPO-001: Repository URLs
pub fn create_repo001_check() -> Check {
    Check {
        id: "REPO-001".to_string(),
        name: "Repository URLs".to_string(),
        category: CheckCategory::Repository,
        description: "Verify repos are GitHub repository URLs that exist".to_string(),
        result: None,
    }
}

/// Execute REPO-001: Repository URLs
pub fn run_repo001(ctx: &mut CheckContext<'_>) -> CheckResult {
    let start = Instant::now();

    let Some(urls) = ctx.entry.repos() else {
        return CheckResult::Skip {
            reason: "No repos list to check".to_string(),
        };
    };

    let mut errors = Vec::new();

    for (i, item) in urls.iter().enumerate() {
        let Some(url) = item.as_str().map(str::trim) else {
            errors.push(format!(
                "Invalid repository URL at repos[{}]: must be a string",
                i
            ));
            continue;
        };

        let Some(repo) = parse_repo_url(url) else {
            errors.push(format!(
                "Invalid repository URL format: {} (expected https://github.com/<owner>/<repo>)",
                url
            ));
            continue;
        };

        match ctx.api.repo_exists(&repo) {
            Ok(()) => {
                debug!(%repo, "repository exists");
                ctx.verified_repos.push(VerifiedRepo {
                    url: url.to_string(),
                    repo,
                });
            }
            Err(e) if e.is_not_found() => {
                errors.push(format!("Repository not found or not accessible: {}", url))
            }
            Err(e) => errors.push(format!("Could not verify repository {}: {}", url, e)),
        }
    }

    CheckResult::from_errors(errors, elapsed_ms(start))
}

/// Extract `owner/name` from a GitHub repository URL
pub fn parse_repo_url(url: &str) -> Option<RepoRef> {
    let caps = REPO_URL.captures(url.trim())?;
    let name = caps.get(2)?.as_str();
    if matches!(name, "." | ".." | ".git") {
        return None;
    }
    Some(RepoRef::new(caps.get(1)?.as_str(), name))
}
