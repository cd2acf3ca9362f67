//! GitHub REST interface.
//!
//! Provides the read-only lookups the checks need: account existence,
//! repository existence, file contents, and root directory listings.
//!
//! # Graceful Degradation
//!
//! Every call returns a `GitHubError` instead of panicking:
//! - 404: `GitHubError::NotFound`, distinguishable from other failures
//! - Other non-2xx: `GitHubError::Status` with the status code
//! - Connection/timeout failures: `GitHubError::Transport`
//! - Unexpected payloads (directory instead of file, non-UTF-8 content):
//!   `GitHubError::Decode`
//!
//! Requests are issued one at a time and never retried.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("flow-registry-check/", env!("CARGO_PKG_VERSION"));

/// GitHub API failure
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("GitHub returned HTTP {status} for {resource}")]
    Status { status: u16, resource: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response for {resource}: {message}")]
    Decode { resource: String, message: String },
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl GitHubError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GitHubError::NotFound(_))
    }
}

/// An `owner/name` repository coordinate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        RepoRef {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Read-only queries against the GitHub directory.
pub trait GitHubApi {
    /// `Ok(())` if the account exists
    fn user_exists(&self, login: &str) -> Result<(), GitHubError>;

    /// `Ok(())` if the repository exists and is visible to the token
    fn repo_exists(&self, repo: &RepoRef) -> Result<(), GitHubError>;

    /// Decoded text of a file in the default branch
    fn file_contents(&self, repo: &RepoRef, path: &str) -> Result<String, GitHubError>;

    /// Names of the entries in the repository root
    fn list_root(&self, repo: &RepoRef) -> Result<Vec<String>, GitHubError>;
}

/// Client settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubConfig {
    pub api_url: String,
    /// Installation or personal access token
    pub token: Option<String>,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout_ms: 30000,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContentFile {
    content: Option<String>,
    encoding: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentItem {
    name: String,
}

/// Blocking GitHub REST client
pub struct GitHubClient {
    http: Client,
    base: Url,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig) -> Result<Self, GitHubError> {
        let base = Url::parse(&config.api_url)
            .map_err(|e| GitHubError::Config(format!("API URL '{}': {}", config.api_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(GitHubError::Config(format!(
                "API URL '{}' cannot be used as a base",
                config.api_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static("2022-11-28"));
        if let Some(ref token) = config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|_| GitHubError::Config("token contains invalid characters".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms));
        if is_loopback(&base) {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;

        Ok(GitHubClient { http, base })
    }

    /// Build an endpoint URL; each segment is percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn get(&self, segments: &[&str], resource: &str) -> Result<Response, GitHubError> {
        let url = self.endpoint(segments);
        debug!(%url, "GitHub request");

        let response = self.http.get(url).send()?;
        let status = response.status();
        debug!(status = status.as_u16(), resource, "GitHub response");

        if status == StatusCode::NOT_FOUND {
            return Err(GitHubError::NotFound(resource.to_string()));
        }
        if !status.is_success() {
            return Err(GitHubError::Status {
                status: status.as_u16(),
                resource: resource.to_string(),
            });
        }
        Ok(response)
    }
}

impl GitHubApi for GitHubClient {
    fn user_exists(&self, login: &str) -> Result<(), GitHubError> {
        self.get(&["users", login], &format!("user {}", login))
            .map(|_| ())
    }

    fn repo_exists(&self, repo: &RepoRef) -> Result<(), GitHubError> {
        self.get(
            &["repos", &repo.owner, &repo.name],
            &format!("repository {}", repo),
        )
        .map(|_| ())
    }

    fn file_contents(&self, repo: &RepoRef, path: &str) -> Result<String, GitHubError> {
        let resource = format!("{}:{}", repo, path);
        let mut segments = vec!["repos", repo.owner.as_str(), repo.name.as_str(), "contents"];
        segments.extend(path.split('/').filter(|s| !s.is_empty()));

        let file: ContentFile = self
            .get(&segments, &resource)?
            .json()
            .map_err(|e| GitHubError::Decode {
                resource: resource.clone(),
                message: e.to_string(),
            })?;
        decode_content(file, &resource)
    }

    fn list_root(&self, repo: &RepoRef) -> Result<Vec<String>, GitHubError> {
        let resource = format!("{} root", repo);
        let items: Vec<ContentItem> = self
            .get(
                &["repos", &repo.owner, &repo.name, "contents", ""],
                &resource,
            )?
            .json()
            .map_err(|e| GitHubError::Decode {
                resource,
                message: e.to_string(),
            })?;
        Ok(items.into_iter().map(|item| item.name).collect())
    }
}

/// Local API mirrors and test servers are reached directly
fn is_loopback(url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    host.eq_ignore_ascii_case("localhost")
        || host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_loopback())
}

/// Decode a contents API payload into text
fn decode_content(file: ContentFile, resource: &str) -> Result<String, GitHubError> {
    let decode_err = |message: String| GitHubError::Decode {
        resource: resource.to_string(),
        message,
    };

    match file.encoding.as_deref() {
        Some("base64") => {}
        other => {
            return Err(decode_err(format!(
                "unsupported encoding {}",
                other.unwrap_or("<none>")
            )))
        }
    }

    // GitHub wraps base64 content at 60 columns
    let packed: String = file
        .content
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(packed)
        .map_err(|e| decode_err(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| decode_err(e.to_string()))
}
