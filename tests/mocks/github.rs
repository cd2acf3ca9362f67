//! Mock GitHub implementations for testing.
//!
//! Provides:
//! - `MockGitHub`: in-memory accounts, repositories and files behind `GitHubApi`
//! - `StubServer`: a loopback HTTP server answering canned GitHub REST responses

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flow_registry_check::platform::github::{GitHubApi, GitHubError, RepoRef};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// How the mock answers every request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MockMode {
    /// Answer from the configured accounts, repositories and files
    #[default]
    Normal,
    /// Answer every request with HTTP 503
    Unavailable,
}

/// In-memory GitHub with a call log
#[derive(Debug, Default)]
pub struct MockGitHub {
    mode: MockMode,
    users: HashSet<String>,
    repos: HashSet<String>,
    /// Keyed by `owner/name`, then path
    files: HashMap<String, BTreeMap<String, String>>,
    /// Calls that fail with HTTP 500
    failing: HashSet<String>,
    calls: RefCell<Vec<String>>,
}

impl MockGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request fails
    pub fn unavailable() -> Self {
        MockGitHub {
            mode: MockMode::Unavailable,
            ..Self::default()
        }
    }

    pub fn with_user(mut self, login: &str) -> Self {
        self.users.insert(login.to_string());
        self
    }

    pub fn with_repo(mut self, slug: &str) -> Self {
        self.repos.insert(slug.to_string());
        self
    }

    pub fn with_file(mut self, slug: &str, path: &str, text: &str) -> Self {
        self.files
            .entry(slug.to_string())
            .or_default()
            .insert(path.to_string(), text.to_string());
        self
    }

    pub fn with_readme(self, slug: &str, text: &str) -> Self {
        self.with_file(slug, "README.md", text)
    }

    /// Fail one call (as recorded in the call log) with HTTP 500
    pub fn failing(mut self, call: &str) -> Self {
        self.failing.insert(call.to_string());
        self
    }

    /// A team whose users and repository all exist and whose README mentions Flow
    pub fn flow_team() -> Self {
        MockGitHub::new()
            .with_user("alice")
            .with_user("bob")
            .with_repo("acme/widget")
            .with_readme("acme/widget", "# Widget\n\nA game built on Flow.\n")
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: String) -> Result<(), GitHubError> {
        self.calls.borrow_mut().push(call.clone());

        let status = match self.mode {
            MockMode::Unavailable => Some(503),
            MockMode::Normal if self.failing.contains(&call) => Some(500),
            MockMode::Normal => None,
        };

        match status {
            Some(status) => Err(GitHubError::Status {
                status,
                resource: call,
            }),
            None => Ok(()),
        }
    }
}

impl GitHubApi for MockGitHub {
    fn user_exists(&self, login: &str) -> Result<(), GitHubError> {
        self.record(format!("user:{}", login))?;
        if self.users.contains(login) {
            Ok(())
        } else {
            Err(GitHubError::NotFound(format!("user {}", login)))
        }
    }

    fn repo_exists(&self, repo: &RepoRef) -> Result<(), GitHubError> {
        self.record(format!("repo:{}", repo))?;
        if self.repos.contains(&repo.to_string()) {
            Ok(())
        } else {
            Err(GitHubError::NotFound(format!("repository {}", repo)))
        }
    }

    fn file_contents(&self, repo: &RepoRef, path: &str) -> Result<String, GitHubError> {
        self.record(format!("file:{}:{}", repo, path))?;
        self.files
            .get(&repo.to_string())
            .and_then(|files| files.get(path))
            .cloned()
            .ok_or_else(|| GitHubError::NotFound(format!("{}:{}", repo, path)))
    }

    fn list_root(&self, repo: &RepoRef) -> Result<Vec<String>, GitHubError> {
        self.record(format!("list:{}", repo))?;
        let files = self
            .files
            .get(&repo.to_string())
            .ok_or_else(|| GitHubError::NotFound(format!("{} root", repo)))?;
        Ok(files
            .keys()
            .filter(|path| !path.contains('/'))
            .cloned()
            .collect())
    }
}

/// A request received by the stub server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    /// Header names are lowercased
    pub headers: HashMap<String, String>,
}

/// Loopback HTTP server with canned responses keyed by request path.
///
/// Unknown paths get a 404. Each connection serves one request.
pub struct StubServer {
    url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    pub fn start(routes: Vec<(&str, u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let routes: HashMap<String, (u16, String)> = routes
            .into_iter()
            .map(|(path, status, body)| (path.to_string(), (status, body)))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                serve(stream, &routes, &log);
            }
        });

        StubServer { url, requests }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Body of a contents API response for a file
pub fn contents_body(text: &str) -> String {
    serde_json::json!({
        "type": "file",
        "encoding": "base64",
        "content": STANDARD.encode(text),
    })
    .to_string()
}

/// Body of a contents API response for a directory listing
pub fn listing_body(names: &[&str]) -> String {
    serde_json::Value::Array(
        names
            .iter()
            .map(|name| serde_json::json!({ "name": name, "type": "file" }))
            .collect(),
    )
    .to_string()
}

fn serve(
    mut stream: TcpStream,
    routes: &HashMap<String, (u16, String)>,
    log: &Mutex<Vec<RecordedRequest>>,
) -> Option<()> {
    let mut reader = BufReader::new(stream.try_clone().ok()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let path = request_line.split_whitespace().nth(1)?.to_string();

    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    let route = routes.get(&path).cloned();
    log.lock().ok()?.push(RecordedRequest { path, headers });

    let (status, body) = route.unwrap_or((404, r#"{"message":"Not Found"}"#.to_string()));
    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).ok()?;
    stream.flush().ok()
}
