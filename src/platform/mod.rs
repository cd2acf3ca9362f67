//! External service interfaces.
//!
//! The only collaborator is the GitHub REST API; checks talk to it through
//! the `GitHubApi` trait so tests can substitute canned responses.

pub mod github;
