//! Integration tests for flow-registry-check.
//!
//! These tests run the validator against mock GitHub data and a loopback stub server.

pub mod cli_tests;
pub mod output_tests;
