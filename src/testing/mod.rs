//! Testing utilities.
//!
//! Provides a mock [`GitHubApi`](crate::client::GitHubApi) for testing code
//! built on the assistant without touching the network.

mod mock;

pub use mock::{MockCall, MockGitHubApi, MockResponse};
