//! GitHub assistant
//!
//! A small client for the GitHub REST API with three workflows on top:
//! locate-or-create a repository, summarize a repository, and push a file
//! through a new branch plus pull request.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use github_assistant::{Assistant, GitHubClient};
//!
//! let assistant = Assistant::new(GitHubClient::from_env()?);
//!
//! let ensured = assistant.ensure_repo("notes", Some("Scratch notes")).await?;
//! println!("{}", ensured.repository.html_url);
//!
//! let outcome = assistant
//!     .push_file("notes", "today.md", b"# Today\n", "Add today's notes")
//!     .await?;
//! println!("opened {}", outcome.pull_request.html_url);
//! ```

pub mod assistant;
pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod testing;
pub mod transport;
pub mod types;

// Re-exports
pub use assistant::Assistant;
pub use client::{GitHubApi, GitHubClient};
pub use clients::{ContentsClient, GitClient, PullsClient, ReposClient, UsersClient};
pub use config::{Config, ConfigError};
pub use error::{Error, GitHubError};
pub use transport::{HttpTransport, RetryConfig};
pub use types::{
    Branch, Contributor, EnsuredRepo, FileCommit, GitRef, Languages, PullRequest, PushOutcome,
    RepoAnalysis, RepoSlug, Repository, User,
};
