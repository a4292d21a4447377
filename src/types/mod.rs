//! Data model types for GitHub API payloads and assistant results.

pub mod analysis;
pub mod contents;
pub mod git;
pub mod pulls;
pub mod repos;
pub mod users;

// Re-exports
pub use analysis::{EnsuredRepo, PushOutcome, RepoAnalysis};
pub use contents::{ContentInfo, CreateFileRequest, FileCommit};
pub use git::{CreateRefRequest, GitObject, GitRef};
pub use pulls::{CreatePullRequest, PullRef, PullRequest};
pub use repos::{Branch, CommitRef, Contributor, CreateRepoRequest, Languages, RepoSlug, Repository};
pub use users::User;
