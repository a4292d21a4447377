//! Resource clients for the GitHub REST API.

pub mod contents;
pub mod git;
pub mod pulls;
pub mod repos;
pub mod users;

// Re-exports
pub use contents::ContentsClient;
pub use git::GitClient;
pub use pulls::PullsClient;
pub use repos::ReposClient;
pub use users::UsersClient;
