//! Pull request-related data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One side (head or base) of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRef {
    /// Branch name
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// Commit SHA the side points at
    pub sha: String,
}

/// Pull request information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// Per-repository pull request number
    pub number: u64,
    /// Web page of the pull request
    pub html_url: String,
    /// Pull request title
    pub title: String,
    /// "open" or "closed"
    pub state: String,
    /// Pull request description
    #[serde(default)]
    pub body: Option<String>,
    /// Source branch
    pub head: PullRef,
    /// Target branch
    pub base: PullRef,
    /// When the PR was created
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePullRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub head: String,
    pub base: String,
}
