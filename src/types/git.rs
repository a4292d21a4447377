//! Git database models.

use serde::{Deserialize, Serialize};

/// Object a reference points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitObject {
    /// Object SHA
    pub sha: String,
    /// "commit", "tag", ...
    #[serde(rename = "type")]
    pub kind: String,
}

/// A Git reference such as `refs/heads/main`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitRef {
    /// Fully qualified reference name
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// Target object
    pub object: GitObject,
}

/// Body of `POST /repos/{owner}/{repo}/git/refs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRefRequest {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub sha: String,
}

impl CreateRefRequest {
    /// Request for `refs/heads/<branch>` at `sha`.
    pub fn branch(branch: &str, sha: &str) -> Self {
        let ref_name = if branch.starts_with("refs/") {
            branch.to_string()
        } else {
            format!("refs/heads/{branch}")
        };
        Self {
            ref_name,
            sha: sha.to_string(),
        }
    }
}
