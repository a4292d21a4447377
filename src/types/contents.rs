//! Repository contents models.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::types::CommitRef;

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}` for a new file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateFileRequest {
    /// Commit message
    pub message: String,
    /// Base64-encoded file content
    pub content: String,
    /// Target branch; the repository's default branch when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl CreateFileRequest {
    pub fn new(message: &str, content: &[u8], branch: Option<&str>) -> Self {
        Self {
            message: message.to_string(),
            content: STANDARD.encode(content),
            branch: branch.map(String::from),
        }
    }
}

/// File entry returned after a contents write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentInfo {
    pub name: String,
    pub path: String,
    /// Blob SHA
    pub sha: String,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Response of a contents write: the file and the commit that created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCommit {
    /// Absent when the write deleted the file
    pub content: Option<ContentInfo>,
    pub commit: CommitRef,
}
