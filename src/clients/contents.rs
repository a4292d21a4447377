//! Repository contents resource client.

use std::sync::Arc;

use crate::error::Error;
use crate::transport::{encode_relative_path, HttpTransport};
use crate::types::{CreateFileRequest, FileCommit};

/// Client for reading and writing files through the contents API.
pub struct ContentsClient {
    transport: Arc<HttpTransport>,
}

impl ContentsClient {
    /// Create a new contents client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Create a new file in a single commit.
    ///
    /// # Arguments
    ///
    /// * `path` - Path inside the repository, `/`-separated
    /// * `message` - Commit message
    /// * `content` - Raw file bytes (encoded to base64 here)
    /// * `branch` - Target branch, or the default branch when `None`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` for an empty path or one with an empty,
    /// `.` or `..` segment, and
    /// `GitHubError::Validation` if the file already exists on the branch.
    pub async fn create_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        message: &str,
        content: &[u8],
        branch: Option<&str>,
    ) -> Result<FileCommit, Error> {
        let encoded = encode_relative_path(path)?;

        let request = CreateFileRequest::new(message, content, branch);
        self.transport
            .put(&format!("/repos/{owner}/{repo}/contents/{encoded}"), &request)
            .await
    }
}
