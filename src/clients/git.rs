//! Git database resource client.

use std::sync::Arc;

use tracing::debug;

use crate::error::Error;
use crate::transport::HttpTransport;
use crate::types::{CreateRefRequest, GitRef};

/// Client for low-level Git references.
pub struct GitClient {
    transport: Arc<HttpTransport>,
}

impl GitClient {
    /// Create a new git client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Create a reference.
    ///
    /// # Arguments
    ///
    /// * `ref_name` - Fully qualified name such as `refs/heads/feature`; a
    ///   bare branch name is qualified under `refs/heads/`
    /// * `sha` - Commit the reference points at
    ///
    /// # Errors
    ///
    /// Returns `GitHubError::Validation` if the reference already exists.
    pub async fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        ref_name: &str,
        sha: &str,
    ) -> Result<GitRef, Error> {
        let request = CreateRefRequest::branch(ref_name, sha);
        debug!(owner, repo, ref_name = %request.ref_name, sha, "creating git ref");

        self.transport
            .post(&format!("/repos/{owner}/{repo}/git/refs"), &request)
            .await
    }
}
