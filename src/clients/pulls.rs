//! Pull requests resource client.

use std::sync::Arc;

use crate::error::Error;
use crate::transport::HttpTransport;
use crate::types::{CreatePullRequest, PullRequest};

/// Client for pull request operations.
pub struct PullsClient {
    transport: Arc<HttpTransport>,
}

impl PullsClient {
    /// Create a new pulls client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Create a pull request.
    ///
    /// # Arguments
    ///
    /// * `title` - Pull request title
    /// * `body` - Optional description
    /// * `head` - Branch with the changes
    /// * `base` - Branch to merge into
    ///
    /// # Errors
    ///
    /// Returns `GitHubError::Validation` if the branches have no difference
    /// or a pull request between them is already open.
    pub async fn create(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: Option<&str>,
        head: &str,
        base: &str,
    ) -> Result<PullRequest, Error> {
        let request = CreatePullRequest {
            title: title.to_string(),
            body: body.map(String::from),
            head: head.to_string(),
            base: base.to_string(),
        };

        self.transport
            .post(&format!("/repos/{owner}/{repo}/pulls"), &request)
            .await
    }
}
