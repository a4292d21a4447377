//! Repositories resource client.

use std::sync::Arc;

use crate::error::Error;
use crate::transport::{encode_relative_path, HttpTransport, MAX_PER_PAGE};
use crate::types::{Branch, Contributor, CreateRepoRequest, Languages, Repository};

/// Client for repository-related operations.
pub struct ReposClient {
    transport: Arc<HttpTransport>,
}

impl ReposClient {
    /// Create a new repos client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Get repository information.
    ///
    /// # Errors
    ///
    /// Returns `GitHubError::NotFound` if the repository does not exist or
    /// is not visible to the token.
    pub async fn get(&self, owner: &str, repo: &str) -> Result<Repository, Error> {
        self.transport.get(&format!("/repos/{owner}/{repo}")).await
    }

    /// Create a repository owned by the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns `GitHubError::Validation` if the name is taken or invalid.
    pub async fn create_for_authenticated_user(
        &self,
        request: &CreateRepoRequest,
    ) -> Result<Repository, Error> {
        self.transport.post("/user/repos", request).await
    }

    /// Bytes of code per language.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn languages(&self, owner: &str, repo: &str) -> Result<Languages, Error> {
        self.transport
            .get(&format!("/repos/{owner}/{repo}/languages"))
            .await
    }

    /// List every branch, following pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fails.
    pub async fn branches(&self, owner: &str, repo: &str) -> Result<Vec<Branch>, Error> {
        self.transport
            .get_paginated(&format!("/repos/{owner}/{repo}/branches"), MAX_PER_PAGE)
            .await
    }

    /// Get a single branch.
    ///
    /// # Errors
    ///
    /// Returns `GitHubError::NotFound` if the branch does not exist (including
    /// every branch of an empty repository), and `Error::InvalidInput` for a
    /// name with an empty, `.` or `..` segment.
    pub async fn get_branch(&self, owner: &str, repo: &str, branch: &str) -> Result<Branch, Error> {
        let branch = encode_relative_path(branch)?;
        self.transport
            .get(&format!("/repos/{owner}/{repo}/branches/{branch}"))
            .await
    }

    /// List every contributor, following pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fails.
    pub async fn contributors(&self, owner: &str, repo: &str) -> Result<Vec<Contributor>, Error> {
        self.transport
            .get_paginated(&format!("/repos/{owner}/{repo}/contributors"), MAX_PER_PAGE)
            .await
    }
}
