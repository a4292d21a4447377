//! GitHub client.
//!
//! Aggregates the resource clients and exposes them through the
//! [`GitHubApi`] trait the assistant is written against.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::clients::{ContentsClient, GitClient, PullsClient, ReposClient, UsersClient};
use crate::config::{Config, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::Error;
use crate::transport::{HttpTransport, RetryConfig};
use crate::types::{
    Branch, Contributor, CreateRepoRequest, FileCommit, GitRef, Languages, PullRequest,
    Repository, User,
};

/// The GitHub calls the assistant needs.
///
/// Implemented by [`GitHubClient`] against the real API and by
/// [`crate::testing::MockGitHubApi`] for tests.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Account the token belongs to.
    async fn authenticated_user(&self) -> Result<User, Error>;

    /// Look up a repository.
    async fn get_repo(&self, owner: &str, repo: &str) -> Result<Repository, Error>;

    /// Create a repository for the authenticated user.
    async fn create_repo(&self, request: &CreateRepoRequest) -> Result<Repository, Error>;

    /// Bytes of code per language.
    async fn repo_languages(&self, owner: &str, repo: &str) -> Result<Languages, Error>;

    /// All branches.
    async fn list_branches(&self, owner: &str, repo: &str) -> Result<Vec<Branch>, Error>;

    /// A single branch.
    async fn get_branch(&self, owner: &str, repo: &str, branch: &str) -> Result<Branch, Error>;

    /// All contributors.
    async fn list_contributors(&self, owner: &str, repo: &str) -> Result<Vec<Contributor>, Error>;

    /// Create a reference at `sha`.
    async fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        ref_name: &str,
        sha: &str,
    ) -> Result<GitRef, Error>;

    /// Create a file on `branch` in one commit.
    async fn create_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        message: &str,
        content: &[u8],
        branch: &str,
    ) -> Result<FileCommit, Error>;

    /// Open a pull request from `head` into `base`.
    async fn create_pull(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: Option<&str>,
        head: &str,
        base: &str,
    ) -> Result<PullRequest, Error>;
}

/// Main client for interacting with the GitHub REST API.
///
/// # Example
///
/// ```rust,ignore
/// use github_assistant::GitHubClient;
///
/// let client = GitHubClient::from_env()?;
/// let me = client.users().authenticated().await?;
/// let repo = client.repos().get(&me.login, "dotfiles").await?;
/// println!("{} has {} stars", repo.full_name, repo.stargazers_count);
/// ```
pub struct GitHubClient {
    transport: Arc<HttpTransport>,
    users: UsersClient,
    repos: ReposClient,
    git: GitClient,
    contents: ContentsClient,
    pulls: PullsClient,
}

impl GitHubClient {
    /// Create a new GitHub client.
    ///
    /// # Arguments
    ///
    /// * `token` - Token sent as `Authorization: Bearer`
    /// * `base_url` - API root (default: <https://api.github.com>)
    /// * `timeout` - Request timeout (default: 30 seconds)
    /// * `retry_config` - Configuration for retry behavior (optional)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be created.
    pub fn new(
        token: &str,
        base_url: Option<&str>,
        timeout: Option<Duration>,
        retry_config: Option<RetryConfig>,
    ) -> Result<Self, Error> {
        let base_url = base_url.unwrap_or(DEFAULT_API_URL);
        let timeout = timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let transport = Arc::new(HttpTransport::new(base_url, token, timeout, retry_config)?);

        Ok(Self {
            users: UsersClient::new(Arc::clone(&transport)),
            repos: ReposClient::new(Arc::clone(&transport)),
            git: GitClient::new(Arc::clone(&transport)),
            contents: ContentsClient::new(Arc::clone(&transport)),
            pulls: PullsClient::new(Arc::clone(&transport)),
            transport,
        })
    }

    /// Create a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be created.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::new(
            &config.token,
            Some(&config.api_url),
            Some(config.timeout),
            Some(RetryConfig::with_max_retries(config.max_retries)),
        )
    }

    /// Create a client from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `GITHUB_TOKEN` - API token (required)
    /// * `GITHUB_API_URL` - API root (optional, default: <https://api.github.com>)
    /// * `GITHUB_TIMEOUT_SECS` - Request timeout (optional, default: 30)
    /// * `GITHUB_MAX_RETRIES` - Retry budget (optional, default: 3)
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, Error> {
        let config = Config::from_env()?;
        Self::from_config(&config)
    }

    /// Get the underlying HTTP transport (for advanced use cases).
    #[must_use]
    pub fn transport(&self) -> &Arc<HttpTransport> {
        &self.transport
    }

    /// Get the users client.
    #[must_use]
    pub fn users(&self) -> &UsersClient {
        &self.users
    }

    /// Get the repos client.
    #[must_use]
    pub fn repos(&self) -> &ReposClient {
        &self.repos
    }

    /// Get the git client.
    #[must_use]
    pub fn git(&self) -> &GitClient {
        &self.git
    }

    /// Get the contents client.
    #[must_use]
    pub fn contents(&self) -> &ContentsClient {
        &self.contents
    }

    /// Get the pulls client.
    #[must_use]
    pub fn pulls(&self) -> &PullsClient {
        &self.pulls
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn authenticated_user(&self) -> Result<User, Error> {
        self.users.authenticated().await
    }

    async fn get_repo(&self, owner: &str, repo: &str) -> Result<Repository, Error> {
        self.repos.get(owner, repo).await
    }

    async fn create_repo(&self, request: &CreateRepoRequest) -> Result<Repository, Error> {
        self.repos.create_for_authenticated_user(request).await
    }

    async fn repo_languages(&self, owner: &str, repo: &str) -> Result<Languages, Error> {
        self.repos.languages(owner, repo).await
    }

    async fn list_branches(&self, owner: &str, repo: &str) -> Result<Vec<Branch>, Error> {
        self.repos.branches(owner, repo).await
    }

    async fn get_branch(&self, owner: &str, repo: &str, branch: &str) -> Result<Branch, Error> {
        self.repos.get_branch(owner, repo, branch).await
    }

    async fn list_contributors(&self, owner: &str, repo: &str) -> Result<Vec<Contributor>, Error> {
        self.repos.contributors(owner, repo).await
    }

    async fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        ref_name: &str,
        sha: &str,
    ) -> Result<GitRef, Error> {
        self.git.create_ref(owner, repo, ref_name, sha).await
    }

    async fn create_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        message: &str,
        content: &[u8],
        branch: &str,
    ) -> Result<FileCommit, Error> {
        self.contents
            .create_file(owner, repo, path, message, content, Some(branch))
            .await
    }

    async fn create_pull(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: Option<&str>,
        head: &str,
        base: &str,
    ) -> Result<PullRequest, Error> {
        self.pulls.create(owner, repo, title, body, head, base).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client =
            GitHubClient::new("ghp_test", None, None, None).expect("Client creation should succeed");

        assert_eq!(client.transport().base_url(), DEFAULT_API_URL);
    }

    #[test]
    fn test_client_with_custom_base_url() {
        let client = GitHubClient::new(
            "ghp_test",
            Some("https://ghe.example.com/api/v3/"),
            None,
            None,
        )
        .expect("Client creation should succeed");

        assert_eq!(client.transport().base_url(), "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_client_from_config() {
        let mut config = Config::with_token("ghp_test");
        config.max_retries = 7;

        let client = GitHubClient::from_config(&config).expect("Client creation should succeed");
        assert_eq!(client.transport().retry_config().max_retries, 7);
    }
}
