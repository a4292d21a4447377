//! Mock GitHub API for testing.
//!
//! `MockGitHubApi` records every call with its arguments and answers with
//! configured responses, or defaults derived from the arguments.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::client::GitHubApi;
use crate::error::{Error, GitHubError};
use crate::types::{
    Branch, CommitRef, ContentInfo, Contributor, CreateRepoRequest, FileCommit, GitObject, GitRef,
    Languages, PullRef, PullRequest, Repository, User,
};

/// Record of a method call.
#[derive(Debug, Clone)]
pub struct MockCall {
    /// Method name (e.g., "repos.get", "pulls.create")
    pub method: String,
    /// Arguments passed to the method
    pub args: Vec<String>,
    /// Timestamp of the call
    pub timestamp: DateTime<Utc>,
}

impl MockCall {
    /// Create a new mock call record.
    pub fn new(method: &str, args: Vec<String>) -> Self {
        Self {
            method: method.to_string(),
            args,
            timestamp: Utc::now(),
        }
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub struct MockResponse<T: Clone> {
    /// The data to return
    pub data: Option<T>,
    /// Error to return instead of data
    pub error: Option<GitHubError>,
    /// Number of times this response has been used
    pub call_count: u32,
}

impl<T: Clone> Default for MockResponse<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            call_count: 0,
        }
    }
}

impl<T: Clone> MockResponse<T> {
    /// Create a new mock response with data.
    pub fn with_data(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    /// Create a new mock response with an API error.
    pub fn with_error(error: GitHubError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// A 404 response.
    pub fn not_found() -> Self {
        Self::with_error(GitHubError::NotFound {
            status: 404,
            message: "Not Found".to_string(),
            documentation_url: None,
            request_id: None,
        })
    }

    /// Get the result, returning either the configured data or error.
    fn get_result(&mut self, default: T) -> Result<T, Error> {
        self.call_count += 1;
        if let Some(error) = &self.error {
            return Err(Error::GitHub(error.clone()));
        }
        Ok(self.data.clone().unwrap_or(default))
    }
}

/// Internal state for the mock client.
struct MockClientState {
    login: String,
    calls: Vec<MockCall>,
}

impl MockClientState {
    fn record_call(&mut self, method: &str, args: Vec<String>) {
        self.calls.push(MockCall::new(method, args));
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

fn mock_user(login: &str) -> User {
    User {
        login: login.to_string(),
        id: 1,
        html_url: format!("https://github.com/{login}"),
        name: None,
    }
}

fn mock_repo(owner: &str, name: &str, description: Option<String>, private: bool) -> Repository {
    Repository {
        id: 1,
        name: name.to_string(),
        full_name: format!("{owner}/{name}"),
        owner: mock_user(owner),
        html_url: format!("https://github.com/{owner}/{name}"),
        description,
        private,
        default_branch: Some("main".to_string()),
        created_at: Utc::now(),
        stargazers_count: 0,
        forks_count: 0,
        open_issues_count: 0,
    }
}

fn mock_branch(name: &str) -> Branch {
    Branch {
        name: name.to_string(),
        commit: CommitRef {
            sha: format!("mock-sha-{name}"),
        },
        protected: false,
    }
}

/// Mock implementation of [`GitHubApi`] for testing.
///
/// # Example
///
/// ```rust
/// use github_assistant::testing::{MockGitHubApi, MockResponse};
/// use github_assistant::Assistant;
///
/// let mock = MockGitHubApi::new("octocat");
/// mock.configure_get_repo(MockResponse::not_found());
/// let assistant = Assistant::new(mock);
/// assert_eq!(assistant.api().call_count("repos.get"), 0);
/// ```
pub struct MockGitHubApi {
    state: Mutex<MockClientState>,
    authenticated_user_response: Mutex<MockResponse<User>>,
    get_repo_response: Mutex<MockResponse<Repository>>,
    create_repo_response: Mutex<MockResponse<Repository>>,
    languages_response: Mutex<MockResponse<Languages>>,
    branches_response: Mutex<MockResponse<Vec<Branch>>>,
    get_branch_queue: Mutex<VecDeque<MockResponse<Branch>>>,
    get_branch_response: Mutex<MockResponse<Branch>>,
    contributors_response: Mutex<MockResponse<Vec<Contributor>>>,
    create_ref_response: Mutex<MockResponse<GitRef>>,
    create_file_response: Mutex<MockResponse<FileCommit>>,
    create_pull_response: Mutex<MockResponse<PullRequest>>,
}

impl MockGitHubApi {
    /// Create a new mock API.
    ///
    /// # Arguments
    ///
    /// * `login` - Login reported for the authenticated user
    pub fn new(login: &str) -> Self {
        Self {
            state: Mutex::new(MockClientState {
                login: login.to_string(),
                calls: Vec::new(),
            }),
            authenticated_user_response: Mutex::new(MockResponse::default()),
            get_repo_response: Mutex::new(MockResponse::default()),
            create_repo_response: Mutex::new(MockResponse::default()),
            languages_response: Mutex::new(MockResponse::default()),
            branches_response: Mutex::new(MockResponse::default()),
            get_branch_queue: Mutex::new(VecDeque::new()),
            get_branch_response: Mutex::new(MockResponse::default()),
            contributors_response: Mutex::new(MockResponse::default()),
            create_ref_response: Mutex::new(MockResponse::default()),
            create_file_response: Mutex::new(MockResponse::default()),
            create_pull_response: Mutex::new(MockResponse::default()),
        }
    }

    /// Get the login of the mocked authenticated user.
    #[must_use]
    pub fn login(&self) -> String {
        lock(&self.state).login.clone()
    }

    /// Configure the response for authenticated_user() calls.
    pub fn configure_authenticated_user(&self, response: MockResponse<User>) {
        *lock(&self.authenticated_user_response) = response;
    }

    /// Configure the response for get_repo() calls.
    pub fn configure_get_repo(&self, response: MockResponse<Repository>) {
        *lock(&self.get_repo_response) = response;
    }

    /// Configure the response for create_repo() calls.
    pub fn configure_create_repo(&self, response: MockResponse<Repository>) {
        *lock(&self.create_repo_response) = response;
    }

    /// Configure the response for repo_languages() calls.
    pub fn configure_languages(&self, response: MockResponse<Languages>) {
        *lock(&self.languages_response) = response;
    }

    /// Configure the response for list_branches() calls.
    pub fn configure_branches(&self, response: MockResponse<Vec<Branch>>) {
        *lock(&self.branches_response) = response;
    }

    /// Configure the response for every get_branch() call.
    pub fn configure_get_branch(&self, response: MockResponse<Branch>) {
        *lock(&self.get_branch_response) = response;
    }

    /// Queue a one-shot response for the next get_branch() call.
    ///
    /// Queued responses are used in order before the configured one.
    pub fn queue_get_branch(&self, response: MockResponse<Branch>) {
        lock(&self.get_branch_queue).push_back(response);
    }

    /// Configure the response for list_contributors() calls.
    pub fn configure_contributors(&self, response: MockResponse<Vec<Contributor>>) {
        *lock(&self.contributors_response) = response;
    }

    /// Configure the response for create_ref() calls.
    pub fn configure_create_ref(&self, response: MockResponse<GitRef>) {
        *lock(&self.create_ref_response) = response;
    }

    /// Configure the response for create_file() calls.
    pub fn configure_create_file(&self, response: MockResponse<FileCommit>) {
        *lock(&self.create_file_response) = response;
    }

    /// Configure the response for create_pull() calls.
    pub fn configure_create_pull(&self, response: MockResponse<PullRequest>) {
        *lock(&self.create_pull_response) = response;
    }

    /// Check if a method was called.
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        lock(&self.state).calls.iter().any(|call| call.method == method)
    }

    /// Get the number of times a method was called.
    #[must_use]
    pub fn call_count(&self, method: &str) -> usize {
        lock(&self.state)
            .calls
            .iter()
            .filter(|call| call.method == method)
            .count()
    }

    /// Get recorded calls, optionally filtered by method.
    #[must_use]
    pub fn get_calls(&self, method: Option<&str>) -> Vec<MockCall> {
        let state = lock(&self.state);
        match method {
            Some(m) => state.calls.iter().filter(|call| call.method == m).cloned().collect(),
            None => state.calls.clone(),
        }
    }

    /// Reset all recorded calls.
    pub fn reset(&self) {
        lock(&self.state).calls.clear();
    }

    fn record(&self, method: &str, args: &[&str]) {
        lock(&self.state).record_call(method, args.iter().map(ToString::to_string).collect());
    }
}

#[async_trait]
impl GitHubApi for MockGitHubApi {
    async fn authenticated_user(&self) -> Result<User, Error> {
        self.record("users.authenticated", &[]);
        let default = mock_user(&self.login());
        lock(&self.authenticated_user_response).get_result(default)
    }

    async fn get_repo(&self, owner: &str, repo: &str) -> Result<Repository, Error> {
        self.record("repos.get", &[owner, repo]);
        lock(&self.get_repo_response).get_result(mock_repo(owner, repo, None, false))
    }

    async fn create_repo(&self, request: &CreateRepoRequest) -> Result<Repository, Error> {
        let description = format!("{:?}", request.description);
        let private = request.private.to_string();
        self.record(
            "repos.create",
            &[request.name.as_str(), description.as_str(), private.as_str()],
        );

        let default = mock_repo(
            &self.login(),
            &request.name,
            request.description.clone(),
            request.private,
        );
        lock(&self.create_repo_response).get_result(default)
    }

    async fn repo_languages(&self, owner: &str, repo: &str) -> Result<Languages, Error> {
        self.record("repos.languages", &[owner, repo]);
        let default = Languages::from([("Rust".to_string(), 1000)]);
        lock(&self.languages_response).get_result(default)
    }

    async fn list_branches(&self, owner: &str, repo: &str) -> Result<Vec<Branch>, Error> {
        self.record("repos.branches", &[owner, repo]);
        lock(&self.branches_response).get_result(vec![mock_branch("main")])
    }

    async fn get_branch(&self, owner: &str, repo: &str, branch: &str) -> Result<Branch, Error> {
        self.record("repos.get_branch", &[owner, repo, branch]);

        let queued = lock(&self.get_branch_queue).pop_front();
        match queued {
            Some(mut response) => response.get_result(mock_branch(branch)),
            None => lock(&self.get_branch_response).get_result(mock_branch(branch)),
        }
    }

    async fn list_contributors(&self, owner: &str, repo: &str) -> Result<Vec<Contributor>, Error> {
        self.record("repos.contributors", &[owner, repo]);
        let default = vec![Contributor {
            login: owner.to_string(),
            id: 1,
            contributions: 1,
        }];
        lock(&self.contributors_response).get_result(default)
    }

    async fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        ref_name: &str,
        sha: &str,
    ) -> Result<GitRef, Error> {
        self.record("git.create_ref", &[owner, repo, ref_name, sha]);
        let default = GitRef {
            ref_name: ref_name.to_string(),
            object: GitObject {
                sha: sha.to_string(),
                kind: "commit".to_string(),
            },
        };
        lock(&self.create_ref_response).get_result(default)
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
        let text = String::from_utf8_lossy(content);
        self.record(
            "contents.create_file",
            &[owner, repo, path, message, &*text, branch],
        );

        let default = FileCommit {
            content: Some(ContentInfo {
                name: path.rsplit('/').next().unwrap_or(path).to_string(),
                path: path.to_string(),
                sha: "mock-blob-sha".to_string(),
                html_url: Some(format!(
                    "https://github.com/{owner}/{repo}/blob/{branch}/{path}"
                )),
            }),
            commit: CommitRef {
                sha: "mock-commit-sha".to_string(),
            },
        };
        lock(&self.create_file_response).get_result(default)
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
        let body_arg = format!("{body:?}");
        self.record("pulls.create", &[owner, repo, title, body_arg.as_str(), head, base]);

        let default = PullRequest {
            number: 1,
            html_url: format!("https://github.com/{owner}/{repo}/pull/1"),
            title: title.to_string(),
            state: "open".to_string(),
            body: body.map(String::from),
            head: PullRef {
                ref_name: head.to_string(),
                sha: "mock-commit-sha".to_string(),
            },
            base: PullRef {
                ref_name: base.to_string(),
                sha: format!("mock-sha-{base}"),
            },
            created_at: Utc::now(),
        };
        lock(&self.create_pull_response).get_result(default)
    }
}
