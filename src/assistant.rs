//! High-level repository workflows.
//!
//! [`Assistant`] strings the resource calls together into the three
//! operations the CLI exposes: locate-or-create a repository, summarize a
//! repository, and push a file through a fresh branch plus pull request.

use chrono::{Local, NaiveDateTime};
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::client::GitHubApi;
use crate::config::DEFAULT_BASE_BRANCH;
use crate::error::Error;
use crate::types::{CreateRepoRequest, EnsuredRepo, PushOutcome, RepoAnalysis, RepoSlug};

/// Path of the file created to initialize an empty repository.
pub const BOOTSTRAP_FILE: &str = "README.md";

/// Commit message of the initializing commit.
pub const BOOTSTRAP_MESSAGE: &str = "Initial commit";

/// Name of the branch a push at `at` goes through.
#[must_use]
pub fn update_branch_name(at: NaiveDateTime) -> String {
    format!("update_{}", at.format("%Y%m%d_%H%M%S"))
}

/// Title of the pull request opened for `file_path`.
#[must_use]
pub fn pull_request_title(file_path: &str) -> String {
    format!("Update {file_path}")
}

/// Repository workflows on top of a [`GitHubApi`].
pub struct Assistant<A> {
    api: A,
    base_branch: String,
    login: OnceCell<String>,
}

impl<A: GitHubApi> Assistant<A> {
    /// Create an assistant targeting the `main` base branch.
    pub fn new(api: A) -> Self {
        Self {
            api,
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
            login: OnceCell::new(),
        }
    }

    /// Target a different base branch for pull requests.
    #[must_use]
    pub fn with_base_branch(mut self, base_branch: impl Into<String>) -> Self {
        self.base_branch = base_branch.into();
        self
    }

    /// Get the underlying API client.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Branch pull requests merge into.
    #[must_use]
    pub fn base_branch(&self) -> &str {
        &self.base_branch
    }

    /// Login of the authenticated user, fetched on first use.
    ///
    /// # Errors
    ///
    /// Returns `GitHubError::Authentication` if the token is rejected.
    pub async fn login(&self) -> Result<&str, Error> {
        self.login
            .get_or_try_init(|| async {
                let user = self.api.authenticated_user().await?;
                info!(login = %user.login, "authenticated");
                Ok::<_, Error>(user.login)
            })
            .await
            .map(String::as_str)
    }

    /// Return the user's repository `name`, creating it if it does not exist.
    ///
    /// New repositories are public. Only a 404 on lookup leads to creation;
    /// any other lookup failure is returned as is.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails for a reason other than 404, if
    /// `name` refers to another owner's missing repository, or if creation
    /// fails.
    pub async fn ensure_repo(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<EnsuredRepo, Error> {
        let login = self.login().await?;
        let slug = RepoSlug::parse_or_owned_by(name, login)?;

        match self.api.get_repo(&slug.owner, &slug.name).await {
            Ok(repository) => {
                info!(repo = %slug, url = %repository.html_url, "repository already exists");
                Ok(EnsuredRepo {
                    repository,
                    created: false,
                })
            }
            Err(err) if err.is_not_found() => {
                if !slug.owner.eq_ignore_ascii_case(login) {
                    return Err(Error::InvalidInput(format!(
                        "repository {slug} not found, and repositories can only be created for {login}"
                    )));
                }

                warn!(repo = %slug, error = %err, "repository lookup failed, creating it");
                let request = CreateRepoRequest::public(&slug.name, description);
                let repository = self.api.create_repo(&request).await?;
                info!(repo = %repository.full_name, url = %repository.html_url, "created repository");

                Ok(EnsuredRepo {
                    repository,
                    created: true,
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Summarize a repository's metadata.
    ///
    /// `repo` is `owner/name`, or a bare name owned by the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns the first failing call's error.
    pub async fn analyze_repo(&self, repo: &str) -> Result<RepoAnalysis, Error> {
        let slug = self.resolve(repo).await?;

        let repository = self.api.get_repo(&slug.owner, &slug.name).await?;
        let languages = self.api.repo_languages(&slug.owner, &slug.name).await?;
        let branches = self.api.list_branches(&slug.owner, &slug.name).await?;
        let contributors = self.api.list_contributors(&slug.owner, &slug.name).await?;

        info!(
            repo = %slug,
            languages = languages.len(),
            branches = branches.len(),
            contributors = contributors.len(),
            "analyzed repository"
        );

        Ok(RepoAnalysis::from_parts(
            &repository,
            languages,
            branches,
            contributors,
        ))
    }

    /// Add a file through a new `update_<timestamp>` branch and open a pull
    /// request into the base branch.
    ///
    /// # Errors
    ///
    /// Returns the first failing call's error.
    pub async fn push_file(
        &self,
        repo_name: &str,
        file_path: &str,
        content: &[u8],
        commit_message: &str,
    ) -> Result<PushOutcome, Error> {
        let branch = update_branch_name(Local::now().naive_local());
        self.push_file_via(repo_name, &branch, file_path, content, commit_message)
            .await
    }

    /// Same as [`Assistant::push_file`] through an explicitly named branch.
    ///
    /// Steps:
    /// 1. fetch the base branch, initializing it with a README if missing;
    /// 2. create `refs/heads/<branch>` at the base branch's head;
    /// 3. create the file on `branch`;
    /// 4. open the pull request `Update <file_path>`.
    ///
    /// # Errors
    ///
    /// Returns the first failing call's error.
    pub async fn push_file_via(
        &self,
        repo_name: &str,
        branch: &str,
        file_path: &str,
        content: &[u8],
        commit_message: &str,
    ) -> Result<PushOutcome, Error> {
        if branch == self.base_branch {
            return Err(Error::InvalidInput(format!(
                "update branch must differ from base branch {branch}"
            )));
        }

        let slug = self.resolve(repo_name).await?;
        let (owner, name) = (slug.owner.as_str(), slug.name.as_str());
        let base = self.base_branch.as_str();

        let (source, bootstrapped_base) = match self.api.get_branch(owner, name, base).await {
            Ok(source) => (source, false),
            Err(err) if err.is_not_found() => {
                warn!(repo = %slug, base, "base branch missing, creating initial commit");
                self.api
                    .create_file(
                        owner,
                        name,
                        BOOTSTRAP_FILE,
                        BOOTSTRAP_MESSAGE,
                        format!("# {name}").as_bytes(),
                        base,
                    )
                    .await?;
                (self.api.get_branch(owner, name, base).await?, true)
            }
            Err(err) => return Err(err),
        };

        let ref_name = format!("refs/heads/{branch}");
        self.api
            .create_ref(owner, name, &ref_name, &source.commit.sha)
            .await?;
        info!(repo = %slug, branch, from = %source.commit.sha, "created branch");

        let file = self
            .api
            .create_file(owner, name, file_path, commit_message, content, branch)
            .await?;
        info!(repo = %slug, branch, path = file_path, "committed file");

        let pull_request = self
            .api
            .create_pull(
                owner,
                name,
                &pull_request_title(file_path),
                Some(commit_message),
                branch,
                base,
            )
            .await?;
        info!(
            repo = %slug,
            number = pull_request.number,
            url = %pull_request.html_url,
            "opened pull request"
        );

        Ok(PushOutcome {
            branch: branch.to_string(),
            file,
            pull_request,
            bootstrapped_base,
        })
    }

    async fn resolve(&self, repo: &str) -> Result<RepoSlug, Error> {
        if repo.contains('/') {
            repo.parse()
        } else {
            RepoSlug::parse_or_owned_by(repo, self.login().await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::error::GitHubError;
    use crate::testing::{MockGitHubApi, MockResponse};

    fn assistant() -> Assistant<MockGitHubApi> {
        Assistant::new(MockGitHubApi::new("octocat"))
    }

    fn not_found() -> GitHubError {
        GitHubError::NotFound {
            status: 404,
            message: "Not Found".to_string(),
            documentation_url: None,
            request_id: None,
        }
    }

    #[test]
    fn test_update_branch_name_format() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 5)
            .and_then(|d| d.and_hms_opt(9, 3, 7))
            .expect("valid date");

        assert_eq!(update_branch_name(at), "update_20240105_090307");
    }

    #[test]
    fn test_pull_request_title() {
        assert_eq!(pull_request_title("src/lib.rs"), "Update src/lib.rs");
    }

    #[tokio::test]
    async fn test_login_is_cached() {
        let assistant = assistant();

        assert_eq!(assistant.login().await.expect("login"), "octocat");
        assert_eq!(assistant.login().await.expect("login"), "octocat");
        assert_eq!(assistant.api().call_count("users.authenticated"), 1);
    }

    #[tokio::test]
    async fn test_ensure_repo_existing() {
        let assistant = assistant();

        let ensured = assistant.ensure_repo("tool", Some("desc")).await.expect("ensure");

        assert!(!ensured.created);
        assert_eq!(ensured.repository.full_name, "octocat/tool");
        let calls = assistant.api().get_calls(Some("repos.get"));
        assert_eq!(calls[0].args, vec!["octocat", "tool"]);
        assert!(!assistant.api().was_called("repos.create"));
    }

    #[tokio::test]
    async fn test_ensure_repo_creates_when_missing() {
        let assistant = assistant();
        assistant
            .api()
            .configure_get_repo(MockResponse::with_error(not_found()));

        let ensured = assistant
            .ensure_repo("tool", Some("GitHub helper"))
            .await
            .expect("ensure");

        assert!(ensured.created);
        assert_eq!(ensured.repository.name, "tool");
        let calls = assistant.api().get_calls(Some("repos.create"));
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args, vec!["tool", "Some(\"GitHub helper\")", "false"]);
    }

    #[tokio::test]
    async fn test_ensure_repo_propagates_other_lookup_errors() {
        let assistant = assistant();
        assistant
            .api()
            .configure_get_repo(MockResponse::with_error(GitHubError::Authorization {
                status: 403,
                message: "Resource not accessible by personal access token".to_string(),
                documentation_url: None,
                request_id: None,
            }));

        let result = assistant.ensure_repo("tool", None).await;

        assert!(matches!(
            result,
            Err(Error::GitHub(GitHubError::Authorization { .. }))
        ));
        assert!(!assistant.api().was_called("repos.create"));
    }

    #[tokio::test]
    async fn test_ensure_repo_refuses_to_create_for_other_owner() {
        let assistant = assistant();
        assistant
            .api()
            .configure_get_repo(MockResponse::with_error(not_found()));

        let result = assistant.ensure_repo("someone-else/tool", None).await;

        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(!assistant.api().was_called("repos.create"));
    }

    #[tokio::test]
    async fn test_analyze_repo_collects_everything() {
        let assistant = assistant();

        let analysis = assistant.analyze_repo("rust-lang/rust").await.expect("analyze");

        assert_eq!(analysis.name, "rust");
        assert_eq!(analysis.branches.len(), 1);
        assert_eq!(analysis.contributors.len(), 1);
        assert_eq!(analysis.primary_language(), Some("Rust"));
        for method in [
            "repos.get",
            "repos.languages",
            "repos.branches",
            "repos.contributors",
        ] {
            let calls = assistant.api().get_calls(Some(method));
            assert_eq!(calls.len(), 1, "{method}");
            assert_eq!(calls[0].args, vec!["rust-lang", "rust"], "{method}");
        }
        // Fully qualified slug needs no login lookup
        assert!(!assistant.api().was_called("users.authenticated"));
    }

    #[tokio::test]
    async fn test_analyze_repo_bare_name_uses_login() {
        let assistant = assistant();

        assistant.analyze_repo("tool").await.expect("analyze");

        let calls = assistant.api().get_calls(Some("repos.get"));
        assert_eq!(calls[0].args, vec!["octocat", "tool"]);
    }

    #[tokio::test]
    async fn test_analyze_repo_stops_on_error() {
        let assistant = assistant();
        assistant
            .api()
            .configure_get_repo(MockResponse::with_error(not_found()));

        let result = assistant.analyze_repo("octocat/missing").await;

        assert!(result.is_err_and(|e| e.is_not_found()));
        assert!(!assistant.api().was_called("repos.languages"));
    }

    #[tokio::test]
    async fn test_push_file_sequence() {
        let assistant = assistant();

        let outcome = assistant
            .push_file_via("tool", "update_1", "notes/a.txt", b"hello", "Add notes")
            .await
            .expect("push");

        assert!(!outcome.bootstrapped_base);
        assert_eq!(outcome.branch, "update_1");

        let methods: Vec<String> = assistant
            .api()
            .get_calls(None)
            .into_iter()
            .map(|c| c.method)
            .collect();
        assert_eq!(
            methods,
            vec![
                "users.authenticated",
                "repos.get_branch",
                "git.create_ref",
                "contents.create_file",
                "pulls.create",
            ]
        );

        let api = assistant.api();
        assert_eq!(
            api.get_calls(Some("repos.get_branch"))[0].args,
            vec!["octocat", "tool", "main"]
        );
        assert_eq!(
            api.get_calls(Some("git.create_ref"))[0].args,
            vec!["octocat", "tool", "refs/heads/update_1", "mock-sha-main"]
        );
        assert_eq!(
            api.get_calls(Some("contents.create_file"))[0].args,
            vec!["octocat", "tool", "notes/a.txt", "Add notes", "hello", "update_1"]
        );
        assert_eq!(
            api.get_calls(Some("pulls.create"))[0].args,
            vec![
                "octocat",
                "tool",
                "Update notes/a.txt",
                "Some(\"Add notes\")",
                "update_1",
                "main"
            ]
        );
    }

    #[tokio::test]
    async fn test_push_file_bootstraps_missing_base() {
        let assistant = assistant();
        assistant.api().queue_get_branch(MockResponse::with_error(not_found()));

        let outcome = assistant
            .push_file_via("tool", "update_1", "a.txt", b"x", "Add a")
            .await
            .expect("push");

        assert!(outcome.bootstrapped_base);
        let api = assistant.api();
        assert_eq!(api.call_count("repos.get_branch"), 2);

        let writes = api.get_calls(Some("contents.create_file"));
        assert_eq!(writes.len(), 2);
        assert_eq!(
            writes[0].args,
            vec!["octocat", "tool", "README.md", "Initial commit", "# tool", "main"]
        );
        assert_eq!(writes[1].args[2], "a.txt");
    }

    #[tokio::test]
    async fn test_push_file_custom_base_branch() {
        let assistant = assistant().with_base_branch("develop");

        let outcome = assistant
            .push_file("octocat/tool", "a.txt", b"x", "Add a")
            .await
            .expect("push");

        assert!(outcome.branch.starts_with("update_"));
        assert_eq!(outcome.branch.len(), "update_20240105_090307".len());
        let pulls = assistant.api().get_calls(Some("pulls.create"));
        assert_eq!(pulls[0].args[5], "develop");
    }

    #[tokio::test]
    async fn test_push_file_rejects_base_as_update_branch() {
        let assistant = assistant();

        let result = assistant
            .push_file_via("tool", "main", "a.txt", b"x", "Add a")
            .await;

        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(assistant.api().get_calls(None).is_empty());
    }

    #[tokio::test]
    async fn test_push_file_stops_when_pull_fails() {
        let assistant = assistant();
        assistant
            .api()
            .configure_create_pull(MockResponse::with_error(GitHubError::Validation {
                status: 422,
                message: "Validation Failed: No commits between main and update_1".to_string(),
                documentation_url: None,
                request_id: None,
            }));

        let result = assistant
            .push_file_via("tool", "update_1", "a.txt", b"x", "Add a")
            .await;

        assert!(matches!(
            result,
            Err(Error::GitHub(GitHubError::Validation { status: 422, .. }))
        ));
        assert!(assistant.api().was_called("contents.create_file"));
    }
}
