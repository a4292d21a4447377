//! Repository-related data models.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::User;

/// Bytes of code per language, as reported by the languages endpoint.
pub type Languages = BTreeMap<String, u64>;

/// Repository information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// Numeric repository ID
    pub id: u64,
    /// Repository name
    pub name: String,
    /// `owner/name`
    pub full_name: String,
    /// Owning account
    pub owner: User,
    /// Web page of the repository
    pub html_url: String,
    /// Repository description
    pub description: Option<String>,
    /// Whether the repository is private
    #[serde(default)]
    pub private: bool,
    /// Default branch name (absent on some minimal payloads)
    #[serde(default)]
    pub default_branch: Option<String>,
    /// When the repository was created
    pub created_at: DateTime<Utc>,
    /// Number of stars
    #[serde(default)]
    pub stargazers_count: u64,
    /// Number of forks
    #[serde(default)]
    pub forks_count: u64,
    /// Open issues plus open pull requests
    #[serde(default)]
    pub open_issues_count: u64,
}

/// Body of `POST /user/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRepoRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub private: bool,
}

impl CreateRepoRequest {
    /// A public repository with an optional description.
    pub fn public(name: &str, description: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            description: description.filter(|d| !d.is_empty()).map(String::from),
            private: false,
        }
    }
}

/// Commit pointer embedded in branch payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    /// Commit SHA
    pub sha: String,
}

/// Branch information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Branch name
    pub name: String,
    /// Head commit
    pub commit: CommitRef,
    /// Whether branch protection is enabled
    #[serde(default)]
    pub protected: bool,
}

/// Repository contributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// Account name
    pub login: String,
    /// Numeric account ID
    pub id: u64,
    /// Number of commits on the default branch
    #[serde(default)]
    pub contributions: u64,
}

/// `owner/name` identifier of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl RepoSlug {
    pub fn new(owner: &str, name: &str) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }

    /// Parse `owner/name`, or qualify a bare `name` with `default_owner`.
    ///
    /// Both forms drop surrounding whitespace and one trailing `.git`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` for empty, `.` or `..` parts, whitespace,
    /// or extra slashes.
    pub fn parse_or_owned_by(input: &str, default_owner: &str) -> Result<Self, Error> {
        if input.contains('/') {
            input.parse()
        } else {
            let name = strip_git_suffix(input);
            validate_part(name, input)?;
            validate_part(default_owner, input)?;
            Ok(Self::new(default_owner, name))
        }
    }
}

fn strip_git_suffix(input: &str) -> &str {
    let trimmed = input.trim();
    trimmed.strip_suffix(".git").unwrap_or(trimmed)
}

fn validate_part(part: &str, input: &str) -> Result<(), Error> {
    if part.is_empty() || part == "." || part == ".." || part.chars().any(char::is_whitespace) {
        return Err(Error::InvalidInput(format!(
            "invalid repository '{input}', expected 'owner/name' or 'name'"
        )));
    }
    Ok(())
}

impl FromStr for RepoSlug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = strip_git_suffix(s).split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) => {
                validate_part(owner, s)?;
                validate_part(name, s)?;
                Ok(Self::new(owner, name))
            }
            _ => Err(Error::InvalidInput(format!(
                "invalid repository '{s}', expected 'owner/name'"
            ))),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
