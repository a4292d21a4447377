//! Results produced by the assistant's operations.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Branch, Contributor, FileCommit, Languages, PullRequest, Repository};

/// Summary of a repository's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoAnalysis {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub stars: u64,
    pub forks: u64,
    /// Open issues, pull requests included
    pub issues: u64,
    pub languages: Languages,
    pub branches: Vec<Branch>,
    pub contributors: Vec<Contributor>,
}

impl RepoAnalysis {
    pub fn from_parts(
        repo: &Repository,
        languages: Languages,
        branches: Vec<Branch>,
        contributors: Vec<Contributor>,
    ) -> Self {
        Self {
            name: repo.name.clone(),
            created_at: repo.created_at,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            issues: repo.open_issues_count,
            languages,
            branches,
            contributors,
        }
    }

    /// Language with the most bytes, ties broken alphabetically.
    #[must_use]
    pub fn primary_language(&self) -> Option<&str> {
        self.languages
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn total_code_bytes(&self) -> u64 {
        self.languages.values().sum()
    }
}

impl fmt::Display for RepoAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Repository: {}", self.name)?;
        writeln!(f, "Created:    {}", self.created_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f, "Stars:      {}", self.stars)?;
        writeln!(f, "Forks:      {}", self.forks)?;
        writeln!(f, "Issues:     {}", self.issues)?;

        writeln!(f, "Languages:")?;
        let total = self.total_code_bytes();
        let mut languages: Vec<_> = self.languages.iter().collect();
        languages.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (language, bytes) in languages {
            #[allow(clippy::cast_precision_loss)]
            let share = if total == 0 {
                0.0
            } else {
                *bytes as f64 * 100.0 / total as f64
            };
            writeln!(f, "  - {language}: {bytes} bytes ({share:.1}%)")?;
        }

        writeln!(f, "Branches ({}):", self.branches.len())?;
        for branch in &self.branches {
            writeln!(f, "  - {}", branch.name)?;
        }

        write!(f, "Contributors ({}):", self.contributors.len())?;
        for contributor in &self.contributors {
            write!(
                f,
                "\n  - {} ({} contributions)",
                contributor.login, contributor.contributions
            )?;
        }
        Ok(())
    }
}

/// Outcome of locating or creating a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsuredRepo {
    pub repository: Repository,
    /// `true` if the repository did not exist and was created
    pub created: bool,
}

/// Outcome of pushing a file through a branch and pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushOutcome {
    /// Branch created for the change
    pub branch: String,
    /// Commit that added the file
    pub file: FileCommit,
    pub pull_request: PullRequest,
    /// `true` if the base branch had to be created with an initial README
    pub bootstrapped_base: bool,
}
