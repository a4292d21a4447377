use std::env;
use std::time::Duration;

/// Default base URL for the GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retries for retryable responses.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Branch pull requests target unless overridden.
pub const DEFAULT_BASE_BRANCH: &str = "main";

/// Settings loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Personal access token sent as a bearer token
    pub token: String,
    /// REST API root, e.g. `https://ghe.example.com/api/v3` for Enterprise
    pub api_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Maximum retry attempts for rate limits and server errors
    pub max_retries: u32,
    /// Branch new pull requests merge into
    pub base_branch: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingEnvVar("GITHUB_TOKEN"))?;

        let api_url = env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_secs: u64 = env::var("GITHUB_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("GITHUB_TIMEOUT_SECS"))?;

        let max_retries = env::var("GITHUB_MAX_RETRIES")
            .unwrap_or_else(|_| DEFAULT_MAX_RETRIES.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("GITHUB_MAX_RETRIES"))?;

        let base_branch =
            env::var("GITHUB_BASE_BRANCH").unwrap_or_else(|_| DEFAULT_BASE_BRANCH.to_string());
        if base_branch.trim().is_empty() {
            return Err(ConfigError::InvalidValue("GITHUB_BASE_BRANCH"));
        }

        Ok(Self {
            token,
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            max_retries,
            base_branch,
        })
    }

    /// Build a configuration around an explicit token, using defaults for the rest.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
        }
    }
}

/// Load variables from a `.env` file in the working directory or its parents.
///
/// Returns the path that was loaded. A missing file is not an error.
pub fn load_dotenv() -> Option<std::path::PathBuf> {
    dotenvy::dotenv().ok()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
