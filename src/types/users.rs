//! Account models.

use serde::{Deserialize, Serialize};

/// A GitHub account (user or organization) as embedded in API payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Account name used in URLs
    pub login: String,
    /// Numeric account ID
    pub id: u64,
    /// Profile page
    #[serde(default)]
    pub html_url: String,
    /// Display name (only on the full user object)
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserialize_ignores_unknown_fields() {
        let json = r#"{
            "login": "octocat",
            "id": 1,
            "node_id": "MDQ6VXNlcjE=",
            "html_url": "https://github.com/octocat",
            "type": "User",
            "site_admin": false,
            "name": "The Octocat"
        }"#;

        let user: User = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(user.login, "octocat");
        assert_eq!(user.name.as_deref(), Some("The Octocat"));
    }
}
