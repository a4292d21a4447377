//! Users resource client.

use std::sync::Arc;

use crate::error::Error;
use crate::transport::HttpTransport;
use crate::types::User;

/// Client for account lookups.
pub struct UsersClient {
    transport: Arc<HttpTransport>,
}

impl UsersClient {
    /// Create a new users client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Get the account the token belongs to.
    ///
    /// # Errors
    ///
    /// Returns `GitHubError::Authentication` if the token is rejected.
    pub async fn authenticated(&self) -> Result<User, Error> {
        self.transport.get("/user").await
    }
}
