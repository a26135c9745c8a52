//! UserDirectory port - lookups against the host's user table.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// The subset of a forum user this gateway needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumUser {
    pub user_id: u64,
    pub username: String,
    pub email: String,
}

/// Port for resolving and validating forum users.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by the public identifier the provider searches with.
    async fn find_by_public_id(&self, public_id: &str)
        -> Result<Option<ForumUser>, DomainError>;

    /// Find a user by internal id.
    async fn find_by_id(&self, user_id: u64) -> Result<Option<ForumUser>, DomainError>;

    /// Whether a user with this internal id exists.
    async fn exists(&self, user_id: u64) -> Result<bool, DomainError> {
        Ok(self.find_by_id(user_id).await?.is_some())
    }
}
