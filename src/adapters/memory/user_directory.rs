//! In-memory user directory.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::ports::{ForumUser, UserDirectory};

/// User directory backed by a vector.
///
/// The public identifier the provider searches with is the username, which
/// is what the forum exposes publicly.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<Vec<ForumUser>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: ForumUser) {
        self.users.write().await.push(user);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_public_id(&self, public_id: &str) -> Result<Option<ForumUser>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.username == public_id)
            .cloned())
    }

    async fn find_by_id(&self, user_id: u64) -> Result<Option<ForumUser>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.user_id == user_id)
            .cloned())
    }
}
