//! In-memory payment profile store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::domain::payment::{PaymentProfile, ProfileConfigError};
use crate::ports::PaymentProfileStore;

/// Profile store backed by a vector; profiles are few and scanned linearly.
#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<Vec<PaymentProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a profile, enforcing credential validation the way the host's
    /// admin UI does: an incomplete profile is rejected before it lands.
    pub async fn save(&self, profile: PaymentProfile) -> Result<(), ProfileConfigError> {
        profile.validate()?;
        let mut profiles = self.profiles.write().await;
        profiles.retain(|p| p.profile_id != profile.profile_id);
        profiles.push(profile);
        Ok(())
    }
}

#[async_trait]
impl PaymentProfileStore for InMemoryProfileStore {
    async fn all(&self) -> Result<Vec<PaymentProfile>, DomainError> {
        Ok(self.profiles.read().await.clone())
    }

    async fn find_by_id(&self, profile_id: u32) -> Result<Option<PaymentProfile>, DomainError> {
        Ok(self
            .profiles
            .read()
            .await
            .iter()
            .find(|p| p.profile_id == profile_id)
            .cloned())
    }
}
