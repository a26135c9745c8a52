//! PaymentProfileStore port - access to configured payment profiles.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::payment::PaymentProfile;

/// Port for reading the payment profiles configured by the host admin.
#[async_trait]
pub trait PaymentProfileStore: Send + Sync {
    /// All configured profiles for this provider.
    async fn all(&self) -> Result<Vec<PaymentProfile>, DomainError>;

    /// Find a profile by its host-side identifier.
    async fn find_by_id(&self, profile_id: u32) -> Result<Option<PaymentProfile>, DomainError>;
}
