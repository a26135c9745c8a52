//! PurchasableRegistry port - the host's registry of purchasable handlers.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::payment::PurchaseRequest;

/// Port for validating purchasable handlers and their data.
///
/// A purchase request references a purchasable type (user upgrade, resource
/// license, ...) whose handler may have been uninstalled since checkout
/// began; the pipeline re-checks both the handler and the purchasable data
/// before crediting anything.
#[async_trait]
pub trait PurchasableRegistry: Send + Sync {
    /// Whether a handler for this purchasable type is still registered.
    async fn handler_exists(&self, purchasable_type: &str) -> Result<bool, DomainError>;

    /// Whether the purchasable-specific data on this request is still intact.
    async fn validate_data(&self, request: &PurchaseRequest) -> Result<bool, DomainError>;
}
