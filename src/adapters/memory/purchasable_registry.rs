//! Static purchasable registry.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::payment::PurchaseRequest;
use crate::ports::PurchasableRegistry;

/// Registry with a fixed set of registered purchasable types.
///
/// The host rebuilds its registry when add-ons change; this adapter models
/// the snapshot the gateway sees at request time.
pub struct StaticPurchasableRegistry {
    registered: Vec<String>,
}

impl StaticPurchasableRegistry {
    pub fn new(registered: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            registered: registered.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl PurchasableRegistry for StaticPurchasableRegistry {
    async fn handler_exists(&self, purchasable_type: &str) -> Result<bool, DomainError> {
        Ok(self.registered.iter().any(|t| t == purchasable_type))
    }

    async fn validate_data(&self, request: &PurchaseRequest) -> Result<bool, DomainError> {
        // Data is intact when the request still references a registered type
        // and carries a non-empty title.
        Ok(self.registered.iter().any(|t| t == &request.purchasable_type)
            && !request.title.is_empty())
    }
}
