//! In-memory purchase request store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::domain::payment::{PurchaseRequest, PurchaseStatus};
use crate::ports::{CompletionOutcome, PurchaseRequestStore};

/// Purchase request store backed by a map keyed on request key.
///
/// Completion is a compare-and-set under the write lock: the first delivery
/// flips `Pending -> Completed`, later deliveries observe
/// [`CompletionOutcome::AlreadyCompleted`].
#[derive(Default)]
pub struct InMemoryPurchaseStore {
    requests: RwLock<HashMap<String, PurchaseRequest>>,
}

impl InMemoryPurchaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a purchase request (the host creates these when checkout begins).
    pub async fn insert(&self, request: PurchaseRequest) {
        self.requests
            .write()
            .await
            .insert(request.request_key.clone(), request);
    }
}

#[async_trait]
impl PurchaseRequestStore for InMemoryPurchaseStore {
    async fn find_by_request_key(
        &self,
        request_key: &str,
    ) -> Result<Option<PurchaseRequest>, DomainError> {
        Ok(self.requests.read().await.get(request_key).cloned())
    }

    async fn complete(&self, request_key: &str) -> Result<CompletionOutcome, DomainError> {
        let mut requests = self.requests.write().await;
        let request = requests
            .get_mut(request_key)
            .ok_or_else(|| DomainError::not_found("purchase request"))?;

        match request.status {
            PurchaseStatus::Pending => {
                request.status = PurchaseStatus::Completed;
                Ok(CompletionOutcome::Completed)
            }
            PurchaseStatus::Completed => Ok(CompletionOutcome::AlreadyCompleted),
        }
    }
}
