//! PurchaseRequestStore port - access to the host's purchase request records.
//!
//! ## Why completion must be guarded
//!
//! The provider retries webhook delivery, and retries can arrive
//! concurrently. The pipeline itself performs no locking, so implementations
//! MUST enforce at-most-once completion per request key (compare-and-set on
//! status, or an equivalent unique-completion constraint). A duplicate
//! delivery observes [`CompletionOutcome::AlreadyCompleted`] and must never
//! credit the purchase twice.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::payment::PurchaseRequest;

/// Result of attempting to complete a purchase request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The request transitioned to completed (first delivery).
    Completed,
    /// The request was already completed (duplicate delivery).
    AlreadyCompleted,
}

/// Port for reading and completing purchase requests.
#[async_trait]
pub trait PurchaseRequestStore: Send + Sync {
    /// Find a purchase request by its correlation key.
    async fn find_by_request_key(
        &self,
        request_key: &str,
    ) -> Result<Option<PurchaseRequest>, DomainError>;

    /// Transition a pending request to completed, exactly once.
    ///
    /// Returns [`CompletionOutcome::AlreadyCompleted`] if another delivery
    /// won the race. Unknown keys are an error.
    async fn complete(&self, request_key: &str) -> Result<CompletionOutcome, DomainError>;
}
