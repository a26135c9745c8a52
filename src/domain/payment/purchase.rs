//! Purchase request entity.
//!
//! Owned by the host platform; this service only reads it and drives its
//! status forward through the [`crate::ports::PurchaseRequestStore`] port.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a purchase request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStatus {
    /// Checkout started, payment confirmation not yet received.
    Pending,
    /// Payment confirmed; the purchase has been credited.
    Completed,
}

/// One checkout attempt awaiting payment confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRequest {
    /// Host-side numeric identifier, sent to the provider as
    /// `external_payment_id`.
    pub purchase_request_id: u64,

    /// Unique correlation key round-tripped through the provider's custom
    /// parameters.
    pub request_key: String,

    /// Purchasing user.
    pub user_id: u64,

    /// Payment profile this request was created against.
    pub payment_profile_id: u32,

    /// Registered purchasable handler type (e.g. `user_upgrade`).
    pub purchasable_type: String,

    /// Purchase title shown on the provider's checkout page.
    pub title: String,

    /// Expected cost.
    pub cost_amount: f64,

    /// Expected currency code (exact, case-sensitive).
    pub cost_currency: String,

    /// Lifecycle status.
    pub status: PurchaseStatus,
}

impl PurchaseRequest {
    pub fn is_completed(&self) -> bool {
        self.status == PurchaseStatus::Completed
    }
}
