//! TokenClient port - outbound access token issuance for hosted checkout.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::payment::PaymentProfile;

/// Opaque key/value bag round-tripped from checkout initiation to the
/// payment webhook.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TokenCustomParameters {
    /// Purchase title shown on the checkout page.
    pub title: String,
    /// Correlation key echoed back in payment notifications.
    pub request_key: String,
}

/// Parameters for one hosted-checkout token request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TokenRequest {
    pub merchant_id: String,
    pub project_id: String,
    pub user_id: String,
    pub user_email: String,
    /// Host-side purchase request id, echoed in provider reports.
    pub external_payment_id: String,
    pub username: String,
    pub amount: f64,
    pub currency: String,
    pub custom_parameters: TokenCustomParameters,
    /// True unless live payments are enabled.
    pub sandbox_mode: bool,
}

/// Errors from token issuance.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Transport failure reaching the provider. Not retried here; the
    /// failure propagates to the request-handling layer.
    #[error("Token request failed: {0}")]
    Network(String),

    /// The provider rejected the request.
    #[error("Provider rejected token request ({status}): {message}")]
    Provider { status: u16, message: String },

    /// The provider answered with something other than a token.
    #[error("Invalid token response: {0}")]
    InvalidResponse(String),
}

/// Port for exchanging purchase parameters for a checkout access token.
#[async_trait]
pub trait TokenClient: Send + Sync {
    /// Request an access token for the hosted checkout UI.
    ///
    /// Single blocking request/response, no retry policy.
    async fn create_payment_token(
        &self,
        profile: &PaymentProfile,
        request: &TokenRequest,
    ) -> Result<String, TokenError>;
}
