//! InitiateCheckoutHandler - command handler for starting a hosted checkout.
//!
//! Exchanges a pending purchase request for a provider access token and the
//! hosted-checkout URL the payer's browser is redirected to.

use std::sync::Arc;

use thiserror::Error;

use crate::config::GatewayConfig;
use crate::domain::foundation::DomainError;
use crate::ports::{
    PaymentProfileStore, PurchaseRequestStore, TokenClient, TokenCustomParameters, TokenError,
    TokenRequest, UserDirectory,
};

/// Command to initiate checkout for a pending purchase request.
#[derive(Debug, Clone)]
pub struct InitiateCheckoutCommand {
    pub request_key: String,
}

/// Result of checkout initiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiateCheckoutResult {
    /// Hosted-checkout URL to redirect the payer to.
    pub redirect_url: String,
}

/// Errors from checkout initiation.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Purchase request not found")]
    PurchaseRequestNotFound,

    #[error("Payment profile not found")]
    ProfileNotFound,

    #[error("Purchaser not found")]
    PurchaserNotFound,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Internal error")]
    Store(#[source] DomainError),
}

impl From<DomainError> for CheckoutError {
    fn from(err: DomainError) -> Self {
        CheckoutError::Store(err)
    }
}

/// Handler for checkout initiation.
pub struct InitiateCheckoutHandler {
    purchases: Arc<dyn PurchaseRequestStore>,
    profiles: Arc<dyn PaymentProfileStore>,
    users: Arc<dyn UserDirectory>,
    token_client: Arc<dyn TokenClient>,
    gateway: GatewayConfig,
}

impl InitiateCheckoutHandler {
    pub fn new(
        purchases: Arc<dyn PurchaseRequestStore>,
        profiles: Arc<dyn PaymentProfileStore>,
        users: Arc<dyn UserDirectory>,
        token_client: Arc<dyn TokenClient>,
        gateway: GatewayConfig,
    ) -> Self {
        Self {
            purchases,
            profiles,
            users,
            token_client,
            gateway,
        }
    }

    pub async fn handle(
        &self,
        cmd: InitiateCheckoutCommand,
    ) -> Result<InitiateCheckoutResult, CheckoutError> {
        let purchase = self
            .purchases
            .find_by_request_key(&cmd.request_key)
            .await?
            .ok_or(CheckoutError::PurchaseRequestNotFound)?;

        let profile = self
            .profiles
            .find_by_id(purchase.payment_profile_id)
            .await?
            .ok_or(CheckoutError::ProfileNotFound)?;

        let user = self
            .users
            .find_by_id(purchase.user_id)
            .await?
            .ok_or(CheckoutError::PurchaserNotFound)?;

        let token_request = TokenRequest {
            merchant_id: profile.merchant_id.clone(),
            project_id: profile.project_id.clone(),
            user_id: user.user_id.to_string(),
            user_email: user.email,
            external_payment_id: purchase.purchase_request_id.to_string(),
            username: user.username,
            amount: purchase.cost_amount,
            currency: purchase.cost_currency.clone(),
            custom_parameters: TokenCustomParameters {
                title: purchase.title.clone(),
                request_key: purchase.request_key.clone(),
            },
            sandbox_mode: self.gateway.sandbox_mode(),
        };

        let token = self
            .token_client
            .create_payment_token(&profile, &token_request)
            .await?;

        Ok(InitiateCheckoutResult {
            redirect_url: self.gateway.paystation_url(&token),
        })
    }
}
