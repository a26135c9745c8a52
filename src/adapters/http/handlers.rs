//! HTTP handlers for the gateway endpoints.
//!
//! Connects axum routes to the application layer command handlers.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    CheckoutError, InitiateCheckoutCommand, InitiateCheckoutHandler, ProcessCallbackHandler,
};
use crate::config::GatewayConfig;
use crate::ports::{
    PaymentLogSink, PaymentProfileStore, PurchasableRegistry, PurchaseRequestStore, TokenClient,
    UserDirectory,
};

use super::dto::{CheckoutRequest, CheckoutResponse, ErrorResponse, ResultResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; dependencies are Arc-wrapped for cheap sharing.
#[derive(Clone)]
pub struct GatewayAppState {
    pub profiles: Arc<dyn PaymentProfileStore>,
    pub purchases: Arc<dyn PurchaseRequestStore>,
    pub registry: Arc<dyn PurchasableRegistry>,
    pub users: Arc<dyn UserDirectory>,
    pub logs: Arc<dyn PaymentLogSink>,
    pub token_client: Arc<dyn TokenClient>,
    pub gateway: GatewayConfig,
}

impl GatewayAppState {
    /// Create handlers on demand from the shared state.
    pub fn process_callback_handler(&self) -> ProcessCallbackHandler {
        ProcessCallbackHandler::new(
            self.profiles.clone(),
            self.purchases.clone(),
            self.registry.clone(),
            self.users.clone(),
            self.logs.clone(),
        )
    }

    pub fn initiate_checkout_handler(&self) -> InitiateCheckoutHandler {
        InitiateCheckoutHandler::new(
            self.purchases.clone(),
            self.profiles.clone(),
            self.users.clone(),
            self.token_client.clone(),
            self.gateway.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /purchase/process - generic purchase processing.
///
/// Stand-in for the host's handler covering every other payment provider.
/// Requests for this gateway never reach it: the provider-guard middleware
/// intercepts them first.
pub async fn process_generic() -> impl IntoResponse {
    (StatusCode::OK, Json(ResultResponse::new("success")))
}

/// POST /purchase/checkout - initiate a hosted checkout.
///
/// Answers with the provider URL the payer's browser should be redirected to.
pub async fn initiate_checkout(
    State(state): State<GatewayAppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let handler = state.initiate_checkout_handler();
    let cmd = InitiateCheckoutCommand {
        request_key: request.request_key,
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(CheckoutResponse {
        redirect_url: result.redirect_url,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type converting checkout errors to HTTP responses.
pub struct CheckoutApiError(CheckoutError);

impl From<CheckoutError> for CheckoutApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            CheckoutError::PurchaseRequestNotFound
            | CheckoutError::ProfileNotFound
            | CheckoutError::PurchaserNotFound => StatusCode::NOT_FOUND,
            CheckoutError::Token(_) => StatusCode::BAD_GATEWAY,
            CheckoutError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse::new(self.0.to_string(), None);
        (status, Json(body)).into_response()
    }
}
