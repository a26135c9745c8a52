//! Axum router configuration for the gateway endpoints.

use axum::{middleware, routing::post, Router};

use super::handlers::{initiate_checkout, process_generic, GatewayAppState};
use super::middleware::provider_intercept;

/// Create the gateway router.
///
/// # Routes
///
/// - `POST /purchase/process` - provider webhook endpoint, shared with other
///   providers; the provider-guard middleware intercepts requests carrying
///   `_xfProvider=xsolla` ahead of the generic handler. Mounted without
///   CSRF/auth middleware: authenticity comes from the webhook signature.
/// - `POST /purchase/checkout` - initiate a hosted checkout for a pending
///   purchase request.
pub fn gateway_router(state: GatewayAppState) -> Router {
    let callback = Router::new()
        .route("/process", post(process_generic))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            provider_intercept,
        ));

    let checkout = Router::new().route("/checkout", post(initiate_checkout));

    Router::new()
        .nest("/purchase", callback.merge(checkout))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryPaymentLog, InMemoryProfileStore, InMemoryPurchaseStore, InMemoryUserDirectory,
        StaticPurchasableRegistry,
    };
    use crate::adapters::xsolla::XsollaTokenClient;
    use crate::config::GatewayConfig;
    use std::sync::Arc;

    fn test_state() -> GatewayAppState {
        GatewayAppState {
            profiles: Arc::new(InMemoryProfileStore::new()),
            purchases: Arc::new(InMemoryPurchaseStore::new()),
            registry: Arc::new(StaticPurchasableRegistry::new(["user_upgrade"])),
            users: Arc::new(InMemoryUserDirectory::new()),
            logs: Arc::new(InMemoryPaymentLog::new()),
            token_client: Arc::new(XsollaTokenClient::new(GatewayConfig::default())),
            gateway: GatewayConfig::default(),
        }
    }

    #[test]
    fn gateway_router_builds() {
        let _router: Router = gateway_router(test_state());
    }
}
