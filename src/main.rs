//! Paygate Xsolla server binary.
//!
//! Wires the in-memory host stand-ins to the HTTP layer and serves the
//! gateway endpoints. In a real deployment the host platform provides the
//! purchase store, profile store, user directory and payment log.

use std::sync::Arc;
use std::time::Duration;

use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use paygate_xsolla::adapters::http::{gateway_router, GatewayAppState};
use paygate_xsolla::adapters::memory::{
    InMemoryPaymentLog, InMemoryProfileStore, InMemoryPurchaseStore, InMemoryUserDirectory,
    StaticPurchasableRegistry,
};
use paygate_xsolla::adapters::xsolla::XsollaTokenClient;
use paygate_xsolla::config::AppConfig;
use paygate_xsolla::domain::payment::PROVIDER_TITLE;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.server.log_level)
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let state = GatewayAppState {
        profiles: Arc::new(InMemoryProfileStore::new()),
        purchases: Arc::new(InMemoryPurchaseStore::new()),
        registry: Arc::new(StaticPurchasableRegistry::new(["user_upgrade"])),
        users: Arc::new(InMemoryUserDirectory::new()),
        logs: Arc::new(InMemoryPaymentLog::new()),
        token_client: Arc::new(XsollaTokenClient::new(config.gateway.clone())),
        gateway: config.gateway.clone(),
    };

    let app = gateway_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr();
    tracing::info!(
        %addr,
        provider = PROVIDER_TITLE,
        live_payments = config.gateway.live_payments,
        "Starting payment gateway"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}
