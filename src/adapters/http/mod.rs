//! HTTP adapter - axum routes, DTOs and the provider-guard middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::GatewayAppState;
pub use routes::gateway_router;
