//! Provider-guard middleware.
//!
//! The host exposes one generic purchase-processing endpoint shared by all
//! payment providers, discriminated by the `_xfProvider` query parameter.
//! This middleware is registered ahead of that handler: requests for this
//! gateway are intercepted and processed here, everything else passes
//! through untouched.

use std::net::SocketAddr;

use axum::body::{to_bytes, Body};
use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::handlers::ProcessCallbackCommand;
use crate::domain::payment::PROVIDER_ID;

use super::handlers::GatewayAppState;

/// Webhook bodies are small; anything larger is not a provider notification.
const MAX_BODY_BYTES: usize = 512 * 1024;

/// Intercepts purchase-processing requests addressed to this provider.
pub async fn provider_intercept(
    State(state): State<GatewayAppState>,
    request: Request,
    next: Next,
) -> Response {
    if !is_our_provider(request.uri().query()) {
        return next.run(request).await;
    }

    let (parts, body) = request.into_parts();

    let raw_body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes.to_vec(),
        Err(_) => {
            return axum::http::StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    let authorization = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let cmd = ProcessCallbackCommand {
        raw_body,
        authorization,
        source_ip: client_ip(&parts),
    };

    state.process_callback_handler().handle(cmd).await.into_response()
}

/// Whether the query string addresses this provider via `_xfProvider`.
fn is_our_provider(query: Option<&str>) -> bool {
    query
        .and_then(|q| query_param(q, "_xfProvider"))
        .is_some_and(|value| value == PROVIDER_ID)
}

/// Extracts a single query parameter without percent-decoding; provider
/// identifiers are plain tokens.
fn query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key).then_some(v)
    })
}

/// Best-effort client IP: first `X-Forwarded-For` entry, else the peer
/// address recorded by the connect-info service.
fn client_ip(parts: &Parts) -> String {
    if let Some(forwarded) = parts
        .headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;

    #[test]
    fn query_param_finds_value() {
        assert_eq!(
            query_param("_xfProvider=xsolla&foo=bar", "_xfProvider"),
            Some("xsolla")
        );
        assert_eq!(query_param("foo=bar", "_xfProvider"), None);
        assert_eq!(query_param("_xfProvider", "_xfProvider"), None);
    }

    #[test]
    fn our_provider_requires_exact_match() {
        assert!(is_our_provider(Some("_xfProvider=xsolla")));
        assert!(!is_our_provider(Some("_xfProvider=stripe")));
        assert!(!is_our_provider(Some("_xfProvider=xsolla2")));
        assert!(!is_our_provider(None));
    }

    #[test]
    fn client_ip_prefers_forwarded_header() {
        let request = HttpRequest::builder()
            .uri("/purchase/process")
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        let (parts, _) = request.into_parts();

        assert_eq!(client_ip(&parts), "203.0.113.7");
    }

    #[test]
    fn client_ip_falls_back_to_unknown() {
        let request = HttpRequest::builder()
            .uri("/purchase/process")
            .body(Body::empty())
            .unwrap();
        let (parts, _) = request.into_parts();

        assert_eq!(client_ip(&parts), "unknown");
    }
}
