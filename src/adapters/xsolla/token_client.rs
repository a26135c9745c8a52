//! Xsolla token client.
//!
//! Implements the [`TokenClient`] port against the provider's merchant API.
//! A token request is a single POST authenticated with the merchant id and
//! API key; the response carries an opaque access token the payer's browser
//! is redirected with. No retry policy: a transport failure propagates to
//! the request-handling layer.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::config::GatewayConfig;
use crate::domain::payment::PaymentProfile;
use crate::ports::{TokenClient, TokenError, TokenRequest};

/// Response body of a successful token request.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Token client backed by the provider's merchant API.
pub struct XsollaTokenClient {
    http_client: reqwest::Client,
    gateway: GatewayConfig,
}

impl XsollaTokenClient {
    pub fn new(gateway: GatewayConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            gateway,
        }
    }

    fn token_url(&self, merchant_id: &str) -> String {
        format!(
            "{}/merchant/v2/merchants/{}/token",
            self.gateway.api_endpoint(),
            merchant_id
        )
    }
}

#[async_trait]
impl TokenClient for XsollaTokenClient {
    async fn create_payment_token(
        &self,
        profile: &PaymentProfile,
        request: &TokenRequest,
    ) -> Result<String, TokenError> {
        let url = self.token_url(&profile.merchant_id);

        tracing::debug!(
            merchant_id = %profile.merchant_id,
            project_id = %profile.project_id,
            sandbox_mode = request.sandbox_mode,
            "Requesting hosted-checkout token"
        );

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&profile.merchant_id, Some(profile.api_key.expose_secret()))
            .json(request)
            .send()
            .await
            .map_err(|e| TokenError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                merchant_id = %profile.merchant_id,
                "Token request rejected by provider"
            );
            return Err(TokenError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| TokenError::InvalidResponse(e.to_string()))?;

        Ok(body.token)
    }
}
