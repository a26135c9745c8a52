//! Gateway configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Gateway configuration (Xsolla).
///
/// A single flag switches both the hosted-checkout endpoint host and the
/// `sandbox_mode` flag sent with token requests.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Whether live payments are enabled. When false, all traffic is routed
    /// to the provider's sandbox environment and token requests carry
    /// `sandbox_mode: true`.
    #[serde(default)]
    pub live_payments: bool,

    /// Provider domain, overridable for tests against a local stub.
    #[serde(default = "default_provider_domain")]
    pub provider_domain: String,
}

impl GatewayConfig {
    /// Base URL of the hosted-checkout (Pay Station) host.
    pub fn secure_endpoint(&self) -> String {
        if self.live_payments {
            format!("https://secure.{}", self.provider_domain)
        } else {
            format!("https://sandbox-secure.{}", self.provider_domain)
        }
    }

    /// Base URL of the provider's merchant API.
    pub fn api_endpoint(&self) -> String {
        format!("https://api.{}", self.provider_domain)
    }

    /// Hosted-checkout redirect URL for an issued access token.
    pub fn paystation_url(&self, access_token: &str) -> String {
        format!(
            "{}/paystation3/?access_token={}",
            self.secure_endpoint(),
            access_token
        )
    }

    /// Sandbox flag sent with outbound token requests.
    pub fn sandbox_mode(&self) -> bool {
        !self.live_payments
    }

    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider_domain.is_empty() {
            return Err(ValidationError::InvalidProviderDomain);
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            live_payments: false,
            provider_domain: default_provider_domain(),
        }
    }
}

fn default_provider_domain() -> String {
    "xsolla.com".to_string()
}
