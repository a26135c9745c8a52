//! Payment profile - admin-owned credential bundle for one gateway instance.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Raised when a profile is saved with incomplete credentials.
#[derive(Debug, Error)]
pub enum ProfileConfigError {
    #[error("You must provide the merchant ID, project ID, secret key and API key")]
    IncompleteCredentials,
}

/// Credential bundle for one configured gateway instance.
///
/// Immutable from this subsystem's perspective except for validation at save
/// time. The secret key signs inbound webhooks; the API key authenticates
/// outbound token requests.
#[derive(Clone)]
pub struct PaymentProfile {
    /// Host-side profile identifier.
    pub profile_id: u32,

    /// Provider merchant account id.
    pub merchant_id: String,

    /// Provider project id.
    pub project_id: String,

    /// Webhook signing secret.
    pub secret_key: SecretString,

    /// Merchant API key.
    pub api_key: SecretString,
}

impl PaymentProfile {
    pub fn new(
        profile_id: u32,
        merchant_id: impl Into<String>,
        project_id: impl Into<String>,
        secret_key: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            profile_id,
            merchant_id: merchant_id.into(),
            project_id: project_id.into(),
            secret_key: SecretString::new(secret_key.into()),
            api_key: SecretString::new(api_key.into()),
        }
    }

    /// Validates the profile before save. All four credential fields are
    /// required; a single human-readable error covers any omission.
    pub fn validate(&self) -> Result<(), ProfileConfigError> {
        if self.merchant_id.is_empty()
            || self.project_id.is_empty()
            || self.secret_key.expose_secret().is_empty()
            || self.api_key.expose_secret().is_empty()
        {
            return Err(ProfileConfigError::IncompleteCredentials);
        }
        Ok(())
    }

    /// Whether this profile matches the credentials claimed by an inbound
    /// webhook's `settings` block.
    pub fn matches(&self, project_id: &str, merchant_id: &str) -> bool {
        !self.project_id.is_empty()
            && !self.merchant_id.is_empty()
            && self.project_id == project_id
            && self.merchant_id == merchant_id
    }
}

impl std::fmt::Debug for PaymentProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentProfile")
            .field("profile_id", &self.profile_id)
            .field("merchant_id", &self.merchant_id)
            .field("project_id", &self.project_id)
            .field("secret_key", &"[REDACTED]")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
