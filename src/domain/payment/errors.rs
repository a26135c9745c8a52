//! Webhook error types.
//!
//! Every error that can terminate webhook handling before the callback
//! pipeline runs, with its HTTP status and machine-readable code. The
//! `Display` text doubles as the client-facing message, so the wording here
//! is part of the wire contract.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Errors that occur during webhook guard checks and classification.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Request body has no `settings` object to resolve a profile from.
    #[error("Settings in request are empty!")]
    MissingSettings,

    /// No configured profile matches the claimed project/merchant pair.
    #[error("No payment profile for credentials!")]
    ProfileNotFound,

    /// Signature verification failed. Never retried.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Referenced user does not exist.
    #[error("User not found!")]
    UserNotFound,

    /// Notification type outside the four supported kinds.
    #[error("Notification type not implemented")]
    NotImplemented,

    /// A host collaborator failed; surfaces as an internal error.
    #[error("Internal error")]
    Store(#[source] DomainError),
}

impl WebhookError {
    /// Maps the error to its HTTP response status.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MissingSettings => StatusCode::UNPROCESSABLE_ENTITY,
            WebhookError::ProfileNotFound | WebhookError::UserNotFound => StatusCode::NOT_FOUND,
            WebhookError::InvalidSignature | WebhookError::NotImplemented => {
                StatusCode::BAD_REQUEST
            }
            WebhookError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code for errors that carry one, distinct from
    /// the human message.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            WebhookError::InvalidSignature => Some("INVALID_SIGNATURE"),
            WebhookError::UserNotFound => Some("INVALID_USER"),
            _ => None,
        }
    }
}

impl From<DomainError> for WebhookError {
    fn from(err: DomainError) -> Self {
        WebhookError::Store(err)
    }
}
