//! HTTP DTOs for the gateway endpoints.
//!
//! Response bodies follow the provider's expected shapes:
//! `{"result"|"info"|"error": {"message": ...}}`, with errors additionally
//! carrying a machine-readable `code` distinct from the human message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::handlers::CallbackReply;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to initiate a hosted checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    /// Correlation key of the pending purchase request.
    pub request_key: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// `{"message": ...}` leaf shared by all response shapes.
#[derive(Debug, Clone, Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// `{"result": {"message": ...}}`
#[derive(Debug, Clone, Serialize)]
pub struct ResultResponse {
    pub result: MessageBody,
}

impl ResultResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            result: MessageBody {
                message: message.into(),
            },
        }
    }
}

/// `{"info": {"message": ...}}`
#[derive(Debug, Clone, Serialize)]
pub struct InfoResponse {
    pub info: MessageBody,
}

impl InfoResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            info: MessageBody {
                message: message.into(),
            },
        }
    }
}

/// `{"error": {"message": ..., "code": ...}}`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, code: Option<&'static str>) -> Self {
        Self {
            error: ErrorBody {
                message: message.into(),
                code,
            },
        }
    }
}

/// `{"user": {"id": ...}}` for user-search hits.
#[derive(Debug, Clone, Serialize)]
pub struct UserFoundResponse {
    pub user: UserRef,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserRef {
    pub id: u64,
}

/// Response for checkout initiation.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub redirect_url: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Reply Rendering
// ════════════════════════════════════════════════════════════════════════════════

impl IntoResponse for CallbackReply {
    fn into_response(self) -> Response {
        match self {
            CallbackReply::Result { message } => {
                (StatusCode::OK, Json(ResultResponse::new(message))).into_response()
            }
            CallbackReply::User { id } => (
                StatusCode::OK,
                Json(UserFoundResponse {
                    user: UserRef { id },
                }),
            )
                .into_response(),
            CallbackReply::Info { status, message } => {
                (status, Json(InfoResponse::new(message))).into_response()
            }
            CallbackReply::Error {
                status,
                message,
                code,
            } => (status, Json(ErrorResponse::new(message, code))).into_response(),
        }
    }
}
