//! ProcessCallbackHandler - command handler for inbound provider webhooks.
//!
//! Runs the guard sequence shared by every notification kind (settings
//! present, profile resolved, signature authentic), classifies the payload,
//! and either answers directly (user lookups, refunds) or drives the payment
//! callback pipeline. Produces a [`CallbackReply`] the HTTP layer renders
//! verbatim.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::Value;

use crate::domain::payment::{
    value_as_string, CallbackPipeline, CallbackState, LogType, Notification, PaymentFields,
    PaymentProfile, SignatureVerifier, WebhookError,
};
use crate::ports::{
    PaymentLogEntry, PaymentLogSink, PaymentProfileStore, PurchasableRegistry,
    PurchaseRequestStore, UserDirectory,
};

/// Command to process one inbound webhook.
#[derive(Debug, Clone)]
pub struct ProcessCallbackCommand {
    /// Raw request body, byte-exact (the signature covers it).
    pub raw_body: Vec<u8>,
    /// `Authorization` header value, if present.
    pub authorization: Option<String>,
    /// Source IP of the request.
    pub source_ip: String,
}

/// Outcome of webhook processing, rendered as-is by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackReply {
    /// `{"result": {"message": ...}}` with HTTP 200.
    Result { message: String },

    /// `{"user": {"id": ...}}` with HTTP 200 (user-search hit).
    User { id: u64 },

    /// `{"info": {"message": ...}}` with the given status (refund stub).
    Info { status: StatusCode, message: String },

    /// `{"error": {"message": ..., "code": ...}}` with the given status.
    /// Pipeline error halts answer HTTP 200; guard failures carry 4xx.
    Error {
        status: StatusCode,
        message: String,
        code: Option<&'static str>,
    },
}

impl From<WebhookError> for CallbackReply {
    fn from(err: WebhookError) -> Self {
        CallbackReply::Error {
            status: err.status_code(),
            message: err.to_string(),
            code: err.error_code(),
        }
    }
}

/// Handler for inbound provider webhooks.
pub struct ProcessCallbackHandler {
    profiles: Arc<dyn PaymentProfileStore>,
    users: Arc<dyn UserDirectory>,
    logs: Arc<dyn PaymentLogSink>,
    pipeline: CallbackPipeline,
}

impl ProcessCallbackHandler {
    pub fn new(
        profiles: Arc<dyn PaymentProfileStore>,
        purchases: Arc<dyn PurchaseRequestStore>,
        registry: Arc<dyn PurchasableRegistry>,
        users: Arc<dyn UserDirectory>,
        logs: Arc<dyn PaymentLogSink>,
    ) -> Self {
        let pipeline = CallbackPipeline::new(purchases, registry, users.clone());
        Self {
            profiles,
            users,
            logs,
            pipeline,
        }
    }

    /// Processes one webhook to a reply. Domain failures never escape as
    /// errors; everything becomes a structured reply.
    pub async fn handle(&self, cmd: ProcessCallbackCommand) -> CallbackReply {
        let input: Value = serde_json::from_slice(&cmd.raw_body).unwrap_or(Value::Null);

        // Guard: the settings block is required to resolve a profile.
        if input["settings"].as_object().map_or(true, |s| s.is_empty()) {
            return WebhookError::MissingSettings.into();
        }

        let profile = match self.resolve_profile(&input).await {
            Ok(profile) => profile,
            Err(err) => return err.into(),
        };

        // Guard: authenticity. One attempt, fail closed.
        let verifier = SignatureVerifier::new(profile.secret_key.clone());
        if !verifier.verify(&cmd.raw_body, cmd.authorization.as_deref()) {
            tracing::warn!(
                source_ip = %cmd.source_ip,
                project_id = %profile.project_id,
                "Webhook signature verification failed"
            );
            return WebhookError::InvalidSignature.into();
        }

        match Notification::classify(&input) {
            Notification::UserSearch { user_public_id } => {
                self.handle_user_search(&user_public_id).await
            }
            Notification::UserValidation { user_id } => {
                self.handle_user_validation(&user_id).await
            }
            Notification::Payment(fields) => self.handle_payment(&cmd, &fields, &profile).await,
            Notification::Refund => CallbackReply::Info {
                status: StatusCode::NO_CONTENT,
                message: "Refund is not available".to_string(),
            },
            Notification::Unknown(kind) => {
                tracing::debug!(notification_type = %kind, "Unimplemented notification type");
                WebhookError::NotImplemented.into()
            }
        }
    }

    /// Resolves the payment profile claimed by `settings`, by linear scan
    /// over all configured profiles.
    async fn resolve_profile(&self, input: &Value) -> Result<PaymentProfile, WebhookError> {
        let project_id = value_as_string(&input["settings"]["project_id"]);
        let merchant_id = value_as_string(&input["settings"]["merchant_id"]);

        let profiles = self.profiles.all().await?;
        profiles
            .into_iter()
            .find(|profile| profile.matches(&project_id, &merchant_id))
            .ok_or(WebhookError::ProfileNotFound)
    }

    async fn handle_user_search(&self, public_id: &str) -> CallbackReply {
        match self.users.find_by_public_id(public_id).await {
            Ok(Some(user)) => CallbackReply::User { id: user.user_id },
            Ok(None) => WebhookError::UserNotFound.into(),
            Err(err) => WebhookError::Store(err).into(),
        }
    }

    async fn handle_user_validation(&self, user_id: &str) -> CallbackReply {
        let Ok(user_id) = user_id.parse::<u64>() else {
            return WebhookError::UserNotFound.into();
        };

        match self.users.exists(user_id).await {
            Ok(true) => CallbackReply::Result {
                message: "success".to_string(),
            },
            Ok(false) => WebhookError::UserNotFound.into(),
            Err(err) => WebhookError::Store(err).into(),
        }
    }

    async fn handle_payment(
        &self,
        cmd: &ProcessCallbackCommand,
        fields: &PaymentFields,
        profile: &PaymentProfile,
    ) -> CallbackReply {
        let mut state = CallbackState::new(&cmd.raw_body, &cmd.source_ip);
        self.pipeline.run(&mut state, fields, profile).await;

        // Best-effort logging; a sink failure never alters the response.
        if state.should_log() {
            let entry = PaymentLogEntry::from_state(&state);
            if let Err(err) = self.logs.write(entry).await {
                tracing::error!(
                    error = %err,
                    request_key = %state.request_key,
                    "Error logging payment to payment provider"
                );
            }
        }

        let status = StatusCode::from_u16(state.http_code).unwrap_or(StatusCode::OK);
        match state.log_type {
            LogType::Error => CallbackReply::Error {
                status,
                message: state.log_message,
                code: None,
            },
            _ => CallbackReply::Result {
                message: state.log_message,
            },
        }
    }
}
