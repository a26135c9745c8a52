//! PaymentLogSink port - the host's payment provider log.
//!
//! Logging is best-effort and never part of the transactional outcome: a
//! sink failure is reported to the operational error channel and the HTTP
//! response goes out unchanged.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::foundation::DomainError;
use crate::domain::payment::{CallbackState, LogType};

/// One entry in the payment provider log.
#[derive(Debug, Clone)]
pub struct PaymentLogEntry {
    pub log_id: Uuid,
    pub request_key: String,
    pub transaction_id: String,
    pub log_type: LogType,
    pub message: String,
    /// Full decoded input plus the source IP.
    pub details: serde_json::Value,
    pub logged_at: DateTime<Utc>,
}

impl PaymentLogEntry {
    /// Builds a log entry from a finished callback run.
    pub fn from_state(state: &CallbackState) -> Self {
        Self {
            log_id: Uuid::new_v4(),
            request_key: state.request_key.clone(),
            transaction_id: state.transaction_id.clone(),
            log_type: state.log_type,
            message: state.log_message.clone(),
            details: serde_json::json!({
                "input": state.input,
                "source_ip": state.source_ip,
            }),
            logged_at: Utc::now(),
        }
    }
}

/// Port for writing payment log entries.
#[async_trait]
pub trait PaymentLogSink: Send + Sync {
    async fn write(&self, entry: PaymentLogEntry) -> Result<(), DomainError>;
}
