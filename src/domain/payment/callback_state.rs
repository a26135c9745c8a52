//! Callback state threaded through the validation pipeline.
//!
//! One instance is created per inbound payment notification and mutated by
//! each pipeline step in turn. The state carries everything needed to log
//! the outcome and shape the HTTP response after the run.

use serde_json::Value;

use super::purchase::PurchaseRequest;

/// Final payment verdict recorded on the callback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentResult {
    Received,
    Failed,
}

/// Severity of the log entry a callback run produces.
///
/// `None` means no log entry is written at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogType {
    #[default]
    None,
    Info,
    Error,
}

/// Mutable, single-use state for one callback run.
#[derive(Debug, Clone, Default)]
pub struct CallbackState {
    /// Parsed notification payload; `None` if the raw body failed to parse
    /// into a non-empty object.
    pub input: Option<Value>,

    /// Source IP of the webhook request.
    pub source_ip: String,

    /// Provider transaction id extracted from the payload.
    pub transaction_id: String,

    /// Correlation key into the purchase request store.
    pub request_key: String,

    /// Matched purchase request, set once validated.
    pub purchase_request: Option<PurchaseRequest>,

    /// Provider-specific audit context.
    pub provider_metadata: Option<Value>,

    /// Payment verdict, set by the payment-result step.
    pub payment_result: Option<PaymentResult>,

    /// Log severity; `LogType::None` suppresses logging entirely.
    pub log_type: LogType,

    /// Human-readable diagnostic, also used as the response message.
    pub log_message: String,

    /// Structured diagnostic data for the payment log.
    pub log_details: Option<Value>,

    /// HTTP status for the response.
    pub http_code: u16,
}

impl CallbackState {
    /// Sets up the state for a run: parse the raw body, record the source IP
    /// and default the HTTP status to 200.
    ///
    /// A body that is not a non-empty JSON object leaves `input` unset; the
    /// pipeline's first step halts on that without logging.
    pub fn new(raw_body: &[u8], source_ip: impl Into<String>) -> Self {
        let input = serde_json::from_slice::<Value>(raw_body)
            .ok()
            .filter(|value| value.as_object().is_some_and(|map| !map.is_empty()));

        Self {
            input,
            source_ip: source_ip.into(),
            http_code: 200,
            ..Default::default()
        }
    }

    /// Halts with an informational outcome. Expected traffic such as the
    /// provider's dashboard test pings lands here.
    pub fn halt_info(&mut self, message: impl Into<String>) {
        self.log_type = LogType::Info;
        self.log_message = message.into();
    }

    /// Halts with an error outcome.
    pub fn halt_error(&mut self, message: impl Into<String>) {
        self.log_type = LogType::Error;
        self.log_message = message.into();
    }

    /// Outer key of the JSON response body: `"error"` for error outcomes,
    /// `"result"` otherwise.
    pub fn response_key(&self) -> &'static str {
        match self.log_type {
            LogType::Error => "error",
            _ => "result",
        }
    }

    /// Whether a log entry should be written for this run.
    pub fn should_log(&self) -> bool {
        self.log_type != LogType::None
    }
}
