//! Notification classification.
//!
//! Inbound webhook payloads are discriminated by their `notification_type`
//! field into one of four known kinds. Field extraction is deliberately
//! lenient: the provider mixes strings and numbers for ids, and missing
//! fields classify as empty rather than failing the parse (the pipeline
//! decides what to do with them).

use serde_json::Value;

/// Coerces a JSON value to a string: strings pass through, numbers are
/// rendered, anything else becomes empty.
pub fn value_as_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Coerces a JSON value to a float: numbers pass through, numeric strings
/// are parsed, anything else becomes zero.
pub fn value_as_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Fields carried by a `payment` notification.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentFields {
    /// Provider transaction id (`transaction.id`).
    pub transaction_id: String,
    /// Correlation key (`custom_parameters.request_key`).
    pub request_key: String,
    /// Claimed total (`purchase.total.amount`).
    pub amount: f64,
    /// Claimed currency (`purchase.total.currency`).
    pub currency: String,
}

impl PaymentFields {
    fn from_input(input: &Value) -> Self {
        Self {
            transaction_id: value_as_string(&input["transaction"]["id"]),
            request_key: value_as_string(&input["custom_parameters"]["request_key"]),
            amount: value_as_f64(&input["purchase"]["total"]["amount"]),
            currency: value_as_string(&input["purchase"]["total"]["currency"]),
        }
    }
}

/// A classified webhook notification.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// User lookup by public identifier (`user.public_id`).
    UserSearch { user_public_id: String },
    /// Existence check for an internal user id (`user.id`).
    UserValidation { user_id: String },
    /// Payment confirmation; routed into the callback pipeline.
    Payment(PaymentFields),
    /// Refund notice; answered with a fixed "not available" stub.
    Refund,
    /// Any other discriminator value.
    Unknown(String),
}

impl Notification {
    /// Classifies a decoded payload by its `notification_type` field.
    pub fn classify(input: &Value) -> Self {
        let kind = input["notification_type"].as_str().unwrap_or_default();
        match kind {
            "user_search" => Notification::UserSearch {
                user_public_id: value_as_string(&input["user"]["public_id"]),
            },
            "user_validation" => Notification::UserValidation {
                user_id: value_as_string(&input["user"]["id"]),
            },
            "payment" => Notification::Payment(PaymentFields::from_input(input)),
            "refund" => Notification::Refund,
            other => Notification::Unknown(other.to_string()),
        }
    }
}
