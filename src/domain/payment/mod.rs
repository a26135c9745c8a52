//! Payment domain: callback state machine, notification classification and
//! webhook signature verification for the Xsolla gateway.

mod callback_state;
mod errors;
mod notification;
mod pipeline;
mod profile;
mod purchase;
mod signature;

pub use callback_state::{CallbackState, LogType, PaymentResult};
pub use errors::WebhookError;
pub use notification::{value_as_f64, value_as_string, Notification, PaymentFields};
pub use pipeline::CallbackPipeline;
pub use profile::{PaymentProfile, ProfileConfigError};
pub use purchase::{PurchaseRequest, PurchaseStatus};
pub use signature::SignatureVerifier;

#[cfg(test)]
pub use signature::compute_test_signature;

/// Provider identifier carried in the `_xfProvider` request discriminator.
pub const PROVIDER_ID: &str = "xsolla";

/// Human-readable provider title.
pub const PROVIDER_TITLE: &str = "Xsolla";

/// Error code returned for recurring-payment capability queries.
pub const ERR_NO_RECURRING: &str = "ERR_NO_RECURRING";

/// Recurring billing is not supported by this gateway. Capability queries
/// always answer `false` with [`ERR_NO_RECURRING`]; the operation is never
/// attempted.
pub fn supports_recurring() -> (bool, &'static str) {
    (false, ERR_NO_RECURRING)
}
