//! Ports - contracts between the gateway and its collaborators.
//!
//! The host platform owns purchase requests, payment profiles, users, the
//! purchasable registry and the payment log; the provider owns token
//! issuance. Each is reached through a trait here so the core stays free of
//! infrastructure concerns.

mod payment_log;
mod profile_store;
mod purchasable_registry;
mod purchase_store;
mod token_client;
mod user_directory;

pub use payment_log::{PaymentLogEntry, PaymentLogSink};
pub use profile_store::PaymentProfileStore;
pub use purchasable_registry::PurchasableRegistry;
pub use purchase_store::{CompletionOutcome, PurchaseRequestStore};
pub use token_client::{TokenClient, TokenCustomParameters, TokenError, TokenRequest};
pub use user_directory::{ForumUser, UserDirectory};
