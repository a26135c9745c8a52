//! In-memory port implementations.
//!
//! Stand-ins for the host platform's entity layer, used by the development
//! binary and the integration tests. The purchase store enforces the same
//! at-most-once completion guarantee a database-backed implementation would
//! provide with a conditional UPDATE.

mod payment_log;
mod profile_store;
mod purchasable_registry;
mod purchase_store;
mod user_directory;

pub use payment_log::InMemoryPaymentLog;
pub use profile_store::InMemoryProfileStore;
pub use purchasable_registry::StaticPurchasableRegistry;
pub use purchase_store::InMemoryPurchaseStore;
pub use user_directory::InMemoryUserDirectory;
