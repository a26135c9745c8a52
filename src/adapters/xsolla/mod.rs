//! Xsolla adapter - outbound integration with the provider's merchant API.

mod token_client;

pub use token_client::XsollaTokenClient;
