//! Webhook signature verification.
//!
//! The provider signs each webhook by appending the project secret key to
//! the raw request body and taking a SHA-1 digest, sent as
//! `Authorization: Signature <hex>`. Verification recomputes the digest over
//! the exact body bytes and compares in constant time.
//!
//! Fails closed: a missing or malformed header, bad hex, or digest mismatch
//! all yield "not authentic" rather than an error the caller must handle.

use secrecy::{ExposeSecret, SecretString};
use sha1::{Digest, Sha1};
use subtle::ConstantTimeEq;

/// Authorization scheme prefix used by the provider.
const SIGNATURE_SCHEME: &str = "Signature ";

/// Verifier bound to one profile's secret key.
pub struct SignatureVerifier {
    secret: SecretString,
}

impl SignatureVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Verifies the webhook signature against the raw body.
    ///
    /// A single verification attempt per request; the provider retries the
    /// HTTP call itself on transport failure, never on auth failure.
    pub fn verify(&self, raw_body: &[u8], authorization: Option<&str>) -> bool {
        let Some(provided) = authorization.and_then(parse_signature_header) else {
            return false;
        };

        let expected = self.compute(raw_body);
        constant_time_compare(&expected, &provided)
    }

    /// SHA-1 over the body bytes followed by the secret key.
    fn compute(&self, raw_body: &[u8]) -> [u8; 20] {
        let mut hasher = Sha1::new();
        hasher.update(raw_body);
        hasher.update(self.secret.expose_secret().as_bytes());
        hasher.finalize().into()
    }
}

/// Parses `Signature <hex>` into digest bytes. Anything else is rejected.
fn parse_signature_header(header: &str) -> Option<Vec<u8>> {
    let hex_digest = header.strip_prefix(SIGNATURE_SCHEME)?;
    hex::decode(hex_digest.trim()).ok()
}

/// Constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Computes the signature header value for test fixtures.
#[cfg(test)]
pub fn compute_test_signature(secret: &str, raw_body: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(raw_body);
    hasher.update(secret.as_bytes());
    format!("Signature {}", hex::encode(hasher.finalize()))
}
