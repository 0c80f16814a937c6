//! Error types for cryptographic operations.

use thiserror::Error;

/// Cryptographic operation errors.
///
/// Verification failures are not represented here: verify surfaces a
/// plain `false`, never an error.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key generation failed.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// Signing failed; indicates a malformed digest input.
    #[error("signing failed: {0}")]
    Signing(String),
}
