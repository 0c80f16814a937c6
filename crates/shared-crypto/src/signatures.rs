//! # RSA-PSS Signatures
//!
//! RSA with PSS padding over SHA-256, maximum-length salt. The message
//! (an ASCII hex content digest) is hashed once more with SHA-256
//! before the PSS encoding, so the scheme signs `SHA-256(message)`.
//!
//! Verification never bubbles an error across the API: a bad signature,
//! bad encoding, or mismatched key all surface as a plain `false`.

use rsa::traits::PublicKeyParts;
use rsa::{Pss, RsaPrivateKey};
use sha2::{Digest, Sha256};

use crate::errors::CryptoError;

/// RSA modulus size in bits.
pub const RSA_KEY_BITS: usize = 2048;

/// PSS with the maximum salt length the key can carry:
/// `emLen - hashLen - 2` bytes.
fn max_salt_pss(key_bytes: usize) -> Pss {
    let salt_len = key_bytes.saturating_sub(Sha256::output_size() + 2);
    Pss::new_with_salt::<Sha256>(salt_len)
}

/// RSA public key used to verify transaction signatures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaPublicKey {
    inner: rsa::RsaPublicKey,
}

impl RsaPublicKey {
    /// Verify a signature over a message.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let digest = Sha256::digest(message);
        self.inner
            .verify(max_salt_pss(self.inner.size()), &digest, signature)
            .is_ok()
    }

    /// Verify a lowercase-hex signature over a message.
    ///
    /// A signature that is not valid hex fails verification rather than
    /// erroring.
    pub fn verify_hex(&self, message: &[u8], signature_hex: &str) -> bool {
        match hex::decode(signature_hex) {
            Ok(signature) => self.verify(message, &signature),
            Err(_) => false,
        }
    }
}

/// RSA keypair holding the private half.
pub struct RsaKeyPair {
    private: RsaPrivateKey,
}

impl RsaKeyPair {
    /// Generate a fresh 2048-bit keypair.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut rng = rand::thread_rng();
        let private = RsaPrivateKey::new(&mut rng, RSA_KEY_BITS)
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
        Ok(Self { private })
    }

    /// Public half of the keypair.
    pub fn public_key(&self) -> RsaPublicKey {
        RsaPublicKey {
            inner: self.private.to_public_key(),
        }
    }

    /// Sign a message; PSS salting makes the output non-deterministic.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut rng = rand::thread_rng();
        let digest = Sha256::digest(message);
        self.private
            .sign_with_rng(&mut rng, max_salt_pss(self.private.size()), &digest)
            .map_err(|e| CryptoError::Signing(e.to_string()))
    }

    /// Sign a message and render the signature as lowercase hex.
    pub fn sign_hex(&self, message: &[u8]) -> Result<String, CryptoError> {
        Ok(hex::encode(self.sign(message)?))
    }
}
