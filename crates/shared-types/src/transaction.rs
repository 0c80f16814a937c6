//! Signed value-transfer transactions.
//!
//! A transaction is content-addressed: its digest covers the canonical
//! key-sorted JSON encoding of the wire fields with the signature field
//! set to the empty string. Signing attaches a detached RSA-PSS
//! signature over that digest and is the terminal state transition;
//! verification re-derives the same digest before checking.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared_crypto::{canonical_sha256_hex, RsaKeyPair, RsaPublicKey};

use crate::constants::{FEE_RATE, NATIVE_ASSET, NETWORK_SENDER};
use crate::{unix_now, Amount, HexHash, Timestamp};

/// Validation class of a transfer record.
///
/// All four kinds share the wire structure; they differ only in the
/// checks applied at intake and in how balances are touched. The kind
/// is node-local bookkeeping and never part of the wire encoding or
/// the content digest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferKind {
    /// Ordinary user transfer, both endpoints on some shard.
    #[default]
    UserTransfer,
    /// Synthetic block subsidy from the reserved network identity.
    Reward,
    /// Source-shard leg of a committed cross-shard transfer.
    CrossShardDebit,
    /// Destination-shard leg of a committed cross-shard transfer.
    CrossShardCredit,
}

/// A signed value transfer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sender address.
    pub sender: String,
    /// Recipient address.
    pub recipient: String,
    /// Transferred quantity; must be positive to enter a pool.
    pub amount: Amount,
    /// Asset symbol, defaulted to the native token.
    pub asset: String,
    /// Creation time, stamped once at construction.
    pub timestamp: Timestamp,
    /// Derived fee: `amount * FEE_RATE`. Policy, not user input.
    pub fee: Amount,
    /// Detached signature, lowercase hex. Empty until signed.
    pub signature: String,
    /// Validation class; node-local, excluded from the wire encoding.
    #[serde(skip)]
    pub kind: TransferKind,
}

impl Transaction {
    /// Create a native-asset transfer, stamping the timestamp once.
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self::with_asset(sender, recipient, amount, NATIVE_ASSET)
    }

    /// Create a transfer in an explicit asset.
    pub fn with_asset(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: Amount,
        asset: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
            asset: asset.into(),
            timestamp: unix_now(),
            fee: amount * FEE_RATE,
            signature: String::new(),
            kind: TransferKind::UserTransfer,
        }
    }

    /// Synthetic block subsidy from the reserved network identity.
    /// Carries no signature and bypasses signature verification.
    pub fn reward(miner: impl Into<String>, amount: Amount) -> Self {
        let mut tx = Self::with_asset(NETWORK_SENDER, miner, amount, NATIVE_ASSET);
        tx.fee = 0.0;
        tx.kind = TransferKind::Reward;
        tx
    }

    /// Replace the creation timestamp. Content hashes cover the
    /// timestamp, so fixing it makes hashing and mining reproducible.
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Wire-encoding object with the stored signature field.
    pub fn wire_json(&self) -> Value {
        self.wire_json_with_signature(&self.signature)
    }

    fn wire_json_with_signature(&self, signature: &str) -> Value {
        json!({
            "sender": self.sender,
            "recipient": self.recipient,
            "amount": self.amount,
            "asset": self.asset,
            "timestamp": self.timestamp,
            "fee": self.fee,
            "signature": signature,
        })
    }

    /// Content digest over the canonical encoding with the signature
    /// field emptied, so the digest is stable across signing.
    pub fn content_hash(&self) -> HexHash {
        canonical_sha256_hex(&self.wire_json_with_signature(""))
    }

    /// Sign the content digest and attach the signature. Terminal
    /// state transition: a signed transaction is immutable.
    pub fn sign(&mut self, key: &RsaKeyPair) -> Result<(), shared_crypto::CryptoError> {
        let digest = self.content_hash();
        self.signature = key.sign_hex(digest.as_bytes())?;
        Ok(())
    }

    /// True iff the attached signature verifies against the content
    /// digest under the given key. Unsigned or garbled signatures fail
    /// verification; nothing is bubbled.
    pub fn verify(&self, key: &RsaPublicKey) -> bool {
        let digest = self.content_hash();
        key.verify_hex(digest.as_bytes(), &self.signature)
    }

    /// Amount plus fee; what the sender's balance must cover.
    pub fn total_cost(&self) -> Amount {
        self.amount + self.fee
    }

    /// True once a signature is attached.
    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }

    /// True for the synthetic block subsidy.
    pub fn is_reward(&self) -> bool {
        self.kind == TransferKind::Reward || self.sender == NETWORK_SENDER
    }

    /// Source-shard leg of a cross-shard commit. Same wire fields,
    /// hence the same content digest as the originating transfer.
    pub fn debit_leg(&self) -> Self {
        let mut leg = self.clone();
        leg.kind = TransferKind::CrossShardDebit;
        leg
    }

    /// Destination-shard leg of a cross-shard commit.
    pub fn credit_leg(&self) -> Self {
        let mut leg = self.clone();
        leg.kind = TransferKind::CrossShardCredit;
        leg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static KEYS: Lazy<RsaKeyPair> = Lazy::new(|| RsaKeyPair::generate().expect("keygen"));
    static OTHER_KEYS: Lazy<RsaKeyPair> = Lazy::new(|| RsaKeyPair::generate().expect("keygen"));

    fn fixed_tx() -> Transaction {
        Transaction::new("a1sender", "b2recipient", 10.0).with_timestamp(1_700_000_000.0)
    }

    #[test]
    fn test_fee_is_one_percent() {
        let tx = fixed_tx();
        assert!((tx.fee - 0.1).abs() < 1e-12);
        assert!((tx.total_cost() - 10.1).abs() < 1e-12);
    }

    #[test]
    fn test_content_hash_depends_only_on_wire_fields() {
        let a = fixed_tx();
        let b = fixed_tx();
        assert_eq!(a.content_hash(), b.content_hash());

        let later = fixed_tx().with_timestamp(1_700_000_001.0);
        assert_ne!(a.content_hash(), later.content_hash());

        let other_amount = Transaction::new("a1sender", "b2recipient", 11.0)
            .with_timestamp(1_700_000_000.0);
        assert_ne!(a.content_hash(), other_amount.content_hash());
    }

    #[test]
    fn test_content_hash_stable_across_signing() {
        let mut tx = fixed_tx();
        let before = tx.content_hash();
        tx.sign(&KEYS).unwrap();
        assert_eq!(before, tx.content_hash());
    }

    #[test]
    fn test_sign_verify_round_trip() {
        let mut tx = fixed_tx();
        assert!(!tx.is_signed());
        tx.sign(&KEYS).unwrap();
        assert!(tx.is_signed());
        assert!(tx.verify(&KEYS.public_key()));
    }

    #[test]
    fn test_verify_rejects_unrelated_key() {
        let mut tx = fixed_tx();
        tx.sign(&KEYS).unwrap();
        assert!(!tx.verify(&OTHER_KEYS.public_key()));
    }

    #[test]
    fn test_verify_unsigned_is_false() {
        let tx = fixed_tx();
        assert!(!tx.verify(&KEYS.public_key()));
    }

    #[test]
    fn test_reward_shape() {
        let tx = Transaction::reward("miner1", 50.0);
        assert!(tx.is_reward());
        assert_eq!(tx.sender, NETWORK_SENDER);
        assert_eq!(tx.fee, 0.0);
        assert_eq!(tx.asset, NATIVE_ASSET);
    }

    #[test]
    fn test_legs_share_content_hash() {
        let tx = fixed_tx();
        assert_eq!(tx.content_hash(), tx.debit_leg().content_hash());
        assert_eq!(tx.content_hash(), tx.credit_leg().content_hash());
        assert_eq!(tx.debit_leg().kind, TransferKind::CrossShardDebit);
        assert_eq!(tx.credit_leg().kind, TransferKind::CrossShardCredit);
    }

    #[test]
    fn test_kind_excluded_from_wire() {
        let tx = fixed_tx();
        let wire = tx.wire_json();
        assert!(wire.get("kind").is_none());
        assert_eq!(wire.get("sender").unwrap(), "a1sender");
    }
}
