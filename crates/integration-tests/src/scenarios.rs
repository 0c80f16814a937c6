//! Concrete end-to-end scenarios through the façade.
//!
//! Addresses route by first hex nibble mod 4 here: `a…` → shard 2,
//! `b…`/`f…` → shard 3, `0…` → shard 0.

use once_cell::sync::Lazy;
use qfc_consensus::ConsensusConfig;
use qfc_ledger::{Ledger, LedgerConfig, SubmitError};
use qfc_sharding::Route;
use shared_crypto::RsaKeyPair;
use shared_types::constants::NATIVE_ASSET;
use shared_types::{Amount, Transaction, TransferKind};

static KEYS: Lazy<RsaKeyPair> = Lazy::new(|| RsaKeyPair::generate().expect("keygen"));
static OTHER_KEYS: Lazy<RsaKeyPair> = Lazy::new(|| RsaKeyPair::generate().expect("keygen"));

fn ledger(shard_count: u16, difficulty: u32) -> Ledger {
    Ledger::new(LedgerConfig {
        shard_count,
        consensus: ConsensusConfig {
            initial_difficulty: difficulty,
            ..ConsensusConfig::default()
        },
    })
}

fn approx(left: Amount, right: Amount) {
    assert!((left - right).abs() < 1e-9, "expected {right}, got {left}");
}

#[test]
fn test_genesis_construction() {
    let ledger = ledger(4, 3);
    assert_eq!(ledger.shard_count(), 4);
    assert_eq!(ledger.difficulty(), 3);

    let chain = ledger.chain(0).unwrap();
    assert_eq!(chain.len(), 1);
    assert_eq!(chain[0].index, 0);
    assert_eq!(chain[0].previous_hash, "0");
    assert!(chain[0].transactions.is_empty());
}

#[test]
fn test_mining_noop_on_empty_pool() {
    let ledger = ledger(4, 3);
    // 'a' is nibble 10; 10 mod 4 = shard 2.
    assert!(ledger.mine("a0ffee").unwrap().is_none());
    assert_eq!(ledger.chain(2).unwrap().len(), 1);
}

#[test]
fn test_simple_send() {
    let ledger = ledger(4, 3);
    ledger.seed_balance("a1alice", 100.0);

    ledger
        .submit(Transaction::new("a1alice", "b2bob", 10.0))
        .unwrap();

    approx(ledger.balance("a1alice", NATIVE_ASSET), 89.9);
    approx(ledger.balance("b2bob", NATIVE_ASSET), 10.0);

    let sender_shard = ledger.shard_for("a1alice").unwrap();
    let pending = ledger.pending(sender_shard).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].sender, "a1alice");
}

#[test]
fn test_mine_a_block() {
    let ledger = ledger(4, 3);
    ledger.seed_balance("a1alice", 100.0);
    ledger
        .submit(Transaction::new("a1alice", "b2bob", 10.0))
        .unwrap();

    let shard = ledger.shard_for("a1alice").unwrap();
    let block = ledger.mine("a1alice").unwrap().expect("pending work");

    let chain = ledger.chain(shard).unwrap();
    assert_eq!(chain.len(), 2);
    assert!(block.hash.starts_with("000"));
    assert_eq!(block.transactions.len(), 1);
    assert_eq!(block.transactions[0].sender, "a1alice");

    // 100 - 10.1 from the send, +max(1, 50 >> 0) subsidy.
    approx(ledger.balance("a1alice", NATIVE_ASSET), 139.9);
}

#[test]
fn test_cross_shard_transfer() {
    let ledger = ledger(4, 3);
    ledger.seed_balance("a1sender", 100.0);

    let receipt = ledger
        .submit(Transaction::new("a1sender", "f9recipient", 5.0))
        .unwrap();
    assert_eq!(
        receipt.route,
        Route::Cross {
            source: 2,
            destination: 3
        }
    );

    // The record appears once in each participating pool.
    let source_pending = ledger.pending(2).unwrap();
    let destination_pending = ledger.pending(3).unwrap();
    assert_eq!(source_pending.len(), 1);
    assert_eq!(destination_pending.len(), 1);
    assert_eq!(source_pending[0].kind, TransferKind::CrossShardDebit);
    assert_eq!(destination_pending[0].kind, TransferKind::CrossShardCredit);
    assert_eq!(source_pending[0].content_hash(), receipt.tx_hash);
    assert_eq!(destination_pending[0].content_hash(), receipt.tx_hash);

    // Balances move exactly once.
    approx(ledger.balance("a1sender", NATIVE_ASSET), 100.0 - 5.05);
    approx(ledger.balance("f9recipient", NATIVE_ASSET), 5.0);
}

#[test]
fn test_cross_shard_abort_leaves_state_unchanged() {
    let ledger = ledger(4, 3);
    ledger.seed_balance("a1sender", 1.0);

    let err = ledger
        .submit(Transaction::new("a1sender", "f9recipient", 5.0))
        .unwrap_err();
    assert!(matches!(err, SubmitError::InsufficientFunds { .. }));
    assert!(ledger.pending(2).unwrap().is_empty());
    assert!(ledger.pending(3).unwrap().is_empty());
    approx(ledger.balance("a1sender", NATIVE_ASSET), 1.0);
    approx(ledger.balance("f9recipient", NATIVE_ASSET), 0.0);
}

#[test]
fn test_signature_rejection() {
    // Signed with one key, verified against an unrelated key.
    let mut tx = Transaction::new("a1alice", "b2bob", 10.0);
    tx.sign(&KEYS).unwrap();
    assert!(tx.verify(&KEYS.public_key()));
    assert!(!tx.verify(&OTHER_KEYS.public_key()));

    // The same mismatch through submit is a rejection.
    let ledger = ledger(4, 3);
    ledger.seed_balance("a1alice", 100.0);
    ledger.register_key("a1alice", OTHER_KEYS.public_key());
    let err = ledger.submit(tx).unwrap_err();
    assert!(matches!(err, SubmitError::InvalidSignature(_)));
    approx(ledger.balance("a1alice", NATIVE_ASSET), 100.0);
}

#[test]
fn test_mined_reward_compounds_into_next_block() {
    let ledger = ledger(4, 1);
    ledger.seed_balance("a1alice", 100.0);
    ledger
        .submit(Transaction::new("a1alice", "b2bob", 10.0))
        .unwrap();

    let shard = ledger.shard_for("a1alice").unwrap();
    ledger.mine("a1alice").unwrap().expect("first block");

    // The subsidy sits in the pool, so the next mine has work.
    let second = ledger.mine("a1alice").unwrap().expect("second block");
    assert_eq!(second.index, 2);
    assert_eq!(second.transactions.len(), 1);
    assert!(second.transactions[0].is_reward());
    assert_eq!(ledger.chain(shard).unwrap().len(), 3);

    // Two subsidies on top of the post-send balance.
    approx(ledger.balance("a1alice", NATIVE_ASSET), 189.9);
}
