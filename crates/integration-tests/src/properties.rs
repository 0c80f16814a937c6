//! System-wide guarantees, exercised end to end.

use once_cell::sync::Lazy;
use qfc_consensus::{CancelSignal, ConsensusConfig, GreenPow};
use qfc_ledger::{Ledger, LedgerConfig};
use qfc_sharding::shard_for;
use shared_crypto::{leading_hex_zeros, RsaKeyPair};
use shared_types::constants::NATIVE_ASSET;
use shared_types::{Amount, EnergySource, Transaction};

static KEYS: Lazy<RsaKeyPair> = Lazy::new(|| RsaKeyPair::generate().expect("keygen"));

fn approx(left: Amount, right: Amount) {
    assert!((left - right).abs() < 1e-9, "expected {right}, got {left}");
}

/// Content addressing: digests agree iff the wire fields agree.
#[test]
fn test_content_addressing() {
    let base = Transaction::new("a1", "b2", 10.0).with_timestamp(1_700_000_000.0);
    let same = Transaction::new("a1", "b2", 10.0).with_timestamp(1_700_000_000.0);
    assert_eq!(base.content_hash(), same.content_hash());

    let variants = [
        Transaction::new("a2", "b2", 10.0).with_timestamp(1_700_000_000.0),
        Transaction::new("a1", "b3", 10.0).with_timestamp(1_700_000_000.0),
        Transaction::new("a1", "b2", 11.0).with_timestamp(1_700_000_000.0),
        Transaction::new("a1", "b2", 10.0).with_timestamp(1_700_000_001.0),
    ];
    for variant in variants {
        assert_ne!(base.content_hash(), variant.content_hash());
    }
}

/// Signature round-trip: sign then verify under the matching key.
#[test]
fn test_signature_round_trip() {
    let mut tx = Transaction::new("a1", "b2", 10.0);
    tx.sign(&KEYS).unwrap();
    assert!(tx.verify(&KEYS.public_key()));
}

/// Every engine-produced seal meets the difficulty target and carries
/// a recognized energy tag.
#[test]
fn test_pow_target() {
    let mut pow = GreenPow::new(&ConsensusConfig {
        initial_difficulty: 2,
        ..ConsensusConfig::default()
    });
    for round in 0..5 {
        let payload = format!("header-{round}");
        let seal = pow.mine(&payload, "a1", &CancelSignal::never()).unwrap();
        assert!(leading_hex_zeros(&seal.hash) >= 2);
        assert!(EnergySource::ALL.contains(&seal.energy_source));
    }
}

/// Chain linkage: every non-genesis block points at its predecessor's
/// stored hash.
#[test]
fn test_chain_linkage() {
    let ledger = Ledger::new(LedgerConfig {
        shard_count: 4,
        consensus: ConsensusConfig {
            initial_difficulty: 1,
            ..ConsensusConfig::default()
        },
    });
    ledger.seed_balance("f9alice", 500.0);

    // Same-shard pair: 'f' and 'b' both route to shard 3.
    for _ in 0..3 {
        ledger
            .submit(Transaction::new("f9alice", "b2bob", 10.0))
            .unwrap();
        ledger.mine("f9alice").unwrap().expect("pending work");
    }

    let chain = ledger.chain(3).unwrap();
    assert_eq!(chain.len(), 4);
    for i in 1..chain.len() {
        assert_eq!(chain[i].previous_hash, chain[i - 1].hash);
        assert_eq!(chain[i].index as usize, i);
    }
}

/// Every appended block re-verifies from its stored header, nonce,
/// and energy tag: the recomputed digest reproduces the stored hash
/// and meets the difficulty target.
#[test]
fn test_appended_blocks_revalidate() {
    let ledger = Ledger::new(LedgerConfig {
        shard_count: 4,
        consensus: ConsensusConfig {
            initial_difficulty: 1,
            ..ConsensusConfig::default()
        },
    });
    ledger.seed_balance("f9alice", 500.0);

    // Three mines stay inside one retarget window, so the difficulty
    // the blocks were sealed at is still the current one.
    for _ in 0..3 {
        ledger
            .submit(Transaction::new("f9alice", "b2bob", 5.0))
            .unwrap();
        ledger.mine("f9alice").unwrap().expect("pending work");
    }

    let chain = ledger.chain(3).unwrap();
    assert_eq!(chain.len(), 4);
    // Genesis carries no seal.
    assert!(!ledger.validate_block(&chain[0]));
    for block in &chain[1..] {
        assert!(ledger.validate_block(block));
        assert!(leading_hex_zeros(&block.hash) >= 1);
    }
}

/// Intra-shard balance conservation: the sender loses amount plus fee,
/// the recipient gains the amount, and the fee is burned from
/// circulating supply.
#[test]
fn test_balance_conservation_intra_shard() {
    let ledger = Ledger::with_defaults();
    ledger.seed_balance("f9alice", 100.0);
    let before = 100.0;

    let tx = Transaction::new("f9alice", "b2bob", 10.0);
    let fee = tx.fee;
    ledger.submit(tx).unwrap();

    approx(ledger.balance("f9alice", NATIVE_ASSET), before - 10.0 - fee);
    approx(ledger.balance("b2bob", NATIVE_ASSET), 10.0);
    // No subsidy yet, so the books shrank by exactly the fee.
    approx(
        ledger.balance("f9alice", NATIVE_ASSET) + ledger.balance("b2bob", NATIVE_ASSET),
        before - fee,
    );
}

/// Routing determinism: the shard is a pure function of the first hex
/// nibble.
#[test]
fn test_routing_determinism() {
    for count in [1u16, 2, 4, 8] {
        for nibble in 0..16u32 {
            let c = char::from_digit(nibble, 16).unwrap();
            let short = format!("{c}");
            let long = format!("{c}fffffffffff");
            let upper = long.to_uppercase();
            let expected = (nibble as u16) % count;
            assert_eq!(shard_for(&short, count).unwrap(), expected);
            assert_eq!(shard_for(&long, count).unwrap(), expected);
            assert_eq!(shard_for(&upper, count).unwrap(), expected);
        }
    }
}

/// Difficulty monotonicity: sub-target block times raise difficulty
/// after a full window; over-target times lower it, never below one.
#[test]
fn test_difficulty_monotonicity() {
    // Wall-clock mines are far below a 60s target, so a full window
    // raises difficulty by one.
    let rising = Ledger::new(LedgerConfig {
        shard_count: 4,
        consensus: ConsensusConfig {
            initial_difficulty: 1,
            ..ConsensusConfig::default()
        },
    });
    rising.seed_balance("f9alice", 500.0);
    rising
        .submit(Transaction::new("f9alice", "b2bob", 1.0))
        .unwrap();
    assert_eq!(rising.difficulty(), 1);
    // Each mine leaves its subsidy pending, so every round has work.
    for _ in 0..10 {
        rising.mine("f9alice").unwrap().expect("pending work");
    }
    assert_eq!(rising.difficulty(), 2);

    // A zero-second target makes every window over-target; difficulty
    // steps down and holds at the floor.
    let falling = Ledger::new(LedgerConfig {
        shard_count: 4,
        consensus: ConsensusConfig {
            initial_difficulty: 2,
            target_block_time: 0.0,
            adjustment_interval: 5,
            ..ConsensusConfig::default()
        },
    });
    falling.seed_balance("f9alice", 500.0);
    falling
        .submit(Transaction::new("f9alice", "b2bob", 1.0))
        .unwrap();
    for _ in 0..5 {
        falling.mine("f9alice").unwrap().expect("pending work");
    }
    assert_eq!(falling.difficulty(), 1);
    for _ in 0..5 {
        falling.mine("f9alice").unwrap().expect("pending work");
    }
    // Floor.
    assert_eq!(falling.difficulty(), 1);
}

/// A transaction never appears in two blocks of the same shard.
#[test]
fn test_no_double_inclusion() {
    let ledger = Ledger::new(LedgerConfig {
        shard_count: 4,
        consensus: ConsensusConfig {
            initial_difficulty: 1,
            ..ConsensusConfig::default()
        },
    });
    ledger.seed_balance("f9alice", 100.0);
    let receipt = ledger
        .submit(Transaction::new("f9alice", "b2bob", 10.0))
        .unwrap();

    ledger.mine("f9alice").unwrap().expect("first block");
    ledger.mine("f9alice").unwrap().expect("second block");

    let chain = ledger.chain(3).unwrap();
    let inclusions = chain
        .iter()
        .flat_map(|block| block.transactions.iter())
        .filter(|tx| tx.content_hash() == receipt.tx_hash)
        .count();
    assert_eq!(inclusions, 1);
}
