//! # QFC Node Runtime
//!
//! Entry point for a single QFC node: initializes tracing, builds the
//! ledger from config, and drives an end-to-end scenario through the
//! façade: seed, submit (intra- and cross-shard), mine, report.

use anyhow::Result;
use qfc_consensus::ConsensusConfig;
use qfc_ledger::{Ledger, LedgerConfig};
use shared_crypto::RsaKeyPair;
use shared_types::constants::NATIVE_ASSET;
use shared_types::Transaction;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Node configuration, overridable from the environment.
#[derive(Debug, Clone)]
struct NodeConfig {
    /// Number of shards (`QFC_SHARDS`).
    shard_count: u16,
    /// Initial proof-of-work difficulty (`QFC_DIFFICULTY`).
    initial_difficulty: u32,
}

impl NodeConfig {
    fn from_env() -> Self {
        let defaults = LedgerConfig::default();
        Self {
            shard_count: env_parse("QFC_SHARDS").unwrap_or(defaults.shard_count),
            initial_difficulty: env_parse("QFC_DIFFICULTY")
                .unwrap_or(defaults.consensus.initial_difficulty),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(name, raw = %raw, "ignoring unparseable environment override");
            None
        }
    }
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = NodeConfig::from_env();
    info!(?config, "starting qfc node");

    let ledger = Ledger::new(LedgerConfig {
        shard_count: config.shard_count,
        consensus: ConsensusConfig {
            initial_difficulty: config.initial_difficulty,
            ..ConsensusConfig::default()
        },
    });

    // Two parties with registered keys; the ledger enforces their
    // signatures from here on.
    let alice = "a1f200cafe";
    let bob = "f94471beef";
    let alice_keys = RsaKeyPair::generate()?;
    let bob_keys = RsaKeyPair::generate()?;
    ledger.register_key(alice, alice_keys.public_key());
    ledger.register_key(bob, bob_keys.public_key());

    let seeded = ledger.seed_balance(alice, 1_000.0);
    info!(address = alice, seeded, "genesis allocation");

    // With the default four shards, 'a' routes to shard 2 and 'f' to
    // shard 3, so this exercises the cross-shard path.
    let mut transfer = Transaction::new(alice, bob, 125.0);
    transfer.sign(&alice_keys)?;
    let receipt = ledger.submit(transfer)?;
    info!(tx = %receipt.tx_hash, route = ?receipt.route, "transfer accepted");

    // Bob sends part of it back.
    let mut refund = Transaction::new(bob, alice, 40.0);
    refund.sign(&bob_keys)?;
    ledger.submit(refund)?;

    // Each party mines its own shard.
    for miner in [alice, bob] {
        match ledger.mine(miner)? {
            Some(block) => info!(
                miner,
                index = block.index,
                hash = %block.hash,
                energy = ?block.energy_source,
                tx_count = block.transactions.len(),
                "block mined"
            ),
            None => info!(miner, "no pending transactions"),
        }
    }

    for (name, address) in [("alice", alice), ("bob", bob)] {
        info!(
            party = name,
            balance = ledger.balance(address, NATIVE_ASSET),
            shard = ledger.shard_for(address)?,
            "final balance"
        );
    }
    for shard in 0..ledger.shard_count() {
        let chain = ledger.chain(shard)?;
        info!(
            shard,
            height = chain.len(),
            tip = %chain[chain.len() - 1].hash,
            "chain tip"
        );
    }
    info!(
        difficulty = ledger.difficulty(),
        settlements = ledger.settlements().len(),
        "node scenario complete"
    );
    Ok(())
}
