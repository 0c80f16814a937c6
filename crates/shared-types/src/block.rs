//! Blocks: immutable batches of transactions with a proof-of-work header.
//!
//! The content digest covers `{index, transactions, previous_hash,
//! nonce, timestamp}`. The stored `hash` and `energy_source` fields are
//! carried by the block but are never digest input; the mined seal
//! additionally commits to the nonce and energy tag (see the consensus
//! engine).

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared_crypto::{canonical_json, canonical_sha256_hex, meets_difficulty};

use crate::constants::GENESIS_PREVIOUS_HASH;
use crate::transaction::Transaction;
use crate::{unix_now, EnergySource, HexHash, Timestamp};

/// One block in a shard-local chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Shard-local height; genesis is 0.
    pub index: u64,
    /// Transactions in admission order, frozen at construction.
    pub transactions: Vec<Transaction>,
    /// Content hash of the preceding block; `"0"` at genesis.
    pub previous_hash: HexHash,
    /// Proof-of-work counter.
    pub nonce: u64,
    /// Creation time, stamped once at construction.
    pub timestamp: Timestamp,
    /// Stored block hash (content or mined seal).
    pub hash: HexHash,
    /// Energy tag committed by the miner; absent until mined.
    /// Genesis is never mined.
    pub energy_source: Option<EnergySource>,
}

impl Block {
    /// Construct an unmined block, stamping the timestamp now.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        previous_hash: impl Into<HexHash>,
    ) -> Self {
        Self::new_at(index, transactions, previous_hash, unix_now())
    }

    /// Construct an unmined block at a fixed timestamp. Hashing and
    /// mining are deterministic given the timestamp and transaction
    /// order, which is what tests pin down.
    pub fn new_at(
        index: u64,
        transactions: Vec<Transaction>,
        previous_hash: impl Into<HexHash>,
        timestamp: Timestamp,
    ) -> Self {
        let mut block = Self {
            index,
            transactions,
            previous_hash: previous_hash.into(),
            nonce: 0,
            timestamp,
            hash: String::new(),
            energy_source: None,
        };
        block.hash = block.compute_hash();
        block
    }

    /// The genesis block: index 0, no transactions, predecessor `"0"`,
    /// hash computed with nonce 0 and exempt from any difficulty target.
    pub fn genesis() -> Self {
        Self::new(0, Vec::new(), GENESIS_PREVIOUS_HASH)
    }

    /// Header object for content hashing, with an explicit nonce.
    fn header_json(&self, nonce: u64) -> Value {
        json!({
            "index": self.index,
            "transactions": self.transactions.iter().map(Transaction::wire_json).collect::<Vec<_>>(),
            "previous_hash": self.previous_hash,
            "nonce": nonce,
            "timestamp": self.timestamp,
        })
    }

    /// Content digest over the header with the current nonce.
    pub fn compute_hash(&self) -> HexHash {
        canonical_sha256_hex(&self.header_json(self.nonce))
    }

    /// Serialized header snapshot handed to the consensus engine: the
    /// canonical header encoding with the nonce field zeroed, i.e. the
    /// header exactly as built, before any nonce search.
    pub fn pow_payload(&self) -> String {
        canonical_json(&self.header_json(0))
    }

    /// Direct header nonce search: increment the nonce until the
    /// content digest carries `difficulty` leading hex zeros, then
    /// store it.
    pub fn mine(&mut self, difficulty: u32) {
        while !meets_difficulty(&self.hash, difficulty) {
            self.nonce += 1;
            self.hash = self.compute_hash();
        }
    }

    /// True for the genesis block.
    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.previous_hash == GENESIS_PREVIOUS_HASH
    }
}
