//! The ledger façade.
//!
//! One public entry point over shards, balances, keys, the consensus
//! engine, and the cross-shard coordinator. All mutable state sits
//! behind a single mutex, so submissions, mining, balance moves, and
//! cross-shard commits observe one global total order.

use parking_lot::Mutex;
use qfc_consensus::{CancelSignal, ConsensusEngine, ConsensusError};
use qfc_sharding::{shard_for, CrossShardCoordinator, Route, Settlement, Shard, ShardError};
use shared_crypto::RsaPublicKey;
use shared_types::constants::{NATIVE_ASSET, NETWORK_SENDER};
use shared_types::{Amount, Block, HexHash, ShardId, Transaction};

use crate::balances::BalanceBook;
use crate::config::LedgerConfig;
use crate::errors::{MineError, SubmitError};
use crate::keys::KeyDirectory;

/// Proof that a submission was accepted.
#[derive(Clone, Debug)]
pub struct SubmitReceipt {
    /// Content digest of the accepted transaction.
    pub tx_hash: HexHash,
    /// Where the transfer landed.
    pub route: Route,
}

struct LedgerState {
    shards: Vec<Shard>,
    balances: BalanceBook,
    keys: KeyDirectory,
    engine: ConsensusEngine,
    coordinator: CrossShardCoordinator,
}

/// The sharded ledger: transaction intake, mining entry point, balance
/// book, and chain reads.
pub struct Ledger {
    inner: Mutex<LedgerState>,
}

impl Ledger {
    /// Build a ledger: `shard_count` shards, each with its genesis
    /// block, an empty balance book, and a consensus engine at the
    /// configured initial difficulty.
    pub fn new(config: LedgerConfig) -> Self {
        let shard_count = config.shard_count.max(1);
        if shard_count != config.shard_count {
            tracing::warn!(
                requested = config.shard_count,
                "shard count clamped to one"
            );
        }
        let shards = (0..shard_count).map(Shard::new).collect();
        tracing::info!(
            shard_count,
            difficulty = config.consensus.initial_difficulty,
            "ledger constructed"
        );
        Self {
            inner: Mutex::new(LedgerState {
                shards,
                balances: BalanceBook::new(),
                keys: KeyDirectory::new(),
                engine: ConsensusEngine::new(&config.consensus),
                coordinator: CrossShardCoordinator::new(shard_count),
            }),
        }
    }

    /// A ledger with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(LedgerConfig::default())
    }

    /// Register a verification key; the address must sign all
    /// subsequent submissions.
    pub fn register_key(&self, address: impl Into<String>, key: RsaPublicKey) {
        self.inner.lock().keys.register(address, key);
    }

    /// Credit an address from the unallocated native supply. Returns
    /// the amount actually credited.
    pub fn seed_balance(&self, address: &str, amount: Amount) -> Amount {
        self.inner.lock().balances.seed(address, NATIVE_ASSET, amount)
    }

    /// Validate and admit a transaction.
    ///
    /// Accepted intra-shard transfers land in the sender's shard pool;
    /// cross-shard transfers settle through two-phase commit and land
    /// one leg in each pool. Balance movement is atomic with admission.
    /// Every rejection is a typed error and leaves all state untouched.
    pub fn submit(&self, tx: Transaction) -> Result<SubmitReceipt, SubmitError> {
        self.inner.lock().submit(tx)
    }

    /// Build, mine, and append a block on the miner's shard, then emit
    /// the reward. Returns `None` when that shard has nothing pending.
    pub fn mine(&self, miner: &str) -> Result<Option<Block>, MineError> {
        self.mine_with(miner, &CancelSignal::never())
    }

    /// [`Ledger::mine`] with a cancel signal for the nonce search.
    pub fn mine_with(
        &self,
        miner: &str,
        cancel: &CancelSignal,
    ) -> Result<Option<Block>, MineError> {
        self.inner.lock().mine(miner, cancel)
    }

    /// Current balance; zero for unseen addresses.
    pub fn balance(&self, address: &str, asset: &str) -> Amount {
        self.inner.lock().balances.balance(address, asset)
    }

    /// Current native-asset balance.
    pub fn native_balance(&self, address: &str) -> Amount {
        self.balance(address, NATIVE_ASSET)
    }

    /// Snapshot of a shard's chain, genesis first.
    pub fn chain(&self, shard: ShardId) -> Result<Vec<Block>, ShardError> {
        let state = self.inner.lock();
        state
            .shards
            .get(shard as usize)
            .map(|s| s.chain().to_vec())
            .ok_or(ShardError::UnknownShard(shard))
    }

    /// Snapshot of a shard's pending pool in admission order.
    pub fn pending(&self, shard: ShardId) -> Result<Vec<Transaction>, ShardError> {
        let state = self.inner.lock();
        state
            .shards
            .get(shard as usize)
            .map(|s| s.pending().to_vec())
            .ok_or(ShardError::UnknownShard(shard))
    }

    /// Re-verify an appended block: the digest over its header
    /// snapshot with its stored nonce and energy tag must reproduce
    /// its stored hash and meet the current difficulty. Genesis
    /// carries no seal and never validates.
    pub fn validate_block(&self, block: &Block) -> bool {
        self.inner.lock().engine.validate_block(block)
    }

    /// Snapshot of the cross-shard settlement journal.
    pub fn settlements(&self) -> Vec<Settlement> {
        self.inner.lock().coordinator.journal().to_vec()
    }

    /// Current process-wide difficulty.
    pub fn difficulty(&self) -> u32 {
        self.inner.lock().engine.difficulty()
    }

    /// Number of shards, fixed at construction.
    pub fn shard_count(&self) -> u16 {
        self.inner.lock().coordinator.shard_count()
    }

    /// Shard owning an address.
    pub fn shard_for(&self, address: &str) -> Result<ShardId, ShardError> {
        shard_for(address, self.shard_count())
    }
}

impl LedgerState {
    fn submit(&mut self, tx: Transaction) -> Result<SubmitReceipt, SubmitError> {
        if !tx.amount.is_finite() || tx.amount <= 0.0 {
            return Err(SubmitError::InvalidAmount(tx.amount));
        }
        if !self.balances.knows_asset(&tx.asset) {
            return Err(SubmitError::UnknownAsset(tx.asset.clone()));
        }
        if tx.sender == NETWORK_SENDER {
            return Err(SubmitError::ReservedSender);
        }
        // Both endpoints must route before anything moves.
        self.coordinator.route(&tx).map_err(SubmitError::Routing)?;

        if let Some(key) = self.keys.get(&tx.sender) {
            if !tx.is_signed() {
                return Err(SubmitError::MissingSignature(tx.sender.clone()));
            }
            if !tx.verify(key) {
                return Err(SubmitError::InvalidSignature(tx.sender.clone()));
            }
        }

        let available = self.balances.balance(&tx.sender, &tx.asset);
        let required = tx.total_cost();
        if available < required {
            return Err(SubmitError::InsufficientFunds {
                required,
                available,
            });
        }

        let route = self
            .coordinator
            .dispatch(&tx, available, &mut self.shards)
            .map_err(|err| match err {
                ShardError::Aborted(
                    qfc_sharding::AbortReason::InsufficientFunds {
                        required,
                        available,
                    },
                ) => SubmitError::InsufficientFunds {
                    required,
                    available,
                },
                other => SubmitError::Routing(other),
            })?;
        self.balances.apply_transfer(&tx);

        let receipt = SubmitReceipt {
            tx_hash: tx.content_hash(),
            route,
        };
        tracing::info!(
            tx = %receipt.tx_hash,
            route = ?receipt.route,
            amount = tx.amount,
            fee = tx.fee,
            "transaction accepted"
        );
        Ok(receipt)
    }

    fn mine(
        &mut self,
        miner: &str,
        cancel: &CancelSignal,
    ) -> Result<Option<Block>, MineError> {
        let shard_id =
            shard_for(miner, self.coordinator.shard_count()).map_err(MineError::Routing)?;
        let candidate = self
            .shards
            .get_mut(shard_id as usize)
            .ok_or(MineError::Routing(ShardError::UnknownShard(shard_id)))?
            .build(miner);
        let Some(mut block) = candidate else {
            tracing::debug!(miner, shard = shard_id, "nothing to mine");
            return Ok(None);
        };

        let seal = self
            .engine
            .mine_block(&block.pow_payload(), miner, cancel)
            .map_err(|err| match err {
                ConsensusError::Cancelled => MineError::Cancelled,
            })?;
        block.nonce = seal.nonce;
        block.hash = seal.hash.clone();
        block.energy_source = Some(seal.energy_source);

        // The engine contract makes an invalid seal a programmer error.
        assert!(
            self.engine.check_seal(&block, seal.difficulty),
            "consensus engine produced an invalid seal"
        );

        let index = block.index;
        self.shards[shard_id as usize].append(block.clone());

        // Reward: credited and pooled in this same critical section;
        // the reserved sender is never routed.
        let coinbase = self.engine.coinbase(miner, index);
        self.balances.apply_reward(&coinbase);
        self.shards[shard_id as usize].admit(coinbase);

        tracing::info!(
            miner,
            shard = shard_id,
            index,
            hash = %block.hash,
            "block mined and appended"
        );
        Ok(Some(block))
    }
}
