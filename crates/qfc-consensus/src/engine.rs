//! The consensus engine: proof-of-work plus reward emission.

use shared_types::Block;
use shared_types::Transaction;

use crate::config::ConsensusConfig;
use crate::errors::ConsensusError;
use crate::pow::{CancelSignal, GreenPow, MinedSeal};
use crate::rewards::RewardSchedule;

/// Drives mining, difficulty, and subsidies for one ledger. The
/// difficulty it carries is shared by every shard; the owning façade
/// serializes all calls.
#[derive(Clone, Debug)]
pub struct ConsensusEngine {
    pow: GreenPow,
    rewards: RewardSchedule,
}

impl ConsensusEngine {
    /// Engine seeded from config.
    pub fn new(config: &ConsensusConfig) -> Self {
        Self {
            pow: GreenPow::new(config),
            rewards: RewardSchedule::new(config),
        }
    }

    /// Current process-wide difficulty.
    pub fn difficulty(&self) -> u32 {
        self.pow.difficulty()
    }

    /// Search for a seal over a serialized candidate header.
    pub fn mine_block(
        &mut self,
        block_data: &str,
        miner: &str,
        cancel: &CancelSignal,
    ) -> Result<MinedSeal, ConsensusError> {
        self.pow.mine(block_data, miner, cancel)
    }

    /// A block is valid iff its stored seal reproduces from its header
    /// snapshot, meets the current difficulty, and carries a recognized
    /// energy tag.
    pub fn validate_block(&self, block: &Block) -> bool {
        self.check_seal(block, self.difficulty())
    }

    /// Check a freshly sealed block at the difficulty it was mined at,
    /// which may differ from the current counter after a retarget.
    pub fn check_seal(&self, block: &Block, difficulty: u32) -> bool {
        match block.energy_source {
            Some(energy_source) => GreenPow::verify_at(
                &block.pow_payload(),
                block.nonce,
                &block.hash,
                energy_source,
                difficulty,
            ),
            None => false,
        }
    }

    /// The reward transaction for a block mined at the given
    /// shard-local index.
    pub fn coinbase(&self, miner: &str, block_index: u64) -> Transaction {
        self.rewards.coinbase(miner, block_index)
    }
}
