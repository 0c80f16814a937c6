//! Block subsidy schedule.
//!
//! The subsidy starts at the base reward and halves every
//! `halving_interval` blocks of the mined shard's chain, never dropping
//! below one unit. Reward transactions originate from the reserved
//! network identity and carry no signature.

use shared_types::Transaction;

use crate::config::ConsensusConfig;

/// Halving subsidy schedule.
#[derive(Clone, Debug)]
pub struct RewardSchedule {
    base_reward: u64,
    halving_interval: u64,
}

impl RewardSchedule {
    /// Schedule seeded from config. The interval is clamped to at
    /// least one block.
    pub fn new(config: &ConsensusConfig) -> Self {
        Self {
            base_reward: config.base_reward,
            halving_interval: config.halving_interval.max(1),
        }
    }

    /// Subsidy for a block at the given shard-local index:
    /// `max(1, base_reward >> halvings)`.
    pub fn reward_at(&self, block_index: u64) -> u64 {
        let halvings = block_index / self.halving_interval;
        u32::try_from(halvings)
            .ok()
            .and_then(|h| self.base_reward.checked_shr(h))
            .unwrap_or(0)
            .max(1)
    }

    /// The synthetic reward transaction for a mined block.
    pub fn coinbase(&self, miner: &str, block_index: u64) -> Transaction {
        Transaction::reward(miner, self.reward_at(block_index) as f64)
    }
}
