//! Consensus configuration.

use shared_types::constants::{
    BASE_BLOCK_REWARD, DIFFICULTY_ADJUSTMENT_INTERVAL, HALVING_INTERVAL, INITIAL_DIFFICULTY,
    TARGET_BLOCK_TIME_SECS,
};

/// Tunables for proof-of-work and reward emission. One instance per
/// ledger; the difficulty it seeds is process-wide across shards.
#[derive(Clone, Debug)]
pub struct ConsensusConfig {
    /// Hex zeros required of a mined hash at boot.
    pub initial_difficulty: u32,
    /// Target seconds between mined blocks.
    pub target_block_time: f64,
    /// Mined blocks per retarget window.
    pub adjustment_interval: usize,
    /// Subsidy before any halving.
    pub base_reward: u64,
    /// Blocks between subsidy halvings.
    pub halving_interval: u64,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            initial_difficulty: INITIAL_DIFFICULTY,
            target_block_time: TARGET_BLOCK_TIME_SECS,
            adjustment_interval: DIFFICULTY_ADJUSTMENT_INTERVAL,
            base_reward: BASE_BLOCK_REWARD,
            halving_interval: HALVING_INTERVAL,
        }
    }
}
