//! Ledger configuration.

use qfc_consensus::ConsensusConfig;

/// Construction-time tunables for one ledger instance. The shard count
/// is constant for the life of the process.
#[derive(Clone, Debug)]
pub struct LedgerConfig {
    /// Number of shards; at least one.
    pub shard_count: u16,
    /// Consensus tunables (difficulty, block time, rewards).
    pub consensus: ConsensusConfig,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            shard_count: 4,
            consensus: ConsensusConfig::default(),
        }
    }
}
