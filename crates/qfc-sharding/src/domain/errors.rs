//! Error types for the sharding subsystem.

use shared_types::ShardId;
use thiserror::Error;

use super::settlement::{AbortReason, SettlementState};

/// Sharding error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShardError {
    /// Address whose first character is not a hex digit; routing is
    /// undefined for it.
    #[error("malformed address {0:?}: first character is not a hex digit")]
    MalformedAddress(String),

    /// Shard id outside the configured shard vector.
    #[error("unknown shard: {0}")]
    UnknownShard(ShardId),

    /// Settlement state machine refused a transition.
    #[error("invalid settlement transition: {from:?} -> {to:?}")]
    InvalidTransition {
        /// Current state.
        from: SettlementState,
        /// Attempted state.
        to: SettlementState,
    },

    /// Cross-shard settlement aborted during prepare.
    #[error("settlement aborted: {0}")]
    Aborted(AbortReason),
}
