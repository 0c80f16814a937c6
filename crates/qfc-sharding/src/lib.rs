//! # QFC Sharding
//!
//! Ledger partitioning: per-shard chains with pending pools,
//! deterministic address-to-shard routing, and two-phase atomic
//! settlement for transfers whose endpoints live on different shards.
//!
//! ## Module Structure
//!
//! ```text
//! qfc-sharding/
//! ├── domain/          # Shard entity, settlement state machine, errors
//! └── algorithms/      # Nibble routing, two-phase commit coordinator
//! ```
//!
//! ## Guarantees
//!
//! - Routing is a pure function of an address's first hex nibble.
//! - A shard's chain starts at genesis and only ever grows.
//! - Pending pools are FIFO: admission order is inclusion order.
//! - A committed cross-shard transfer appears exactly once in each
//!   participating shard's pool; an aborted one appears in neither.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;

// Re-exports
pub use algorithms::{shard_for, CrossShardCoordinator, Route};
pub use domain::{AbortReason, Settlement, SettlementState, Shard, ShardError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
