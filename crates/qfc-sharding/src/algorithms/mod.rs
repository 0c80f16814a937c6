//! Algorithms layer: routing and the two-phase commit coordinator.

pub mod routing;
pub mod two_phase;

pub use routing::shard_for;
pub use two_phase::{CrossShardCoordinator, Route};
