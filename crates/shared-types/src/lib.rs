//! # Shared Types Crate
//!
//! Core chain entities shared by every subsystem, along with the type
//! aliases and protocol constants they are built from.
//!
//! ## Clusters
//!
//! - **Value transfer**: [`Transaction`], [`TransferKind`]
//! - **Chain**: [`Block`], [`EnergySource`]
//! - **Protocol constants**: [`constants`]
//!
//! ## Design Principles
//!
//! - **Single source of truth**: cross-subsystem types live here and
//!   nowhere else.
//! - **Content addressing**: entities hash a canonical key-sorted JSON
//!   encoding of their wire fields; the stored signature/seal fields are
//!   never part of the content digest.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod block;
pub mod constants;
pub mod energy;
pub mod transaction;

use std::time::{SystemTime, UNIX_EPOCH};

pub use block::Block;
pub use energy::EnergySource;
pub use transaction::{Transaction, TransferKind};

/// Shard identifier (u16 supports up to 65536 shards).
pub type ShardId = u16;

/// Token quantity. Amounts are non-negative rationals in the wire
/// encoding; fees are derived, never user input.
pub type Amount = f64;

/// Wall-clock seconds since the Unix epoch, fractional.
pub type Timestamp = f64;

/// Lowercase hex SHA-256 digest. The genesis predecessor is the
/// literal `"0"`.
pub type HexHash = String;

/// Current wall-clock time as fractional seconds since the epoch.
pub fn unix_now() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
