//! Protocol constants.
//!
//! These are policy values, fixed for the life of the network. Runtime
//! tunables (shard count, difficulty, block time) live in the config
//! structs of the crates that own them.

/// Symbol of the native asset.
pub const NATIVE_ASSET: &str = "QFC";

/// Fixed total supply of the native asset.
pub const TOTAL_SUPPLY: u64 = 1_000_000_000;

/// Fee rate applied to every user transfer: fee = amount * FEE_RATE.
pub const FEE_RATE: f64 = 0.01;

/// Block subsidy before any halving.
pub const BASE_BLOCK_REWARD: u64 = 50;

/// Number of blocks between subsidy halvings.
pub const HALVING_INTERVAL: u64 = 210_000;

/// Hex zeros required of a freshly mined block hash at boot.
pub const INITIAL_DIFFICULTY: u32 = 4;

/// Target seconds between mined blocks.
pub const TARGET_BLOCK_TIME_SECS: f64 = 60.0;

/// Mined blocks per difficulty retarget window.
pub const DIFFICULTY_ADJUSTMENT_INTERVAL: usize = 10;

/// Reserved sender identity of reward transactions. Never a legal
/// address for an external party.
pub const NETWORK_SENDER: &str = "Network";

/// Predecessor hash of every genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";
