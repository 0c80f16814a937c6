//! Error types for the consensus engine.

use thiserror::Error;

/// Consensus engine errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConsensusError {
    /// The nonce search was stopped by its cancel signal before a
    /// valid seal was found. No difficulty sample is recorded.
    #[error("mining cancelled before a valid nonce was found")]
    Cancelled,
}
