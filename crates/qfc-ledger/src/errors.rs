//! Error types surfaced by the ledger façade.
//!
//! Every error is a local, typed rejection: nothing here unwinds the
//! process or crosses the façade as a panic. The one exception is the
//! post-mine seal sanity check inside the façade, where a failure is a
//! programmer error and process-fatal.

use qfc_sharding::ShardError;
use shared_types::Amount;
use thiserror::Error;

/// Why a submission was rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SubmitError {
    /// Amount was zero, negative, or not finite.
    #[error("amount must be positive and finite, got {0}")]
    InvalidAmount(Amount),

    /// Asset this ledger does not track.
    #[error("unknown asset: {0}")]
    UnknownAsset(String),

    /// External parties cannot send as the reserved network identity.
    #[error("the reserved network identity is not a legal sender")]
    ReservedSender,

    /// An endpoint address failed routing.
    #[error(transparent)]
    Routing(ShardError),

    /// Sender balance below `amount + fee`.
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// Amount plus fee.
        required: Amount,
        /// Sender balance at submission.
        available: Amount,
    },

    /// Sender has a registered key but the transaction is unsigned.
    #[error("missing signature for registered sender {0}")]
    MissingSignature(String),

    /// Signature did not verify under the sender's registered key.
    #[error("invalid signature from sender {0}")]
    InvalidSignature(String),
}

/// Why mining did not append a block.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MineError {
    /// The miner address failed routing.
    #[error(transparent)]
    Routing(ShardError),

    /// The nonce search was cancelled. The drained candidate
    /// transactions are forfeited: pool drain is the point of no
    /// return.
    #[error("mining cancelled before a seal was found")]
    Cancelled,
}
