//! Cross-shard settlement state machine.
//!
//! One [`Settlement`] tracks a single cross-shard transfer through
//! prepare/commit/abort. Terminal records are journaled by the
//! coordinator so every outcome stays observable.

use std::fmt;

use serde::{Deserialize, Serialize};
use shared_types::{Amount, HexHash, ShardId, Transaction};
use uuid::Uuid;

use super::errors::ShardError;

/// Cross-shard settlement states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SettlementState {
    /// Initial state; nothing reserved, nothing recorded.
    #[default]
    Pending,
    /// Phase 1 complete: the source balance covers the total cost.
    Prepared,
    /// Phase 2 complete: both shard pools carry their leg.
    Committed,
    /// Settlement rolled back; neither shard records the transfer.
    Aborted,
}

impl SettlementState {
    /// Check whether a transition to the next state is valid.
    pub fn can_transition_to(&self, next: SettlementState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Prepared)
                | (Self::Pending, Self::Aborted)
                | (Self::Prepared, Self::Committed)
                | (Self::Prepared, Self::Aborted)
        )
    }

    /// Check whether this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Committed | Self::Aborted)
    }
}

/// Reason a settlement aborted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AbortReason {
    /// Source balance below the transfer's total cost.
    InsufficientFunds {
        /// Amount plus fee the source must cover.
        required: Amount,
        /// Balance actually available.
        available: Amount,
    },
    /// Explicit abort by the coordinator.
    CoordinatorAbort,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::InsufficientFunds {
                required,
                available,
            } => write!(
                f,
                "insufficient funds: required {required}, available {available}"
            ),
            AbortReason::CoordinatorAbort => f.write_str("coordinator abort"),
        }
    }
}

/// One cross-shard transfer moving through two-phase commit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settlement {
    /// Settlement identifier.
    pub id: Uuid,
    /// Content digest of the transfer being settled.
    pub tx_hash: HexHash,
    /// Shard owning the sender.
    pub source: ShardId,
    /// Shard owning the recipient.
    pub destination: ShardId,
    /// Amount plus fee the source must cover.
    pub required: Amount,
    state: SettlementState,
    abort_reason: Option<AbortReason>,
}

impl Settlement {
    /// Open a settlement for a transfer between two distinct shards.
    pub fn new(tx: &Transaction, source: ShardId, destination: ShardId) -> Self {
        Self {
            id: Uuid::new_v4(),
            tx_hash: tx.content_hash(),
            source,
            destination,
            required: tx.total_cost(),
            state: SettlementState::Pending,
            abort_reason: None,
        }
    }

    /// Phase 1: check the source shard can cover the total cost. The
    /// destination always accepts the credit. Failure aborts in place.
    pub fn prepare(&mut self, available: Amount) -> Result<(), ShardError> {
        if available >= self.required {
            self.transition(SettlementState::Prepared)
        } else {
            let reason = AbortReason::InsufficientFunds {
                required: self.required,
                available,
            };
            self.abort(reason.clone())?;
            Err(ShardError::Aborted(reason))
        }
    }

    /// Phase 2: mark both legs recorded. Only valid from `Prepared`.
    pub fn commit(&mut self) -> Result<(), ShardError> {
        self.transition(SettlementState::Committed)
    }

    /// Roll back; neither shard records the transfer.
    pub fn abort(&mut self, reason: AbortReason) -> Result<(), ShardError> {
        self.transition(SettlementState::Aborted)?;
        self.abort_reason = Some(reason);
        Ok(())
    }

    /// Current state.
    pub fn state(&self) -> SettlementState {
        self.state
    }

    /// Why the settlement aborted, if it did.
    pub fn abort_reason(&self) -> Option<&AbortReason> {
        self.abort_reason.as_ref()
    }

    fn transition(&mut self, to: SettlementState) -> Result<(), ShardError> {
        if !self.state.can_transition_to(to) {
            return Err(ShardError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }
}
