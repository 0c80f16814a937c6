//! Two-phase commit coordinator for cross-shard transfers.
//!
//! The coordinator routes every transfer. Same-shard transfers are
//! admitted directly; cross-shard transfers run prepare/commit/abort
//! through a [`Settlement`] and land one leg in each participating
//! pool. Both appends happen inside the caller's critical section, so
//! no partial commit is ever observable.

use shared_types::{Amount, ShardId, Transaction};
use uuid::Uuid;

use crate::domain::{Settlement, Shard, ShardError};

use super::routing::shard_for;

/// Where a transfer's endpoints landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Sender and recipient share a shard.
    Local(ShardId),
    /// Endpoints live on different shards; two-phase settlement applies.
    Cross {
        /// Shard owning the sender.
        source: ShardId,
        /// Shard owning the recipient.
        destination: ShardId,
    },
}

/// Routes transfers and drives cross-shard settlements to a terminal
/// state, journaling every one of them.
#[derive(Debug)]
pub struct CrossShardCoordinator {
    shard_count: u16,
    journal: Vec<Settlement>,
}

impl CrossShardCoordinator {
    /// Coordinator over a fixed shard count.
    pub fn new(shard_count: u16) -> Self {
        Self {
            shard_count,
            journal: Vec::new(),
        }
    }

    /// Number of shards routed over.
    pub fn shard_count(&self) -> u16 {
        self.shard_count
    }

    /// Route a transfer by its endpoints.
    pub fn route(&self, tx: &Transaction) -> Result<Route, ShardError> {
        let source = shard_for(&tx.sender, self.shard_count)?;
        let destination = shard_for(&tx.recipient, self.shard_count)?;
        if source == destination {
            Ok(Route::Local(source))
        } else {
            Ok(Route::Cross {
                source,
                destination,
            })
        }
    }

    /// Route a validated transfer and admit it to the pool(s) it
    /// belongs to. `available` is the sender's current balance, used by
    /// the prepare phase of cross-shard settlement.
    ///
    /// On the cross-shard path a committed transfer appears exactly
    /// once in each participating pool (as debit and credit legs
    /// sharing the original content digest); an aborted transfer
    /// appears in neither and surfaces as [`ShardError::Aborted`].
    pub fn dispatch(
        &mut self,
        tx: &Transaction,
        available: Amount,
        shards: &mut [Shard],
    ) -> Result<Route, ShardError> {
        let route = self.route(tx)?;
        match route {
            Route::Local(shard) => {
                self.shard_mut(shards, shard)?.admit(tx.clone());
            }
            Route::Cross {
                source,
                destination,
            } => {
                self.settle(tx, source, destination, available, shards)?;
            }
        }
        Ok(route)
    }

    /// Cross-shard settlement id history, terminal records only.
    pub fn journal(&self) -> &[Settlement] {
        &self.journal
    }

    fn settle(
        &mut self,
        tx: &Transaction,
        source: ShardId,
        destination: ShardId,
        available: Amount,
        shards: &mut [Shard],
    ) -> Result<Uuid, ShardError> {
        // Fail on a bad shard vector before any state change.
        self.shard_mut(shards, source)?;
        self.shard_mut(shards, destination)?;

        let mut settlement = Settlement::new(tx, source, destination);
        let id = settlement.id;

        if let Err(err) = settlement.prepare(available) {
            tracing::warn!(
                settlement = %id,
                tx = %settlement.tx_hash,
                reason = ?settlement.abort_reason(),
                "cross-shard settlement aborted"
            );
            self.journal.push(settlement);
            return Err(err);
        }

        // Commit: both legs land in the same critical section.
        self.shard_mut(shards, source)?.admit(tx.debit_leg());
        self.shard_mut(shards, destination)?.admit(tx.credit_leg());
        settlement.commit()?;
        tracing::info!(
            settlement = %id,
            tx = %settlement.tx_hash,
            source,
            destination,
            "cross-shard settlement committed"
        );
        self.journal.push(settlement);
        Ok(id)
    }

    fn shard_mut<'a>(
        &self,
        shards: &'a mut [Shard],
        id: ShardId,
    ) -> Result<&'a mut Shard, ShardError> {
        shards
            .get_mut(id as usize)
            .ok_or(ShardError::UnknownShard(id))
    }
}
