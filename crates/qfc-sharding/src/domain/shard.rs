//! The shard entity: one chain, one pending pool.

use rand::Rng;
use shared_types::{Block, ShardId, Transaction};

/// An independent ledger partition. A shard owns its chain exclusively;
/// the chain is non-empty (genesis at construction) and append-only.
#[derive(Clone, Debug)]
pub struct Shard {
    id: ShardId,
    chain: Vec<Block>,
    pending: Vec<Transaction>,
    /// Spatial tag consumed only by external visualization.
    position: [f64; 3],
}

impl Shard {
    /// Create a shard with its genesis block.
    pub fn new(id: ShardId) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            id,
            chain: vec![Block::genesis()],
            pending: Vec::new(),
            position: [
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            ],
        }
    }

    /// Shard identifier.
    pub fn id(&self) -> ShardId {
        self.id
    }

    /// Last block in the chain; always defined.
    pub fn latest(&self) -> &Block {
        // Chain is non-empty by construction and append-only.
        self.chain.last().expect("shard chain starts at genesis")
    }

    /// Append a mined block. The caller guarantees it extends
    /// [`Shard::latest`].
    pub fn append(&mut self, block: Block) {
        tracing::debug!(shard = self.id, index = block.index, hash = %block.hash, "appending block");
        self.chain.push(block);
    }

    /// Push a validated transaction onto the pending pool. Validation
    /// happens upstream; admission order is inclusion order.
    pub fn admit(&mut self, tx: Transaction) {
        tracing::debug!(shard = self.id, tx = %tx.content_hash(), kind = ?tx.kind, "admitting transaction");
        self.pending.push(tx);
    }

    /// Drain the pending pool into an unmined candidate block, or
    /// `None` when there is nothing to mine.
    ///
    /// The drain is the point of no return: once a candidate exists,
    /// its transactions are the miner's commitment and are not
    /// re-admitted on a failed mine.
    pub fn build(&mut self, miner: &str) -> Option<Block> {
        if self.pending.is_empty() {
            return None;
        }
        let transactions = std::mem::take(&mut self.pending);
        tracing::debug!(
            shard = self.id,
            miner,
            tx_count = transactions.len(),
            "building candidate block"
        );
        Some(Block::new(
            self.chain.len() as u64,
            transactions,
            self.latest().hash.clone(),
        ))
    }

    /// The full chain, genesis first.
    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    /// Chain length in blocks.
    pub fn height(&self) -> usize {
        self.chain.len()
    }

    /// Pending transactions in admission order.
    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    /// True when the pool holds at least one transaction.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Visualization-only spatial tag.
    pub fn position(&self) -> [f64; 3] {
        self.position
    }
}
