//! Per-asset balance book.
//!
//! The balance map is the authoritative account state. Balances move at
//! admission time: a transfer debits the sender's `amount + fee` and
//! credits the recipient's `amount` in the same critical section as
//! pool admission. Fees are burned, so circulating supply shrinks by
//! the fee on every user transfer; subsidies mint on top of it.

use std::collections::HashMap;

use shared_types::constants::{NATIVE_ASSET, TOTAL_SUPPLY};
use shared_types::{Amount, Transaction};

/// Account state for one asset.
#[derive(Clone, Debug)]
struct AssetBook {
    total_supply: u64,
    balances: HashMap<String, Amount>,
}

/// Account state across all known assets.
#[derive(Clone, Debug)]
pub struct BalanceBook {
    assets: HashMap<String, AssetBook>,
}

impl BalanceBook {
    /// A book with the native asset registered at its fixed supply.
    pub fn new() -> Self {
        let mut assets = HashMap::new();
        assets.insert(
            NATIVE_ASSET.to_string(),
            AssetBook {
                total_supply: TOTAL_SUPPLY,
                balances: HashMap::new(),
            },
        );
        Self { assets }
    }

    /// True for assets this ledger tracks.
    pub fn knows_asset(&self, asset: &str) -> bool {
        self.assets.contains_key(asset)
    }

    /// Fixed total supply of an asset, if tracked.
    pub fn total_supply(&self, asset: &str) -> Option<u64> {
        self.assets.get(asset).map(|book| book.total_supply)
    }

    /// Current balance; zero for unseen addresses and unknown assets.
    pub fn balance(&self, address: &str, asset: &str) -> Amount {
        self.assets
            .get(asset)
            .and_then(|book| book.balances.get(address))
            .copied()
            .unwrap_or(0.0)
    }

    /// Sum of all held balances in an asset.
    pub fn circulating(&self, asset: &str) -> Amount {
        self.assets
            .get(asset)
            .map(|book| book.balances.values().sum())
            .unwrap_or(0.0)
    }

    /// Apply a user transfer: sender pays `amount + fee`, recipient
    /// receives `amount`, the fee is burned. The caller has already
    /// checked funds.
    pub fn apply_transfer(&mut self, tx: &Transaction) {
        let Some(book) = self.assets.get_mut(&tx.asset) else {
            return;
        };
        *book.balances.entry(tx.sender.clone()).or_insert(0.0) -= tx.total_cost();
        *book.balances.entry(tx.recipient.clone()).or_insert(0.0) += tx.amount;
        tracing::debug!(
            sender = %tx.sender,
            recipient = %tx.recipient,
            amount = tx.amount,
            fee = tx.fee,
            "balances moved, fee burned"
        );
    }

    /// Apply a block subsidy: credit the miner, debit no one.
    pub fn apply_reward(&mut self, tx: &Transaction) {
        let Some(book) = self.assets.get_mut(&tx.asset) else {
            return;
        };
        *book.balances.entry(tx.recipient.clone()).or_insert(0.0) += tx.amount;
    }

    /// Credit an address outside transaction flow (genesis allocation),
    /// capped by the asset's unallocated supply. Returns the amount
    /// actually credited.
    pub fn seed(&mut self, address: &str, asset: &str, amount: Amount) -> Amount {
        let unallocated = self
            .total_supply(asset)
            .map(|supply| (supply as Amount - self.circulating(asset)).max(0.0));
        let Some(book) = self.assets.get_mut(asset) else {
            return 0.0;
        };
        let granted = match unallocated {
            Some(cap) => amount.min(cap),
            None => amount,
        };
        *book.balances.entry(address.to_string()).or_insert(0.0) += granted;
        granted
    }
}

impl Default for BalanceBook {
    fn default() -> Self {
        Self::new()
    }
}
