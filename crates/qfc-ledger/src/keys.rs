//! Address-to-key directory for submit-time signature checks.
//!
//! Registration is voluntary: a sender with a registered key must sign
//! every submission; unregistered senders pass unchecked, and reward
//! transactions never consult the directory.

use std::collections::HashMap;

use shared_crypto::RsaPublicKey;

/// Registered verification keys by address.
#[derive(Clone, Debug, Default)]
pub struct KeyDirectory {
    keys: HashMap<String, RsaPublicKey>,
}

impl KeyDirectory {
    /// Empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the key for an address.
    pub fn register(&mut self, address: impl Into<String>, key: RsaPublicKey) {
        self.keys.insert(address.into(), key);
    }

    /// Key registered for an address, if any.
    pub fn get(&self, address: &str) -> Option<&RsaPublicKey> {
        self.keys.get(address)
    }
}
