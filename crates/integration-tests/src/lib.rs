//! # Integration Tests Crate
//!
//! End-to-end flows through the ledger façade, exercising the shard
//! chains, the cross-shard coordinator, and the consensus engine
//! together.
//!
//! ## Structure
//!
//! ```text
//! integration-tests/
//! └── src/
//!     ├── lib.rs         # This file
//!     ├── scenarios.rs   # Concrete end-to-end scenarios
//!     └── properties.rs  # System-wide guarantees
//! ```

#[cfg(test)]
mod properties;
#[cfg(test)]
mod scenarios;
