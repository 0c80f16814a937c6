//! Green proof-of-work: the nonce search and its seal digest.
//!
//! The seal digest is SHA-256 over the concatenation of the serialized
//! candidate header, the nonce, and the miner's energy tag. The header
//! snapshot is the candidate exactly as built (nonce field zero), so a
//! verifier can reconstruct the digest input from a stored block.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::seq::SliceRandom;
use shared_crypto::{meets_difficulty, sha256_hex};
use shared_types::{EnergySource, HexHash};

use crate::config::ConsensusConfig;
use crate::difficulty::DifficultyWindow;
use crate::errors::ConsensusError;

/// Nonces between cancel-signal polls.
const CANCEL_CHECK_INTERVAL: u64 = 4096;

/// Cooperative stop for the nonce search: an external stop flag, an
/// optional deadline, or both. The default signal never fires.
#[derive(Clone, Debug, Default)]
pub struct CancelSignal {
    stop: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        Self::default()
    }

    /// A signal that fires once the deadline passes.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            stop: Arc::new(AtomicBool::new(false)),
            deadline: Some(deadline),
        }
    }

    /// Request cancellation from another handle holding this signal.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// True once the flag is set or the deadline has passed.
    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// A successful nonce search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinedSeal {
    /// Nonce satisfying the target.
    pub nonce: u64,
    /// Seal digest, lowercase hex.
    pub hash: HexHash,
    /// Energy tag committed into the digest.
    pub energy_source: EnergySource,
    /// Difficulty the seal was mined at. The shared counter may move
    /// before the caller re-checks the seal.
    pub difficulty: u32,
}

/// Seal digest over `header || nonce || energy tag`.
pub fn seal_hash(block_data: &str, nonce: u64, energy_source: EnergySource) -> HexHash {
    sha256_hex(format!("{block_data}{nonce}{energy_source}").as_bytes())
}

/// The proof-of-work driver: nonce search plus the shared difficulty
/// window.
#[derive(Clone, Debug)]
pub struct GreenPow {
    window: DifficultyWindow,
}

impl GreenPow {
    /// Driver seeded from config.
    pub fn new(config: &ConsensusConfig) -> Self {
        Self {
            window: DifficultyWindow::new(config),
        }
    }

    /// Current process-wide difficulty.
    pub fn difficulty(&self) -> u32 {
        self.window.difficulty()
    }

    /// Search for a seal over the serialized candidate header.
    ///
    /// Picks an energy tag at random, walks nonces from zero, records
    /// the search duration on success, and retargets the difficulty
    /// window. Cancellation is polled every few thousand nonces and
    /// leaves the window untouched.
    #[tracing::instrument(skip(self, block_data, cancel), fields(difficulty = self.window.difficulty()))]
    pub fn mine(
        &mut self,
        block_data: &str,
        miner: &str,
        cancel: &CancelSignal,
    ) -> Result<MinedSeal, ConsensusError> {
        let difficulty = self.window.difficulty();
        let energy_source = *EnergySource::ALL
            .choose(&mut rand::thread_rng())
            .unwrap_or(&EnergySource::Solar);
        let started = Instant::now();
        let mut nonce: u64 = 0;

        loop {
            if nonce % CANCEL_CHECK_INTERVAL == 0 && cancel.should_stop() {
                tracing::warn!(miner, nonce, "nonce search cancelled");
                return Err(ConsensusError::Cancelled);
            }

            let hash = seal_hash(block_data, nonce, energy_source);
            if meets_difficulty(&hash, difficulty) {
                let duration = started.elapsed().as_secs_f64();
                self.window.record(duration);
                tracing::info!(
                    miner,
                    nonce,
                    hash = %hash,
                    %energy_source,
                    duration_secs = duration,
                    "seal found"
                );
                return Ok(MinedSeal {
                    nonce,
                    hash,
                    energy_source,
                    difficulty,
                });
            }
            nonce += 1;
        }
    }

    /// Verify a stored seal at an explicit difficulty: the digest must
    /// reproduce and carry the required hex zeros. The energy tag is
    /// recognized by construction of [`EnergySource`].
    pub fn verify_at(
        block_data: &str,
        nonce: u64,
        hash: &str,
        energy_source: EnergySource,
        difficulty: u32,
    ) -> bool {
        seal_hash(block_data, nonce, energy_source) == hash && meets_difficulty(hash, difficulty)
    }
}
