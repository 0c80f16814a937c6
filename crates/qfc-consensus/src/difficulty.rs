//! Rolling-window difficulty adjustment.
//!
//! Difficulty is the number of leading hex zeros a mined hash must
//! carry: a single process-wide integer shared by every shard. Every
//! `adjustment_interval` successful mines the window compares the mean
//! search duration against the target block time and steps difficulty
//! by one, with a floor of 1.

use crate::config::ConsensusConfig;

/// Difficulty counter plus its retarget sample window.
#[derive(Clone, Debug)]
pub struct DifficultyWindow {
    difficulty: u32,
    target_block_time: f64,
    adjustment_interval: usize,
    samples: Vec<f64>,
}

impl DifficultyWindow {
    /// Window seeded from config. The interval is clamped to at least
    /// one sample.
    pub fn new(config: &ConsensusConfig) -> Self {
        Self {
            difficulty: config.initial_difficulty.max(1),
            target_block_time: config.target_block_time,
            adjustment_interval: config.adjustment_interval.max(1),
            samples: Vec::new(),
        }
    }

    /// Current difficulty.
    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Number of samples recorded since the last retarget.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Record one successful mine's wall-clock duration; retargets and
    /// resets the window once it is full.
    pub fn record(&mut self, duration_secs: f64) {
        self.samples.push(duration_secs);
        if self.samples.len() >= self.adjustment_interval {
            self.retarget();
        }
    }

    fn retarget(&mut self) {
        let mean = self.samples.iter().sum::<f64>() / self.samples.len() as f64;
        let previous = self.difficulty;
        if mean < self.target_block_time {
            self.difficulty += 1;
        } else if mean > self.target_block_time {
            self.difficulty = self.difficulty.saturating_sub(1).max(1);
        }
        self.samples.clear();
        tracing::info!(
            previous,
            difficulty = self.difficulty,
            mean_block_secs = mean,
            target_secs = self.target_block_time,
            "difficulty retarget"
        );
    }
}
