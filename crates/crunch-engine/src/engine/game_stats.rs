use serde::Serialize;

use crate::core::chain::{Chain, MIN_CHAIN_LENGTH};

/// Number of chain-length buckets: 3, 4 and 5-or-longer.
pub const CHAIN_LENGTH_BUCKETS: usize = 3;

/// Statistics gathered over a game session.
///
/// - **Score**: sum of the scores of every chain cleared
/// - **Completed swaps**: number of accepted swaps (moves used)
/// - **Chains cleared**: total chains, and a histogram by chain length
/// - **Longest cascade**: the most remove/refill rounds a single swap caused
///
/// # Example
///
/// ```
/// use crunch_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_swap(&[], 1);
///
/// assert_eq!(stats.score(), 0);
/// assert_eq!(stats.completed_swaps(), 1);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct GameStats {
    score: usize,
    completed_swaps: usize,
    total_chains: usize,
    chain_length_counter: [usize; CHAIN_LENGTH_BUCKETS],
    longest_cascade: usize,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_swaps: 0,
            total_chains: 0,
            chain_length_counter: [0; CHAIN_LENGTH_BUCKETS],
            longest_cascade: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn completed_swaps(&self) -> usize {
        self.completed_swaps
    }

    #[must_use]
    pub const fn total_chains(&self) -> usize {
        self.total_chains
    }

    /// Returns a histogram of cleared chains by length.
    ///
    /// - `[0]`: 3-piece chains
    /// - `[1]`: 4-piece chains
    /// - `[2]`: chains of 5 pieces or more
    #[must_use]
    pub const fn chain_length_counter(&self) -> &[usize; CHAIN_LENGTH_BUCKETS] {
        &self.chain_length_counter
    }

    #[must_use]
    pub const fn longest_cascade(&self) -> usize {
        self.longest_cascade
    }

    /// Records one accepted swap.
    ///
    /// # Arguments
    ///
    /// * `chains` - Every chain cleared by the swap, across all cascade rounds
    /// * `cascade_rounds` - Number of rounds that cleared at least one chain
    pub fn complete_swap(&mut self, chains: &[Chain], cascade_rounds: usize) {
        self.completed_swaps += 1;
        self.longest_cascade = self.longest_cascade.max(cascade_rounds);
        for chain in chains {
            self.score += chain.score();
            self.total_chains += 1;
            let bucket = (chain.len() - MIN_CHAIN_LENGTH).min(CHAIN_LENGTH_BUCKETS - 1);
            self.chain_length_counter[bucket] += 1;
        }
    }
}
