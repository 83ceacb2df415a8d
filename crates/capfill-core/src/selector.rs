//! Randomized greedy selection under a byte budget.
//!
//! Exact knapsack optimization is intentionally not attempted: catalogs can
//! be large and the destination is usually slow removable media, so the
//! selector trades optimality for a single shuffled scan with bounded work.

use crate::types::{CandidateFile, Selection};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

/// Default number of consecutive misses tolerated before the scan aborts.
///
/// Once this many candidates in a row fail to fit the remaining budget, the
/// rest of the shuffled list is assumed unlikely to fit either.
pub const DEFAULT_MISS_LIMIT: u32 = 10;

/// Selection parameters
#[derive(Debug, Clone, Copy)]
pub struct SelectorConfig {
    /// Byte capacity the selection must not exceed
    pub capacity: u64,
    /// Consecutive-miss count after which the scan aborts
    pub miss_limit: u32,
}

impl SelectorConfig {
    /// Create a config with the default miss limit
    #[must_use]
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            miss_limit: DEFAULT_MISS_LIMIT,
        }
    }

    /// Override the consecutive-miss limit
    #[must_use]
    pub fn with_miss_limit(mut self, miss_limit: u32) -> Self {
        self.miss_limit = miss_limit;
        self
    }
}

/// Pick a random subset of `candidates` whose sizes sum to at most
/// `config.capacity`.
///
/// The candidate list is shuffled uniformly with the supplied RNG, then
/// scanned greedily: a candidate that fits the remaining budget is accepted,
/// one that does not increments a consecutive-miss counter that resets on
/// every accept. The scan aborts as soon as the counter exceeds
/// `config.miss_limit`.
///
/// Pure computation with no failure modes. A fixed RNG seed yields a fixed
/// permutation and therefore an identical selection.
pub fn select<R: Rng + ?Sized>(
    mut candidates: Vec<CandidateFile>,
    config: &SelectorConfig,
    rng: &mut R,
) -> Selection {
    candidates.shuffle(rng);

    let mut selection = Selection::default();
    let mut remaining = config.capacity;
    let mut misses = 0u32;

    for candidate in candidates {
        if candidate.size <= remaining {
            remaining -= candidate.size;
            selection.total_bytes += candidate.size;
            selection.files.push(candidate);
            misses = 0;
        } else {
            misses += 1;
            if misses > config.miss_limit {
                debug!(
                    misses,
                    limit = config.miss_limit,
                    "aborting selection scan after consecutive misses"
                );
                break;
            }
        }
    }

    debug!(
        files = selection.len(),
        total_bytes = selection.total_bytes,
        capacity = config.capacity,
        "selection complete"
    );

    selection
}
