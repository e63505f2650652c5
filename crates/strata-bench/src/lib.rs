//! Workload profiles for benchmarking and the demo harness.
//!
//! - [`WORKER_SIZES`]: the per-worker request sequences the demo replays.
//! - [`replay`]: run one sequence against an arena.
//! - [`per_frame_profile`]: config sized for many small per-frame allocations.
//! - [`DemoArgs`]: worker count, rounds and first block size for the demo.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use log::info;
use strata_arena::{AllocError, Allocation, Arena, ArenaConfig};

/// Request sizes issued by each demo worker, in order.
pub const WORKER_SIZES: [&[usize]; 2] = [&[10, 10, 10, 2], &[10, 10, 10, 8]];

/// Allocate every size in `sizes` from `arena`, stopping at the first error.
pub fn replay(arena: &Arena, sizes: &[usize]) -> Result<Vec<Allocation>, AllocError> {
    let allocs = sizes
        .iter()
        .map(|&n| arena.allocate(n))
        .collect::<Result<Vec<_>, _>>()?;
    info!("replayed {} allocations", allocs.len());
    Ok(allocs)
}

/// Growable arena with a 64 KiB first block.
pub fn per_frame_profile() -> ArenaConfig {
    ArenaConfig::growable(64 * 1024)
}

/// Command-line knobs for the `concurrent_workers` demo.
///
/// Positional: `[workers] [rounds] [initial_size]`. Missing or unparsable
/// values fall back to the defaults (2 workers, 1 round, 0 bytes).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoArgs {
    /// Number of worker threads. Worker `i` replays `WORKER_SIZES[i % 2]`.
    pub workers: usize,
    /// How many times each worker replays its sequence.
    pub rounds: usize,
    /// Requested size of the arena's first block.
    pub initial_size: usize,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            workers: 2,
            rounds: 1,
            initial_size: 0,
        }
    }
}

impl DemoArgs {
    /// Parse positional arguments (program name already stripped).
    pub fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let defaults = Self::default();
        let mut args = args.into_iter().map(|s| s.parse::<usize>().ok());
        let mut next = |default: usize| args.next().flatten().unwrap_or(default);
        Self {
            workers: next(defaults.workers).max(1),
            rounds: next(defaults.rounds),
            initial_size: next(defaults.initial_size),
        }
    }

    /// The request sequence worker `index` issues over all its rounds.
    pub fn sizes_for(&self, index: usize) -> Vec<usize> {
        WORKER_SIZES[index % WORKER_SIZES.len()].repeat(self.rounds)
    }

    /// Total allocations the demo will attempt.
    pub fn total_allocations(&self) -> usize {
        (0..self.workers).map(|i| self.sizes_for(i).len()).sum()
    }
}
