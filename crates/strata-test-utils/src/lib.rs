//! Test utilities for strata development.
//!
//! Provides range checkers over [`Allocation`] handles and a concurrent
//! workload driver shared by the arena's integration tests and the
//! benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::ops::Range;
use std::sync::Arc;
use std::thread;

use strata_arena::policy::align_up;
use strata_arena::{AllocError, Allocation, Arena, Snapshot};

/// Bytes actually reserved for `alloc` under `alignment`: the requested
/// length rounded up to the boundary.
pub fn reserved_range(alloc: &Allocation, alignment: usize) -> Range<usize> {
    let reserved = align_up(alloc.len(), alignment).expect("test sizes never overflow");
    alloc.offset()..alloc.offset() + reserved
}

/// Panic if any two allocations share a reserved byte.
///
/// Sorts by `(block, offset)` and compares neighbours, so it stays cheap
/// for the tens of thousands of handles a concurrent run produces.
pub fn assert_disjoint(allocs: &[Allocation], alignment: usize) {
    let mut sorted: Vec<_> = allocs
        .iter()
        .filter(|a| !a.is_empty())
        .map(|a| (a.block_index(), reserved_range(a, alignment), *a))
        .collect();
    sorted.sort_by_key(|(block, range, _)| (*block, range.start));
    for pair in sorted.windows(2) {
        let (block_a, range_a, a) = &pair[0];
        let (block_b, range_b, b) = &pair[1];
        if block_a == block_b {
            assert!(
                range_a.end <= range_b.start,
                "overlapping allocations: {a} and {b}"
            );
        }
    }
}

/// Panic if any allocation reaches past its block's cursor or capacity.
pub fn assert_contained(allocs: &[Allocation], alignment: usize, snapshot: &Snapshot) {
    for a in allocs {
        let usage = snapshot
            .blocks
            .get(a.block_index())
            .unwrap_or_else(|| panic!("{a} points at a missing block"));
        let range = reserved_range(a, alignment);
        assert!(
            range.end <= usage.used,
            "{a} extends past the block cursor ({})",
            usage.used
        );
        assert!(usage.used <= usage.capacity, "block over capacity: {usage:?}");
    }
}

/// Spawn `threads` workers that each make `per_thread` allocations of
/// `size` bytes against one shared arena, writing a per-thread tag into
/// every reservation.
///
/// Returns every successful handle tagged with the worker index, plus the
/// errors seen. Handles are collected over a channel as they are produced.
pub fn run_concurrent_workload(
    arena: &Arc<Arena>,
    threads: usize,
    per_thread: usize,
    size: usize,
) -> (Vec<(usize, Allocation)>, Vec<AllocError>) {
    let (tx, rx) = crossbeam_channel::unbounded();
    thread::scope(|s| {
        for worker in 0..threads {
            let tx = tx.clone();
            let arena = Arc::clone(arena);
            s.spawn(move || {
                let tag = vec![worker as u8; size];
                for _ in 0..per_thread {
                    let result = arena.allocate(size);
                    if let Ok(a) = &result {
                        arena.write(*a, &tag).expect("fresh handle is live");
                    }
                    tx.send((worker, result)).expect("receiver outlives workers");
                }
            });
        }
    });
    drop(tx);

    let mut allocs = Vec::with_capacity(threads * per_thread);
    let mut errors = Vec::new();
    for (worker, result) in rx {
        match result {
            Ok(a) => allocs.push((worker, a)),
            Err(e) => errors.push(e),
        }
    }
    (allocs, errors)
}
