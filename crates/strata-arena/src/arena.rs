//! The thread-safe arena.
//!
//! [`Arena`] owns a [`BlockChain`] behind a single `Mutex`. Every operation
//! that reads or mutates the chain (`allocate`, `destroy`, `reinit`,
//! `snapshot`, and byte access through handles) takes that lock, so callers
//! on different threads are serialized and never see a half-finished
//! reservation. Allocation work per call is O(1) amortized, which keeps the
//! critical section short.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;

use crate::block::BlockChain;
use crate::config::ArenaConfig;
use crate::diagnostics::Snapshot;
use crate::error::{AccessError, AllocError, InitError};
use crate::handle::Allocation;

static NEXT_ARENA_ID: AtomicU64 = AtomicU64::new(1);

/// Everything guarded by the arena lock.
struct ArenaState {
    /// `None` once destroyed.
    chain: Option<BlockChain>,
    /// Bumped on every destroy; handles from older generations are stale.
    generation: u64,
    total_allocations: u64,
    total_blocks: u64,
}

/// A region allocator serving byte reservations from a chain of blocks.
///
/// Reservations are released only as a group, by [`destroy`](Arena::destroy)
/// or by dropping the arena. Share between threads with `Arc<Arena>`.
///
/// # Example
///
/// ```rust
/// use strata_arena::{Arena, ArenaConfig};
///
/// let arena = Arena::new(ArenaConfig::growable(64)).unwrap();
/// let a = arena.allocate(10).unwrap();
/// arena.write(a, b"hello").unwrap();
/// assert_eq!(&arena.read(a).unwrap()[..5], b"hello");
/// arena.destroy();
/// ```
pub struct Arena {
    id: u64,
    config: ArenaConfig,
    state: Mutex<ArenaState>,
}

// Compile-time assertion: Arena must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<Arena>();
};

impl Arena {
    /// Create an arena and its first block.
    ///
    /// The first block holds `max(initial_block_size, default_block_size)`
    /// bytes for a growable arena, or exactly `capacity` bytes for a fixed one.
    pub fn new(config: ArenaConfig) -> Result<Self, InitError> {
        config.validate()?;
        let chain = Self::first_chain(&config)?;
        let id = NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed);
        debug!(
            "arena {id} initialised with a {} byte block ({:?})",
            config.first_block_size(),
            config.growth_policy
        );
        let total_blocks = u64::from(config.track_stats);
        Ok(Self {
            id,
            config,
            state: Mutex::new(ArenaState {
                chain: Some(chain),
                generation: 0,
                total_allocations: 0,
                total_blocks,
            }),
        })
    }

    fn first_chain(config: &ArenaConfig) -> Result<BlockChain, InitError> {
        let requested = config.first_block_size();
        BlockChain::try_new(requested).map_err(|_| InitError::StorageUnavailable { requested })
    }

    // The state is only mutated after every fallible step has succeeded,
    // so a panic elsewhere while the lock was held cannot leave it torn.
    fn lock(&self) -> MutexGuard<'_, ArenaState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reserve `len` bytes.
    ///
    /// The reservation is rounded up to the effective alignment and starts
    /// on an aligned offset. Zero-length requests succeed and return an
    /// empty handle. On error the arena is unchanged.
    pub fn allocate(&self, len: usize) -> Result<Allocation, AllocError> {
        let mut state = self.lock();
        let state = &mut *state;
        let chain = state.chain.as_mut().ok_or(AllocError::Destroyed)?;

        let blocks_before = chain.block_count();
        let (block, offset) = chain.alloc(len, &self.config)?;
        if self.config.track_stats {
            state.total_allocations += 1;
            state.total_blocks += (chain.block_count() - blocks_before) as u64;
        }
        Ok(Allocation::new(
            self.id,
            state.generation,
            block,
            offset,
            len,
        ))
    }

    /// Release every block and invalidate all outstanding handles.
    ///
    /// Calling this on an already-destroyed arena does nothing. Further
    /// `allocate` calls fail with [`AllocError::Destroyed`] until
    /// [`reinit`](Arena::reinit).
    pub fn destroy(&self) {
        let mut state = self.lock();
        if let Some(chain) = state.chain.take() {
            debug!(
                "arena {} destroyed: released {} blocks ({} of {} bytes used)",
                self.id,
                chain.block_count(),
                chain.total_used(),
                chain.total_capacity()
            );
            drop(chain);
            state.generation = state.generation.wrapping_add(1);
            state.total_allocations = 0;
            state.total_blocks = 0;
        }
    }

    /// Re-create the first block with the original configuration.
    ///
    /// A live arena is destroyed first. Handles issued before this call stay
    /// stale. If the first block cannot be obtained the arena is left as it
    /// was.
    pub fn reinit(&self) -> Result<(), InitError> {
        let mut state = self.lock();
        let chain = Self::first_chain(&self.config)?;
        if state.chain.is_some() {
            state.generation = state.generation.wrapping_add(1);
        }
        state.chain = Some(chain);
        state.total_allocations = 0;
        state.total_blocks = u64::from(self.config.track_stats);
        debug!(
            "arena {} re-initialised at generation {}",
            self.id, state.generation
        );
        Ok(())
    }

    /// Report block usage and counters.
    pub fn snapshot(&self) -> Snapshot {
        let state = self.lock();
        Snapshot::capture(
            state.chain.as_ref(),
            state.total_allocations,
            state.total_blocks,
            self.config.track_stats,
            state.generation,
        )
    }

    /// Run `f` over the bytes of `handle`.
    ///
    /// # Deadlocks
    ///
    /// `f` runs while the arena lock is held. It must not call back into
    /// the same arena (`allocate`, `read`, `write`, `snapshot`, `destroy`,
    /// ...): the lock is not reentrant and the thread would block forever.
    /// Return what you need from `f` and make further calls after it
    /// returns.
    pub fn with_bytes<R>(
        &self,
        handle: Allocation,
        f: impl FnOnce(&[u8]) -> R,
    ) -> Result<R, AccessError> {
        let state = self.lock();
        let chain = self.resolve(&state, handle)?;
        let block = chain.get(handle.block).ok_or(AccessError::ForeignHandle)?;
        Ok(f(block.slice(handle.range())))
    }

    /// Run `f` over the bytes of `handle`, mutably.
    ///
    /// # Deadlocks
    ///
    /// Same rule as [`with_bytes`](Arena::with_bytes): `f` holds the arena
    /// lock and must not call back into the same arena.
    pub fn with_bytes_mut<R>(
        &self,
        handle: Allocation,
        f: impl FnOnce(&mut [u8]) -> R,
    ) -> Result<R, AccessError> {
        let mut state = self.lock();
        self.resolve(&state, handle)?;
        let chain = state.chain.as_mut().ok_or(AccessError::Destroyed)?;
        let block = chain
            .get_mut(handle.block)
            .ok_or(AccessError::ForeignHandle)?;
        Ok(f(block.slice_mut(handle.range())))
    }

    /// Copy `bytes` into the start of `handle`'s range.
    pub fn write(&self, handle: Allocation, bytes: &[u8]) -> Result<(), AccessError> {
        if bytes.len() > handle.len {
            return Err(AccessError::LengthMismatch {
                expected: handle.len,
                actual: bytes.len(),
            });
        }
        self.with_bytes_mut(handle, |dst| dst[..bytes.len()].copy_from_slice(bytes))
    }

    /// Copy `handle`'s range out of the arena.
    pub fn read(&self, handle: Allocation) -> Result<Vec<u8>, AccessError> {
        self.with_bytes(handle, <[u8]>::to_vec)
    }

    fn resolve<'s>(
        &self,
        state: &'s ArenaState,
        handle: Allocation,
    ) -> Result<&'s BlockChain, AccessError> {
        if handle.arena_id != self.id {
            return Err(AccessError::ForeignHandle);
        }
        let chain = state.chain.as_ref().ok_or(AccessError::Destroyed)?;
        if handle.generation != state.generation {
            return Err(AccessError::StaleHandle {
                handle_generation: handle.generation,
                current_generation: state.generation,
            });
        }
        Ok(chain)
    }

    /// Whether the arena is currently destroyed.
    pub fn is_destroyed(&self) -> bool {
        self.lock().chain.is_none()
    }

    /// Process-unique id of this arena.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The configuration this arena was built with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("id", &self.id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
