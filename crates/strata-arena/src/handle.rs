//! Allocation handles.
//!
//! An [`Allocation`] names a byte range inside one block of one arena. It
//! carries the arena's id and generation so a handle that outlives a
//! `destroy()` (or belongs to another arena) is rejected in O(1) instead of
//! aliasing whatever now occupies that memory.

use std::fmt;
use std::ops::Range;

/// A reservation returned by [`Arena::allocate`](crate::Arena::allocate).
///
/// Handles are plain `Copy` values: they grant access to the bytes through
/// the arena, never ownership of the block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Allocation {
    /// Id of the issuing arena.
    pub(crate) arena_id: u64,
    /// Arena generation when this allocation was made.
    pub(crate) generation: u64,
    /// Index of the block in the chain.
    pub(crate) block: usize,
    /// Byte offset from the block's buffer origin.
    pub(crate) offset: usize,
    /// Requested length in bytes.
    pub(crate) len: usize,
}

impl Allocation {
    pub(crate) fn new(
        arena_id: u64,
        generation: u64,
        block: usize,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            arena_id,
            generation,
            block,
            offset,
            len,
        }
    }

    /// Id of the arena that issued this handle.
    pub fn arena_id(&self) -> u64 {
        self.arena_id
    }

    /// The generation this handle belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Index of the block holding the bytes.
    pub fn block_index(&self) -> usize {
        self.block
    }

    /// Start offset relative to the block's buffer origin.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the allocation in bytes, as requested.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte range within the block.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }

    /// Whether the two allocations share at least one byte.
    ///
    /// Zero-length allocations overlap nothing.
    pub fn overlaps(&self, other: &Allocation) -> bool {
        self.arena_id == other.arena_id
            && self.generation == other.generation
            && self.block == other.block
            && !self.is_empty()
            && !other.is_empty()
            && self.offset < other.offset + other.len
            && other.offset < self.offset + self.len
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Allocation(arena={}, gen={}, block={}, off={}, len={})",
            self.arena_id, self.generation, self.block, self.offset, self.len
        )
    }
}
