//! Contiguous byte blocks and the append-only block chain.
//!
//! A [`Block`] is a boxed byte buffer with a bump cursor. A [`BlockChain`]
//! is the ordered list of blocks an arena owns; only its last block receives
//! new reservations. Block buffers are allocated once and never resized, so
//! an `(index, offset)` pair stays valid until the chain is cleared.

use std::collections::TryReserveError;
use std::ops::Range;

use log::{debug, trace, warn};

use crate::config::{ArenaConfig, GrowthPolicy};
use crate::error::AllocError;
use crate::policy::{align_up, Placement};

/// A single contiguous byte buffer with bump allocation.
///
/// The buffer is zero-filled at creation and its capacity is fixed for the
/// block's lifetime.
pub struct Block {
    /// Backing storage. Allocated to full capacity at creation.
    data: Box<[u8]>,
    /// Bump pointer: bytes consumed so far, including alignment padding.
    used: usize,
}

impl Block {
    /// Create a zero-filled block of `capacity` bytes.
    ///
    /// Uses a fallible reservation so an out-of-memory condition comes back
    /// as an error instead of aborting.
    pub fn try_new(capacity: usize) -> Result<Self, TryReserveError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)?;
        data.resize(capacity, 0u8);
        Ok(Self {
            data: data.into_boxed_slice(),
            used: 0,
        })
    }

    /// Bump-allocate `size` bytes starting at the next `alignment` boundary.
    ///
    /// Returns the start offset, or `None` if the block cannot fit it.
    pub fn alloc(&mut self, size: usize, alignment: usize) -> Option<usize> {
        let start = align_up(self.used, alignment)?;
        let end = start.checked_add(size)?;
        if end > self.data.len() {
            return None;
        }
        self.used = end;
        Some(start)
    }

    /// Shared view of the bytes in `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` reaches past the block's capacity.
    pub fn slice(&self, range: Range<usize>) -> &[u8] {
        &self.data[range]
    }

    /// Mutable view of the bytes in `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` reaches past the block's capacity.
    pub fn slice_mut(&mut self, range: Range<usize>) -> &mut [u8] {
        &mut self.data[range]
    }

    /// Bytes consumed so far.
    pub fn used(&self) -> usize {
        self.used
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Bytes left after the cursor (ignoring alignment padding).
    pub fn remaining(&self) -> usize {
        self.data.len() - self.used
    }
}

/// The append-only list of [`Block`]s behind an arena.
///
/// The last block is the active one. Earlier blocks are full (or were
/// abandoned with an unusable tail) and are only read through existing
/// handles.
pub struct BlockChain {
    blocks: Vec<Block>,
}

impl BlockChain {
    /// Create a chain holding one block of `first_block_size` bytes.
    pub fn try_new(first_block_size: usize) -> Result<Self, TryReserveError> {
        let first = Block::try_new(first_block_size)?;
        Ok(Self {
            blocks: vec![first],
        })
    }

    /// Reserve `len` bytes according to `config`.
    ///
    /// Returns `(block_index, offset)`. On error the chain is unchanged:
    /// every fallible step (alignment arithmetic, block storage, the chain's
    /// own slot) runs before the cursor moves or a block is linked in.
    pub fn alloc(
        &mut self,
        len: usize,
        config: &ArenaConfig,
    ) -> Result<(usize, usize), AllocError> {
        let alignment = config.effective_alignment();
        let policy = config.growth_policy;

        let Some(reserve) = align_up(len, alignment) else {
            return Err(overflow_error(policy, len, self.active()));
        };

        let active = self.active();
        let placement = policy.place(
            active.used(),
            active.capacity(),
            reserve,
            alignment,
            config.default_block_size,
        );

        match placement {
            Placement::Active { .. } => {
                let index = self.blocks.len() - 1;
                let offset = self.blocks[index]
                    .alloc(reserve, alignment)
                    .ok_or_else(|| overflow_error(policy, len, &self.blocks[index]))?;
                trace!("reserved {reserve} bytes at block {index} offset {offset}");
                Ok((index, offset))
            }
            Placement::Append { block_size } => {
                let grow_failed = |_: TryReserveError| {
                    warn!("could not append a {block_size} byte block for a {len} byte request");
                    AllocError::GrowthFailed {
                        requested: len,
                        block_size: Some(block_size),
                    }
                };
                self.blocks.try_reserve(1).map_err(grow_failed)?;
                let mut block = Block::try_new(block_size).map_err(grow_failed)?;
                let offset = block.alloc(reserve, alignment).ok_or(AllocError::GrowthFailed {
                    requested: len,
                    block_size: Some(block_size),
                })?;
                self.blocks.push(block);
                let index = self.blocks.len() - 1;
                debug!(
                    "appended block {index} ({block_size} bytes) for a {reserve} byte reservation"
                );
                Ok((index, offset))
            }
            Placement::Exhausted { remaining } => {
                warn!("fixed arena exhausted: requested {len} bytes, {remaining} remaining");
                Err(AllocError::Exhausted {
                    requested: len,
                    remaining,
                })
            }
        }
    }

    /// The block currently receiving reservations.
    pub fn active(&self) -> &Block {
        // The chain is created with one block and only ever grows.
        &self.blocks[self.blocks.len() - 1]
    }

    /// Block at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Mutable block at `index`, if any.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Block> {
        self.blocks.get_mut(index)
    }

    /// Iterate blocks in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// Number of blocks in the chain.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Total capacity across all blocks in bytes.
    pub fn total_capacity(&self) -> usize {
        self.blocks.iter().map(Block::capacity).sum()
    }

    /// Total bytes consumed across all blocks.
    pub fn total_used(&self) -> usize {
        self.blocks.iter().map(Block::used).sum()
    }
}

fn overflow_error(policy: GrowthPolicy, len: usize, active: &Block) -> AllocError {
    if policy.is_growable() {
        AllocError::GrowthFailed {
            requested: len,
            block_size: None,
        }
    } else {
        AllocError::Exhausted {
            requested: len,
            remaining: active.remaining(),
        }
    }
}
