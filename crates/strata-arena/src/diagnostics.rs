//! Point-in-time reports of arena usage.
//!
//! A [`Snapshot`] is taken under the arena lock, so it never shows a block
//! half-appended or a cursor advanced without its counter.

use std::fmt;

use smallvec::SmallVec;

use crate::block::BlockChain;

/// Usage of one block at snapshot time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockUsage {
    /// Bytes consumed, including alignment padding.
    pub used: usize,
    /// Block capacity in bytes.
    pub capacity: usize,
}

impl BlockUsage {
    /// Bytes still free after the cursor.
    pub fn free(&self) -> usize {
        self.capacity - self.used
    }
}

/// Read-only report of an arena's block chain and counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Per-block usage in chain order.
    pub blocks: SmallVec<[BlockUsage; 8]>,
    /// Successful allocations since init. Zero when stats are disabled.
    pub total_allocations: u64,
    /// Blocks created since init. Zero when stats are disabled.
    pub total_blocks: u64,
    /// Whether the counters above are being maintained.
    pub stats_enabled: bool,
    /// Whether the arena is currently destroyed.
    pub destroyed: bool,
    /// The arena's current generation.
    pub generation: u64,
}

impl Snapshot {
    pub(crate) fn capture(
        chain: Option<&BlockChain>,
        total_allocations: u64,
        total_blocks: u64,
        stats_enabled: bool,
        generation: u64,
    ) -> Self {
        let blocks = chain
            .map(|c| {
                c.iter()
                    .map(|b| BlockUsage {
                        used: b.used(),
                        capacity: b.capacity(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            blocks,
            total_allocations,
            total_blocks,
            stats_enabled,
            destroyed: chain.is_none(),
            generation,
        }
    }

    /// Number of blocks in the chain.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Bytes consumed across all blocks.
    pub fn total_used(&self) -> usize {
        self.blocks.iter().map(|b| b.used).sum()
    }

    /// Capacity across all blocks.
    pub fn total_capacity(&self) -> usize {
        self.blocks.iter().map(|b| b.capacity).sum()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.destroyed {
            return writeln!(f, "arena destroyed (generation {})", self.generation);
        }
        if self.stats_enabled {
            writeln!(f, "total blocks: {}", self.total_blocks)?;
            writeln!(f, "total allocated: {}", self.total_allocations)?;
        }
        for (i, b) in self.blocks.iter().enumerate() {
            writeln!(
                f,
                "block[{i}] used={} / size={} / free={}",
                b.used,
                b.capacity,
                b.free()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;

    #[test]
    fn capture_reports_every_block() {
        let config = ArenaConfig::growable(32);
        let mut chain = BlockChain::try_new(32).unwrap();
        chain.alloc(32, &config).unwrap();
        chain.alloc(8, &config).unwrap();

        let snap = Snapshot::capture(Some(&chain), 2, 2, true, 0);
        assert_eq!(snap.block_count(), 2);
        assert_eq!(
            snap.blocks[0],
            BlockUsage {
                used: 32,
                capacity: 32
            }
        );
        assert_eq!(snap.blocks[1].free(), 56);
        assert_eq!(snap.total_used(), 40);
        assert_eq!(snap.total_capacity(), 96);
        assert!(!snap.destroyed);
    }

    #[test]
    fn destroyed_snapshot_is_empty() {
        let snap = Snapshot::capture(None, 0, 0, true, 3);
        assert!(snap.destroyed);
        assert_eq!(snap.block_count(), 0);
        assert_eq!(snap.to_string(), "arena destroyed (generation 3)\n");
    }

    #[test]
    fn display_lists_blocks() {
        let config = ArenaConfig::growable(32);
        let mut chain = BlockChain::try_new(32).unwrap();
        chain.alloc(10, &config).unwrap();

        let text = Snapshot::capture(Some(&chain), 1, 1, true, 0).to_string();
        assert_eq!(
            text,
            "total blocks: 1\ntotal allocated: 1\nblock[0] used=16 / size=32 / free=16\n"
        );
    }

    #[test]
    fn display_omits_disabled_counters() {
        let chain = BlockChain::try_new(32).unwrap();
        let text = Snapshot::capture(Some(&chain), 0, 0, false, 0).to_string();
        assert_eq!(text, "block[0] used=0 / size=32 / free=32\n");
    }
}
