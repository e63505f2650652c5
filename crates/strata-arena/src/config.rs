//! Arena configuration parameters.

use std::error::Error;
use std::fmt;

/// How an arena acquires capacity once its active block is full.
///
/// Fixed at construction; an arena never switches policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthPolicy {
    /// A single block of exactly `capacity` bytes. Never grows; requests
    /// past the end fail with [`AllocError::Exhausted`](crate::AllocError::Exhausted).
    Fixed {
        /// Size of the only block, in bytes.
        capacity: usize,
    },
    /// A chain of blocks. When the active block cannot fit a request a new
    /// block of `max(default_block_size, request, previous × 2)` bytes is
    /// appended.
    Growable {
        /// Requested size of the first block. Raised to
        /// [`ArenaConfig::default_block_size`] if smaller.
        initial_block_size: usize,
    },
}

impl GrowthPolicy {
    /// Whether this policy may append blocks.
    pub fn is_growable(&self) -> bool {
        matches!(self, Self::Growable { .. })
    }
}

/// Configuration for an [`Arena`](crate::Arena).
///
/// Validated at construction; all values are immutable after creation.
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    /// Growth behaviour once the active block is full.
    pub growth_policy: GrowthPolicy,

    /// Alignment boundary in bytes for reservation sizes and start offsets.
    ///
    /// Default: 8. Must be a non-zero power of two.
    pub alignment: usize,

    /// Minimum size of any block created by a growable arena.
    ///
    /// Default: 32 bytes.
    pub default_block_size: usize,

    /// Whether a [`GrowthPolicy::Fixed`] arena rounds requests up to
    /// `alignment`. Growable arenas always align and ignore this flag.
    ///
    /// Default: `false` for [`ArenaConfig::fixed`].
    pub align_fixed: bool,

    /// Maintain `total_allocations` / `total_blocks` counters, reported
    /// through [`Arena::snapshot`](crate::Arena::snapshot).
    pub track_stats: bool,
}

impl ArenaConfig {
    /// Default alignment boundary in bytes.
    pub const DEFAULT_ALIGNMENT: usize = 8;

    /// Default minimum block size in bytes.
    pub const DEFAULT_BLOCK_SIZE: usize = 32;

    /// A growable arena whose first block holds at least `initial_block_size` bytes.
    pub fn growable(initial_block_size: usize) -> Self {
        Self {
            growth_policy: GrowthPolicy::Growable { initial_block_size },
            alignment: Self::DEFAULT_ALIGNMENT,
            default_block_size: Self::DEFAULT_BLOCK_SIZE,
            align_fixed: false,
            track_stats: true,
        }
    }

    /// A single-block arena of exactly `capacity` bytes.
    ///
    /// Requests are not rounded up unless [`with_align_fixed`](Self::with_align_fixed)
    /// is set.
    pub fn fixed(capacity: usize) -> Self {
        Self {
            growth_policy: GrowthPolicy::Fixed { capacity },
            alignment: Self::DEFAULT_ALIGNMENT,
            default_block_size: Self::DEFAULT_BLOCK_SIZE,
            align_fixed: false,
            track_stats: true,
        }
    }

    /// Set the alignment boundary.
    pub fn with_alignment(mut self, alignment: usize) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the minimum block size for growable arenas.
    pub fn with_default_block_size(mut self, size: usize) -> Self {
        self.default_block_size = size;
        self
    }

    /// Enable or disable alignment for fixed arenas.
    pub fn with_align_fixed(mut self, align: bool) -> Self {
        self.align_fixed = align;
        self
    }

    /// Enable or disable the allocation/block counters.
    pub fn with_stats(mut self, track: bool) -> Self {
        self.track_stats = track;
        self
    }

    /// Alignment actually applied to requests under this config.
    ///
    /// Growable arenas always align; fixed arenas align only when
    /// `align_fixed` is set, otherwise the boundary is 1.
    pub fn effective_alignment(&self) -> usize {
        match self.growth_policy {
            GrowthPolicy::Growable { .. } => self.alignment,
            GrowthPolicy::Fixed { .. } if self.align_fixed => self.alignment,
            GrowthPolicy::Fixed { .. } => 1,
        }
    }

    /// Size of the first block created by `Arena::new`.
    pub fn first_block_size(&self) -> usize {
        match self.growth_policy {
            GrowthPolicy::Fixed { capacity } => capacity,
            GrowthPolicy::Growable { initial_block_size } => {
                initial_block_size.max(self.default_block_size)
            }
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.alignment.is_power_of_two() {
            return Err(ConfigError::AlignmentNotPowerOfTwo {
                alignment: self.alignment,
            });
        }
        if self.default_block_size == 0 {
            return Err(ConfigError::ZeroDefaultBlockSize);
        }
        if let GrowthPolicy::Fixed { capacity: 0 } = self.growth_policy {
            return Err(ConfigError::ZeroFixedCapacity);
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::growable(0)
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`ArenaConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Alignment is zero or not a power of two.
    AlignmentNotPowerOfTwo {
        /// The configured alignment.
        alignment: usize,
    },
    /// `default_block_size` is zero.
    ZeroDefaultBlockSize,
    /// A fixed arena was configured with zero capacity.
    ZeroFixedCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlignmentNotPowerOfTwo { alignment } => {
                write!(f, "alignment must be a non-zero power of two, got {alignment}")
            }
            Self::ZeroDefaultBlockSize => write!(f, "default block size must be non-zero"),
            Self::ZeroFixedCapacity => write!(f, "fixed arena capacity must be non-zero"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growable_defaults() {
        let config = ArenaConfig::growable(0);
        assert_eq!(config.alignment, 8);
        assert_eq!(config.default_block_size, 32);
        assert_eq!(config.first_block_size(), 32);
        assert!(config.growth_policy.is_growable());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn growable_keeps_large_initial_size() {
        assert_eq!(ArenaConfig::growable(4096).first_block_size(), 4096);
    }

    #[test]
    fn fixed_first_block_is_exact() {
        assert_eq!(ArenaConfig::fixed(20).first_block_size(), 20);
    }

    #[test]
    fn fixed_is_unaligned_by_default() {
        let config = ArenaConfig::fixed(32);
        assert_eq!(config.effective_alignment(), 1);
        assert_eq!(config.with_align_fixed(true).effective_alignment(), 8);
    }

    #[test]
    fn growable_ignores_align_fixed_flag() {
        let config = ArenaConfig::growable(0).with_align_fixed(false);
        assert_eq!(config.effective_alignment(), 8);
    }

    #[test]
    fn rejects_bad_alignment() {
        for alignment in [0, 3, 12] {
            let err = ArenaConfig::growable(0)
                .with_alignment(alignment)
                .validate()
                .unwrap_err();
            assert_eq!(err, ConfigError::AlignmentNotPowerOfTwo { alignment });
        }
    }

    #[test]
    fn rejects_zero_block_size() {
        let err = ArenaConfig::growable(64)
            .with_default_block_size(0)
            .validate()
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroDefaultBlockSize);
    }

    #[test]
    fn rejects_zero_fixed_capacity() {
        assert_eq!(
            ArenaConfig::fixed(0).validate(),
            Err(ConfigError::ZeroFixedCapacity)
        );
    }
}
