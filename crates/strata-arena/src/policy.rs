//! Growth decisions: where a reservation goes when it is requested.
//!
//! The planner is pure. It looks at the active block's cursor and capacity
//! and returns a [`Placement`]; the block chain carries it out. Keeping the
//! decision separate from the mutation is what lets a failed growth leave
//! the arena untouched.
//!
//! Blocks are never extended in place. A request that does not fit the
//! active block's tail always goes to a freshly appended block, so offsets
//! handed out earlier keep pointing at the same bytes.

use crate::config::GrowthPolicy;

/// Round `value` up to the next multiple of `alignment`.
///
/// `alignment` must be a power of two. Returns `None` on overflow.
pub fn align_up(value: usize, alignment: usize) -> Option<usize> {
    debug_assert!(alignment.is_power_of_two());
    let mask = alignment - 1;
    value.checked_add(mask).map(|v| v & !mask)
}

/// Size of the block appended after one of `prev_capacity` bytes to serve a
/// reservation of `reserve` bytes.
///
/// `max(default_block_size, reserve, prev_capacity × 2)`; the doubling
/// saturates instead of wrapping.
pub fn next_block_size(prev_capacity: usize, reserve: usize, default_block_size: usize) -> usize {
    prev_capacity
        .saturating_mul(2)
        .max(reserve)
        .max(default_block_size)
}

/// Outcome of planning a reservation against the active block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Placement {
    /// Fits in the active block starting at `offset`.
    Active {
        /// Aligned start offset within the active block.
        offset: usize,
    },
    /// A new block of `block_size` bytes must be appended first.
    Append {
        /// Capacity of the block to append.
        block_size: usize,
    },
    /// Fixed arena without room for the request.
    Exhausted {
        /// Bytes left in the active block.
        remaining: usize,
    },
}

impl GrowthPolicy {
    /// Decide where a reservation of `reserve` (already aligned) bytes goes.
    ///
    /// `used`/`capacity` describe the active block.
    pub(crate) fn place(
        &self,
        used: usize,
        capacity: usize,
        reserve: usize,
        alignment: usize,
        default_block_size: usize,
    ) -> Placement {
        let start = align_up(used, alignment).filter(|&s| s <= capacity);
        if let Some(offset) = start {
            if capacity - offset >= reserve {
                return Placement::Active { offset };
            }
        }
        match self {
            Self::Fixed { .. } => Placement::Exhausted {
                remaining: capacity - used.min(capacity),
            },
            Self::Growable { .. } => Placement::Append {
                block_size: next_block_size(capacity, reserve, default_block_size),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROW: GrowthPolicy = GrowthPolicy::Growable {
        initial_block_size: 32,
    };
    const FIXED: GrowthPolicy = GrowthPolicy::Fixed { capacity: 32 };

    #[test]
    fn align_up_rounds_to_boundary() {
        assert_eq!(align_up(0, 8), Some(0));
        assert_eq!(align_up(1, 8), Some(8));
        assert_eq!(align_up(8, 8), Some(8));
        assert_eq!(align_up(10, 8), Some(16));
        assert_eq!(align_up(13, 1), Some(13));
    }

    #[test]
    fn align_up_reports_overflow() {
        assert_eq!(align_up(usize::MAX, 8), None);
        assert_eq!(align_up(usize::MAX - 3, 8), None);
    }

    #[test]
    fn next_block_size_takes_the_largest_term() {
        assert_eq!(next_block_size(32, 16, 32), 64);
        assert_eq!(next_block_size(32, 200, 32), 200);
        assert_eq!(next_block_size(4, 8, 32), 32);
    }

    #[test]
    fn next_block_size_saturates() {
        assert_eq!(next_block_size(usize::MAX / 2 + 1, 8, 32), usize::MAX);
    }

    #[test]
    fn fits_in_active_block() {
        assert_eq!(GROW.place(16, 32, 16, 8, 32), Placement::Active { offset: 16 });
    }

    #[test]
    fn start_offset_is_realigned() {
        assert_eq!(GROW.place(3, 32, 8, 8, 32), Placement::Active { offset: 8 });
    }

    #[test]
    fn partial_tail_appends_instead_of_extending() {
        // 8 bytes free, 16 needed: a new block, never a resize.
        assert_eq!(
            GROW.place(24, 32, 16, 8, 32),
            Placement::Append { block_size: 64 }
        );
    }

    #[test]
    fn full_block_appends() {
        assert_eq!(
            GROW.place(32, 32, 8, 8, 32),
            Placement::Append { block_size: 64 }
        );
    }

    #[test]
    fn zero_length_never_grows() {
        assert_eq!(GROW.place(32, 32, 0, 8, 32), Placement::Active { offset: 32 });
    }

    #[test]
    fn fixed_reports_remaining() {
        assert_eq!(
            FIXED.place(20, 32, 20, 1, 32),
            Placement::Exhausted { remaining: 12 }
        );
        assert_eq!(FIXED.place(20, 32, 12, 1, 32), Placement::Active { offset: 20 });
    }

    #[test]
    fn misaligned_tail_past_capacity_is_not_a_fit() {
        // Capacity 20, aligned start would be 24.
        assert_eq!(
            FIXED.place(17, 20, 0, 8, 32),
            Placement::Exhausted { remaining: 3 }
        );
    }
}
