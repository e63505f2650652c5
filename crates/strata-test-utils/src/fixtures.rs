//! Canned arena configurations.
//!
//! - [`tiny_growable`]: 32-byte first block, so growth happens within a
//!   handful of allocations.
//! - [`tight_fixed`]: 32-byte unaligned fixed arena, the smallest useful
//!   exhaustion scenario.
//! - [`quiet`]: any config with counters turned off.

use strata_arena::ArenaConfig;

pub fn tiny_growable() -> ArenaConfig {
    ArenaConfig::growable(ArenaConfig::DEFAULT_BLOCK_SIZE)
}

pub fn tight_fixed() -> ArenaConfig {
    ArenaConfig::fixed(32)
}

pub fn quiet(config: ArenaConfig) -> ArenaConfig {
    config.with_stats(false)
}
