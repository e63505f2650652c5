//! Strata: region allocation for short-lived, batch-scoped data.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the strata sub-crates. For most users, adding `strata` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//!
//! use strata::prelude::*;
//!
//! let arena = Arc::new(Arena::new(ArenaConfig::growable(64)).unwrap());
//!
//! let workers: Vec<_> = (0..2)
//!     .map(|_| {
//!         let arena = Arc::clone(&arena);
//!         thread::spawn(move || {
//!             let a = arena.allocate(10).unwrap();
//!             arena.write(a, b"0123456789").unwrap();
//!             a
//!         })
//!     })
//!     .collect();
//! let handles: Vec<Allocation> = workers.into_iter().map(|w| w.join().unwrap()).collect();
//!
//! assert!(!handles[0].overlaps(&handles[1]));
//! assert_eq!(arena.snapshot().total_allocations, 2);
//! arena.destroy();
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `strata-arena` | `Arena`, configuration, handles, snapshots, errors |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Arena, block chain, growth policy and diagnostics (`strata-arena`).
pub use strata_arena as arena;

/// Common imports for typical strata usage.
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    pub use strata_arena::{
        AccessError, AllocError, Allocation, Arena, ArenaConfig, GrowthPolicy, InitError,
        Snapshot,
    };
}
