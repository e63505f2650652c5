//! Region ("arena") allocation for batch-scoped byte storage.
//!
//! An [`Arena`] hands out aligned byte reservations from a chain of
//! preallocated blocks and releases them all at once. It is meant for
//! per-request, per-frame or per-task data where individual frees are
//! unnecessary.
//!
//! # Architecture
//!
//! ```text
//! Arena (Mutex-guarded, Send + Sync)
//! ├── ArenaConfig (GrowthPolicy, alignment, default block size, stats flag)
//! ├── BlockChain → Block[] (boxed byte buffers, append-only)
//! │   └── GrowthPolicy::place (fit / append / exhausted)
//! └── Snapshot (block usage + counters, taken under the lock)
//! ```
//!
//! # Growth policies
//!
//! - **Fixed:** one block of exactly the configured capacity. Requests past
//!   the end fail with [`AllocError::Exhausted`].
//! - **Growable:** when the active block cannot fit a request, a new block
//!   of `max(default_block_size, request, previous × 2)` bytes is appended.
//!   Blocks are never resized in place.
//!
//! # Handles
//!
//! [`Arena::allocate`] returns an [`Allocation`] (block index, offset,
//! length) rather than a raw pointer. Bytes are reached through
//! [`Arena::with_bytes_mut`], [`Arena::write`] and friends, which take the
//! arena lock and reject handles from a destroyed generation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod arena;
pub mod block;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod handle;
pub mod policy;

// Public re-exports for the primary API surface.
pub use arena::Arena;
pub use config::{ArenaConfig, ConfigError, GrowthPolicy};
pub use diagnostics::{BlockUsage, Snapshot};
pub use error::{AccessError, AllocError, InitError};
pub use handle::Allocation;
