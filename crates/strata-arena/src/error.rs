//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use crate::config::ConfigError;

/// Errors returned by [`Arena::new`](crate::Arena::new) and
/// [`Arena::reinit`](crate::Arena::reinit).
///
/// No partial arena is ever returned alongside an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitError {
    /// The configuration failed validation.
    InvalidConfig(ConfigError),
    /// Storage for the first block could not be obtained.
    StorageUnavailable {
        /// Size of the first block in bytes.
        requested: usize,
    },
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(e) => write!(f, "invalid arena config: {e}"),
            Self::StorageUnavailable { requested } => {
                write!(f, "could not obtain {requested} bytes for the first block")
            }
        }
    }
}

impl Error for InitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidConfig(e) => Some(e),
            Self::StorageUnavailable { .. } => None,
        }
    }
}

impl From<ConfigError> for InitError {
    fn from(e: ConfigError) -> Self {
        Self::InvalidConfig(e)
    }
}

/// Errors returned by [`Arena::allocate`](crate::Arena::allocate).
///
/// On every variant the arena is left exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// Fixed arena with insufficient remaining capacity.
    Exhausted {
        /// Number of bytes requested (before alignment).
        requested: usize,
        /// Bytes left in the block at the time of the request.
        remaining: usize,
    },
    /// Growable arena could not obtain storage for a new block.
    GrowthFailed {
        /// Number of bytes requested (before alignment).
        requested: usize,
        /// Size of the block the arena tried to append, if it could be computed.
        block_size: Option<usize>,
    },
    /// The arena has been destroyed and not re-initialised.
    Destroyed,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "arena exhausted: requested {requested} bytes, {remaining} bytes remaining"
                )
            }
            Self::GrowthFailed {
                requested,
                block_size: Some(size),
            } => {
                write!(
                    f,
                    "arena growth failed: could not append a {size} byte block for a {requested} byte request"
                )
            }
            Self::GrowthFailed {
                requested,
                block_size: None,
            } => {
                write!(f, "arena growth failed: {requested} byte request overflows")
            }
            Self::Destroyed => write!(f, "arena has been destroyed"),
        }
    }
}

impl Error for AllocError {}

/// Errors returned when resolving an [`Allocation`](crate::Allocation) to bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessError {
    /// The arena has been destroyed and not re-initialised.
    Destroyed,
    /// The handle was issued before the arena was last destroyed.
    StaleHandle {
        /// The generation encoded in the handle.
        handle_generation: u64,
        /// The arena's current generation.
        current_generation: u64,
    },
    /// The handle was issued by a different arena.
    ForeignHandle,
    /// A write was larger than the reservation.
    LengthMismatch {
        /// Length of the reservation.
        expected: usize,
        /// Length of the supplied data.
        actual: usize,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Destroyed => write!(f, "arena has been destroyed"),
            Self::StaleHandle {
                handle_generation,
                current_generation,
            } => {
                write!(
                    f,
                    "stale handle: generation {handle_generation}, current {current_generation}"
                )
            }
            Self::ForeignHandle => write!(f, "handle belongs to a different arena"),
            Self::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "write of {actual} bytes does not fit a {expected} byte allocation"
                )
            }
        }
    }
}

impl Error for AccessError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_error_exposes_config_source() {
        let err = InitError::from(ConfigError::ZeroDefaultBlockSize);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("default block size"));
    }

    #[test]
    fn exhausted_message_names_both_sizes() {
        let msg = AllocError::Exhausted {
            requested: 20,
            remaining: 12,
        }
        .to_string();
        assert!(msg.contains("20"));
        assert!(msg.contains("12"));
    }
}
