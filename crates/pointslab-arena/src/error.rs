//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use crate::handle::SlotRef;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// Arena configuration rejected at construction.
    InvalidConfig {
        /// Why the configuration was rejected.
        reason: String,
    },
    /// A [`SlotRef`] issued before the arena was last cleared.
    StaleSlot {
        /// The generation encoded in the handle.
        slot_generation: u32,
        /// The arena's current generation.
        current_generation: u32,
    },
    /// A [`SlotRef`] that does not resolve to a slot this arena issued.
    UnknownSlot {
        /// The unresolvable handle.
        slot: SlotRef,
    },
    /// Two arenas combined into one table disagree on record size.
    LayoutMismatch {
        /// Point size of the first arena.
        first: usize,
        /// Point size of the second arena.
        second: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => write!(f, "invalid arena config: {reason}"),
            Self::StaleSlot {
                slot_generation,
                current_generation,
            } => {
                write!(
                    f,
                    "stale slot: generation {slot_generation}, arena generation {current_generation}"
                )
            }
            Self::UnknownSlot { slot } => write!(f, "unknown slot: {slot}"),
            Self::LayoutMismatch { first, second } => {
                write!(
                    f,
                    "arena point sizes differ: {first} bytes vs {second} bytes"
                )
            }
        }
    }
}

impl Error for ArenaError {}
