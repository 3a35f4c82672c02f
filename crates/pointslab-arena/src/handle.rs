//! Slot handles.
//!
//! A [`SlotRef`] is the stable address of one record inside a
//! [`MemBlock`](crate::MemBlock). It names a block and a byte offset
//! instead of carrying a raw pointer, and it is generation-scoped: the
//! arena bumps its generation on every `clear()`, so a handle that
//! outlived a clear can be detected in O(1).

use std::fmt;

/// Location of one record slot within a block arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotRef {
    /// Arena generation when this slot was issued.
    pub(crate) generation: u32,
    /// Index of the owning block.
    pub(crate) block: usize,
    /// Byte offset of the record within its block.
    pub(crate) offset: usize,
}

impl SlotRef {
    pub(crate) fn new(generation: u32, block: usize, offset: usize) -> Self {
        Self {
            generation,
            block,
            offset,
        }
    }

    /// The arena generation this slot belongs to.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Index of the block holding this slot.
    pub fn block(&self) -> usize {
        self.block
    }

    /// Byte offset of the slot within its block.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SlotRef(gen={}, block={}, off={})",
            self.generation, self.block, self.offset
        )
    }
}
