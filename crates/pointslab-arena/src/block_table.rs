//! Write adapter presenting two block arenas as one record table.
//!
//! [`BlockPointTable`] owns no record memory. At construction it copies
//! the slot lists of two [`MemBlock`]s, first arena then second, into one
//! flat index, and from then on resolves `PointId(i)` to the i-th slot.
//! This lets one write pass span two independently filled arenas (for
//! example the current and previous generation of buffered records)
//! without copying any record bytes.

use pointslab_core::{PointId, PointLayout, PointTable};

use crate::block::MemBlock;
use crate::error::ArenaError;
use crate::handle::SlotRef;

/// Which of the two source arenas a slot lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Source {
    First,
    Second,
}

/// Index-addressable write target over the slots of two arenas.
///
/// The table mutably borrows both arenas for its whole lifetime, so it
/// can neither outlive them nor observe a `clear()` of either.
pub struct BlockPointTable<'a> {
    first: &'a mut MemBlock,
    second: &'a mut MemBlock,
    /// Concatenated slot index: `first.refs()` followed by `second.refs()`.
    refs: Vec<(Source, SlotRef)>,
    /// Next index handed out by `add_point`.
    index: usize,
}

impl<'a> BlockPointTable<'a> {
    /// Build the combined index over `first` then `second`.
    ///
    /// Fails with [`ArenaError::LayoutMismatch`] if the arenas hold
    /// records of different sizes.
    pub fn new(first: &'a mut MemBlock, second: &'a mut MemBlock) -> Result<Self, ArenaError> {
        if first.point_size() != second.point_size() {
            return Err(ArenaError::LayoutMismatch {
                first: first.point_size(),
                second: second.point_size(),
            });
        }

        let mut refs = Vec::with_capacity(first.size() + second.size());
        refs.extend(first.refs().iter().map(|&slot| (Source::First, slot)));
        refs.extend(second.refs().iter().map(|&slot| (Source::Second, slot)));

        Ok(Self {
            first,
            second,
            refs,
            index: 0,
        })
    }

    /// Total slots across both arenas.
    pub fn size(&self) -> usize {
        self.refs.len()
    }

    /// Whether both arenas were empty at construction.
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Number of indices claimed through `add_point` so far.
    pub fn written(&self) -> usize {
        self.index
    }

    /// The arena slot behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not below [`size`](BlockPointTable::size).
    pub fn slot(&self, id: PointId) -> SlotRef {
        self.refs[id.index()].1
    }

    fn arena(&self, source: Source) -> &MemBlock {
        match source {
            Source::First => &*self.first,
            Source::Second => &*self.second,
        }
    }

    fn arena_mut(&mut self, source: Source) -> &mut MemBlock {
        match source {
            Source::First => &mut *self.first,
            Source::Second => &mut *self.second,
        }
    }
}

impl PointTable for BlockPointTable<'_> {
    fn layout(&self) -> PointLayout {
        self.first.layout()
    }

    /// Claim the next index. No capacity check: claiming more than
    /// [`size`](BlockPointTable::size) indices makes the following
    /// `point_mut` panic.
    fn add_point(&mut self) -> PointId {
        let id = PointId(self.index);
        self.index += 1;
        id
    }

    fn point(&self, id: PointId) -> &[u8] {
        let (source, slot) = self.refs[id.index()];
        self.arena(source).slot(slot)
    }

    fn point_mut(&mut self, id: PointId) -> &mut [u8] {
        let (source, slot) = self.refs[id.index()];
        self.arena_mut(source).slot_mut(slot)
    }

    fn supports_view(&self) -> bool {
        true
    }
}
