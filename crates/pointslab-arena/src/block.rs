//! Bump-allocated block arena for fixed-size records.
//!
//! A [`MemBlock`] owns a growable list of equally sized byte blocks and
//! carves one record slot at a time off the most recent block. Each block
//! is its own boxed allocation, so growing the block list moves only the
//! box handles and never the record bytes: a slot's memory stays put
//! until the arena is cleared or dropped.

use pointslab_core::PointLayout;
use tracing::{debug, trace};

use crate::config::BlockConfig;
use crate::error::ArenaError;
use crate::handle::SlotRef;

/// Initial reservation for the block list.
const INITIAL_BLOCK_SLOTS: usize = 8;

/// Block arena handing out stable record slots in bulk-allocated blocks.
///
/// Allocation cost is amortised to one heap allocation per
/// `points_per_block` records. Every issued [`SlotRef`] is recorded in
/// issue order and exposed via [`refs`](MemBlock::refs), which is what
/// [`BlockPointTable`](crate::BlockPointTable) indexes over.
pub struct MemBlock {
    layout: PointLayout,
    points_per_block: usize,
    bytes_per_block: usize,
    /// Owned blocks, each exactly `bytes_per_block` long.
    blocks: Vec<Box<[u8]>>,
    /// Bump pointer: byte offset of the next free slot in the last block.
    pos: usize,
    /// Every slot issued since the last clear, in issue order.
    refs: Vec<SlotRef>,
    /// Bumped on every clear so older handles can be recognised.
    generation: u32,
}

impl MemBlock {
    /// Create an empty arena. No block is allocated until the first
    /// [`next`](MemBlock::next).
    pub fn new(layout: PointLayout, config: BlockConfig) -> Result<Self, ArenaError> {
        let bytes_per_block = config.bytes_per_block(layout)?;
        Ok(Self {
            layout,
            points_per_block: config.points_per_block,
            bytes_per_block,
            blocks: Vec::with_capacity(INITIAL_BLOCK_SLOTS),
            pos: bytes_per_block,
            refs: Vec::with_capacity(config.points_per_block),
            generation: 0,
        })
    }

    /// Issue a fresh record slot, allocating a new block if the current
    /// one is full.
    pub fn next(&mut self) -> SlotRef {
        self.next_mut().0
    }

    /// Issue a fresh record slot and return its zeroed bytes for writing.
    pub fn next_mut(&mut self) -> (SlotRef, &mut [u8]) {
        if self.pos == self.bytes_per_block {
            self.blocks
                .push(vec![0u8; self.bytes_per_block].into_boxed_slice());
            self.pos = 0;
            trace!(
                block = self.blocks.len() - 1,
                bytes = self.bytes_per_block,
                "allocated arena block"
            );
        }

        let block = self.blocks.len() - 1;
        let slot = SlotRef::new(self.generation, block, self.pos);
        self.refs.push(slot);
        self.pos += self.layout.point_size();
        (slot, self.slot_mut(slot))
    }

    /// Copy `record` into a fresh slot.
    ///
    /// # Panics
    ///
    /// Panics if `record.len()` differs from the arena's point size.
    pub fn push(&mut self, record: &[u8]) -> SlotRef {
        let (slot, bytes) = self.next_mut();
        bytes.copy_from_slice(record);
        slot
    }

    /// Number of slots issued since construction or the last clear.
    pub fn size(&self) -> usize {
        self.refs.len()
    }

    /// Whether no slot has been issued since construction or the last clear.
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// All issued slots, in issue order.
    pub fn refs(&self) -> &[SlotRef] {
        &self.refs
    }

    /// Record bytes behind `slot`.
    ///
    /// Hot path: the slot's generation is not checked. A stale slot that
    /// still lands inside a live block reads whatever occupies it now.
    ///
    /// # Panics
    ///
    /// Panics if `slot` points past the arena's blocks.
    pub fn slot(&self, slot: SlotRef) -> &[u8] {
        &self.blocks[slot.block][slot.offset..slot.offset + self.layout.point_size()]
    }

    /// Mutable record bytes behind `slot`. Same contract as
    /// [`slot`](MemBlock::slot).
    pub fn slot_mut(&mut self, slot: SlotRef) -> &mut [u8] {
        let point_size = self.layout.point_size();
        &mut self.blocks[slot.block][slot.offset..slot.offset + point_size]
    }

    /// Checked variant of [`slot`](MemBlock::slot).
    pub fn try_slot(&self, slot: SlotRef) -> Result<&[u8], ArenaError> {
        self.validate(slot)?;
        Ok(self.slot(slot))
    }

    /// Checked variant of [`slot_mut`](MemBlock::slot_mut).
    pub fn try_slot_mut(&mut self, slot: SlotRef) -> Result<&mut [u8], ArenaError> {
        self.validate(slot)?;
        Ok(self.slot_mut(slot))
    }

    fn validate(&self, slot: SlotRef) -> Result<(), ArenaError> {
        if slot.generation != self.generation {
            return Err(ArenaError::StaleSlot {
                slot_generation: slot.generation,
                current_generation: self.generation,
            });
        }
        let point_size = self.layout.point_size();
        let in_block = slot
            .offset
            .checked_add(point_size)
            .is_some_and(|end| end <= self.bytes_per_block);
        let last = self.blocks.len().checked_sub(1);
        let issued = match last {
            Some(last) if slot.block < last => true,
            Some(last) if slot.block == last => slot.offset < self.pos,
            _ => false,
        };
        if !in_block || !issued || slot.offset % point_size != 0 {
            return Err(ArenaError::UnknownSlot { slot });
        }
        Ok(())
    }

    /// Release every block and slot, returning to the freshly constructed
    /// state. All previously issued slots become stale.
    pub fn clear(&mut self) {
        debug!(
            blocks = self.blocks.len(),
            points = self.refs.len(),
            generation = self.generation,
            "clearing block arena"
        );
        self.blocks.clear();
        self.pos = self.bytes_per_block;
        self.refs.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Record layout of every slot.
    pub fn layout(&self) -> PointLayout {
        self.layout
    }

    /// Bytes per record.
    pub fn point_size(&self) -> usize {
        self.layout.point_size()
    }

    /// Records carved from each block.
    pub fn points_per_block(&self) -> usize {
        self.points_per_block
    }

    /// Bytes in each block.
    pub fn bytes_per_block(&self) -> usize {
        self.bytes_per_block
    }

    /// Number of blocks currently owned.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Current generation; bumped by every clear.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Memory held by owned blocks in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.blocks.len() * self.bytes_per_block
    }
}

impl std::fmt::Debug for MemBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemBlock")
            .field("point_size", &self.layout.point_size())
            .field("points_per_block", &self.points_per_block)
            .field("blocks", &self.blocks.len())
            .field("size", &self.refs.len())
            .field("generation", &self.generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn arena(point_size: usize, points_per_block: usize) -> MemBlock {
        MemBlock::new(
            PointLayout::new(point_size).unwrap(),
            BlockConfig::new(points_per_block),
        )
        .unwrap()
    }

    #[test]
    fn new_arena_is_empty() {
        let arena = arena(8, 4);
        assert_eq!(arena.size(), 0);
        assert!(arena.is_empty());
        assert_eq!(arena.block_count(), 0);
        assert_eq!(arena.memory_bytes(), 0);
    }

    #[test]
    fn new_rejects_zero_points_per_block() {
        let result = MemBlock::new(PointLayout::new(8).unwrap(), BlockConfig::new(0));
        assert!(matches!(result, Err(ArenaError::InvalidConfig { .. })));
    }

    #[test]
    fn first_next_allocates_a_block() {
        let mut arena = arena(8, 4);
        let slot = arena.next();
        assert_eq!(arena.block_count(), 1);
        assert_eq!(slot.block(), 0);
        assert_eq!(slot.offset(), 0);
        assert_eq!(arena.bytes_per_block(), 32);
    }

    #[test]
    fn slots_are_carved_sequentially() {
        let mut arena = arena(8, 4);
        let offsets: Vec<usize> = (0..4).map(|_| arena.next().offset()).collect();
        assert_eq!(offsets, vec![0, 8, 16, 24]);
        assert_eq!(arena.block_count(), 1);
    }

    #[test]
    fn full_block_rolls_over() {
        let mut arena = arena(8, 4);
        for _ in 0..4 {
            arena.next();
        }
        let slot = arena.next();
        assert_eq!(slot.block(), 1);
        assert_eq!(slot.offset(), 0);
        assert_eq!(arena.block_count(), 2);
    }

    #[test]
    fn new_slots_are_zeroed() {
        let mut arena = arena(16, 2);
        let (_, bytes) = arena.next_mut();
        assert_eq!(bytes.len(), 16);
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn push_copies_record() {
        let mut arena = arena(4, 2);
        let slot = arena.push(&[1, 2, 3, 4]);
        assert_eq!(arena.slot(slot), &[1, 2, 3, 4]);
    }

    #[test]
    #[should_panic]
    fn push_rejects_wrong_length() {
        let mut arena = arena(4, 2);
        arena.push(&[1, 2, 3]);
    }

    #[test]
    fn refs_track_issue_order() {
        let mut arena = arena(8, 2);
        let issued: Vec<SlotRef> = (0..5).map(|_| arena.next()).collect();
        assert_eq!(arena.refs(), issued.as_slice());
        assert_eq!(arena.size(), 5);
    }

    #[test]
    fn slot_storage_survives_block_growth() {
        let mut arena = arena(8, 2);
        let first = arena.next();
        arena.slot_mut(first).copy_from_slice(&[9; 8]);
        let addr = arena.slot(first).as_ptr();

        // Force many block-list reallocations.
        for _ in 0..1000 {
            arena.next();
        }

        assert_eq!(arena.slot(first).as_ptr(), addr);
        assert_eq!(arena.slot(first), &[9; 8]);
    }

    #[test]
    fn writes_do_not_bleed_between_slots() {
        let mut arena = arena(4, 3);
        let slots: Vec<SlotRef> = (0..6).map(|_| arena.next()).collect();
        for (i, &slot) in slots.iter().enumerate() {
            arena.slot_mut(slot).fill(i as u8);
        }
        for (i, &slot) in slots.iter().enumerate() {
            assert!(arena.slot(slot).iter().all(|&b| b == i as u8));
        }
    }

    // ── clear ───────────────────────────────────────────────

    #[test]
    fn clear_resets_to_empty() {
        let mut arena = arena(8, 2);
        for _ in 0..5 {
            arena.next();
        }
        arena.clear();
        assert_eq!(arena.size(), 0);
        assert!(arena.refs().is_empty());
        assert_eq!(arena.block_count(), 0);
        assert_eq!(arena.memory_bytes(), 0);
    }

    #[test]
    fn clear_then_next_starts_a_fresh_block() {
        let mut arena = arena(8, 2);
        arena.next();
        arena.clear();
        let slot = arena.next();
        assert_eq!(slot.block(), 0);
        assert_eq!(slot.offset(), 0);
        assert_eq!(slot.generation(), 1);
        assert!(arena.slot(slot).iter().all(|&b| b == 0));
    }

    // ── checked access ──────────────────────────────────────

    #[test]
    fn try_slot_accepts_live_slot() {
        let mut arena = arena(8, 2);
        let slot = arena.push(&[7; 8]);
        assert_eq!(arena.try_slot(slot), Ok(&[7u8; 8][..]));
        assert!(arena.try_slot_mut(slot).is_ok());
    }

    #[test]
    fn try_slot_rejects_stale_slot() {
        let mut arena = arena(8, 2);
        let slot = arena.next();
        arena.clear();
        arena.next();
        assert_eq!(
            arena.try_slot(slot),
            Err(ArenaError::StaleSlot {
                slot_generation: 0,
                current_generation: 1,
            })
        );
    }

    #[test]
    fn try_slot_rejects_unissued_offset() {
        let mut arena = arena(8, 4);
        arena.next();
        let unissued = SlotRef::new(0, 0, 8);
        assert_eq!(
            arena.try_slot(unissued),
            Err(ArenaError::UnknownSlot { slot: unissued })
        );
    }

    #[test]
    fn try_slot_rejects_misaligned_offset() {
        let mut arena = arena(8, 4);
        arena.next();
        arena.next();
        let misaligned = SlotRef::new(0, 0, 3);
        assert!(matches!(
            arena.try_slot(misaligned),
            Err(ArenaError::UnknownSlot { .. })
        ));
    }

    #[test]
    fn try_slot_rejects_missing_block() {
        let arena = arena(8, 4);
        assert!(matches!(
            arena.try_slot(SlotRef::new(0, 0, 0)),
            Err(ArenaError::UnknownSlot { .. })
        ));
    }

    #[test]
    fn try_slot_rejects_slot_from_larger_arena() {
        let mut large = arena(8, 64);
        let mut foreign = large.next();
        for _ in 0..20 {
            foreign = large.next();
        }
        assert_eq!((foreign.block(), foreign.offset()), (0, 160));

        let mut small = arena(8, 2);
        for _ in 0..3 {
            small.next();
        }
        assert_eq!(
            small.try_slot(foreign),
            Err(ArenaError::UnknownSlot { slot: foreign })
        );
        assert_eq!(
            small.try_slot_mut(foreign),
            Err(ArenaError::UnknownSlot { slot: foreign })
        );
    }

    // ── Property tests ──────────────────────────────────────

    proptest! {
        #[test]
        fn next_issues_distinct_slots_and_rolls_blocks_exactly_when_full(
            point_size in 1usize..32,
            points_per_block in 1usize..16,
            calls in 0usize..200,
        ) {
            let mut arena = arena(point_size, points_per_block);
            let mut seen = HashSet::new();
            let mut addrs = HashSet::new();
            for i in 0..calls {
                let slot = arena.next();
                prop_assert_eq!(slot.block(), i / points_per_block);
                prop_assert_eq!(slot.offset(), (i % points_per_block) * point_size);
                prop_assert_eq!(arena.block_count(), i / points_per_block + 1);
                prop_assert!(seen.insert(slot));
                prop_assert!(addrs.insert(arena.slot(slot).as_ptr() as usize));
            }
            prop_assert_eq!(arena.size(), calls);
            prop_assert_eq!(arena.block_count(), calls.div_ceil(points_per_block));
        }
    }
}
