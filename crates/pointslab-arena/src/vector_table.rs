//! Read/write streaming table over one owned record buffer.
//!
//! [`VectorPointTable`] owns a contiguous byte buffer split into
//! fixed-size record slots. A streaming reader fills it by index (or
//! swaps in a whole buffer), marks filtered records in the skip mask,
//! publishes the number of records it wrote, and calls `reset()` to hand
//! the batch to the registered process callback. The same buffer is then
//! refilled for the next batch without reallocating.
//!
//! # Logical size vs capacity
//!
//! `capacity()` counts every slot in the buffer. `size()` counts the
//! slots considered live. Bounded accessors and iteration use `size()`;
//! the reader may shrink or grow it through
//! [`set_num_points`](StreamPointTable::set_num_points) without touching
//! the buffer.

use std::fmt;
use std::ops::Range;

use pointslab_core::{PointId, PointLayout, PointTable, StreamPointTable, TableError};
use tracing::debug;

use crate::iter::{Iter, IterMut};
use crate::point_ref::{Point, PointRef};

/// Batch-complete callback registered with [`VectorPointTable::set_process`].
///
/// Receives the table so it can consume the batch it was invoked for.
pub type Process = Box<dyn FnMut(&mut VectorPointTable)>;

/// Streaming record table owning one resizeable buffer.
pub struct VectorPointTable {
    layout: PointLayout,
    /// Backing storage. Length is always a multiple of the point size.
    data: Vec<u8>,
    /// Logical record count. Never exceeds `capacity()`.
    size: usize,
    /// One flag per logical record; `skips.len() == size` always.
    skips: Vec<bool>,
    /// Next index handed out by `add_point`/`append`.
    index: usize,
    /// `None` means the no-op default.
    process: Option<Process>,
}

/// Byte length for `points` records. Overflow is treated like an
/// allocation failure: the resulting request can never be satisfied.
fn byte_len(layout: PointLayout, points: usize) -> usize {
    layout.bytes_for(points).unwrap_or(usize::MAX)
}

/// Byte range of record `id`. An overflowing offset saturates so that
/// slicing with it panics instead of wrapping onto another record.
fn record_range(layout: PointLayout, id: PointId) -> Range<usize> {
    let start = byte_len(layout, id.index());
    start..start.saturating_add(layout.point_size())
}

impl VectorPointTable {
    /// Records allocated by [`VectorPointTable::new`].
    pub const DEFAULT_CAPACITY: usize = 4096;

    /// Create a zero-filled table of [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY) records.
    pub fn new(layout: PointLayout) -> Self {
        Self::with_points(layout, Self::DEFAULT_CAPACITY)
    }

    /// Create a zero-filled table of `points` records, none skipped.
    ///
    /// Both `capacity()` and the logical `size()` start at `points`.
    pub fn with_points(layout: PointLayout, points: usize) -> Self {
        Self {
            layout,
            data: vec![0u8; byte_len(layout, points)],
            size: points,
            skips: vec![false; points],
            index: 0,
            process: None,
        }
    }

    /// Adopt `data` as the backing buffer.
    ///
    /// Fails with [`TableError::InvalidBufferLength`] if `data` is not a
    /// whole number of records.
    pub fn from_buffer(layout: PointLayout, data: Vec<u8>) -> Result<Self, TableError> {
        Self::check_length(layout, &data)?;
        let size = layout.points_in(data.len());
        Ok(Self {
            layout,
            data,
            size,
            skips: vec![false; size],
            index: 0,
            process: None,
        })
    }

    fn check_length(layout: PointLayout, data: &[u8]) -> Result<(), TableError> {
        if !layout.divides(data.len()) {
            return Err(TableError::InvalidBufferLength {
                len: data.len(),
                point_size: layout.point_size(),
            });
        }
        Ok(())
    }

    /// Grow or shrink the buffer to exactly `points` records.
    ///
    /// New bytes are zeroed and new skip flags start unskipped. Shrinking
    /// keeps the leading records and their flags untouched.
    pub fn resize(&mut self, points: usize) {
        debug!(from = self.size, to = points, "resizing point table");
        self.data.resize(byte_len(self.layout, points), 0);
        self.size = points;
        self.skips.resize(points, false);
    }

    /// Replace the backing buffer wholesale.
    ///
    /// The logical size becomes the new buffer's record count. Skip flags
    /// below the new size are kept; the mask is extended with unskipped
    /// entries or truncated to match. Fails with
    /// [`TableError::InvalidBufferLength`], leaving the table unchanged,
    /// if `data` is not a whole number of records.
    pub fn assign(&mut self, data: Vec<u8>) -> Result<(), TableError> {
        Self::check_length(self.layout, &data)?;
        debug!(bytes = data.len(), "assigning point table buffer");
        self.size = self.layout.points_in(data.len());
        self.data = data;
        self.skips.resize(self.size, false);
        Ok(())
    }

    /// Take ownership of the backing buffer.
    ///
    /// The table is left with an empty buffer, zero logical size and an
    /// empty skip mask, so bounded access fails until a buffer is
    /// assigned or the table is resized. The append cursor is rewound.
    pub fn acquire(&mut self) -> Vec<u8> {
        debug!(bytes = self.data.len(), "acquiring point table buffer");
        self.size = 0;
        self.skips.clear();
        self.index = 0;
        std::mem::take(&mut self.data)
    }

    /// Logical record count.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the logical size is zero.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Bytes per record.
    pub fn point_size(&self) -> usize {
        self.layout.point_size()
    }

    fn check_index(&self, id: PointId) -> Result<(), TableError> {
        if id.index() >= self.size {
            return Err(TableError::OutOfRange {
                index: id.index(),
                size: self.size,
            });
        }
        Ok(())
    }

    /// Bounded mutable handle onto the record at `id`.
    pub fn at(&mut self, id: PointId) -> Result<PointRef<'_>, TableError> {
        self.check_index(id)?;
        Ok(PointRef::new(id, self.point_mut(id)))
    }

    /// Bounded read-only handle onto the record at `id`.
    pub fn get(&self, id: PointId) -> Result<Point<'_>, TableError> {
        self.check_index(id)?;
        Ok(Point::new(id, self.point(id)))
    }

    /// Handle onto the next slot claimed by the append cursor.
    ///
    /// The caller is responsible for having sized the table.
    ///
    /// # Panics
    ///
    /// Panics if the cursor has run past the buffer's capacity.
    pub fn append(&mut self) -> PointRef<'_> {
        let id = self.add_point();
        PointRef::new(id, self.point_mut(id))
    }

    /// The whole backing buffer, including slots past the logical size.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable view of the whole backing buffer.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Register the callback run by [`reset`](StreamPointTable::reset).
    pub fn set_process(&mut self, process: impl FnMut(&mut VectorPointTable) + 'static) {
        debug!(replacing = self.process.is_some(), "setting point table process");
        self.process = Some(Box::new(process));
    }

    /// Iterate live, unskipped records in index order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self, 0)
    }

    /// The terminal iterator position, equal to any exhausted [`Iter`].
    pub fn iter_end(&self) -> Iter<'_> {
        Iter::new(self, self.size)
    }

    /// Mutably iterate live, unskipped records in index order.
    pub fn iter_mut(&mut self) -> IterMut<'_> {
        let live = byte_len(self.layout, self.size);
        IterMut::new(
            &mut self.data[..live],
            &self.skips,
            self.layout.point_size(),
        )
    }

    /// Skip flag at `index` with no bounds check against the logical size.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`size`](VectorPointTable::size).
    pub(crate) fn is_skipped(&self, index: usize) -> bool {
        self.skips[index]
    }

    /// Memory held by the backing buffer in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.data.len()
    }
}

impl PointTable for VectorPointTable {
    fn layout(&self) -> PointLayout {
        self.layout
    }

    fn add_point(&mut self) -> PointId {
        let id = PointId(self.index);
        self.index += 1;
        id
    }

    fn point(&self, id: PointId) -> &[u8] {
        &self.data[record_range(self.layout, id)]
    }

    fn point_mut(&mut self, id: PointId) -> &mut [u8] {
        &mut self.data[record_range(self.layout, id)]
    }
}

impl StreamPointTable for VectorPointTable {
    fn capacity(&self) -> usize {
        self.layout.points_in(self.data.len())
    }

    fn num_points(&self) -> usize {
        self.size
    }

    fn skip(&self, id: PointId) -> Result<bool, TableError> {
        self.check_index(id)?;
        Ok(self.skips[id.index()])
    }

    fn set_skip(&mut self, id: PointId) -> Result<(), TableError> {
        self.check_index(id)?;
        self.skips[id.index()] = true;
        Ok(())
    }

    fn set_num_points(&mut self, count: usize) -> Result<(), TableError> {
        let capacity = self.capacity();
        if count > capacity {
            return Err(TableError::CapacityExceeded {
                requested: count,
                capacity,
            });
        }
        self.size = count;
        self.skips.resize(count, false);
        Ok(())
    }

    /// Run the registered process callback. A callback registered from
    /// inside the running one replaces it; re-entrant resets are no-ops.
    fn reset(&mut self) {
        if let Some(mut process) = self.process.take() {
            process(self);
            if self.process.is_none() {
                self.process = Some(process);
            }
        }
    }
}

impl<'a> IntoIterator for &'a VectorPointTable {
    type Item = Point<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut VectorPointTable {
    type Item = PointRef<'a>;
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl fmt::Debug for VectorPointTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorPointTable")
            .field("point_size", &self.layout.point_size())
            .field("size", &self.size)
            .field("capacity", &self.capacity())
            .field("skipped", &self.skips.iter().filter(|&&s| s).count())
            .field("has_process", &self.process.is_some())
            .finish()
    }
}
