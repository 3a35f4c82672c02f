//! Record-table traits driven by a point-processing pipeline.
//!
//! The pipeline that reads and writes point clouds lives outside this
//! workspace. It talks to record memory through these two traits: it
//! claims indices, asks for the bytes behind an index, and writes record
//! fields directly into them. Tables in `pointslab-arena` implement the
//! traits; nothing here interprets record contents.

use crate::error::TableError;
use crate::id::PointId;
use crate::layout::PointLayout;

/// Index-addressable storage of fixed-size records.
///
/// # Hot-path contract
///
/// [`point`](PointTable::point) and [`point_mut`](PointTable::point_mut)
/// are unchecked against the table's logical extent. The pipeline is the
/// sole caller and enforces its own index discipline. Implementations
/// must still never expose memory they do not own: an index past the
/// physical storage panics rather than aliasing foreign memory.
pub trait PointTable {
    /// Record layout shared by every point in the table.
    fn layout(&self) -> PointLayout;

    /// Claim the next sequential write index, starting at zero.
    fn add_point(&mut self) -> PointId;

    /// The bytes of the record at `id`.
    fn point(&self, id: PointId) -> &[u8];

    /// Mutable bytes of the record at `id`, for direct field population.
    fn point_mut(&mut self, id: PointId) -> &mut [u8];

    /// Whether the table can hand out records without copying them into
    /// a staging buffer first.
    fn supports_view(&self) -> bool {
        false
    }
}

/// A [`PointTable`] that is refilled in batches.
///
/// A streaming reader fills up to [`capacity`](StreamPointTable::capacity)
/// records, marks filtered records with
/// [`set_skip`](StreamPointTable::set_skip), publishes how many records it
/// actually wrote via [`set_num_points`](StreamPointTable::set_num_points),
/// and then calls [`reset`](StreamPointTable::reset) so the table can hand
/// the batch to its consumer before the next fill.
pub trait StreamPointTable: PointTable {
    /// Total addressable record slots in the backing storage.
    fn capacity(&self) -> usize;

    /// Number of records currently considered live.
    fn num_points(&self) -> usize;

    /// Whether the record at `id` is excluded from iteration.
    fn skip(&self, id: PointId) -> Result<bool, TableError>;

    /// Exclude the record at `id` from iteration.
    fn set_skip(&mut self, id: PointId) -> Result<(), TableError>;

    /// Change the logical record count without touching the storage.
    ///
    /// Fails with [`TableError::CapacityExceeded`] if `count` exceeds
    /// [`capacity`](StreamPointTable::capacity).
    fn set_num_points(&mut self, count: usize) -> Result<(), TableError>;

    /// Signal that the current batch is complete.
    fn reset(&mut self);
}
