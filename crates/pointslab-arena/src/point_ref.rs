//! Handles onto a single record.
//!
//! [`PointRef`] is the mutable handle returned by bounded table accessors
//! and the mutable iterator; [`Point`] is its read-only counterpart. Both
//! borrow the owning table, so a handle cannot outlive the buffer it
//! points into or survive a resize of it.

use pointslab_core::PointId;

/// Mutable handle onto one record of a table.
#[derive(Debug)]
pub struct PointRef<'a> {
    id: PointId,
    data: &'a mut [u8],
}

impl<'a> PointRef<'a> {
    pub(crate) fn new(id: PointId, data: &'a mut [u8]) -> Self {
        Self { id, data }
    }

    /// Index of the record within its table.
    pub fn id(&self) -> PointId {
        self.id
    }

    /// The record's bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.data
    }

    /// The record's bytes, for direct field population.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.data
    }

    /// Consume the handle, keeping the borrow of the record bytes.
    pub fn into_bytes(self) -> &'a mut [u8] {
        self.data
    }

    /// Overwrite the whole record.
    ///
    /// # Panics
    ///
    /// Panics if `record.len()` differs from the point size.
    pub fn copy_from(&mut self, record: &[u8]) {
        self.data.copy_from_slice(record);
    }
}

/// Read-only handle onto one record of a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point<'a> {
    id: PointId,
    data: &'a [u8],
}

impl<'a> Point<'a> {
    pub(crate) fn new(id: PointId, data: &'a [u8]) -> Self {
        Self { id, data }
    }

    /// Index of the record within its table.
    pub fn id(&self) -> PointId {
        self.id
    }

    /// The record's bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }
}
