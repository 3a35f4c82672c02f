//! Fixed record layout parameters.
//!
//! Pointslab never interprets record contents. The only thing it needs
//! from the external schema is how many bytes one record occupies, and
//! that number is fixed for the lifetime of every arena and table built
//! from it.

use crate::error::LayoutError;

/// Byte layout of a single fixed-size record.
///
/// Validated at construction: a zero-byte record would make every
/// length/size division in the tables meaningless.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointLayout {
    point_size: usize,
}

impl PointLayout {
    /// Create a layout for records of `point_size` bytes.
    pub fn new(point_size: usize) -> Result<Self, LayoutError> {
        if point_size == 0 {
            return Err(LayoutError::ZeroPointSize);
        }
        Ok(Self { point_size })
    }

    /// Bytes per record.
    pub fn point_size(&self) -> usize {
        self.point_size
    }

    /// Bytes needed to hold `points` records, or `None` on overflow.
    pub fn bytes_for(&self, points: usize) -> Option<usize> {
        points.checked_mul(self.point_size)
    }

    /// Whether a buffer of `len` bytes holds a whole number of records.
    pub fn divides(&self, len: usize) -> bool {
        len % self.point_size == 0
    }

    /// Number of whole records in `len` bytes.
    pub fn points_in(&self, len: usize) -> usize {
        len / self.point_size
    }
}
