//! Error types shared by every point table.
//!
//! Errors are reported synchronously to the immediate caller. A failing
//! operation never leaves the table partially mutated.

use std::error::Error;
use std::fmt;

/// Errors from constructing a [`PointLayout`](crate::PointLayout).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// Records must occupy at least one byte.
    ZeroPointSize,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPointSize => write!(f, "point size must be at least one byte"),
        }
    }
}

impl Error for LayoutError {}

/// Errors from bounded table operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableError {
    /// A buffer handed to a table is not a whole number of records.
    InvalidBufferLength {
        /// Length of the rejected buffer in bytes.
        len: usize,
        /// Record size the buffer must be a multiple of.
        point_size: usize,
    },
    /// A bounded accessor was given an index at or past the logical size.
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// Logical size of the table at the time of the call.
        size: usize,
    },
    /// A logical size was requested that the backing buffer cannot hold.
    CapacityExceeded {
        /// Requested number of records.
        requested: usize,
        /// Records the backing buffer can hold.
        capacity: usize,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBufferLength { len, point_size } => {
                write!(
                    f,
                    "invalid buffer length: {len} bytes is not a multiple of point size {point_size}"
                )
            }
            Self::OutOfRange { index, size } => {
                write!(f, "point index {index} out of range for table of size {size}")
            }
            Self::CapacityExceeded {
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "table capacity exceeded: requested {requested} points, capacity {capacity} points"
                )
            }
        }
    }
}

impl Error for TableError {}
