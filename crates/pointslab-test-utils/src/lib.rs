//! Test utilities for Pointslab development.
//!
//! Record stamping helpers plus a streaming reader fixture that drives
//! any [`StreamPointTable`](pointslab_core::StreamPointTable) the way an
//! external point reader does.

pub mod fixtures;

pub use fixtures::{filled_arena, layout, read_stamp, stamp, stamps, ChunkedReader};
