//! Benchmark profiles for the Pointslab point arena.
//!
//! - [`reference_layout`]: 34-byte records, a typical packed XYZ + intensity
//!   + classification + GPS-time point.
//! - [`reference_table`]: a 64K-record streaming table with a regular skip
//!   pattern.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use pointslab_arena::VectorPointTable;
use pointslab_core::{PointId, PointLayout, StreamPointTable};

/// Record size of the reference profile in bytes.
pub const REFERENCE_POINT_SIZE: usize = 34;

/// Records in one reference batch.
pub const REFERENCE_BATCH: usize = 65_536;

/// Layout of the reference profile.
pub fn reference_layout() -> PointLayout {
    PointLayout::new(REFERENCE_POINT_SIZE).expect("reference point size is non-zero")
}

/// A reference-sized streaming table with every `skip_every`-th record
/// skipped. `skip_every == 0` skips nothing.
pub fn reference_table(skip_every: usize) -> VectorPointTable {
    let mut table = VectorPointTable::with_points(reference_layout(), REFERENCE_BATCH);
    if skip_every > 0 {
        for i in (0..REFERENCE_BATCH).step_by(skip_every) {
            table
                .set_skip(PointId(i))
                .expect("index below REFERENCE_BATCH is in range");
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_table_skips_regularly() {
        let table = reference_table(4);
        assert_eq!(table.size(), REFERENCE_BATCH);
        assert_eq!(table.iter().count(), REFERENCE_BATCH - REFERENCE_BATCH / 4);
    }

    #[test]
    fn zero_skip_every_skips_nothing() {
        assert_eq!(reference_table(0).iter().count(), REFERENCE_BATCH);
    }
}
