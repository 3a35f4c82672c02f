//! Pointslab: fixed-size point record arenas and streaming tables.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Pointslab sub-crates. For most users, adding `pointslab` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use pointslab::prelude::*;
//!
//! let layout = PointLayout::new(8).unwrap();
//!
//! // Two arenas of buffered records, written through one adapter.
//! let mut previous = MemBlock::new(layout, BlockConfig::new(4)).unwrap();
//! let mut current = MemBlock::new(layout, BlockConfig::new(4)).unwrap();
//! previous.push(&[1; 8]);
//! current.push(&[2; 8]);
//! let mut table = BlockPointTable::new(&mut previous, &mut current).unwrap();
//! let id = table.add_point();
//! table.point_mut(id).fill(7);
//! assert_eq!(table.size(), 2);
//!
//! // A streaming table refilled in batches.
//! let mut stream = VectorPointTable::with_points(layout, 4);
//! stream.set_skip(PointId(1)).unwrap();
//! let live: Vec<PointId> = stream.iter().map(|p| p.id()).collect();
//! assert_eq!(live, vec![PointId(0), PointId(2), PointId(3)]);
//! assert!(stream.at(PointId(4)).is_err());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `pointslab-arena` | `MemBlock`, `BlockPointTable`, `VectorPointTable`, iterators |
//! | [`types`] | `pointslab-core` | `PointId`, `PointLayout`, errors, table traits |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Block arenas, adapter and streaming tables (`pointslab-arena`).
pub use pointslab_arena as arena;

/// Core identifiers, layout, errors and table traits (`pointslab-core`).
pub use pointslab_core as types;

/// Commonly used types and traits.
pub mod prelude {
    pub use pointslab_arena::{
        ArenaError, BlockConfig, BlockPointTable, MemBlock, Point, PointRef, SlotRef,
        VectorPointTable,
    };
    pub use pointslab_core::{
        LayoutError, PointId, PointLayout, PointTable, StreamPointTable, TableError,
    };
}
