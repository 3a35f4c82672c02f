//! Block arenas and streaming point tables for fixed-size point records.
//!
//! Feeds a record-at-a-time point-processing pipeline without per-record
//! heap allocation or copying. Record memory is handed out in bulk and
//! addressed by index through the [`PointTable`](pointslab_core::PointTable)
//! and [`StreamPointTable`](pointslab_core::StreamPointTable) traits.
//!
//! # Architecture
//!
//! ```text
//! MemBlock × 2 (bump-allocated Box<[u8]> blocks, SlotRef per record)
//! └── BlockPointTable (write adapter: one flat index over both arenas)
//!
//! VectorPointTable (one owned Vec<u8> buffer + skip mask + process hook)
//! └── Iter / IterMut (skip-aware traversal of the logical range)
//! ```
//!
//! # Checked and unchecked access
//!
//! Every table has two access paths with different contracts. The
//! pipeline's hot path (`point`, `point_mut`, `MemBlock::slot`) is not
//! checked against the logical size or slot generation. Bounded
//! accessors (`at`, `get`, `skip`, `set_skip`, `MemBlock::try_slot`)
//! return errors instead. Neither path uses `unsafe`: an index past the
//! physical storage panics.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod block_table;
pub mod config;
pub mod error;
pub mod handle;
pub mod iter;
pub mod point_ref;
pub mod vector_table;

// Public re-exports for the primary API surface.
pub use block::MemBlock;
pub use block_table::BlockPointTable;
pub use config::BlockConfig;
pub use error::ArenaError;
pub use handle::SlotRef;
pub use iter::{Iter, IterMut};
pub use point_ref::{Point, PointRef};
pub use vector_table::{Process, VectorPointTable};
