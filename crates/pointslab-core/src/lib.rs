//! Core types and traits for the Pointslab point arena.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every table and arena in the workspace:
//! point identifiers, the fixed record layout, error types, and the
//! record-table traits that a point-processing pipeline drives.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod layout;
pub mod traits;

pub use error::{LayoutError, TableError};
pub use id::PointId;
pub use layout::PointLayout;
pub use traits::{PointTable, StreamPointTable};
