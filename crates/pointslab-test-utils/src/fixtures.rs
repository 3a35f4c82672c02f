//! Reusable record and reader fixtures.
//!
//! Records are identified by a "stamp": a sequence number written
//! little-endian into the leading bytes of the record (truncated for
//! records shorter than eight bytes). Tests compare stamps instead of
//! raw bytes.

use pointslab_arena::{BlockConfig, MemBlock, VectorPointTable};
use pointslab_core::{PointId, PointLayout, StreamPointTable, TableError};

/// Layout for `point_size`-byte records.
///
/// # Panics
///
/// Panics if `point_size` is zero.
pub fn layout(point_size: usize) -> PointLayout {
    PointLayout::new(point_size).expect("fixture point size must be non-zero")
}

/// Write `seq` into the leading bytes of `record`; the rest is zeroed.
pub fn stamp(record: &mut [u8], seq: u64) {
    record.fill(0);
    let bytes = seq.to_le_bytes();
    let n = record.len().min(bytes.len());
    record[..n].copy_from_slice(&bytes[..n]);
}

/// Read back a stamp written by [`stamp`].
pub fn read_stamp(record: &[u8]) -> u64 {
    let mut bytes = [0u8; 8];
    let n = record.len().min(bytes.len());
    bytes[..n].copy_from_slice(&record[..n]);
    u64::from_le_bytes(bytes)
}

/// Stamps of every live, unskipped record in iteration order.
pub fn stamps(table: &VectorPointTable) -> Vec<u64> {
    table.iter().map(|p| read_stamp(p.as_bytes())).collect()
}

/// An arena holding `count` records stamped `first..first + count`.
pub fn filled_arena(
    point_size: usize,
    points_per_block: usize,
    first: u64,
    count: u64,
) -> MemBlock {
    let mut arena = MemBlock::new(layout(point_size), BlockConfig::new(points_per_block))
        .expect("fixture arena config must be valid");
    for seq in first..first + count {
        let (_, record) = arena.next_mut();
        stamp(record, seq);
    }
    arena
}

/// Simulated streaming reader.
///
/// Emits records stamped `0..total` in batches of at most the table's
/// capacity. For each batch it claims a clean logical extent, writes the
/// records through the unchecked `point_mut` path, skips every record the
/// filter rejects, publishes the batch size, and calls `reset()`.
pub struct ChunkedReader {
    total: u64,
    reject: fn(u64) -> bool,
}

impl ChunkedReader {
    /// Reader of `total` records, none filtered.
    pub fn new(total: u64) -> Self {
        Self {
            total,
            reject: |_| false,
        }
    }

    /// Skip every record whose stamp satisfies `reject`.
    pub fn reject_if(mut self, reject: fn(u64) -> bool) -> Self {
        self.reject = reject;
        self
    }

    /// Stream every record through `table`, returning the batch count.
    pub fn read_into<T: StreamPointTable>(&self, table: &mut T) -> Result<usize, TableError> {
        let capacity = table.capacity() as u64;
        if capacity == 0 {
            return Err(TableError::CapacityExceeded {
                requested: 1,
                capacity: 0,
            });
        }

        let mut batches = 0;
        let mut next = 0u64;
        while next < self.total {
            let len = capacity.min(self.total - next);
            table.set_num_points(0)?;
            table.set_num_points(len as usize)?;
            for i in 0..len {
                let id = PointId(i as usize);
                let seq = next + i;
                stamp(table.point_mut(id), seq);
                if (self.reject)(seq) {
                    table.set_skip(id)?;
                }
            }
            table.reset();
            next += len;
            batches += 1;
        }
        Ok(batches)
    }
}
