//! Block arena configuration parameters.

use pointslab_core::PointLayout;

use crate::error::ArenaError;

/// Configuration for a [`MemBlock`](crate::MemBlock) arena.
///
/// Controls the blocking factor: how many records share one heap
/// allocation. Validated when the arena is built; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockConfig {
    /// Records carved from each block before a new block is allocated.
    ///
    /// Default: 4096. Must be non-zero, and `points_per_block * point_size`
    /// must fit in `usize`.
    pub points_per_block: usize,
}

impl BlockConfig {
    /// Default number of records per block.
    pub const DEFAULT_POINTS_PER_BLOCK: usize = 4096;

    /// Create a config with the given blocking factor.
    pub fn new(points_per_block: usize) -> Self {
        Self { points_per_block }
    }

    /// Size of one block in bytes for records of the given layout.
    pub fn bytes_per_block(&self, layout: PointLayout) -> Result<usize, ArenaError> {
        if self.points_per_block == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "points_per_block must be at least 1".into(),
            });
        }
        layout
            .bytes_for(self.points_per_block)
            .ok_or_else(|| ArenaError::InvalidConfig {
                reason: format!(
                    "{} points of {} bytes overflows a block",
                    self.points_per_block,
                    layout.point_size()
                ),
            })
    }
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_POINTS_PER_BLOCK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_per_block() {
        assert_eq!(BlockConfig::default().points_per_block, 4096);
    }

    #[test]
    fn bytes_per_block_multiplies_layout() {
        let layout = PointLayout::new(24).unwrap();
        assert_eq!(BlockConfig::new(100).bytes_per_block(layout), Ok(2400));
    }

    #[test]
    fn zero_points_per_block_rejected() {
        let layout = PointLayout::new(8).unwrap();
        assert!(matches!(
            BlockConfig::new(0).bytes_per_block(layout),
            Err(ArenaError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn overflowing_block_rejected() {
        let layout = PointLayout::new(16).unwrap();
        assert!(matches!(
            BlockConfig::new(usize::MAX / 2).bytes_per_block(layout),
            Err(ArenaError::InvalidConfig { .. })
        ));
    }
}
