//! Configuration for the occupancy atlas.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for [`Atlas`](crate::Atlas).
///
/// All parameters have sensible defaults for indoor robot exploration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasConfig {
    /// Chunk edge length in cells.
    ///
    /// Larger chunks mean fewer, bigger materialization steps and fewer
    /// chunk-boundary crossings per query; smaller chunks keep unexplored
    /// regions cheaper. Must be in `1..=MAX_CHUNK_SIZE`.
    /// Default: 16
    pub chunk_size: i32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self { chunk_size: 16 }
    }
}

impl AtlasConfig {
    /// Largest accepted chunk edge length.
    ///
    /// A chunk stores `chunk_size * chunk_size` counters; this cap keeps a
    /// single materialization to a 64 MiB allocation and the counter index
    /// arithmetic comfortably within `i32`.
    pub const MAX_CHUNK_SIZE: i32 = 4096;

    /// Create a configuration with a custom chunk size.
    pub fn new(chunk_size: i32) -> Self {
        Self { chunk_size }
    }

    /// Check all parameters for validity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size <= 0 || self.chunk_size > Self::MAX_CHUNK_SIZE {
            return Err(ConfigError::InvalidChunkSize(self.chunk_size));
        }
        Ok(())
    }
}
