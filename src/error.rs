//! Error types for vastu-atlas.

use thiserror::Error;

/// Errors reported by [`Section`](crate::Section) operations.
///
/// All of these are recoverable caller errors. Internal invariant
/// violations inside [`Atlas`](crate::Atlas) panic instead; see the
/// `Atlas` docs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SectionError {
    /// Access outside the valid logical index span.
    ///
    /// `lo` and `hi` are the inclusive bounds at the time of the access;
    /// on an empty section `hi` is `lo - 1`.
    #[error("index {index} out of range [{lo}, {hi}]")]
    OutOfRange {
        /// The requested logical index
        index: i32,
        /// Lowest valid index
        lo: i32,
        /// Highest valid index
        hi: i32,
    },

    /// Removal attempted on an empty section.
    #[error("section is empty")]
    Empty,

    /// A cursor observed a structural mutation and must stop.
    #[error("section was modified during iteration")]
    ConcurrentMutation,
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `chunk_size` must be in `1..=AtlasConfig::MAX_CHUNK_SIZE`.
    ///
    /// [`AtlasConfig::MAX_CHUNK_SIZE`]: crate::AtlasConfig::MAX_CHUNK_SIZE
    #[error("chunk_size {0} out of range")]
    InvalidChunkSize(i32),
}
