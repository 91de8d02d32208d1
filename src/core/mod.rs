//! Fundamental coordinate types.
//!
//! - [`GridCoord`]: global cell coordinates (integer, may be negative)
//! - [`ChunkCoord`]: chunk coordinates (floor division of cell coordinates)
//! - [`Direction`]: the four cardinal directions on the grid

mod coord;

pub use coord::{ChunkCoord, Direction, GridCoord};
