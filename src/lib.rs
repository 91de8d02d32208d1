//! # Vastu-Atlas: Sparse Unbounded 2D Occupancy Atlas
//!
//! A chunked occupancy grid for incremental exploration and mapping,
//! designed for indoor robot navigation where most of the plane is never
//! visited and must not cost memory, while visited regions need per-cell
//! resolution and mutable occupancy counts.
//!
//! ## Features
//!
//! - **Unbounded coverage**: coordinates may be negative or positive with
//!   no preset extent; the atlas grows on demand, one chunk at a time
//! - **Lazy materialization**: unexplored chunks store no per-cell data;
//!   the first touch upgrades them to dense occupancy counters
//! - **Two-resolution cell graph**: unexplored chunks are single coarse
//!   nodes, explored cells are fine nodes, stitched seamlessly across
//!   chunk boundaries for search algorithms layered on top
//! - **Amortized O(1) growth**: the backing axis container recenters its
//!   storage so front and back expansion are equally cheap
//!
//! ## Quick Start
//!
//! ```rust
//! use vastu_atlas::Atlas;
//!
//! // 8x8-cell chunks; starts covering the single chunk at the origin.
//! let mut atlas = Atlas::new(8);
//!
//! // Record an obstacle observation; coverage grows as needed.
//! atlas.update_cell(12, -3, true);
//!
//! // Resolve a cell and ask which neighbors are currently reachable.
//! let cell = atlas.get_cell(12, -4);
//! for neighbor in cell.accessible_cells(&atlas) {
//!     let cost = cell.distance_to(&neighbor);
//!     println!("({}, {}) at distance {cost:.2}", neighbor.x(), neighbor.y());
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`section`]: the growable, double-ended, arbitrarily-indexed axis
//!   container backing each grid dimension
//! - [`core`]: coordinate types ([`GridCoord`], [`ChunkCoord`],
//!   [`Direction`])
//! - [`atlas`]: the chunked grid itself and its [`Cell`] views
//! - [`config`] / [`error`]: configuration and error types
//!
//! ## Scope
//!
//! The atlas exposes adjacency and distance primitives only; it implements
//! no search algorithm, no persistence, and no concurrency control. A
//! mutable atlas is owned by one thread of control; after
//! [`Atlas::update_cell`] returns, every subsequent query observes the
//! update.

pub mod atlas;
pub mod config;
pub mod core;
pub mod error;
pub mod section;

pub use atlas::{Atlas, Cell};
pub use config::AtlasConfig;
pub use error::{ConfigError, SectionError};
pub use section::{Cursor, Section};

pub use crate::core::{ChunkCoord, Direction, GridCoord};
