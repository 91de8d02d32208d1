//! The sparse, unbounded 2D occupancy atlas.
//!
//! The atlas answers two questions cheaply over an arbitrarily large
//! coordinate space: what is the occupancy state of a cell, and which
//! neighboring cells are reachable from it. Most of the plane is never
//! visited and costs nothing; visited regions get per-cell resolution.
//!
//! ## Structure
//!
//! Chunks are held in a [`Section`] of `Section`s: the outer axis is
//! indexed by chunk x, each inner axis by chunk y. The covered region is
//! always rectangular in chunk coordinates; the expansion protocol keeps
//! every column aligned to the same y range. Coverage only ever grows.
//!
//! ## Two-resolution cell graph
//!
//! Unexplored chunks appear in the adjacency graph as a single coarse node;
//! materialized chunks contribute one fine node per free cell. The two are
//! stitched together at chunk boundaries by [`Cell::accessible_cells`], so
//! the graph stays connected no matter which side of an edge materializes
//! first.

mod cell;
mod chunk;

pub use cell::Cell;

use log::debug;

use crate::config::AtlasConfig;
use crate::core::{ChunkCoord, GridCoord};
use crate::error::ConfigError;
use crate::section::Section;

use chunk::Chunk;

/// Sparse, unbounded 2D occupancy grid with lazily materialized chunks.
///
/// ```
/// use vastu_atlas::Atlas;
///
/// let mut atlas = Atlas::new(8);
/// atlas.update_cell(3, 4, true); // mark an obstacle
///
/// let cell = atlas.get_cell(3, 3);
/// let neighbors = cell.accessible_cells(&atlas);
/// assert!(neighbors.iter().all(|n| (n.x(), n.y()) != (3, 4)));
/// ```
///
/// ## Mutation model
///
/// Single-threaded, synchronous call/return; `&mut self` on the mutating
/// operations is the whole concurrency story. Note that [`get_cell`]
/// mutates: a plain read materializes the owning chunk so that later
/// boundary queries see consistent per-cell data. [`occupancy`] and
/// [`is_materialized`] are the side-effect-free inspection path.
///
/// ## Panics
///
/// Bounds and chunk resolution are protected by the expansion protocol; a
/// chunk found missing *after* a successful expansion is an internal
/// invariant violation and panics rather than risking silent corruption.
///
/// [`get_cell`]: Atlas::get_cell
/// [`occupancy`]: Atlas::occupancy
/// [`is_materialized`]: Atlas::is_materialized
#[derive(Clone, Debug)]
pub struct Atlas {
    /// Chunk edge length in cells; fixed at construction.
    chunk_size: i32,
    /// Outer axis: chunk x. Inner axes: chunk y, all spanning the same
    /// range (rectangular invariant).
    chunks: Section<Section<Chunk>>,
}

impl Atlas {
    /// Create an atlas covering exactly one unexplored chunk at the chunk
    /// origin.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is not positive. Use
    /// [`with_config`](Atlas::with_config) for a checked constructor.
    pub fn new(chunk_size: i32) -> Self {
        assert!(chunk_size > 0, "chunk_size must be positive");
        let mut column = Section::new();
        column.push_back(Chunk::Unexplored);
        let mut chunks = Section::new();
        chunks.push_back(column);
        Self { chunk_size, chunks }
    }

    /// Create an atlas from a validated configuration.
    pub fn with_config(config: AtlasConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.chunk_size))
    }

    /// Chunk edge length in cells
    #[inline]
    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    /// Lowest covered global x coordinate (inclusive)
    #[inline]
    pub fn x_min(&self) -> i32 {
        self.x_min_chunk() * self.chunk_size
    }

    /// Highest covered global x coordinate (inclusive)
    #[inline]
    pub fn x_max(&self) -> i32 {
        (self.x_max_chunk() + 1) * self.chunk_size - 1
    }

    /// Lowest covered global y coordinate (inclusive)
    #[inline]
    pub fn y_min(&self) -> i32 {
        self.y_min_chunk() * self.chunk_size
    }

    /// Highest covered global y coordinate (inclusive)
    #[inline]
    pub fn y_max(&self) -> i32 {
        (self.y_max_chunk() + 1) * self.chunk_size - 1
    }

    /// Chunk coordinate owning a global coordinate (floor division)
    #[inline]
    pub fn to_chunk_coord(&self, coord: i32) -> i32 {
        coord.div_euclid(self.chunk_size)
    }

    /// Resolve the cell at global `(x, y)`, growing coverage as needed.
    ///
    /// The owning chunk is materialized even on this read path, so the
    /// returned view (and every later neighbor query around it) sees
    /// per-cell boundary data. Never fails for finite input.
    pub fn get_cell(&mut self, x: i32, y: i32) -> Cell {
        self.expand_to(x, y);
        let chunk_size = self.chunk_size;
        let coord = ChunkCoord::of(GridCoord::new(x, y), chunk_size);
        let chunk = self.chunk_at_mut(coord);
        if !chunk.is_materialized() {
            debug!("materializing chunk ({}, {}) on read", coord.x, coord.y);
        }
        chunk.materialize(chunk_size);
        Cell::fine(GridCoord::new(x, y))
    }

    /// Increment (`increase`) or decrement-with-floor-at-zero the occupancy
    /// counter of the cell at global `(x, y)`, growing coverage as needed.
    ///
    /// Decrementing a cell in an unexplored chunk is a no-op: the counter
    /// is already zero and the chunk stays unexplored.
    pub fn update_cell(&mut self, x: i32, y: i32, increase: bool) {
        self.expand_to(x, y);
        let chunk_size = self.chunk_size;
        let coord = ChunkCoord::of(GridCoord::new(x, y), chunk_size);
        let chunk = self.chunk_at_mut(coord);
        if !chunk.is_materialized() {
            if !increase {
                return;
            }
            debug!("materializing chunk ({}, {}) on update", coord.x, coord.y);
        }
        chunk.materialize(chunk_size).bump(
            x.rem_euclid(chunk_size),
            y.rem_euclid(chunk_size),
            increase,
        );
    }

    /// Occupancy counter of the cell at global `(x, y)` without expanding
    /// or materializing anything.
    ///
    /// Cells in unexplored chunks, and cells outside current coverage, read
    /// as zero (free).
    pub fn occupancy(&self, x: i32, y: i32) -> u32 {
        let coord = ChunkCoord::of(GridCoord::new(x, y), self.chunk_size);
        match self.chunk_at(coord) {
            Some(Chunk::Materialized(grid)) => grid.counter(
                x.rem_euclid(self.chunk_size),
                y.rem_euclid(self.chunk_size),
            ),
            _ => 0,
        }
    }

    /// Has the chunk owning global `(x, y)` been materialized?
    ///
    /// Side channel for tests and diagnostics; never expands coverage.
    pub fn is_materialized(&self, x: i32, y: i32) -> bool {
        let coord = ChunkCoord::of(GridCoord::new(x, y), self.chunk_size);
        self.chunk_at(coord).is_some_and(Chunk::is_materialized)
    }

    /// Grow coverage until global `(x, y)` lies within bounds.
    ///
    /// No-op when already covered. Otherwise expands one chunk column or
    /// one chunk row-step at a time until the target chunk is reached,
    /// keeping every column aligned to the same y range. Existing chunks
    /// are never touched.
    pub fn expand_to(&mut self, x: i32, y: i32) {
        if x >= self.x_min() && x <= self.x_max() && y >= self.y_min() && y <= self.y_max() {
            return;
        }
        let cx = self.to_chunk_coord(x);
        let cy = self.to_chunk_coord(y);
        while cx < self.x_min_chunk() {
            self.expand_x(false);
        }
        while cx > self.x_max_chunk() {
            self.expand_x(true);
        }
        while cy < self.y_min_chunk() {
            self.expand_y(false);
        }
        while cy > self.y_max_chunk() {
            self.expand_y(true);
        }
        debug!(
            "expanded to cover ({x}, {y}); bounds now x [{}, {}], y [{}, {}]",
            self.x_min(),
            self.x_max(),
            self.y_min(),
            self.y_max()
        );
    }

    fn x_min_chunk(&self) -> i32 {
        self.chunks.start()
    }

    fn x_max_chunk(&self) -> i32 {
        self.chunks.end()
    }

    fn y_min_chunk(&self) -> i32 {
        // Columns are y-aligned, so any of them answers; the atlas always
        // holds at least one.
        self.chunks.first().map_or(0, Section::start)
    }

    fn y_max_chunk(&self) -> i32 {
        self.chunks.first().map_or(-1, Section::end)
    }

    /// Add one column of unexplored chunks spanning the current y range at
    /// the high (`forward`) or low end of the x axis.
    fn expand_x(&mut self, forward: bool) {
        let y_lo = self.y_min_chunk();
        let y_hi = self.y_max_chunk();
        let column = Section::from_iter_at(y_lo, (y_lo..=y_hi).map(|_| Chunk::Unexplored));
        if forward {
            self.chunks.push_back(column);
        } else {
            self.chunks.push_front(column);
        }
    }

    /// Extend every column by one unexplored chunk at the high (`forward`)
    /// or low end of the y axis, keeping all columns aligned.
    fn expand_y(&mut self, forward: bool) {
        for column in self.chunks.iter_mut() {
            if forward {
                column.push_back(Chunk::Unexplored);
            } else {
                column.push_front(Chunk::Unexplored);
            }
        }
    }

    /// Chunk at the given chunk coordinates, if covered.
    pub(crate) fn chunk_at(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks
            .get(coord.x)
            .ok()
            .and_then(|column| column.get(coord.y).ok())
    }

    /// Chunk at the given chunk coordinates after expansion.
    ///
    /// # Panics
    ///
    /// Panics if the chunk is absent: `expand_to` guarantees coverage, so
    /// absence means the expansion protocol itself is broken.
    fn chunk_at_mut(&mut self, coord: ChunkCoord) -> &mut Chunk {
        let column = match self.chunks.get_mut(coord.x) {
            Ok(column) => column,
            Err(_) => panic!(
                "atlas invariant violated: chunk column {} missing after expansion",
                coord.x
            ),
        };
        match column.get_mut(coord.y) {
            Ok(chunk) => chunk,
            Err(_) => panic!(
                "atlas invariant violated: chunk ({}, {}) missing after expansion",
                coord.x, coord.y
            ),
        }
    }
}
