//! Coordinate types for the occupancy atlas.
//!
//! The atlas uses two coordinate systems:
//! - **Cell coordinates** ([`GridCoord`]): one unit per grid cell, unbounded
//!   in all directions, negative values allowed.
//! - **Chunk coordinates** ([`ChunkCoord`]): one unit per chunk. A chunk of
//!   edge length `s` at chunk coordinate `(cx, cy)` covers the cell range
//!   `[cx*s, (cx+1)*s - 1] × [cy*s, (cy+1)*s - 1]`.
//!
//! Conversion uses true floor division, so cell `-1` with chunk size 8 lies
//! in chunk `-1`, not chunk `0`.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Global cell coordinates (integer cell indices).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl GridCoord {
    /// Create a new cell coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Straight-line Euclidean distance to another coordinate.
    ///
    /// Obstacle-unaware, so this is a lower bound on any path length and
    /// usable as an admissible search heuristic.
    #[inline]
    pub fn euclidean_distance(&self, other: &GridCoord) -> f64 {
        let d = *self - *other;
        let (dx, dy) = (d.x as f64, d.y as f64);
        (dx * dx + dy * dy).sqrt()
    }

    /// Manhattan distance to another coordinate
    #[inline]
    pub fn manhattan_distance(&self, other: &GridCoord) -> i32 {
        let d = *self - *other;
        d.x.abs() + d.y.abs()
    }

    /// The adjacent coordinate one step in the given direction
    #[inline]
    pub fn step(&self, dir: Direction) -> GridCoord {
        let (dx, dy) = dir.offset();
        *self + GridCoord::new(dx, dy)
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridCoord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridCoord::new(self.x - other.x, self.y - other.y)
    }
}

/// Chunk coordinates (integer chunk indices).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChunkCoord {
    /// Chunk column index
    pub x: i32,
    /// Chunk row index
    pub y: i32,
}

impl ChunkCoord {
    /// Create a new chunk coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The chunk owning a global cell coordinate.
    ///
    /// Uses floor division so negative cells map to negative chunks:
    /// cell `-1` with chunk size 8 is in chunk `-1`.
    #[inline]
    pub fn of(cell: GridCoord, chunk_size: i32) -> Self {
        Self {
            x: cell.x.div_euclid(chunk_size),
            y: cell.y.div_euclid(chunk_size),
        }
    }

    /// Geometric center of this chunk in global cell coordinates.
    ///
    /// For even chunk sizes this is the cell just above-right of the exact
    /// center point.
    #[inline]
    pub fn center(&self, chunk_size: i32) -> GridCoord {
        GridCoord::new(
            self.x * chunk_size + chunk_size / 2,
            self.y * chunk_size + chunk_size / 2,
        )
    }

    /// Global cell coordinate of this chunk's low corner (minimum x and y)
    #[inline]
    pub fn origin(&self, chunk_size: i32) -> GridCoord {
        GridCoord::new(self.x * chunk_size, self.y * chunk_size)
    }

    /// The adjacent chunk one step in the given direction
    #[inline]
    pub fn step(&self, dir: Direction) -> ChunkCoord {
        let (dx, dy) = dir.offset();
        ChunkCoord::new(self.x + dx, self.y + dy)
    }
}

/// Cardinal direction on the grid.
///
/// North is +y, east is +x. A missing neighbor is expressed with `Option`
/// at the query site, never with a sentinel variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// +y
    North,
    /// +x
    East,
    /// -y
    South,
    /// -x
    West,
}

impl Direction {
    /// All four directions, in query order (N, E, S, W)
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The opposing direction
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Unit offset `(dx, dy)` of one step in this direction
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    /// Does this direction run along the x axis?
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_of_floor_division() {
        // Floor division, not truncation: negative cells map down.
        assert_eq!(ChunkCoord::of(GridCoord::new(-1, 0), 8).x, -1);
        assert_eq!(ChunkCoord::of(GridCoord::new(-8, 0), 8).x, -1);
        assert_eq!(ChunkCoord::of(GridCoord::new(-9, 0), 8).x, -2);
        assert_eq!(ChunkCoord::of(GridCoord::new(0, 0), 8).x, 0);
        assert_eq!(ChunkCoord::of(GridCoord::new(7, 0), 8).x, 0);
        assert_eq!(ChunkCoord::of(GridCoord::new(8, 0), 8).x, 1);
    }

    #[test]
    fn test_chunk_center() {
        assert_eq!(ChunkCoord::new(0, 0).center(8), GridCoord::new(4, 4));
        assert_eq!(ChunkCoord::new(-1, 0).center(8), GridCoord::new(-4, 4));
        assert_eq!(ChunkCoord::new(1, 1).center(4), GridCoord::new(6, 6));
    }

    #[test]
    fn test_direction_opposite() {
        for dir in Direction::ALL {
            assert_ne!(dir, dir.opposite());
            assert_eq!(dir, dir.opposite().opposite());
        }
    }

    #[test]
    fn test_direction_offset_round_trip() {
        let origin = GridCoord::new(3, -7);
        for dir in Direction::ALL {
            assert_eq!(origin.step(dir).step(dir.opposite()), origin);
        }
    }

    #[test]
    fn test_euclidean_distance() {
        let a = GridCoord::new(0, 0);
        let b = GridCoord::new(5, 5);
        assert!((a.euclidean_distance(&b) - 50.0f64.sqrt()).abs() < 1e-12);
        assert_eq!(a.euclidean_distance(&a), 0.0);
    }

    #[test]
    fn test_coord_arithmetic() {
        let a = GridCoord::new(2, -3);
        let b = GridCoord::new(-5, 4);
        assert_eq!(a + b, GridCoord::new(-3, 1));
        assert_eq!(a - b, GridCoord::new(7, -7));
        assert_eq!((a + b) - b, a);
    }

    #[test]
    fn test_manhattan_distance() {
        let a = GridCoord::new(-2, 3);
        let b = GridCoord::new(1, -1);
        assert_eq!(a.manhattan_distance(&b), 7);
    }
}
