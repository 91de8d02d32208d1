//! Transient cell views and the two-resolution adjacency graph.
//!
//! A [`Cell`] is not stored anywhere; it is a value describing one logical
//! grid position at one of two resolutions:
//!
//! - **Fine**: a single cell of a materialized chunk at its exact
//!   coordinate.
//! - **Coarse**: an entire unexplored chunk collapsed into one node at the
//!   chunk's geometric center.
//!
//! The asymmetric adjacency across chunk edges is what keeps the graph
//! connected at any mix of resolutions: a fine edge cell sees at most one
//! coarse neighbor per direction, while a coarse node fans out onto every
//! free boundary cell of a materialized neighbor. Two unexplored chunks
//! produce no edge between each other; they become connected through
//! stitching once either side materializes.

use crate::atlas::chunk::Chunk;
use crate::atlas::Atlas;
use crate::core::{ChunkCoord, Direction, GridCoord};

/// A view over one logical grid position, at coarse (whole-chunk) or fine
/// (single-cell) resolution.
///
/// Obtained from [`Atlas::get_cell`] or from
/// [`accessible_cells`](Cell::accessible_cells). Cells are plain values;
/// they hold no borrow of the atlas, so pass the owning atlas back in for
/// adjacency queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// One node standing in for a whole unexplored chunk, positioned at
    /// the chunk's geometric center.
    Coarse {
        /// The represented chunk
        chunk: ChunkCoord,
        /// Chunk center in global cell coordinates
        center: GridCoord,
    },
    /// One cell of a materialized chunk.
    Fine {
        /// Global cell coordinate
        pos: GridCoord,
    },
}

impl Cell {
    pub(crate) fn fine(pos: GridCoord) -> Cell {
        Cell::Fine { pos }
    }

    pub(crate) fn coarse(chunk: ChunkCoord, chunk_size: i32) -> Cell {
        Cell::Coarse {
            chunk,
            center: chunk.center(chunk_size),
        }
    }

    /// Global x coordinate of this node (chunk center for coarse cells)
    #[inline]
    pub fn x(&self) -> i32 {
        self.position().x
    }

    /// Global y coordinate of this node (chunk center for coarse cells)
    #[inline]
    pub fn y(&self) -> i32 {
        self.position().y
    }

    /// Global position of this node
    #[inline]
    pub fn position(&self) -> GridCoord {
        match self {
            Cell::Coarse { center, .. } => *center,
            Cell::Fine { pos } => *pos,
        }
    }

    /// Is this a coarse (whole-chunk) node?
    #[inline]
    pub fn is_coarse(&self) -> bool {
        matches!(self, Cell::Coarse { .. })
    }

    /// Straight-line Euclidean distance to another cell.
    ///
    /// No path cost, no obstacle awareness; a lower-bound heuristic for
    /// search layered on top, not a shortest-path distance.
    pub fn distance_to(&self, other: &Cell) -> f64 {
        self.position().euclidean_distance(&other.position())
    }

    /// Currently reachable neighbors of this cell, up to one per direction
    /// for fine cells and up to one per free boundary cell of materialized
    /// neighbors for coarse cells.
    ///
    /// Worst case O(chunk size) per direction; never mutates the atlas.
    pub fn accessible_cells(&self, atlas: &Atlas) -> Vec<Cell> {
        match self {
            Cell::Fine { pos } => fine_neighbors(atlas, *pos),
            Cell::Coarse { chunk, .. } => coarse_neighbors(atlas, *chunk),
        }
    }
}

/// Neighbors of a single cell inside a materialized chunk.
fn fine_neighbors(atlas: &Atlas, pos: GridCoord) -> Vec<Cell> {
    let size = atlas.chunk_size();
    let chunk = ChunkCoord::of(pos, size);
    let lx = pos.x.rem_euclid(size);
    let ly = pos.y.rem_euclid(size);

    let mut found = Vec::with_capacity(4);
    for dir in Direction::ALL {
        let (dx, dy) = dir.offset();
        let (nlx, nly) = (lx + dx, ly + dy);
        if nlx >= 0 && nlx < size && nly >= 0 && nly < size {
            // Interior step: same chunk, reachable iff the cell is free.
            let neighbor = pos.step(dir);
            if atlas.occupancy(neighbor.x, neighbor.y) == 0 {
                found.push(Cell::fine(neighbor));
            }
        } else if let Some(cell) = stitch_across(atlas, chunk, dir, lx, ly) {
            found.push(cell);
        }
    }
    found
}

/// The neighbor reached by stepping off the chunk edge in `dir`.
///
/// A materialized neighbor contributes its directly-across boundary cell
/// (if free); an unexplored neighbor contributes its coarse node
/// unconditionally; space outside current coverage contributes nothing.
fn stitch_across(
    atlas: &Atlas,
    chunk: ChunkCoord,
    dir: Direction,
    lx: i32,
    ly: i32,
) -> Option<Cell> {
    let size = atlas.chunk_size();
    let neighbor_chunk = chunk.step(dir);
    match atlas.chunk_at(neighbor_chunk)? {
        Chunk::Unexplored => Some(Cell::coarse(neighbor_chunk, size)),
        Chunk::Materialized(grid) => {
            // Cross offset runs along the shared edge: local y for
            // east/west crossings, local x for north/south ones.
            let cross = if dir.is_horizontal() { ly } else { lx };
            let (blx, bly) = grid.free_edge_cell(dir.opposite(), cross)?;
            let origin = neighbor_chunk.origin(size);
            Some(Cell::fine(GridCoord::new(origin.x + blx, origin.y + bly)))
        }
    }
}

/// Neighbors of a coarse node: the free boundary cells of every
/// materialized chunk around it.
///
/// Unexplored neighbors yield no edge; coarse nodes link to each other only
/// indirectly, through stitching once one of them materializes.
fn coarse_neighbors(atlas: &Atlas, chunk: ChunkCoord) -> Vec<Cell> {
    let size = atlas.chunk_size();
    let mut found = Vec::new();
    for dir in Direction::ALL {
        let neighbor_chunk = chunk.step(dir);
        if let Some(Chunk::Materialized(grid)) = atlas.chunk_at(neighbor_chunk) {
            let origin = neighbor_chunk.origin(size);
            for (blx, bly) in grid.free_edge_cells(dir.opposite()) {
                found.push(Cell::fine(GridCoord::new(origin.x + blx, origin.y + bly)));
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expand coverage over `(x, y)` without materializing its chunk.
    fn cover(atlas: &mut Atlas, x: i32, y: i32) {
        atlas.update_cell(x, y, false);
        assert!(!atlas.is_materialized(x, y));
    }

    fn fine(x: i32, y: i32) -> Cell {
        Cell::fine(GridCoord::new(x, y))
    }

    #[test]
    fn test_interior_neighbors_all_free() {
        let mut atlas = Atlas::new(4);
        let cell = atlas.get_cell(5, 5); // chunk (1, 1), local (1, 1)

        let mut neighbors = cell.accessible_cells(&atlas);
        neighbors.sort_by_key(|c| (c.x(), c.y()));
        assert_eq!(
            neighbors,
            vec![fine(4, 5), fine(5, 4), fine(5, 6), fine(6, 5)]
        );
    }

    #[test]
    fn test_occupied_interior_neighbor_excluded() {
        let mut atlas = Atlas::new(4);
        atlas.update_cell(5, 6, true);
        let cell = atlas.get_cell(5, 5);

        let neighbors = cell.accessible_cells(&atlas);
        assert_eq!(neighbors.len(), 3);
        assert!(!neighbors.contains(&fine(5, 6)));
    }

    #[test]
    fn test_edge_cell_sees_one_coarse_neighbor() {
        let mut atlas = Atlas::new(4);
        cover(&mut atlas, -1, 1); // chunk (-1, 0) covered but unexplored
        let cell = atlas.get_cell(0, 1); // west edge of chunk (0, 0)

        let neighbors = cell.accessible_cells(&atlas);
        let coarse: Vec<&Cell> = neighbors.iter().filter(|c| c.is_coarse()).collect();
        assert_eq!(coarse.len(), 1);
        assert_eq!(
            *coarse[0],
            Cell::coarse(ChunkCoord::new(-1, 0), 4),
            "west neighbor must be the coarse node of chunk (-1, 0)"
        );
        // The coarse node sits at the chunk's geometric center.
        assert_eq!((coarse[0].x(), coarse[0].y()), (-2, 2));
    }

    #[test]
    fn test_edge_cell_crosses_into_materialized_chunk() {
        let mut atlas = Atlas::new(4);
        atlas.get_cell(-1, 1); // materialize chunk (-1, 0)
        let cell = atlas.get_cell(0, 1);

        let neighbors = cell.accessible_cells(&atlas);
        assert!(neighbors.contains(&fine(-1, 1)), "directly-across boundary cell");
        assert!(neighbors.iter().all(|c| !c.is_coarse()));
    }

    #[test]
    fn test_occupied_boundary_cell_blocks_crossing() {
        let mut atlas = Atlas::new(4);
        atlas.update_cell(-1, 1, true); // occupy the cell directly across
        let cell = atlas.get_cell(0, 1);

        let neighbors = cell.accessible_cells(&atlas);
        assert!(!neighbors.contains(&fine(-1, 1)));
        // Other boundary cells of that edge are not substituted in.
        assert!(neighbors.iter().all(|c| c.x() >= 0));
    }

    #[test]
    fn test_north_south_crossing_uses_x_offset() {
        let mut atlas = Atlas::new(4);
        atlas.get_cell(2, -1); // materialize chunk (0, -1)
        let cell = atlas.get_cell(2, 0); // south edge, local x = 2

        let neighbors = cell.accessible_cells(&atlas);
        assert!(
            neighbors.contains(&fine(2, -1)),
            "south crossing must land at the same global x"
        );
    }

    #[test]
    fn test_uncovered_space_yields_no_neighbor() {
        let mut atlas = Atlas::new(4);
        let cell = atlas.get_cell(0, 0); // corner of the only chunk

        let neighbors = cell.accessible_cells(&atlas);
        // West and south lie outside coverage entirely.
        assert_eq!(neighbors.len(), 2);
        assert!(neighbors.contains(&fine(1, 0)));
        assert!(neighbors.contains(&fine(0, 1)));
    }

    #[test]
    fn test_coarse_fans_out_to_free_boundary_cells() {
        let mut atlas = Atlas::new(4);
        atlas.update_cell(0, 2, true); // materialize chunk (0, 0), occupy (0, 2)
        cover(&mut atlas, -1, 0);
        let coarse = Cell::coarse(ChunkCoord::new(-1, 0), 4);

        let mut neighbors = coarse.accessible_cells(&atlas);
        neighbors.sort_by_key(|c| c.y());
        // West edge of chunk (0, 0) minus the occupied (0, 2).
        assert_eq!(neighbors, vec![fine(0, 0), fine(0, 1), fine(0, 3)]);
    }

    #[test]
    fn test_coarse_ignores_unexplored_neighbors() {
        let mut atlas = Atlas::new(4);
        cover(&mut atlas, -1, 0);
        cover(&mut atlas, -5, 0); // chunk (-2, 0), also unexplored

        let coarse = Cell::coarse(ChunkCoord::new(-1, 0), 4);
        let neighbors = coarse.accessible_cells(&atlas);
        // East neighbor (0, 0) is unexplored too: no coarse-coarse edges.
        assert!(neighbors.iter().all(|c| !c.is_coarse()));
    }

    #[test]
    fn test_stitching_is_symmetric_across_the_edge() {
        let mut atlas = Atlas::new(4);
        cover(&mut atlas, -1, 0);
        let edge = atlas.get_cell(0, 1); // free west-edge cell of chunk (0, 0)

        let coarse = Cell::coarse(ChunkCoord::new(-1, 0), 4);
        assert!(edge.accessible_cells(&atlas).contains(&coarse));
        assert!(coarse.accessible_cells(&atlas).contains(&edge));

        // Occupying the edge cell removes the coarse-to-fine direction.
        atlas.update_cell(0, 1, true);
        assert!(!coarse.accessible_cells(&atlas).contains(&edge));
    }

    #[test]
    fn test_distance_is_euclidean() {
        let a = fine(5, 5);
        let b = fine(0, 0);
        assert!((a.distance_to(&b) - 50.0f64.sqrt()).abs() < 1e-12);
        assert_eq!(a.distance_to(&a), 0.0);

        let coarse = Cell::coarse(ChunkCoord::new(0, 0), 4);
        assert_eq!(coarse.distance_to(&fine(2, 6)), 4.0);
    }
}
