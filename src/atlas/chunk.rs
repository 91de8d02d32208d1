//! Per-chunk occupancy state.
//!
//! A chunk is a fixed-size square tile of the atlas. Unexplored chunks
//! carry no per-cell data at all; the first read or occupancy increase
//! upgrades them to a dense counter grid. The upgrade is one-way: a
//! materialized chunk is never reclaimed (memory traded for simplicity).

use crate::core::Direction;

/// State of one chunk of the atlas.
#[derive(Clone, Debug)]
pub(crate) enum Chunk {
    /// Never touched; every cell is implicitly free.
    Unexplored,
    /// Holds a dense per-cell counter grid.
    Materialized(CellGrid),
}

impl Chunk {
    /// Has this chunk been upgraded to per-cell counters?
    #[inline]
    pub(crate) fn is_materialized(&self) -> bool {
        matches!(self, Chunk::Materialized(_))
    }

    /// Upgrade to a counter grid if still unexplored, and borrow the grid.
    pub(crate) fn materialize(&mut self, chunk_size: i32) -> &mut CellGrid {
        if matches!(self, Chunk::Unexplored) {
            *self = Chunk::Materialized(CellGrid::new(chunk_size));
        }
        match self {
            Chunk::Materialized(grid) => grid,
            Chunk::Unexplored => unreachable!("chunk was materialized above"),
        }
    }
}

/// Dense square grid of per-cell occupancy counters.
///
/// Local coordinates `(lx, ly)` run `0..size` on both axes; storage is
/// row-major (`ly * size + lx`). A cell is free iff its counter is zero.
#[derive(Clone, Debug)]
pub(crate) struct CellGrid {
    size: i32,
    counters: Vec<u32>,
}

impl CellGrid {
    pub(crate) fn new(size: i32) -> Self {
        Self {
            size,
            counters: vec![0; (size as usize) * (size as usize)],
        }
    }

    #[inline]
    fn idx(&self, lx: i32, ly: i32) -> usize {
        debug_assert!(lx >= 0 && lx < self.size && ly >= 0 && ly < self.size);
        (ly * self.size + lx) as usize
    }

    /// Occupancy counter at local coordinates
    #[inline]
    pub(crate) fn counter(&self, lx: i32, ly: i32) -> u32 {
        self.counters[self.idx(lx, ly)]
    }

    /// Is the cell at local coordinates free (counter zero)?
    #[inline]
    pub(crate) fn is_free(&self, lx: i32, ly: i32) -> bool {
        self.counter(lx, ly) == 0
    }

    /// Increment the counter, or decrement it with a floor at zero.
    pub(crate) fn bump(&mut self, lx: i32, ly: i32, increase: bool) {
        let idx = self.idx(lx, ly);
        if increase {
            self.counters[idx] += 1;
        } else {
            self.counters[idx] = self.counters[idx].saturating_sub(1);
        }
    }

    /// Local coordinates of the cell on the edge facing `dir`, at offset
    /// `cross` along that edge.
    ///
    /// The cross offset is the coordinate that runs *along* the edge: local
    /// y for east/west edges, local x for north/south edges. Two aligned
    /// chunks therefore agree on the cross offset of facing boundary cells.
    #[inline]
    fn edge_cell(&self, dir: Direction, cross: i32) -> (i32, i32) {
        match dir {
            Direction::East => (self.size - 1, cross),
            Direction::West => (0, cross),
            Direction::North => (cross, self.size - 1),
            Direction::South => (cross, 0),
        }
    }

    /// The free cell at offset `cross` of the edge facing `dir`, if free.
    pub(crate) fn free_edge_cell(&self, dir: Direction, cross: i32) -> Option<(i32, i32)> {
        let (lx, ly) = self.edge_cell(dir, cross);
        self.is_free(lx, ly).then_some((lx, ly))
    }

    /// All free cells along the edge facing `dir`, in ascending cross order.
    pub(crate) fn free_edge_cells(&self, dir: Direction) -> Vec<(i32, i32)> {
        (0..self.size)
            .filter_map(|cross| self.free_edge_cell(dir, cross))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_materialize_is_one_way() {
        let mut chunk = Chunk::Unexplored;
        assert!(!chunk.is_materialized());

        chunk.materialize(4);
        assert!(chunk.is_materialized());

        // A second call must not reset counters.
        chunk.materialize(4).bump(1, 1, true);
        let grid = chunk.materialize(4);
        assert_eq!(grid.counter(1, 1), 1);
    }

    #[test]
    fn test_bump_floors_at_zero() {
        let mut grid = CellGrid::new(4);
        grid.bump(2, 3, false);
        assert_eq!(grid.counter(2, 3), 0);

        grid.bump(2, 3, true);
        grid.bump(2, 3, true);
        assert_eq!(grid.counter(2, 3), 2);

        grid.bump(2, 3, false);
        grid.bump(2, 3, false);
        grid.bump(2, 3, false);
        assert_eq!(grid.counter(2, 3), 0);
    }

    #[test]
    fn test_edge_cells_per_direction() {
        let grid = CellGrid::new(4);
        assert_eq!(grid.edge_cell(Direction::East, 2), (3, 2));
        assert_eq!(grid.edge_cell(Direction::West, 2), (0, 2));
        assert_eq!(grid.edge_cell(Direction::North, 1), (1, 3));
        assert_eq!(grid.edge_cell(Direction::South, 1), (1, 0));
    }

    #[test]
    fn test_free_edge_cell_respects_occupancy() {
        let mut grid = CellGrid::new(4);
        assert_eq!(grid.free_edge_cell(Direction::East, 1), Some((3, 1)));

        grid.bump(3, 1, true);
        assert_eq!(grid.free_edge_cell(Direction::East, 1), None);
        // Other cross offsets on the same edge stay free.
        assert_eq!(grid.free_edge_cell(Direction::East, 0), Some((3, 0)));
    }

    #[test]
    fn test_free_edge_cells_scan() {
        let mut grid = CellGrid::new(4);
        grid.bump(0, 0, true);
        grid.bump(0, 2, true);

        let free = grid.free_edge_cells(Direction::West);
        assert_eq!(free, vec![(0, 1), (0, 3)]);

        // The occupied corner also blocks the south edge scan.
        let free = grid.free_edge_cells(Direction::South);
        assert_eq!(free, vec![(1, 0), (2, 0), (3, 0)]);
    }
}
