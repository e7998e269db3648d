use std::fmt;

use rand::Rng;

use crate::simulation::cell::Cell;
use crate::simulation::error::GridError;

/// Moore neighbourhood as (row, col) offsets: N, S, W, E, NW, NE, SW, SE.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Fixed-size rectangular board of cells, stored row-major.
///
/// The board is a bounded plane: positions outside `[0, rows) x [0, cols)`
/// do not exist and nothing wraps around the edges. Every transition
/// returns a fresh grid and leaves `self` untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell dead
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Dead; rows * cols],
        }
    }

    /// Create a grid where each cell is independently alive with `alive_probability`
    pub fn randomized(rows: usize, cols: usize, alive_probability: f64) -> Self {
        Self::randomized_with(rows, cols, alive_probability, &mut rand::thread_rng())
    }

    /// Same as [`Grid::randomized`] but drawing from the supplied generator
    pub fn randomized_with<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        alive_probability: f64,
        rng: &mut R,
    ) -> Self {
        let cells = (0..rows * cols)
            .map(|_| Cell::from(rng.gen::<f64>() < alive_probability))
            .collect();

        Self { rows, cols, cells }
    }

    /// Create a grid with exactly the listed cells alive
    pub fn from_alive(
        rows: usize,
        cols: usize,
        alive: &[(usize, usize)],
    ) -> Result<Self, GridError> {
        let mut grid = Self::empty(rows, cols);
        for &(row, col) in alive {
            let index = grid.index(row, col)?;
            grid.cells[index] = Cell::Alive;
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major cell slice, `rows * cols` long
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at `(row, col)`, or `None` off the board
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Copy of this grid with `(row, col)` forced to `state`
    pub fn set_cell(&self, row: usize, col: usize, state: Cell) -> Result<Self, GridError> {
        let index = self.index(row, col)?;
        let mut next = self.clone();
        next.cells[index] = state;
        Ok(next)
    }

    /// Copy of this grid with `(row, col)` flipped
    pub fn toggle_cell(&self, row: usize, col: usize) -> Result<Self, GridError> {
        let index = self.index(row, col)?;
        let mut next = self.clone();
        next.cells[index] = self.cells[index].flipped();
        Ok(next)
    }

    /// Number of live cells among the in-bounds Moore neighbours of `(row, col)`
    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| {
                let r = row.checked_add_signed(dr)?;
                let c = col.checked_add_signed(dc)?;
                self.get(r, c)
            })
            .filter(|cell| cell.is_alive())
            .count() as u8
    }

    /// Compute one generation.
    ///
    /// Neighbour counts are read from `self` only, so cells can be evaluated
    /// in any order.
    pub fn next_generation(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for row in 0..self.rows {
            for col in 0..self.cols {
                let current = self.cells[row * self.cols + col];
                cells.push(current.evolve(self.live_neighbors(row, col)));
            }
        }

        Self {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    /// Number of live cells on the board
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Coordinates of every live cell, row-major order
    pub fn alive_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(index, _)| (index / self.cols, index % self.cols))
            .collect()
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row < self.rows && col < self.cols {
            Ok(row * self.cols + col)
        } else {
            Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

/// One text line per row, `#` for alive and `.` for dead
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            for cell in row {
                f.write_str(if cell.is_alive() { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1usize..12, 1usize..12).prop_flat_map(|(rows, cols)| {
            proptest::collection::vec(any::<bool>(), rows * cols).prop_map(move |bits| Grid {
                rows,
                cols,
                cells: bits.into_iter().map(Cell::from).collect(),
            })
        })
    }

    /// Neighbour count written independently of `NEIGHBOR_OFFSETS`
    fn brute_force_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
        let mut count = 0;
        for r in row.saturating_sub(1)..=(row + 1).min(grid.rows - 1) {
            for c in col.saturating_sub(1)..=(col + 1).min(grid.cols - 1) {
                if (r, c) != (row, col) && grid.get(r, c) == Some(Cell::Alive) {
                    count += 1;
                }
            }
        }
        count
    }

    /// 5x5 board with (2, 2) set to `center` and its first `n` neighbours alive
    fn center_with_neighbors(center: Cell, n: usize) -> Grid {
        let mut alive: Vec<(usize, usize)> = NEIGHBOR_OFFSETS[..n]
            .iter()
            .map(|&(dr, dc)| ((2 + dr) as usize, (2 + dc) as usize))
            .collect();
        if center.is_alive() {
            alive.push((2, 2));
        }
        Grid::from_alive(5, 5, &alive).unwrap()
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::empty(50, 50);
        assert_eq!(grid.rows(), 50);
        assert_eq!(grid.cols(), 50);
        assert_eq!(grid.cells().len(), 2500);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_randomized_density() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::randomized_with(100, 100, 0.3, &mut rng);
        let density = grid.population() as f64 / 10_000.0;
        assert!(
            (density - 0.3).abs() < 0.03,
            "Alive proportion should be ~0.3, got {}",
            density
        );
    }

    #[test]
    fn test_randomized_extremes() {
        assert_eq!(Grid::randomized(10, 10, 0.0).population(), 0);
        assert_eq!(Grid::randomized(10, 10, 1.0).population(), 100);
    }

    #[test]
    fn test_set_cell() {
        let grid = Grid::empty(3, 3);
        let next = grid.set_cell(1, 2, Cell::Alive).unwrap();
        assert_eq!(next.get(1, 2), Some(Cell::Alive));
        assert_eq!(next.population(), 1);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_out_of_bounds_edits_are_rejected() {
        let grid = Grid::empty(4, 6);
        let expected = GridError::OutOfBounds {
            row: 4,
            col: 0,
            rows: 4,
            cols: 6,
        };
        assert_eq!(grid.toggle_cell(4, 0), Err(expected.clone()));
        assert_eq!(grid.set_cell(4, 0, Cell::Alive), Err(expected));
        assert!(grid.toggle_cell(0, 6).is_err());
        assert!(Grid::from_alive(4, 6, &[(9, 9)]).is_err());
    }

    #[test]
    fn test_corner_has_three_neighbor_positions() {
        let full = Grid::randomized(5, 5, 1.0);
        assert_eq!(full.live_neighbors(0, 0), 3);
        assert_eq!(full.live_neighbors(0, 2), 5);
        assert_eq!(full.live_neighbors(2, 2), 8);
        assert_eq!(full.live_neighbors(4, 4), 3);
    }

    #[test]
    fn test_no_wraparound() {
        // On a torus these would all neighbour (0, 0)
        let grid = Grid::from_alive(6, 6, &[(5, 5), (5, 0), (0, 5)]).unwrap();
        assert_eq!(grid.live_neighbors(0, 0), 0);
        assert_eq!(grid.next_generation().get(0, 0), Some(Cell::Dead));
    }

    #[test]
    fn test_corner_birth() {
        let grid = Grid::from_alive(6, 6, &[(0, 1), (1, 0), (1, 1)]).unwrap();
        let next = grid.next_generation();
        assert_eq!(next.get(0, 0), Some(Cell::Alive));
    }

    #[test]
    fn test_edge_birth() {
        let grid = Grid::from_alive(6, 6, &[(0, 2), (0, 4), (1, 3)]).unwrap();
        assert_eq!(grid.next_generation().get(0, 3), Some(Cell::Alive));
    }

    #[test]
    fn test_death_law_for_every_crowding_count() {
        for n in [0, 1, 4, 5, 6, 7, 8] {
            for center in [Cell::Alive, Cell::Dead] {
                let grid = center_with_neighbors(center, n);
                assert_eq!(grid.live_neighbors(2, 2) as usize, n);
                assert_eq!(
                    grid.next_generation().get(2, 2),
                    Some(Cell::Dead),
                    "{:?} centre with {} neighbours",
                    center,
                    n
                );
            }
        }
    }

    #[test]
    fn test_survival_and_birth_counts() {
        for n in [2, 3] {
            let grid = center_with_neighbors(Cell::Alive, n);
            assert_eq!(grid.next_generation().get(2, 2), Some(Cell::Alive));
        }
        let grid = center_with_neighbors(Cell::Dead, 3);
        assert_eq!(grid.next_generation().get(2, 2), Some(Cell::Alive));
        let grid = center_with_neighbors(Cell::Dead, 2);
        assert_eq!(grid.next_generation().get(2, 2), Some(Cell::Dead));
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = Grid::from_alive(5, 5, &[(2, 1), (2, 2), (2, 3)]).unwrap();
        let vertical = horizontal.next_generation();
        assert_eq!(vertical.alive_cells(), vec![(1, 2), (2, 2), (3, 2)]);
        assert_eq!(vertical.next_generation(), horizontal);
    }

    #[test]
    fn test_block_is_still_life() {
        let block = Grid::from_alive(6, 6, &[(2, 2), (2, 3), (3, 2), (3, 3)]).unwrap();
        let mut current = block.clone();
        for _ in 0..10 {
            current = current.next_generation();
            assert_eq!(current, block);
        }
    }

    #[test]
    fn test_block_in_corner_is_still_life() {
        let block = Grid::from_alive(4, 4, &[(0, 0), (0, 1), (1, 0), (1, 1)]).unwrap();
        assert_eq!(block.next_generation(), block);
    }

    #[test]
    fn test_display() {
        let grid = Grid::from_alive(2, 3, &[(0, 1), (1, 2)]).unwrap();
        assert_eq!(grid.to_string(), ".#.\n..#\n");
    }

    proptest! {
        #[test]
        fn next_generation_keeps_dimensions(grid in arb_grid()) {
            let next = grid.next_generation();
            prop_assert_eq!(next.rows(), grid.rows());
            prop_assert_eq!(next.cols(), grid.cols());
            prop_assert_eq!(next.cells().len(), grid.cells().len());
        }

        #[test]
        fn next_generation_leaves_input_unchanged(grid in arb_grid()) {
            let before = grid.clone();
            let _ = grid.next_generation();
            prop_assert_eq!(grid, before);
        }

        #[test]
        fn next_generation_matches_rule(grid in arb_grid()) {
            let next = grid.next_generation();
            for row in 0..grid.rows() {
                for col in 0..grid.cols() {
                    let n = brute_force_neighbors(&grid, row, col);
                    prop_assert_eq!(grid.live_neighbors(row, col), n);
                    let was = grid.get(row, col).unwrap();
                    let expected = match (was, n) {
                        (_, n) if n < 2 || n > 3 => Cell::Dead,
                        (Cell::Dead, 3) => Cell::Alive,
                        (state, _) => state,
                    };
                    prop_assert_eq!(next.get(row, col), Some(expected));
                }
            }
        }

        #[test]
        fn toggle_twice_is_identity(grid in arb_grid(), r in 0usize..12, c in 0usize..12) {
            let row = r % grid.rows();
            let col = c % grid.cols();
            let once = grid.toggle_cell(row, col).unwrap();
            prop_assert_ne!(&once, &grid);
            prop_assert_eq!(once.toggle_cell(row, col).unwrap(), grid);
        }
    }
}
