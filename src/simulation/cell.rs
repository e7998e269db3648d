/// State of a single board cell.
///
/// Layout: one `u32` per cell so a row-major slice of cells can be uploaded
/// to a GPU storage buffer without conversion.
#[repr(u32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, bytemuck::NoUninit)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Alive becomes Dead, Dead becomes Alive
    pub fn flipped(self) -> Self {
        match self {
            Cell::Alive => Cell::Dead,
            Cell::Dead => Cell::Alive,
        }
    }

    /// Apply the B3/S23 rule given the number of live Moore neighbours.
    ///
    /// Fewer than 2 or more than 3 neighbours kills the cell whatever its
    /// state; a dead cell with exactly 3 is born; anything else keeps its state.
    pub fn evolve(self, neighbors: u8) -> Self {
        match (self, neighbors) {
            (_, n) if !(2..=3).contains(&n) => Cell::Dead,
            (Cell::Dead, 3) => Cell::Alive,
            (state, _) => state,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_size() {
        assert_eq!(std::mem::size_of::<Cell>(), 4);
    }

    #[test]
    fn test_gpu_encoding() {
        let cells = [Cell::Dead, Cell::Alive];
        let words: &[u32] = bytemuck::cast_slice(&cells);
        assert_eq!(words, &[0, 1]);
    }

    #[test]
    fn test_flip_twice_is_identity() {
        for cell in [Cell::Dead, Cell::Alive] {
            assert_ne!(cell.flipped(), cell);
            assert_eq!(cell.flipped().flipped(), cell);
        }
    }

    #[test]
    fn test_death_by_under_and_overpopulation() {
        for n in [0, 1, 4, 5, 6, 7, 8] {
            assert_eq!(Cell::Alive.evolve(n), Cell::Dead, "alive with {} neighbours", n);
            assert_eq!(Cell::Dead.evolve(n), Cell::Dead, "dead with {} neighbours", n);
        }
    }

    #[test]
    fn test_birth_and_survival() {
        assert_eq!(Cell::Dead.evolve(3), Cell::Alive);
        assert_eq!(Cell::Dead.evolve(2), Cell::Dead);
        assert_eq!(Cell::Alive.evolve(2), Cell::Alive);
        assert_eq!(Cell::Alive.evolve(3), Cell::Alive);
    }
}
