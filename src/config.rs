use std::time::Duration;

use thiserror::Error;

/// Board dimensions (50x50 = 2500 cells)
pub const GRID_ROWS: usize = 50;
pub const GRID_COLS: usize = 50;

/// Milliseconds between scheduler ticks
pub const TICK_PERIOD_MS: u64 = 150;

/// Chance that a cell starts alive when the board is randomized
pub const ALIVE_PROBABILITY: f64 = 0.3;

// ============================================
// Rendering
// ============================================

/// On-screen size of one cell in logical pixels
pub const CELL_SIZE_PX: u32 = 12;

/// Fraction of each cell's width drawn as border
pub const BORDER_FRACTION: f32 = 0.1;

/// Simulation parameters, fixed for the lifetime of the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub rows: usize,
    pub cols: usize,
    pub tick_period: Duration,
    pub alive_probability: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            tick_period: Duration::from_millis(TICK_PERIOD_MS),
            alive_probability: ALIVE_PROBABILITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("board must have at least one row and one column, got {rows}x{cols}")]
    EmptyBoard { rows: usize, cols: usize },
    #[error("tick period must be non-zero")]
    ZeroTickPeriod,
    #[error("alive probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyBoard {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.tick_period.is_zero() {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if !(0.0..=1.0).contains(&self.alive_probability) {
            return Err(ConfigError::InvalidProbability(self.alive_probability));
        }
        Ok(())
    }
}
