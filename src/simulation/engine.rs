use std::sync::Arc;

use crate::config::SimConfig;
use crate::simulation::cell::Cell;
use crate::simulation::error::GridError;
use crate::simulation::grid::Grid;
use crate::simulation::scheduler::{RunState, Scheduler};

/// Immutable published board. Cloning shares the allocation.
pub type Snapshot = Arc<Grid>;

/// Receives the full board after every state change
pub trait SnapshotSink {
    fn publish(&mut self, snapshot: &Snapshot);
}

impl<F: FnMut(&Snapshot)> SnapshotSink for F {
    fn publish(&mut self, snapshot: &Snapshot) {
        (self)(snapshot)
    }
}

/// Holds only the newest unconsumed snapshot.
///
/// A renderer drawing slower than the engine publishes sees the latest
/// board and skips the intermediate ones.
#[derive(Debug, Default)]
pub struct LatestSnapshot {
    pending: Option<Snapshot>,
}

impl LatestSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn take(&mut self) -> Option<Snapshot> {
        self.pending.take()
    }
}

impl SnapshotSink for LatestSnapshot {
    fn publish(&mut self, snapshot: &Snapshot) {
        self.pending = Some(Arc::clone(snapshot));
    }
}

/// Sole owner of the board and run state.
///
/// User intents and scheduler ticks all go through `&mut self`, so each
/// one replaces the snapshot as a whole before the next is observed.
pub struct SimulationEngine<S: SnapshotSink> {
    config: SimConfig,
    current: Snapshot,
    scheduler: Scheduler,
    generation: u64,
    sink: S,
}

impl<S: SnapshotSink> SimulationEngine<S> {
    /// Start paused on a randomized board
    pub fn new(config: SimConfig, sink: S) -> Self {
        let grid = Grid::randomized(config.rows, config.cols, config.alive_probability);
        Self::build(config, grid, sink)
    }

    /// Start paused on the given board, which must match the configured shape
    pub fn with_grid(config: SimConfig, grid: Grid, sink: S) -> Result<Self, GridError> {
        check_shape(&config, &grid)?;
        Ok(Self::build(config, grid, sink))
    }

    fn build(config: SimConfig, grid: Grid, sink: S) -> Self {
        let mut engine = Self {
            config,
            current: Arc::new(grid),
            scheduler: Scheduler::new(),
            generation: 0,
            sink,
        };
        engine.sink.publish(&engine.current);
        engine
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.current
    }

    pub fn run_state(&self) -> RunState {
        self.scheduler.state()
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Generations computed since the last clear or randomize
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn start(&mut self) {
        if self.scheduler.start() {
            log::info!("Simulation started at generation {}", self.generation);
        }
    }

    pub fn stop(&mut self) {
        if self.scheduler.stop() {
            log::info!("Simulation paused at generation {}", self.generation);
        }
    }

    pub fn toggle_running(&mut self) -> RunState {
        let state = self.scheduler.toggle();
        log::info!("Simulation {:?} at generation {}", state, self.generation);
        state
    }

    /// Advance one generation if running. Returns true if the board advanced.
    ///
    /// The run state and the current snapshot are both read at call time,
    /// so edits made since the previous tick are picked up.
    pub fn on_tick(&mut self) -> bool {
        if !self.scheduler.is_running() {
            return false;
        }

        let next = self.current.next_generation();
        self.generation += 1;
        log::debug!(
            "Generation {}: population {}",
            self.generation,
            next.population()
        );
        self.publish(next);
        true
    }

    pub fn set_cell(&mut self, row: usize, col: usize, state: Cell) -> Result<(), GridError> {
        let next = self.current.set_cell(row, col, state)?;
        self.publish(next);
        Ok(())
    }

    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<(), GridError> {
        let next = self.current.toggle_cell(row, col)?;
        self.publish(next);
        Ok(())
    }

    /// Replace the board with an empty one
    pub fn clear(&mut self) {
        log::info!("Board cleared");
        self.generation = 0;
        self.publish(Grid::empty(self.config.rows, self.config.cols));
    }

    /// Replace the board with a freshly randomized one
    pub fn randomize(&mut self) {
        let grid = Grid::randomized(
            self.config.rows,
            self.config.cols,
            self.config.alive_probability,
        );
        log::info!("Board randomized: population {}", grid.population());
        self.generation = 0;
        self.publish(grid);
    }

    /// Replace the board wholesale, keeping the generation count
    pub fn replace(&mut self, grid: Grid) -> Result<(), GridError> {
        check_shape(&self.config, &grid)?;
        self.publish(grid);
        Ok(())
    }

    fn publish(&mut self, grid: Grid) {
        self.current = Arc::new(grid);
        self.sink.publish(&self.current);
    }
}

fn check_shape(config: &SimConfig, grid: &Grid) -> Result<(), GridError> {
    if grid.rows() == config.rows && grid.cols() == config.cols {
        Ok(())
    } else {
        Err(GridError::DimensionMismatch {
            rows: config.rows,
            cols: config.cols,
            actual_rows: grid.rows(),
            actual_cols: grid.cols(),
        })
    }
}
