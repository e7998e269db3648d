mod cell;
mod engine;
mod error;
mod grid;
mod scheduler;

pub use cell::Cell;
pub use engine::{LatestSnapshot, SimulationEngine, Snapshot, SnapshotSink};
pub use error::GridError;
pub use grid::{Grid, NEIGHBOR_OFFSETS};
pub use scheduler::{RunState, Scheduler, TickTimer};
