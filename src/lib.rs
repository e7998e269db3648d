//! Game of Life on a fixed, non-wrapping board.
//!
//! [`simulation::SimulationEngine`] owns the board and run state; a host
//! feeds it user intents and periodic ticks and receives every new
//! [`simulation::Snapshot`] through a [`simulation::SnapshotSink`].

pub mod config;
pub mod simulation;
