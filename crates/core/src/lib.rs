//! Wildfire Cellular Automaton Core Library
//!
//! A probabilistic cellular automaton for wildfire spread over a 2D vegetation
//! grid. Each cell is water, rock, one of five vegetation kinds, burning, or
//! destroyed. Every step maps the whole grid to a new snapshot using
//! neighborhood-dependent ignition, extinguishing and regrowth chances driven
//! by a constant temperature, humidity and wind direction.
//!
//! ## Stepping model
//!
//! - Snapshots are immutable; each step produces a new [`Grid`]
//! - One uniform draw per cell per step, assigned in row-major order
//! - Cells of a step are evaluated in parallel once draws are fixed
//! - [`DrawPolicy`] chooses between one shared stream and per-cell keyed draws

// Core types and utilities
pub mod core_types;
pub mod error;

// Automaton
pub mod grid;
pub mod simulation;
pub mod transition;

// Re-export core types
pub use core_types::{
    Celsius, CompositionConfig, Environment, Fraction, VegetationKind, VegetationProperties,
    VegetationShares, VegetationTable, WindDirection,
};
pub use error::{FireSimError, Result};

// Re-export automaton types
pub use grid::{CellCode, CellRecord, CellState, Grid, GridStatistics};
pub use simulation::{DrawPolicy, History, SimulationDriver};
pub use transition::{SuccessionMode, TransitionEngine, TransitionParams};
