//! Grid state model: cell states, snapshots and neighborhood queries

pub mod cell;
pub mod simulation_grid;
pub mod snapshot;

// Re-export main types
pub use cell::*;
pub use simulation_grid::*;
pub use snapshot::*;
