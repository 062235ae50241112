//! Stochastic cell transition rules
//!
//! - `params`: tunable constants of the formulas
//! - `probability`: ignition and extinguishing chances read from a snapshot
//! - `engine`: per-cell state machine and whole-grid stepping

pub mod engine;
pub mod params;
pub mod probability;

pub use engine::{keyed_draws, TransitionEngine};
pub use params::{GrowthRule, GrowthTable, RegrowthChances, SuccessionMode, TransitionParams};
pub use probability::{extinguish_probability, ignition_probability, self_ignition, spread_ignition};
