//! Run driver: owns the random source and steps grids into a history
//!
//! `SimulationDriver` combines:
//! - a seeded `ChaCha8Rng` for grid generation and shared-stream draws
//! - a [`TransitionEngine`] holding the formula constants
//! - a [`DrawPolicy`] fixing how each cell's draw is chosen

pub mod history;

pub use history::History;

use crate::core_types::{CompositionConfig, Environment};
use crate::error::Result;
use crate::grid::Grid;
use crate::transition::TransitionEngine;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// How the per-cell draw of each step is chosen.
///
/// Both policies give one draw per cell per step and let the cells of a step
/// be evaluated in parallel; they differ in what a given seed reproduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrawPolicy {
    /// One generator for the whole run. Each step takes the next
    /// `width * height` values in row-major order, so the draws of a step
    /// depend on every step before it.
    #[default]
    SharedStream,
    /// The draw for `(x, y)` at step `s` is derived from `(seed, s, x, y)`
    /// alone; the grid generator is not touched after generation.
    CellKeyed,
}

impl fmt::Display for DrawPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawPolicy::SharedStream => f.write_str("shared-stream"),
            DrawPolicy::CellKeyed => f.write_str("cell-keyed"),
        }
    }
}

/// Seeded driver producing grid histories
#[derive(Debug, Clone)]
pub struct SimulationDriver {
    engine: TransitionEngine,
    rng: ChaCha8Rng,
    seed: u64,
    policy: DrawPolicy,
}

impl SimulationDriver {
    /// Driver with the standard transition constants
    ///
    /// # Arguments
    ///
    /// * `seed` - Seed for generation and every step's draws
    /// * `policy` - How draws are assigned to cells
    pub fn new(seed: u64, policy: DrawPolicy) -> Self {
        Self::with_engine(TransitionEngine::default(), seed, policy)
    }

    pub fn with_engine(engine: TransitionEngine, seed: u64, policy: DrawPolicy) -> Self {
        Self {
            engine,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            policy,
        }
    }

    pub fn engine(&self) -> &TransitionEngine {
        &self.engine
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn policy(&self) -> DrawPolicy {
        self.policy
    }

    /// Generate a step-0 grid from the driver's generator
    ///
    /// # Errors
    ///
    /// [`crate::FireSimError::EmptyGrid`] if either dimension is zero.
    pub fn create_grid(
        &mut self,
        width: usize,
        height: usize,
        config: &CompositionConfig,
        environment: Environment,
    ) -> Result<Grid> {
        Grid::generate(width, height, config, environment, &mut self.rng)
    }

    /// See [`TransitionEngine::ignite`]
    pub fn ignite(&self, grid: &Grid, x: isize, y: isize) -> Grid {
        self.engine.ignite(grid, x, y)
    }

    /// Advance `grid` by one step under the driver's draw policy
    pub fn step(&mut self, grid: &Grid) -> Grid {
        match self.policy {
            DrawPolicy::SharedStream => self.engine.advance(grid, &mut self.rng),
            DrawPolicy::CellKeyed => self.engine.advance_keyed(grid, self.seed),
        }
    }

    /// Run from `initial` until the step counter reaches `max_steps`.
    ///
    /// The history holds `initial` unmodified followed by one snapshot per
    /// step, `max_steps - initial.step() + 1` in total. A grid already past
    /// `max_steps` yields a history of just `initial`.
    pub fn run(&mut self, initial: &Grid, max_steps: u32) -> History {
        info!(
            "Starting run: {}x{} grid, steps {}..={}, seed={}, policy={}",
            initial.width(),
            initial.height(),
            initial.step(),
            max_steps,
            self.seed,
            self.policy
        );

        let mut history = History::new(initial.clone());
        while history.last().step() < max_steps {
            let next = self.step(history.last());
            let stats = next.statistics();
            debug!(
                "Step {}: {} burning, {} destroyed, {} vegetated",
                next.step(),
                stats.burning(),
                stats.destroyed(),
                stats.vegetated()
            );
            history.push(next);
        }

        let last = history.last().statistics();
        info!(
            "Run finished: {} snapshots, {} burning, {} destroyed",
            history.len(),
            last.burning(),
            last.destroyed()
        );
        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::VegetationKind;

    fn grass_field(driver: &mut SimulationDriver) -> Grid {
        driver
            .create_grid(
                8,
                6,
                &CompositionConfig::uniform(VegetationKind::Grass),
                Environment::default(),
            )
            .unwrap()
    }

    #[test]
    fn test_run_length_and_steps() {
        let mut driver = SimulationDriver::new(7, DrawPolicy::SharedStream);
        let grid = grass_field(&mut driver);
        let grid = driver.ignite(&grid, 3, 3);

        let history = driver.run(&grid, 5);
        assert_eq!(history.len(), 6);
        assert_eq!(history.first(), &grid);
        for (expected, snapshot) in history.iter().enumerate() {
            assert_eq!(snapshot.step(), expected as u32);
        }
    }

    #[test]
    fn test_run_past_max_steps_returns_initial() {
        let mut driver = SimulationDriver::new(7, DrawPolicy::CellKeyed);
        let mut grid = grass_field(&mut driver);
        for _ in 0..3 {
            grid = driver.step(&grid);
        }

        let history = driver.run(&grid, 1);
        assert_eq!(history.len(), 1);
        assert_eq!(history.first(), &grid);

        let history = driver.run(&grid, 3);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_run_from_later_step() {
        let mut driver = SimulationDriver::new(11, DrawPolicy::SharedStream);
        let grid = grass_field(&mut driver);
        let grid = driver.step(&grid);
        let grid = driver.step(&grid);

        let history = driver.run(&grid, 4);
        assert_eq!(history.len(), 3);
        assert_eq!(history.get(2), Some(&grid));
        assert_eq!(history.last().step(), 4);
    }

    #[test]
    fn test_policy_display() {
        assert_eq!(DrawPolicy::SharedStream.to_string(), "shared-stream");
        assert_eq!(DrawPolicy::CellKeyed.to_string(), "cell-keyed");
        assert_eq!(DrawPolicy::default(), DrawPolicy::SharedStream);
    }
}
