//! Per-cell stochastic transition rules
//!
//! Every step reads one snapshot and writes a fresh cell buffer; a cell never
//! observes a sibling's next state. Exactly one uniform draw in [0, 1) is
//! assigned to every cell, indexed row-major, whether or not its state uses it.
//! Once the draws are fixed, cells are evaluated in parallel with rayon and the
//! result is independent of thread count.

use crate::core_types::{VegetationKind, VegetationTable};
use crate::error::{FireSimError, Result};
use crate::grid::{CellState, Grid};
use crate::transition::params::{SuccessionMode, TransitionParams};
use crate::transition::probability::{extinguish_probability, ignition_probability};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::trace;

/// Pure transition function over grid snapshots
#[derive(Debug, Clone, Default)]
pub struct TransitionEngine {
    params: TransitionParams,
    vegetation: VegetationTable,
}

impl TransitionEngine {
    /// Create an engine from validated constants
    ///
    /// # Errors
    ///
    /// [`FireSimError::InvalidParameter`] if a transition constant is out of
    /// range, or if an ignitable kind has a zero burn duration or a base
    /// ignition probability outside [0, 1].
    pub fn new(params: TransitionParams, vegetation: VegetationTable) -> Result<Self> {
        params.validate()?;
        for kind in VegetationKind::ALL {
            let props = vegetation.properties(kind);
            if !props.ignitable {
                continue;
            }
            if props.burn_duration == 0 {
                return Err(FireSimError::InvalidParameter {
                    name: "burn_duration",
                    value: 0.0,
                });
            }
            if !(0.0..=1.0).contains(&props.base_ignition_probability) {
                return Err(FireSimError::InvalidParameter {
                    name: "base_ignition_probability",
                    value: props.base_ignition_probability,
                });
            }
            if !props.self_ignition_multiplier.is_finite() || props.self_ignition_multiplier < 0.0
            {
                return Err(FireSimError::InvalidParameter {
                    name: "self_ignition_multiplier",
                    value: props.self_ignition_multiplier,
                });
            }
        }
        Ok(Self { params, vegetation })
    }

    pub fn params(&self) -> &TransitionParams {
        &self.params
    }

    pub fn vegetation(&self) -> &VegetationTable {
        &self.vegetation
    }

    /// See [`extinguish_probability`]
    pub fn extinguish_probability(&self, grid: &Grid, x: isize, y: isize) -> f32 {
        extinguish_probability(&self.params, grid, x, y)
    }

    /// See [`ignition_probability`]
    pub fn ignition_probability(
        &self,
        grid: &Grid,
        x: isize,
        y: isize,
        kind: VegetationKind,
    ) -> f32 {
        ignition_probability(&self.params, &self.vegetation, grid, x, y, kind)
    }

    /// Freshly ignited state for `kind`
    fn ignited(&self, kind: VegetationKind) -> CellState {
        CellState::Burning {
            kind,
            ticks_remaining: self.vegetation.burn_duration(kind),
        }
    }

    /// Next state of the cell at `(x, y)` for a given draw, `None` off the grid
    pub fn next_state(&self, grid: &Grid, x: isize, y: isize, draw: f32) -> Option<CellState> {
        grid.get(x, y).map(|cell| self.evolve(grid, cell, x, y, draw))
    }

    fn evolve(&self, grid: &Grid, cell: CellState, x: isize, y: isize, draw: f32) -> CellState {
        match cell {
            CellState::Burning {
                ticks_remaining, ..
            } if ticks_remaining <= 1 => CellState::Destroyed,

            CellState::Burning {
                kind,
                ticks_remaining,
            } => {
                if draw < self.extinguish_probability(grid, x, y) {
                    CellState::Unburnt(kind)
                } else {
                    CellState::Burning {
                        kind,
                        ticks_remaining: ticks_remaining - 1,
                    }
                }
            }

            CellState::Unburnt(kind) if self.vegetation.ignitable(kind) => {
                let p_ignite = self.ignition_probability(grid, x, y, kind);
                if draw < p_ignite {
                    return self.ignited(kind);
                }
                match self.params.succession {
                    SuccessionMode::Reference => cell,
                    SuccessionMode::GrowWhenUnignited => {
                        // draw is uniform on [p_ignite, 1) here; rescale to [0, 1)
                        let residual = (draw - p_ignite) / (1.0 - p_ignite);
                        self.params
                            .growth
                            .select(kind, residual)
                            .map_or(cell, CellState::Unburnt)
                    }
                }
            }

            // Water and rock
            CellState::Unburnt(_) => cell,

            CellState::Destroyed => self
                .params
                .regrowth
                .select(draw)
                .map_or(CellState::Destroyed, CellState::Unburnt),
        }
    }

    /// Advance one step using caller-supplied draws
    ///
    /// `draws[i]` is the draw for the cell at row-major index `i`. Returns
    /// `None` unless there is exactly one draw per cell.
    pub fn advance_with_draws(&self, grid: &Grid, draws: &[f32]) -> Option<Grid> {
        if draws.len() != grid.cells().len() {
            trace!(
                "Rejected {} draws for a {}x{} grid",
                draws.len(),
                grid.width(),
                grid.height()
            );
            return None;
        }
        Some(self.step_cells(grid, draws))
    }

    /// Evaluate every cell in parallel; `draws` holds one value per cell
    fn step_cells(&self, grid: &Grid, draws: &[f32]) -> Grid {
        let width = grid.width();

        let next: Vec<CellState> = grid
            .cells()
            .par_iter()
            .zip(draws.par_iter())
            .enumerate()
            .map(|(idx, (&cell, &draw))| {
                let x = (idx % width) as isize;
                let y = (idx / width) as isize;
                self.evolve(grid, cell, x, y, draw)
            })
            .collect();

        grid.successor(next)
    }

    /// Advance one step drawing from a shared generator in row-major order
    pub fn advance(&self, grid: &Grid, rng: &mut impl Rng) -> Grid {
        let draws: Vec<f32> = (0..grid.cells().len())
            .map(|_| rng.random::<f32>())
            .collect();
        self.step_cells(grid, &draws)
    }

    /// Advance one step with draws keyed by `(seed, step, x, y)`
    ///
    /// The draw for row-major cell `i` of a snapshot at step `s` is word `i` of
    /// a `ChaCha8` stream `s` seeded with `seed`, so any cell's draw can be
    /// reproduced without generating the others.
    pub fn advance_keyed(&self, grid: &Grid, seed: u64) -> Grid {
        let draws = keyed_draws(seed, grid.step(), grid.cells().len());
        self.step_cells(grid, &draws)
    }

    /// Set one unburnt, ignitable cell on fire.
    ///
    /// Out-of-bounds targets and cells that cannot ignite (water, rock,
    /// already burning, destroyed) leave the grid unchanged.
    pub fn ignite(&self, grid: &Grid, x: isize, y: isize) -> Grid {
        match grid.get(x, y) {
            Some(CellState::Unburnt(kind)) if self.vegetation.ignitable(kind) => {
                match grid.with_cell(x, y, self.ignited(kind)) {
                    Some(ignited) => {
                        trace!("Ignited {} at ({}, {})", kind, x, y);
                        ignited
                    }
                    None => grid.clone(),
                }
            }
            Some(cell) => {
                trace!("Ignite at ({}, {}) ignored: {} cannot ignite", x, y, cell);
                grid.clone()
            }
            None => {
                trace!("Ignite at ({}, {}) ignored: out of bounds", x, y);
                grid.clone()
            }
        }
    }
}

/// Row-major draws for one step under the keyed policy
pub fn keyed_draws(seed: u64, step: u32, count: usize) -> Vec<f32> {
    let mut base = ChaCha8Rng::seed_from_u64(seed);
    base.set_stream(u64::from(step));

    (0..count)
        .into_par_iter()
        .map(|idx| {
            let mut rng = base.clone();
            rng.set_word_pos(idx as u128);
            rng.random::<f32>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Environment, VegetationProperties};

    const GRASS: CellState = CellState::Unburnt(VegetationKind::Grass);

    fn burning(kind: VegetationKind, ticks_remaining: u32) -> CellState {
        CellState::Burning {
            kind,
            ticks_remaining,
        }
    }

    fn single(cell: CellState) -> Grid {
        Grid::filled(1, 1, cell, Environment::default()).unwrap()
    }

    #[test]
    fn test_last_tick_always_destroys() {
        let engine = TransitionEngine::default();
        let grid = single(burning(VegetationKind::Tree, 1));
        for draw in [0.0, 0.5, 0.999] {
            assert_eq!(
                engine.next_state(&grid, 0, 0, draw),
                Some(CellState::Destroyed)
            );
        }
    }

    #[test]
    fn test_burning_counts_down_or_reverts() {
        let engine = TransitionEngine::default();
        let grid = single(burning(VegetationKind::Bush, 3));
        let p = engine.extinguish_probability(&grid, 0, 0);
        assert!(p > 0.0);

        assert_eq!(
            engine.next_state(&grid, 0, 0, p / 2.0),
            Some(CellState::Unburnt(VegetationKind::Bush))
        );
        assert_eq!(
            engine.next_state(&grid, 0, 0, p),
            Some(burning(VegetationKind::Bush, 2))
        );
    }

    #[test]
    fn test_terrain_is_absorbing() {
        let engine = TransitionEngine::default();
        for kind in [VegetationKind::Water, VegetationKind::Rock] {
            let grid = Grid::filled(3, 3, CellState::Unburnt(kind), Environment::default())
                .unwrap()
                .with_cell(0, 0, burning(VegetationKind::Grass, 3))
                .unwrap();
            assert_eq!(
                engine.next_state(&grid, 1, 1, 0.0),
                Some(CellState::Unburnt(kind))
            );
        }
    }

    #[test]
    fn test_destroyed_regrowth_thresholds() {
        let engine = TransitionEngine::default();
        let grid = single(CellState::Destroyed);
        let expect = [
            (0.01, CellState::Unburnt(VegetationKind::Grass)),
            (0.06, CellState::Unburnt(VegetationKind::Bush)),
            (0.075, CellState::Unburnt(VegetationKind::SmallTree)),
            (0.083, CellState::Unburnt(VegetationKind::GrowingTree)),
            (0.5, CellState::Destroyed),
        ];
        for (draw, state) in expect {
            assert_eq!(engine.next_state(&grid, 0, 0, draw), Some(state), "draw {draw}");
        }
    }

    #[test]
    fn test_reference_order_never_grows() {
        let engine = TransitionEngine::default();
        let grid = single(GRASS);
        let p = engine.ignition_probability(&grid, 0, 0, VegetationKind::Grass);
        // Just above the ignition threshold: growth would fire if it were checked
        assert_eq!(engine.next_state(&grid, 0, 0, p + 1e-6), Some(GRASS));
    }

    #[test]
    fn test_grow_when_unignited() {
        let params = TransitionParams {
            succession: SuccessionMode::GrowWhenUnignited,
            ..TransitionParams::default()
        };
        let engine = TransitionEngine::new(params, VegetationTable::standard()).unwrap();
        let grid = single(GRASS);
        let p = engine.ignition_probability(&grid, 0, 0, VegetationKind::Grass);

        assert_eq!(
            engine.next_state(&grid, 0, 0, p + 1e-6),
            Some(CellState::Unburnt(VegetationKind::Bush))
        );
        assert_eq!(engine.next_state(&grid, 0, 0, 0.9), Some(GRASS));
        assert_eq!(
            engine.next_state(&grid, 0, 0, 0.0),
            Some(burning(VegetationKind::Grass, 2))
        );
    }

    #[test]
    fn test_ignite_targets() {
        let engine = TransitionEngine::default();
        let grid = Grid::from_rows(
            vec![vec![
                GRASS,
                CellState::Unburnt(VegetationKind::Water),
                CellState::Unburnt(VegetationKind::Rock),
                CellState::Destroyed,
            ]],
            Environment::default(),
        )
        .unwrap();

        let lit = engine.ignite(&grid, 0, 0);
        assert_eq!(lit.get(0, 0), Some(burning(VegetationKind::Grass, 2)));
        assert_eq!(lit.step(), 0);

        for x in 1..4 {
            assert_eq!(engine.ignite(&grid, x, 0), grid);
        }
        assert_eq!(engine.ignite(&grid, -1, 0), grid);
        assert_eq!(engine.ignite(&grid, 0, 1), grid);
        // Re-igniting a burning cell does not reset its countdown
        assert_eq!(engine.ignite(&lit, 0, 0), lit);
    }

    #[test]
    fn test_new_rejects_zero_burn_duration() {
        let table = VegetationTable::standard().with(
            VegetationKind::Grass,
            VegetationProperties {
                burn_duration: 0,
                ..VegetationProperties::GRASS
            },
        );
        assert!(TransitionEngine::new(TransitionParams::default(), table).is_err());
    }

    #[test]
    fn test_keyed_draws_are_position_stable() {
        let all = keyed_draws(99, 4, 50);
        let again = keyed_draws(99, 4, 50);
        assert_eq!(all, again);
        assert!(all.iter().all(|d| (0.0..1.0).contains(d)));

        // A prefix is the same whatever the grid size
        let prefix = keyed_draws(99, 4, 10);
        assert_eq!(&all[..10], &prefix[..]);

        // Another step uses another stream
        assert_ne!(keyed_draws(99, 5, 50), all);
    }

    #[test]
    fn test_advance_increments_step_and_keeps_weather() {
        let engine = TransitionEngine::default();
        let grid = Grid::filled(4, 3, GRASS, Environment::new(31.0, 0.2).unwrap()).unwrap();
        let next = engine.advance_with_draws(&grid, &[0.99; 12]).unwrap();
        assert_eq!(next.step(), 1);
        assert_eq!(next.environment(), grid.environment());
        assert_eq!(next.wind(), grid.wind());
        assert_eq!((next.width(), next.height()), (4, 3));
    }

    #[test]
    fn test_advance_requires_one_draw_per_cell() {
        let engine = TransitionEngine::default();
        let grid = Grid::filled(2, 2, GRASS, Environment::default()).unwrap();
        assert!(engine.advance_with_draws(&grid, &[]).is_none());
        assert!(engine.advance_with_draws(&grid, &[0.5; 3]).is_none());
        assert!(engine.advance_with_draws(&grid, &[0.5; 5]).is_none());
        assert!(engine.advance_with_draws(&grid, &[0.5; 4]).is_some());
    }
}
