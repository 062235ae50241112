//! Immutable 2D vegetation grid snapshot
//!
//! A `Grid` owns one row-major buffer of [`CellState`] plus the dimensions,
//! step counter and weather it was produced under. Nothing mutates a grid in
//! place: igniting a cell or advancing a step builds a new value, so older
//! snapshots stay valid for as long as a caller keeps them.

use crate::core_types::{CompositionConfig, Environment, WindDirection};
use crate::error::{FireSimError, Result};
use crate::grid::cell::{CellCode, CellState};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

/// Moore neighborhood offsets in row-major order
const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Small set of cardinal directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const EMPTY: DirectionSet = DirectionSet(0);

    #[inline]
    pub fn insert(&mut self, direction: WindDirection) {
        self.0 |= direction.bit();
    }

    #[inline]
    pub fn contains(&self, direction: WindDirection) -> bool {
        self.0 & direction.bit() != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<WindDirection> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = WindDirection>>(iter: I) -> Self {
        let mut set = DirectionSet::EMPTY;
        for direction in iter {
            set.insert(direction);
        }
        set
    }
}

/// One immutable simulation snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    width: usize,
    height: usize,
    step: u32,
    environment: Environment,
    wind: WindDirection,
    /// Cells in row-major order: `[y * width + x]`
    cells: Vec<CellState>,
}

impl Grid {
    /// Wind direction of a freshly created grid
    pub const INITIAL_WIND: WindDirection = WindDirection::East;

    /// Build a step-0 grid by sampling every cell from a composition
    ///
    /// Draws exactly one uniform value per cell, in row-major order.
    ///
    /// # Arguments
    ///
    /// * `width`, `height` - Grid dimensions in cells
    /// * `config` - Validated landscape composition
    /// * `environment` - Weather for the whole run
    /// * `rng` - Random source
    ///
    /// # Errors
    ///
    /// [`FireSimError::EmptyGrid`] if either dimension is zero.
    pub fn generate(
        width: usize,
        height: usize,
        config: &CompositionConfig,
        environment: Environment,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        check_dimensions(width, height)?;

        let cells = (0..width * height)
            .map(|_| CellState::Unburnt(config.sample(rng.random::<f32>())))
            .collect();
        let grid = Self::from_parts(width, height, 0, environment, Self::INITIAL_WIND, cells);

        debug!(
            "Generated {}x{} grid: T={}, RH={}",
            width,
            height,
            environment.temperature(),
            environment.humidity()
        );
        Ok(grid)
    }

    /// Build a step-0 grid with every cell set to `state`
    ///
    /// # Errors
    ///
    /// [`FireSimError::EmptyGrid`] if either dimension is zero.
    pub fn filled(
        width: usize,
        height: usize,
        state: CellState,
        environment: Environment,
    ) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self::from_parts(
            width,
            height,
            0,
            environment,
            Self::INITIAL_WIND,
            vec![state; width * height],
        ))
    }

    /// Build a step-0 grid from explicit rows
    ///
    /// # Errors
    ///
    /// [`FireSimError::EmptyGrid`] for no rows or empty rows,
    /// [`FireSimError::RaggedRow`] when rows differ in length.
    pub fn from_rows(rows: Vec<Vec<CellState>>, environment: Environment) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        check_dimensions(width, height)?;

        let mut cells = Vec::with_capacity(width * height);
        for (row, cells_in_row) in rows.into_iter().enumerate() {
            if cells_in_row.len() != width {
                return Err(FireSimError::RaggedRow {
                    row,
                    expected: width,
                    found: cells_in_row.len(),
                });
            }
            cells.extend(cells_in_row);
        }

        Ok(Self::from_parts(
            width,
            height,
            0,
            environment,
            Self::INITIAL_WIND,
            cells,
        ))
    }

    fn from_parts(
        width: usize,
        height: usize,
        step: u32,
        environment: Environment,
        wind: WindDirection,
        cells: Vec<CellState>,
    ) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            step,
            environment,
            wind,
            cells,
        }
    }

    /// Next snapshot: same dimensions and weather, `step + 1`
    pub(crate) fn successor(&self, cells: Vec<CellState>) -> Self {
        Self::from_parts(
            self.width,
            self.height,
            self.step + 1,
            self.environment,
            self.wind,
            cells,
        )
    }

    /// Copy of this grid with one cell replaced, `None` when out of bounds
    pub fn with_cell(&self, x: isize, y: isize, state: CellState) -> Option<Self> {
        let idx = self.index(x, y)?;
        let mut cells = self.cells.clone();
        cells[idx] = state;
        Some(Self::from_parts(
            self.width,
            self.height,
            self.step,
            self.environment,
            self.wind,
            cells,
        ))
    }

    /// Copy of this grid blowing from a different direction
    pub fn with_wind(&self, wind: WindDirection) -> Self {
        Self {
            wind,
            ..self.clone()
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Simulation step this snapshot represents
    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn wind(&self) -> WindDirection {
        self.wind
    }

    /// Cells in row-major order
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Rows top to bottom, each exactly `width` long
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[CellState]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Flat index for `(x, y)`, `None` outside the grid
    #[inline]
    pub fn index(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Cell at `(x, y)`, `None` outside the grid
    #[inline]
    pub fn get(&self, x: isize, y: isize) -> Option<CellState> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Export code of the cell at `(x, y)`
    pub fn cell_code(&self, x: isize, y: isize) -> Option<CellCode> {
        self.get(x, y).map(CellCode::from)
    }

    /// Up to 8 surrounding cells; positions off the grid are skipped
    pub fn neighbors8(&self, x: isize, y: isize) -> impl Iterator<Item = CellState> + '_ {
        MOORE_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy)| self.get(x + dx, y + dy))
    }

    /// Up to 4 cardinal neighbors, tagged with the direction toward them
    pub fn neighbors4_with_direction(
        &self,
        x: isize,
        y: isize,
    ) -> impl Iterator<Item = (CellState, WindDirection)> + '_ {
        WindDirection::ALL.into_iter().filter_map(move |dir| {
            let (dx, dy) = dir.offset();
            self.get(x + dx, y + dy).map(|cell| (cell, dir))
        })
    }

    /// Burning cells in the Moore neighborhood
    pub fn count_burning(&self, x: isize, y: isize) -> usize {
        self.neighbors8(x, y).filter(CellState::is_burning).count()
    }

    /// Water cells in the Moore neighborhood
    pub fn count_water(&self, x: isize, y: isize) -> usize {
        self.neighbors8(x, y).filter(CellState::is_water).count()
    }

    /// Cardinal directions whose neighbor is burning
    pub fn burning_cardinal_directions(&self, x: isize, y: isize) -> DirectionSet {
        self.neighbors4_with_direction(x, y)
            .filter(|(cell, _)| cell.is_burning())
            .map(|(_, dir)| dir)
            .collect()
    }

    /// `(x, y)` of every cell in row-major order
    pub fn positions(&self) -> impl Iterator<Item = (isize, isize)> {
        let width = self.width;
        (0..self.cells.len()).map(move |idx| ((idx % width) as isize, (idx / width) as isize))
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(FireSimError::EmptyGrid { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{VegetationKind, VegetationShares};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const GRASS: CellState = CellState::Unburnt(VegetationKind::Grass);
    const WATER: CellState = CellState::Unburnt(VegetationKind::Water);
    const FIRE: CellState = CellState::Burning {
        kind: VegetationKind::Grass,
        ticks_remaining: 2,
    };

    fn grass_grid(width: usize, height: usize) -> Grid {
        Grid::filled(width, height, GRASS, Environment::default()).unwrap()
    }

    #[test]
    fn test_get_out_of_bounds_is_none() {
        let grid = grass_grid(3, 2);
        assert_eq!(grid.get(0, 0), Some(GRASS));
        assert_eq!(grid.get(2, 1), Some(GRASS));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(0, -1), None);
    }

    #[test]
    fn test_neighbor_counts_at_edges() {
        let grid = grass_grid(3, 3);
        assert_eq!(grid.neighbors8(1, 1).count(), 8);
        assert_eq!(grid.neighbors8(0, 0).count(), 3);
        assert_eq!(grid.neighbors8(1, 0).count(), 5);
        assert_eq!(grid.neighbors4_with_direction(1, 1).count(), 4);
        assert_eq!(grid.neighbors4_with_direction(0, 0).count(), 2);

        let single = grass_grid(1, 1);
        assert_eq!(single.neighbors8(0, 0).count(), 0);
        assert_eq!(single.neighbors4_with_direction(0, 0).count(), 0);
    }

    #[test]
    fn test_cardinal_directions_point_toward_neighbor() {
        let grid = grass_grid(3, 3)
            .with_cell(1, 0, FIRE)
            .and_then(|g| g.with_cell(0, 1, FIRE))
            .unwrap();

        let dirs = grid.burning_cardinal_directions(1, 1);
        assert!(dirs.contains(WindDirection::North));
        assert!(dirs.contains(WindDirection::West));
        assert!(!dirs.contains(WindDirection::East));
        assert!(!dirs.contains(WindDirection::South));
        assert_eq!(grid.count_burning(1, 1), 2);
    }

    #[test]
    fn test_diagonal_fire_is_not_cardinal() {
        let grid = grass_grid(3, 3).with_cell(2, 2, FIRE).unwrap();
        assert_eq!(grid.count_burning(1, 1), 1);
        assert!(grid.burning_cardinal_directions(1, 1).is_empty());
    }

    #[test]
    fn test_count_water() {
        let grid = Grid::from_rows(
            vec![
                vec![WATER, GRASS, WATER],
                vec![GRASS, GRASS, GRASS],
                vec![WATER, GRASS, GRASS],
            ],
            Environment::default(),
        )
        .unwrap();
        assert_eq!(grid.count_water(1, 1), 3);
        assert_eq!(grid.count_water(0, 0), 0);
        assert_eq!(grid.count_water(1, 0), 2);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Grid::from_rows(
            vec![vec![GRASS, GRASS], vec![GRASS]],
            Environment::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            FireSimError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        assert!(matches!(
            Grid::from_rows(Vec::new(), Environment::default()),
            Err(FireSimError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn test_with_cell_leaves_original_untouched() {
        let grid = grass_grid(2, 2);
        let changed = grid.with_cell(1, 1, FIRE).unwrap();
        assert_eq!(grid.get(1, 1), Some(GRASS));
        assert_eq!(changed.get(1, 1), Some(FIRE));
        assert_eq!(changed.step(), grid.step());
        assert!(grid.with_cell(2, 0, FIRE).is_none());
    }

    #[test]
    fn test_generate_shape_and_defaults() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let grid = Grid::generate(
            5,
            4,
            &CompositionConfig::default(),
            Environment::default(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.step(), 0);
        assert_eq!(grid.wind(), WindDirection::East);
        assert_eq!(grid.rows().len(), 4);
        assert!(grid.rows().all(|row| row.len() == 5));
        assert!(grid.cells().iter().all(|c| matches!(c, CellState::Unburnt(_))));
    }

    #[test]
    fn test_generate_rejects_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let config = CompositionConfig::new(VegetationShares {
            grass: 1.0,
            ..VegetationShares::default()
        })
        .unwrap();
        assert_eq!(
            Grid::generate(0, 3, &config, Environment::default(), &mut rng),
            Err(FireSimError::EmptyGrid {
                width: 0,
                height: 3
            })
        );
    }

    #[test]
    fn test_positions_row_major() {
        let grid = grass_grid(2, 2);
        let positions: Vec<_> = grid.positions().collect();
        assert_eq!(positions, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }
}
