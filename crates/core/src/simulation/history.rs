//! Ordered snapshots of one run

use crate::grid::Grid;
use serde::Serialize;

/// Snapshots of a run in step order, one per step and contiguous.
///
/// Never empty: the first entry is always the grid the run started from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct History {
    snapshots: Vec<Grid>,
}

impl History {
    pub(crate) fn new(initial: Grid) -> Self {
        Self {
            snapshots: vec![initial],
        }
    }

    pub(crate) fn push(&mut self, grid: Grid) {
        debug_assert_eq!(grid.step(), self.last().step() + 1);
        self.snapshots.push(grid);
    }

    /// Snapshot whose step counter equals `step`, if the run reached it
    pub fn get(&self, step: u32) -> Option<&Grid> {
        let offset = step.checked_sub(self.first().step())?;
        self.snapshots.get(offset as usize)
    }

    pub fn first(&self) -> &Grid {
        &self.snapshots[0]
    }

    pub fn last(&self) -> &Grid {
        &self.snapshots[self.snapshots.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Grid> {
        self.snapshots.iter()
    }

    pub fn into_vec(self) -> Vec<Grid> {
        self.snapshots
    }

    /// Burning cell count of every snapshot, in order
    pub fn burning_series(&self) -> Vec<usize> {
        self.snapshots
            .iter()
            .map(|grid| grid.statistics().burning())
            .collect()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Grid;
    type IntoIter = std::slice::Iter<'a, Grid>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Environment, VegetationKind};
    use crate::grid::CellState;

    fn start(step: u32) -> Grid {
        let mut grid = Grid::filled(
            2,
            2,
            CellState::Unburnt(VegetationKind::Grass),
            Environment::default(),
        )
        .unwrap();
        for _ in 0..step {
            grid = grid.successor(grid.cells().to_vec());
        }
        grid
    }

    #[test]
    fn test_get_by_step_counter() {
        let initial = start(3);
        let mut history = History::new(initial.clone());
        history.push(initial.successor(initial.cells().to_vec()));

        assert_eq!(history.len(), 2);
        assert!(!history.is_empty());
        assert!(history.get(2).is_none());
        assert_eq!(history.get(3), Some(&initial));
        assert_eq!(history.get(4).map(Grid::step), Some(4));
        assert!(history.get(5).is_none());
        assert_eq!(history.last().step(), 4);
    }

    #[test]
    fn test_burning_series() {
        let initial = start(0)
            .with_cell(
                1,
                1,
                CellState::Burning {
                    kind: VegetationKind::Grass,
                    ticks_remaining: 2,
                },
            )
            .unwrap();
        let mut history = History::new(initial.clone());
        history.push(initial.successor(vec![CellState::Destroyed; 4]));
        assert_eq!(history.burning_series(), vec![1, 0]);
        assert_eq!(history.into_vec().len(), 2);
    }
}
