//! Read-only views of a grid for renderers and exporters
//!
//! Exporters write one row per `(step, x, y)` with the columns
//! `step,x,y,cell_type,temperature,humidity`. [`CellRecord`] serializes with
//! exactly those field names, so a CSV writer can consume [`Grid::records`]
//! directly.

use crate::grid::cell::CellCode;
use crate::grid::Grid;
use serde::{Deserialize, Serialize};

/// One exported cell of one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub step: u32,
    pub x: usize,
    pub y: usize,
    pub cell_type: CellCode,
    pub temperature: f32,
    pub humidity: f32,
}

/// Cell counts per export code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridStatistics {
    counts: [usize; CellCode::COUNT],
}

impl GridStatistics {
    /// Number of cells carrying `code`
    pub fn count(&self, code: CellCode) -> usize {
        self.counts[code.as_u8() as usize]
    }

    pub fn burning(&self) -> usize {
        self.count(CellCode::Burning)
    }

    pub fn destroyed(&self) -> usize {
        self.count(CellCode::Destroyed)
    }

    /// Unburnt cells other than water and rock
    pub fn vegetated(&self) -> usize {
        self.counts[CellCode::Grass.as_u8() as usize..=CellCode::Tree.as_u8() as usize]
            .iter()
            .sum()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl Grid {
    /// Export records for every cell, row-major
    pub fn records(&self) -> impl Iterator<Item = CellRecord> + '_ {
        let step = self.step();
        let temperature = self.environment().temperature().value();
        let humidity = self.environment().humidity().value();
        let width = self.width();

        self.cells()
            .iter()
            .enumerate()
            .map(move |(idx, cell)| CellRecord {
                step,
                x: idx % width,
                y: idx / width,
                cell_type: cell.code(),
                temperature,
                humidity,
            })
    }

    /// Count cells per export code
    pub fn statistics(&self) -> GridStatistics {
        let mut stats = GridStatistics::default();
        for cell in self.cells() {
            stats.counts[cell.code().as_u8() as usize] += 1;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Environment, VegetationKind};
    use crate::grid::CellState;

    fn sample_grid() -> Grid {
        let fire = CellState::Burning {
            kind: VegetationKind::Bush,
            ticks_remaining: 2,
        };
        Grid::from_rows(
            vec![
                vec![CellState::Unburnt(VegetationKind::Water), fire],
                vec![
                    CellState::Destroyed,
                    CellState::Unburnt(VegetationKind::Tree),
                ],
            ],
            Environment::new(35.0, 0.15).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_records_row_major_with_weather() {
        let grid = sample_grid();
        let records: Vec<_> = grid.records().collect();
        assert_eq!(records.len(), 4);

        let codes: Vec<u8> = records.iter().map(|r| r.cell_type.as_u8()).collect();
        assert_eq!(codes, vec![0, 7, 8, 6]);

        assert_eq!((records[1].x, records[1].y), (1, 0));
        assert_eq!((records[2].x, records[2].y), (0, 1));
        assert!(records.iter().all(|r| r.step == 0));
        assert!(records.iter().all(|r| r.temperature == 35.0));
        assert!(records.iter().all(|r| r.humidity == 0.15));
    }

    #[test]
    fn test_statistics() {
        let stats = sample_grid().statistics();
        assert_eq!(stats.total(), 4);
        assert_eq!(stats.burning(), 1);
        assert_eq!(stats.destroyed(), 1);
        assert_eq!(stats.vegetated(), 1);
        assert_eq!(stats.count(CellCode::Water), 1);
        assert_eq!(stats.count(CellCode::Rock), 0);
    }
}
