//! Per-cell state machine values and their export codes

use crate::core_types::VegetationKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Untouched vegetation or terrain
    Unburnt(VegetationKind),
    /// On fire; `kind` is what was burning so an extinguished cell can revert.
    /// `ticks_remaining` is always at least 1.
    Burning { kind: VegetationKind, ticks_remaining: u32 },
    /// Burnt out; may regrow
    Destroyed,
}

impl CellState {
    #[inline]
    pub const fn is_burning(&self) -> bool {
        matches!(self, Self::Burning { .. })
    }

    #[inline]
    pub const fn is_destroyed(&self) -> bool {
        matches!(self, Self::Destroyed)
    }

    /// True only for unburnt water
    #[inline]
    pub const fn is_water(&self) -> bool {
        matches!(self, Self::Unburnt(VegetationKind::Water))
    }

    /// Vegetation kind for unburnt and burning cells
    pub const fn kind(&self) -> Option<VegetationKind> {
        match *self {
            Self::Unburnt(kind) | Self::Burning { kind, .. } => Some(kind),
            Self::Destroyed => None,
        }
    }

    /// Export code for this state
    pub const fn code(&self) -> CellCode {
        match self {
            Self::Unburnt(kind) => CellCode::for_kind(*kind),
            Self::Burning { .. } => CellCode::Burning,
            Self::Destroyed => CellCode::Destroyed,
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unburnt(kind) => write!(f, "{kind}"),
            Self::Burning {
                kind,
                ticks_remaining,
            } => write!(f, "Burning({kind}, {ticks_remaining})"),
            Self::Destroyed => f.write_str("Destroyed"),
        }
    }
}

/// Numeric cell type used by snapshot consumers (renderers, CSV export).
///
/// Burning collapses every kind into a single code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum CellCode {
    Water = 0,
    Rock = 1,
    Grass = 2,
    Bush = 3,
    SmallTree = 4,
    GrowingTree = 5,
    Tree = 6,
    Burning = 7,
    Destroyed = 8,
}

impl CellCode {
    /// Number of distinct codes
    pub const COUNT: usize = 9;

    /// Code for an unburnt cell of `kind`
    pub const fn for_kind(kind: VegetationKind) -> Self {
        match kind {
            VegetationKind::Water => Self::Water,
            VegetationKind::Rock => Self::Rock,
            VegetationKind::Grass => Self::Grass,
            VegetationKind::Bush => Self::Bush,
            VegetationKind::SmallTree => Self::SmallTree,
            VegetationKind::GrowingTree => Self::GrowingTree,
            VegetationKind::Tree => Self::Tree,
        }
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<CellState> for CellCode {
    fn from(state: CellState) -> Self {
        state.code()
    }
}

impl From<CellCode> for u8 {
    fn from(code: CellCode) -> u8 {
        code.as_u8()
    }
}

impl TryFrom<u8> for CellCode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Water,
            1 => Self::Rock,
            2 => Self::Grass,
            3 => Self::Bush,
            4 => Self::SmallTree,
            5 => Self::GrowingTree,
            6 => Self::Tree,
            7 => Self::Burning,
            8 => Self::Destroyed,
            other => return Err(format!("unknown cell code {other}")),
        })
    }
}
