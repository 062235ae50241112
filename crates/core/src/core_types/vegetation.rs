//! Vegetation kinds and their fire constants

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terrain or vegetation occupying a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VegetationKind {
    Water,
    Rock,
    Grass,
    Bush,
    SmallTree,
    GrowingTree,
    Tree,
}

impl VegetationKind {
    /// Every kind, in composition/export order
    pub const ALL: [VegetationKind; 7] = [
        VegetationKind::Water,
        VegetationKind::Rock,
        VegetationKind::Grass,
        VegetationKind::Bush,
        VegetationKind::SmallTree,
        VegetationKind::GrowingTree,
        VegetationKind::Tree,
    ];

    /// Position in [`Self::ALL`], also the export code of an unburnt cell
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Water => 0,
            Self::Rock => 1,
            Self::Grass => 2,
            Self::Bush => 3,
            Self::SmallTree => 4,
            Self::GrowingTree => 5,
            Self::Tree => 6,
        }
    }

    /// Water and rock are terrain, everything else is vegetation
    pub const fn is_vegetation(self) -> bool {
        !matches!(self, Self::Water | Self::Rock)
    }

    /// Human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Water => "Water",
            Self::Rock => "Rock",
            Self::Grass => "Grass",
            Self::Bush => "Bush",
            Self::SmallTree => "SmallTree",
            Self::GrowingTree => "GrowingTree",
            Self::Tree => "Tree",
        }
    }
}

impl fmt::Display for VegetationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fire behaviour constants for one vegetation kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VegetationProperties {
    /// Whether the kind can catch fire at all
    pub ignitable: bool,
    /// Steps a burning cell of this kind lasts before it is destroyed
    pub burn_duration: u32,
    /// Spread ignition probability per unit of neighbour pressure (0-1)
    pub base_ignition_probability: f32,
    /// Scales spontaneous (self) ignition; dry grass goes up faster than trees
    pub self_ignition_multiplier: f32,
}

impl VegetationProperties {
    /// Terrain that never burns
    pub const INERT: VegetationProperties = VegetationProperties {
        ignitable: false,
        burn_duration: 0,
        base_ignition_probability: 0.0,
        self_ignition_multiplier: 1.0,
    };

    /// Grass - quick to catch, quick to burn out
    pub const GRASS: VegetationProperties = VegetationProperties {
        ignitable: true,
        burn_duration: 2,
        base_ignition_probability: 0.60,
        self_ignition_multiplier: 1.5,
    };

    /// Bush/shrubland
    pub const BUSH: VegetationProperties = VegetationProperties {
        ignitable: true,
        burn_duration: 3,
        base_ignition_probability: 0.45,
        self_ignition_multiplier: 1.2,
    };

    /// Young tree
    pub const SMALL_TREE: VegetationProperties = VegetationProperties {
        ignitable: true,
        burn_duration: 4,
        base_ignition_probability: 0.35,
        self_ignition_multiplier: 1.0,
    };

    /// Maturing tree
    pub const GROWING_TREE: VegetationProperties = VegetationProperties {
        ignitable: true,
        burn_duration: 5,
        base_ignition_probability: 0.30,
        self_ignition_multiplier: 0.8,
    };

    /// Mature tree - slow to catch, burns longest
    pub const TREE: VegetationProperties = VegetationProperties {
        ignitable: true,
        burn_duration: 6,
        base_ignition_probability: 0.25,
        self_ignition_multiplier: 0.6,
    };
}

/// Per-kind constant lookup used by the transition engine.
///
/// [`VegetationTable::standard`] holds the calibrated values; individual kinds
/// can be overridden with [`VegetationTable::with`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VegetationTable {
    entries: [VegetationProperties; 7],
}

impl VegetationTable {
    /// Calibrated default constants
    pub const fn standard() -> Self {
        Self {
            entries: [
                VegetationProperties::INERT,
                VegetationProperties::INERT,
                VegetationProperties::GRASS,
                VegetationProperties::BUSH,
                VegetationProperties::SMALL_TREE,
                VegetationProperties::GROWING_TREE,
                VegetationProperties::TREE,
            ],
        }
    }

    /// Replace the constants for one kind.
    ///
    /// Water and rock stay inert regardless of what is passed in.
    pub fn with(mut self, kind: VegetationKind, properties: VegetationProperties) -> Self {
        if kind.is_vegetation() {
            self.entries[kind.index()] = properties;
        }
        self
    }

    #[inline]
    pub fn properties(&self, kind: VegetationKind) -> &VegetationProperties {
        &self.entries[kind.index()]
    }

    #[inline]
    pub fn ignitable(&self, kind: VegetationKind) -> bool {
        self.properties(kind).ignitable
    }

    #[inline]
    pub fn burn_duration(&self, kind: VegetationKind) -> u32 {
        self.properties(kind).burn_duration
    }

    #[inline]
    pub fn base_ignition_probability(&self, kind: VegetationKind) -> f32 {
        self.properties(kind).base_ignition_probability
    }

    /// Multiplier in the self-ignition formula, 1.0 for terrain
    #[inline]
    pub fn self_ignition_multiplier(&self, kind: VegetationKind) -> f32 {
        self.properties(kind).self_ignition_multiplier
    }
}

impl Default for VegetationTable {
    fn default() -> Self {
        Self::standard()
    }
}
