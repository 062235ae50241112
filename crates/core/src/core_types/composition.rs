//! Landscape composition used to seed a grid

use crate::core_types::vegetation::VegetationKind;
use crate::error::{FireSimError, Result};
use serde::{Deserialize, Serialize};

/// Shares must sum to 1.0 within this tolerance
pub const COMPOSITION_TOLERANCE: f32 = 0.001;

/// Raw fractional share of each kind, as a caller writes them down.
///
/// Validate with [`CompositionConfig::new`] before use.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VegetationShares {
    pub water: f32,
    pub rock: f32,
    pub grass: f32,
    pub bush: f32,
    pub small_tree: f32,
    pub growing_tree: f32,
    pub tree: f32,
}

impl VegetationShares {
    /// Shares in [`VegetationKind::ALL`] order
    fn as_array(&self) -> [(&'static str, f32); 7] {
        [
            ("water", self.water),
            ("rock", self.rock),
            ("grass", self.grass),
            ("bush", self.bush),
            ("small_tree", self.small_tree),
            ("growing_tree", self.growing_tree),
            ("tree", self.tree),
        ]
    }
}

/// Validated landscape composition.
///
/// Holds the cumulative thresholds used for cumulative-threshold sampling:
/// one uniform draw in [0, 1) is compared against the running sums in the
/// order water, rock, grass, bush, small tree, growing tree. Anything past the
/// last threshold is a tree, so rounding error always lands on trees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionConfig {
    shares: VegetationShares,
    thresholds: [f32; 6],
}

impl CompositionConfig {
    /// Validate shares and precompute sampling thresholds
    ///
    /// # Errors
    ///
    /// [`FireSimError::InvalidShare`] if any share is negative or not finite,
    /// [`FireSimError::InvalidComposition`] if the shares do not sum to 1.0
    /// within [`COMPOSITION_TOLERANCE`].
    pub fn new(shares: VegetationShares) -> Result<Self> {
        let named = shares.as_array();
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(FireSimError::InvalidShare { name, value });
            }
        }

        let sum: f32 = named.iter().map(|(_, v)| v).sum();
        if (sum - 1.0).abs() > COMPOSITION_TOLERANCE {
            return Err(FireSimError::InvalidComposition { sum });
        }

        let mut thresholds = [0.0; 6];
        let mut running = 0.0;
        for (slot, (_, value)) in thresholds.iter_mut().zip(named) {
            running += value;
            *slot = running;
        }

        Ok(Self { shares, thresholds })
    }

    /// A landscape made of a single kind
    pub fn uniform(kind: VegetationKind) -> Self {
        let mut shares = VegetationShares::default();
        match kind {
            VegetationKind::Water => shares.water = 1.0,
            VegetationKind::Rock => shares.rock = 1.0,
            VegetationKind::Grass => shares.grass = 1.0,
            VegetationKind::Bush => shares.bush = 1.0,
            VegetationKind::SmallTree => shares.small_tree = 1.0,
            VegetationKind::GrowingTree => shares.growing_tree = 1.0,
            VegetationKind::Tree => shares.tree = 1.0,
        }
        let mut thresholds = [0.0; 6];
        for (i, slot) in thresholds.iter_mut().enumerate() {
            *slot = if i >= kind.index() { 1.0 } else { 0.0 };
        }
        Self { shares, thresholds }
    }

    pub fn shares(&self) -> &VegetationShares {
        &self.shares
    }

    /// Pick the kind for a uniform draw `r` in [0, 1)
    pub fn sample(&self, r: f32) -> VegetationKind {
        self.thresholds
            .iter()
            .position(|&threshold| r < threshold)
            .map_or(VegetationKind::Tree, |i| VegetationKind::ALL[i])
    }
}

impl Default for CompositionConfig {
    /// Mixed temperate landscape: mostly vegetation with scattered water and rock
    fn default() -> Self {
        Self {
            shares: VegetationShares {
                water: 0.05,
                rock: 0.05,
                grass: 0.30,
                bush: 0.20,
                small_tree: 0.15,
                growing_tree: 0.10,
                tree: 0.15,
            },
            thresholds: [0.05, 0.10, 0.40, 0.60, 0.75, 0.85],
        }
    }
}

impl TryFrom<VegetationShares> for CompositionConfig {
    type Error = FireSimError;

    fn try_from(shares: VegetationShares) -> Result<Self> {
        Self::new(shares)
    }
}
