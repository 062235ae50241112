//! Tunable constants for the transition rules

use crate::core_types::{Celsius, VegetationKind};
use crate::error::{FireSimError, Result};
use serde::{Deserialize, Serialize};

/// What happens to an ignitable cell that did not catch fire this step.
///
/// With [`SuccessionMode::Reference`] the ignition check handles every
/// ignitable kind and the growth table is never consulted, so vegetation only
/// changes kind by burning and regrowing. [`SuccessionMode::GrowWhenUnignited`]
/// lets an unignited cell advance along the growth table, reusing the step's
/// single draw rescaled to the interval left over after ignition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SuccessionMode {
    #[default]
    Reference,
    GrowWhenUnignited,
}

/// Per-step chances that a destroyed cell regrows, checked in field order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegrowthChances {
    pub to_grass: f32,
    pub to_bush: f32,
    pub to_small_tree: f32,
    /// Saplings come back as [`VegetationKind::GrowingTree`]
    pub to_tree: f32,
}

impl RegrowthChances {
    /// Cumulative-threshold pick for a draw in [0, 1); `None` means stay destroyed
    pub fn select(&self, draw: f32) -> Option<VegetationKind> {
        let outcomes = [
            (self.to_grass, VegetationKind::Grass),
            (self.to_bush, VegetationKind::Bush),
            (self.to_small_tree, VegetationKind::SmallTree),
            (self.to_tree, VegetationKind::GrowingTree),
        ];
        let mut threshold = 0.0;
        for (chance, kind) in outcomes {
            threshold += chance;
            if draw < threshold {
                return Some(kind);
            }
        }
        None
    }

    pub fn total(&self) -> f32 {
        self.to_grass + self.to_bush + self.to_small_tree + self.to_tree
    }
}

impl Default for RegrowthChances {
    fn default() -> Self {
        Self {
            to_grass: 0.05,
            to_bush: 0.02,
            to_small_tree: 0.01,
            to_tree: 0.005,
        }
    }
}

/// One vegetation succession edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthRule {
    pub from: VegetationKind,
    pub to: VegetationKind,
    pub probability: f32,
}

/// Vegetation-to-vegetation succession chances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthTable {
    rules: Vec<GrowthRule>,
}

impl GrowthTable {
    pub fn new(rules: Vec<GrowthRule>) -> Self {
        Self { rules }
    }

    /// No succession at all
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rules(&self) -> &[GrowthRule] {
        &self.rules
    }

    /// Rules leaving `kind`, in table order
    pub fn rules_for(&self, kind: VegetationKind) -> impl Iterator<Item = &GrowthRule> + '_ {
        self.rules.iter().filter(move |rule| rule.from == kind)
    }

    /// Cumulative-threshold pick among the rules leaving `kind`
    pub fn select(&self, kind: VegetationKind, draw: f32) -> Option<VegetationKind> {
        let mut threshold = 0.0;
        for rule in self.rules_for(kind) {
            threshold += rule.probability;
            if draw < threshold {
                return Some(rule.to);
            }
        }
        None
    }
}

impl Default for GrowthTable {
    fn default() -> Self {
        use VegetationKind::{Bush, Grass, GrowingTree, SmallTree, Tree};
        let rule = |from, to, probability| GrowthRule {
            from,
            to,
            probability,
        };
        Self::new(vec![
            rule(Grass, Bush, 0.010),
            rule(Grass, SmallTree, 0.005),
            rule(Grass, GrowingTree, 0.002),
            rule(Bush, SmallTree, 0.010),
            rule(SmallTree, GrowingTree, 0.008),
            rule(GrowingTree, Tree, 0.005),
        ])
    }
}

/// Constants of the ignition, extinguishing and regrowth formulas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionParams {
    /// Extinguish chance of a burning cell with no water nearby and 0% humidity
    pub base_extinguish: f32,
    /// Added per water cell in the Moore neighborhood
    pub water_bonus: f32,
    /// Multiplied by humidity (0-1) and added
    pub humidity_bonus: f32,
    /// Upper bound on the extinguish chance
    pub max_extinguish: f32,

    /// Spread pressure contributed by each burning neighbor
    pub neighbor_effect: f32,
    /// Reference temperature for the temperature ratio
    pub temp_base: Celsius,
    /// Floor of `temperature / temp_base` in the spread formula
    pub min_temp_effect: f32,
    /// Floor of `1 - humidity` in the spread formula
    pub min_humidity_effect: f32,
    /// Spread multiplier when a cardinal neighbor in the wind direction burns
    pub wind_bonus: f32,

    /// Spontaneous ignition chance at `temp_base` and zero humidity
    pub base_self_ignition_chance: f32,
    /// Exponent on `temperature / temp_base` for self ignition
    pub temp_multiplier: f32,
    /// How strongly humidity suppresses self ignition
    pub humidity_reduction: f32,

    pub regrowth: RegrowthChances,
    pub growth: GrowthTable,
    pub succession: SuccessionMode,
}

impl Default for TransitionParams {
    fn default() -> Self {
        Self {
            base_extinguish: 0.05,
            water_bonus: 0.10,
            humidity_bonus: 0.20,
            max_extinguish: 0.90,
            neighbor_effect: 0.30,
            temp_base: Celsius::new(25.0),
            min_temp_effect: 0.5,
            min_humidity_effect: 0.1,
            wind_bonus: 1.5,
            base_self_ignition_chance: 0.0001,
            temp_multiplier: 2.0,
            humidity_reduction: 0.8,
            regrowth: RegrowthChances::default(),
            growth: GrowthTable::default(),
            succession: SuccessionMode::default(),
        }
    }
}

impl TransitionParams {
    /// Burning cells never go out on their own
    pub fn without_extinguishing(self) -> Self {
        Self {
            base_extinguish: 0.0,
            max_extinguish: 0.0,
            ..self
        }
    }

    /// Destroyed cells never regrow
    pub fn without_regrowth(self) -> Self {
        Self {
            regrowth: RegrowthChances {
                to_grass: 0.0,
                to_bush: 0.0,
                to_small_tree: 0.0,
                to_tree: 0.0,
            },
            ..self
        }
    }

    /// Check every constant is finite and in range
    ///
    /// # Errors
    ///
    /// [`FireSimError::InvalidParameter`] naming the first offending constant.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("base_extinguish", self.base_extinguish),
            ("water_bonus", self.water_bonus),
            ("humidity_bonus", self.humidity_bonus),
            ("neighbor_effect", self.neighbor_effect),
            ("min_temp_effect", self.min_temp_effect),
            ("min_humidity_effect", self.min_humidity_effect),
            ("wind_bonus", self.wind_bonus),
            ("base_self_ignition_chance", self.base_self_ignition_chance),
            ("temp_multiplier", self.temp_multiplier),
            ("humidity_reduction", self.humidity_reduction),
            ("regrowth.to_grass", self.regrowth.to_grass),
            ("regrowth.to_bush", self.regrowth.to_bush),
            ("regrowth.to_small_tree", self.regrowth.to_small_tree),
            ("regrowth.to_tree", self.regrowth.to_tree),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(FireSimError::InvalidParameter { name, value });
            }
        }

        if !(0.0..=1.0).contains(&self.max_extinguish) {
            return Err(FireSimError::InvalidParameter {
                name: "max_extinguish",
                value: self.max_extinguish,
            });
        }
        if !self.temp_base.is_finite() || *self.temp_base <= 0.0 {
            return Err(FireSimError::InvalidParameter {
                name: "temp_base",
                value: *self.temp_base,
            });
        }
        if self.regrowth.total() > 1.0 {
            return Err(FireSimError::InvalidParameter {
                name: "regrowth",
                value: self.regrowth.total(),
            });
        }

        for kind in VegetationKind::ALL {
            let mut total = 0.0;
            for rule in self.growth.rules_for(kind) {
                if !rule.probability.is_finite() || rule.probability < 0.0 {
                    return Err(FireSimError::InvalidParameter {
                        name: "growth.probability",
                        value: rule.probability,
                    });
                }
                total += rule.probability;
            }
            if total > 1.0 {
                return Err(FireSimError::InvalidParameter {
                    name: "growth",
                    value: total,
                });
            }
        }
        Ok(())
    }
}
