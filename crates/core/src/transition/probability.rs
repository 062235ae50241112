//! Ignition and extinguishing probabilities
//!
//! All functions read the *current* snapshot only. Spread magnitude counts
//! burning cells in the Moore neighborhood, while the wind bonus only looks at
//! the four cardinal neighbors; a fire diagonally upwind raises the spread
//! pressure but never earns the wind bonus.

use crate::core_types::{Environment, VegetationKind, VegetationTable};
use crate::grid::Grid;
use crate::transition::params::TransitionParams;

/// Chance that a burning cell at `(x, y)` goes out this step.
///
/// `min(max_extinguish, base + water_neighbors * water_bonus + humidity * humidity_bonus)`
pub fn extinguish_probability(params: &TransitionParams, grid: &Grid, x: isize, y: isize) -> f32 {
    let water = grid.count_water(x, y) as f32;
    let humidity = grid.environment().humidity().value();

    let raw = params.base_extinguish + water * params.water_bonus + humidity * params.humidity_bonus;
    raw.min(params.max_extinguish).max(0.0)
}

/// Chance that an unburnt cell of `kind` at `(x, y)` catches fire this step.
///
/// The larger of neighbor spread and spontaneous ignition, clamped to [0, 1].
pub fn ignition_probability(
    params: &TransitionParams,
    vegetation: &VegetationTable,
    grid: &Grid,
    x: isize,
    y: isize,
    kind: VegetationKind,
) -> f32 {
    if !vegetation.ignitable(kind) {
        return 0.0;
    }
    let spread = spread_ignition(params, vegetation, grid, x, y, kind);
    let spontaneous = self_ignition(params, vegetation, grid.environment(), kind);
    spread.max(spontaneous).clamp(0.0, 1.0)
}

/// Ignition pressure from burning neighbors, unclamped
pub fn spread_ignition(
    params: &TransitionParams,
    vegetation: &VegetationTable,
    grid: &Grid,
    x: isize,
    y: isize,
    kind: VegetationKind,
) -> f32 {
    let burning = grid.count_burning(x, y);
    if burning == 0 {
        return 0.0;
    }

    let env = grid.environment();
    let temp_effect = env
        .temperature()
        .ratio_to(params.temp_base)
        .max(params.min_temp_effect);
    let humidity_effect = env
        .humidity()
        .complement()
        .value()
        .max(params.min_humidity_effect);
    let wind = if grid
        .burning_cardinal_directions(x, y)
        .contains(grid.wind())
    {
        params.wind_bonus
    } else {
        1.0
    };

    vegetation.base_ignition_probability(kind)
        * (burning as f32 * params.neighbor_effect)
        * temp_effect
        * humidity_effect
        * wind
}

/// Spontaneous ignition from heat and dryness alone, unclamped.
///
/// The temperature ratio is raised to `temp_multiplier` as is, so with an
/// even exponent sub-zero temperatures still give a positive chance. A
/// negative ratio under a fractional exponent has no real power and yields 0.
pub fn self_ignition(
    params: &TransitionParams,
    vegetation: &VegetationTable,
    environment: &Environment,
    kind: VegetationKind,
) -> f32 {
    if !vegetation.ignitable(kind) {
        return 0.0;
    }

    let ratio = environment.temperature().ratio_to(params.temp_base);
    let heat = ratio.powf(params.temp_multiplier);
    if heat.is_nan() {
        return 0.0;
    }
    let dryness = (1.0 - environment.humidity().value() * params.humidity_reduction).max(0.0);

    params.base_self_ignition_chance
        * heat
        * dryness
        * vegetation.self_ignition_multiplier(kind)
}
