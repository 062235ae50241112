//! Global weather inputs shared by every cell of a run

use crate::core_types::units::{Celsius, Fraction};
use crate::error::{FireSimError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cardinal wind direction, also used to tag von Neumann neighbors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindDirection {
    North,
    East,
    South,
    West,
}

impl WindDirection {
    /// All four directions in neighbor query order
    pub const ALL: [WindDirection; 4] = [
        WindDirection::North,
        WindDirection::East,
        WindDirection::South,
        WindDirection::West,
    ];

    /// Grid offset `(dx, dy)` from a cell toward its neighbor in this direction.
    ///
    /// Rows grow downward, so North is `(0, -1)`.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Bit used by [`crate::grid::DirectionSet`]
    #[inline]
    pub(crate) const fn bit(self) -> u8 {
        match self {
            Self::North => 0b0001,
            Self::East => 0b0010,
            Self::South => 0b0100,
            Self::West => 0b1000,
        }
    }
}

impl fmt::Display for WindDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "North",
            Self::East => "East",
            Self::South => "South",
            Self::West => "West",
        };
        f.write_str(name)
    }
}

/// Temperature and humidity for a whole run.
///
/// Weather is constant for the lifetime of a run; every snapshot carries the
/// same `Environment` it was generated with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    temperature: Celsius,
    humidity: Fraction,
}

impl Environment {
    /// Create an environment
    ///
    /// # Arguments
    ///
    /// * `temperature` - Air temperature (°C), any finite value
    /// * `humidity` - Relative humidity as a fraction (0-1)
    ///
    /// # Errors
    ///
    /// [`FireSimError::InvalidTemperature`] for NaN/infinite temperatures and
    /// [`FireSimError::InvalidHumidity`] for humidity outside [0, 1].
    pub fn new(temperature: f32, humidity: f32) -> Result<Self> {
        if !temperature.is_finite() {
            return Err(FireSimError::InvalidTemperature(temperature));
        }
        let humidity = Fraction::try_new(humidity).ok_or(FireSimError::InvalidHumidity(humidity))?;
        Ok(Self {
            temperature: Celsius::new(temperature),
            humidity,
        })
    }

    /// Air temperature (°C)
    pub fn temperature(&self) -> Celsius {
        self.temperature
    }

    /// Relative humidity (0-1)
    pub fn humidity(&self) -> Fraction {
        self.humidity
    }
}

impl Default for Environment {
    /// Warm, moderately dry summer afternoon
    fn default() -> Self {
        Self {
            temperature: Celsius::new(25.0),
            humidity: Fraction::new(0.3),
        }
    }
}
