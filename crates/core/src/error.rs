use std::fmt;

/// Errors raised while building simulation inputs.
///
/// Every variant is a configuration problem detected at construction time.
/// Stepping, querying and igniting never fail: out-of-bounds queries return
/// `None` and invalid ignition targets leave the grid unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum FireSimError {
    /// Composition shares do not sum to 1.0 within [`COMPOSITION_TOLERANCE`].
    ///
    /// [`COMPOSITION_TOLERANCE`]: crate::core_types::COMPOSITION_TOLERANCE
    InvalidComposition { sum: f32 },

    /// A single composition share is negative or not finite.
    InvalidShare { name: &'static str, value: f32 },

    /// Relative humidity must be a finite fraction in [0, 1].
    InvalidHumidity(f32),

    /// Temperature must be finite.
    InvalidTemperature(f32),

    /// Grids need at least one row and one column.
    EmptyGrid { width: usize, height: usize },

    /// A row handed to [`crate::grid::Grid::from_rows`] has the wrong length.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A transition constant is negative, not finite, or out of range.
    InvalidParameter { name: &'static str, value: f32 },
}

impl fmt::Display for FireSimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidComposition { sum } => {
                write!(f, "Composition shares sum to {sum}, expected 1.0")
            }
            Self::InvalidShare { name, value } => {
                write!(f, "Composition share '{name}' is invalid: {value}")
            }
            Self::InvalidHumidity(value) => {
                write!(f, "Humidity {value} is outside [0, 1]")
            }
            Self::InvalidTemperature(value) => {
                write!(f, "Temperature {value} is not finite")
            }
            Self::EmptyGrid { width, height } => {
                write!(f, "Grid dimensions {width}x{height} must both be non-zero")
            }
            Self::RaggedRow {
                row,
                expected,
                found,
            } => {
                write!(f, "Row {row} has {found} cells, expected {expected}")
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "Transition parameter '{name}' is invalid: {value}")
            }
        }
    }
}

impl std::error::Error for FireSimError {}

/// Convenience alias used by the fallible constructors in this crate.
pub type Result<T> = std::result::Result<T, FireSimError>;
