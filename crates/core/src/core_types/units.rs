//! Semantic unit types for weather inputs
//!
//! Newtype wrappers keep a temperature from being passed where a humidity
//! fraction is expected (and vice versa). Both wrap `f32`, deref to the raw
//! value, have a total ordering (NaN sorts above every other value) and
//! serialize transparently.
//!
//! # Usage
//! ```
//! use wildfire_ca_core::core_types::units::{Celsius, Fraction};
//!
//! let temp = Celsius::new(30.0);
//! assert!((temp.ratio_to(Celsius::new(25.0)) - 1.2).abs() < 1e-6);
//!
//! let humidity = Fraction::new(0.4);
//! assert!((humidity.complement().value() - 0.6).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Air temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Celsius(f32);

impl Eq for Celsius {}

impl PartialOrd for Celsius {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Celsius {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Celsius {
    type Target = f32;
    #[inline]
    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl Celsius {
    /// Create a new Celsius temperature
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Celsius(value)
    }

    /// Get the raw f32 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Dimensionless ratio `self / reference`, used by the ignition formulas
    #[inline]
    #[must_use]
    pub fn ratio_to(self, reference: Celsius) -> f32 {
        self.0 / reference.0
    }
}

impl From<f32> for Celsius {
    fn from(v: f32) -> Self {
        Celsius(v)
    }
}

impl From<Celsius> for f32 {
    fn from(c: Celsius) -> f32 {
        c.0
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

/// Dimensionless fraction in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Fraction(f32);

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Fraction {
    type Target = f32;
    #[inline]
    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl Fraction {
    /// Zero fraction
    pub const ZERO: Fraction = Fraction(0.0);

    /// Full/complete (1.0)
    pub const ONE: Fraction = Fraction(1.0);

    /// Create a new fraction. Asserts value is within [0, 1].
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&value),
            "Fraction::new: value not in [0, 1]"
        );
        Fraction(value)
    }

    /// Create a fraction, returning `None` when the value is outside [0, 1] or NaN
    #[inline]
    #[must_use]
    pub fn try_new(value: f32) -> Option<Self> {
        (0.0..=1.0).contains(&value).then_some(Fraction(value))
    }

    /// Get the raw f32 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// `1 - self`
    #[inline]
    #[must_use]
    pub fn complement(self) -> Fraction {
        Fraction(1.0 - self.0)
    }
}

impl From<Fraction> for f32 {
    fn from(f: Fraction) -> f32 {
        f.0
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_bounds() {
        assert!(Fraction::try_new(0.0).is_some());
        assert!(Fraction::try_new(1.0).is_some());
        assert!(Fraction::try_new(-0.01).is_none());
        assert!(Fraction::try_new(1.01).is_none());
        assert!(Fraction::try_new(f32::NAN).is_none());
    }

    #[test]
    #[should_panic(expected = "Fraction::new")]
    fn test_fraction_new_rejects_out_of_range() {
        let _ = Fraction::new(1.5);
    }

    #[test]
    fn test_celsius_ordering_and_display() {
        let cool = Celsius::new(12.0);
        let hot = Celsius::new(41.5);
        assert!(cool < hot);
        assert_eq!(cool.max(hot), hot);
        assert_eq!(hot.to_string(), "41.5°C");
        assert_eq!(*hot, 41.5);
    }
}
