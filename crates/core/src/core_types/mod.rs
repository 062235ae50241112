//! Core types: weather inputs, vegetation constants and landscape composition

pub mod composition;
pub mod environment;
pub mod units;
pub mod vegetation;

pub use composition::{CompositionConfig, VegetationShares, COMPOSITION_TOLERANCE};
pub use environment::{Environment, WindDirection};
pub use units::{Celsius, Fraction};
pub use vegetation::{VegetationKind, VegetationProperties, VegetationTable};
