//! Core data models for the coverage analyzer.

pub mod crs;
pub mod feature;

pub use crs::{Crs, CrsUnit};
pub use feature::{FeatureCollection, PointFeature};
