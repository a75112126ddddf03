//! Triage - coverage analysis for emergency incident data
//!
//! Answers three questions about point collections in a shared metric CRS:
//! which incidents fall outside a fixed-radius coverage region around all
//! facilities, which facility is nearest to a given point, and whether a
//! set of proposed new sites would bring the uncovered share below a target.

pub mod coverage;
pub mod error;
pub mod models;
pub mod nearest;
pub mod proposal;

pub use error::AnalysisError;
pub use models::{Crs, CrsUnit, FeatureCollection, PointFeature};
