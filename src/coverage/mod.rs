//! Coverage-region construction and point classification.
//!
//! Builds the union of fixed-radius disks around a facility set and splits
//! point collections into covered/uncovered against it, using an R-tree
//! over the union's parts for containment queries.

mod classify;
mod region;

pub use classify::{find_uncovered, partition, uncovered_percentage, CoveragePartition};
pub use region::CoverageRegion;
