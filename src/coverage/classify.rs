//! Covered/uncovered classification of point collections.

use rayon::prelude::*;
use tracing::info;

use super::CoverageRegion;
use crate::error::AnalysisError;
use crate::models::FeatureCollection;

/// Total, disjoint split of a collection against a coverage region.
///
/// Both halves preserve the input order and attributes.
#[derive(Debug, Clone)]
pub struct CoveragePartition {
    pub covered: FeatureCollection,
    pub uncovered: FeatureCollection,
}

impl CoveragePartition {
    /// Share of points outside the region, rounded to two decimals.
    pub fn uncovered_percentage(&self) -> f64 {
        uncovered_percentage(self.uncovered.len(), self.covered.len() + self.uncovered.len())
    }
}

/// Classify every point of `points` against `region`.
///
/// Each point's test is independent; the flags are computed with a parallel
/// map and the split is assembled sequentially in input order, so the result
/// is deterministic.
pub fn partition(
    points: &FeatureCollection,
    region: &CoverageRegion,
) -> Result<CoveragePartition, AnalysisError> {
    points.crs().ensure_matches(&region.crs())?;

    let flags: Vec<bool> = points
        .features()
        .par_iter()
        .map(|f| region.covers(f.point()))
        .collect();

    let mut covered = Vec::new();
    let mut uncovered = Vec::new();
    for (feature, is_covered) in points.iter().zip(&flags) {
        if *is_covered {
            covered.push(feature.clone());
        } else {
            uncovered.push(feature.clone());
        }
    }

    info!(
        "Classified {} points: {} covered, {} uncovered",
        points.len(),
        covered.len(),
        uncovered.len()
    );

    Ok(CoveragePartition {
        covered: FeatureCollection::new(points.crs(), covered),
        uncovered: FeatureCollection::new(points.crs(), uncovered),
    })
}

/// The subset of `points` outside `region`, in input order.
pub fn find_uncovered(
    points: &FeatureCollection,
    region: &CoverageRegion,
) -> Result<FeatureCollection, AnalysisError> {
    partition(points, region).map(|p| p.uncovered)
}

/// `100 * uncovered / total`, rounded to two decimals. Zero when the
/// collection itself is empty.
pub fn uncovered_percentage(uncovered: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(100.0 * uncovered as f64 / total as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
