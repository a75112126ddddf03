//! Full-scan nearest-facility lookup.

use geo::{Distance, Euclidean, Point};

use super::{NearestFacility, NearestHit};
use crate::error::AnalysisError;
use crate::models::FeatureCollection;

/// Reference lookup: computes the distance to every facility and keeps the
/// stable argmin. Fine at tens of facilities; use [`super::NearestIndex`]
/// beyond that.
pub struct NearestScan<'a> {
    facilities: &'a FeatureCollection,
}

impl<'a> NearestScan<'a> {
    pub fn new(facilities: &'a FeatureCollection) -> Self {
        Self { facilities }
    }
}

impl NearestFacility for NearestScan<'_> {
    fn nearest(&self, point: Point<f64>) -> Result<NearestHit, AnalysisError> {
        let mut best: Option<NearestHit> = None;

        for (index, site) in self.facilities.points().enumerate() {
            let distance = Euclidean.distance(point, site);
            // Strict comparison keeps the earliest facility on ties
            if best.map_or(true, |hit| distance < hit.distance) {
                best = Some(NearestHit { index, distance });
            }
        }

        best.ok_or(AnalysisError::EmptyInput("facilities"))
    }

    fn site_count(&self) -> usize {
        self.facilities.len()
    }
}
