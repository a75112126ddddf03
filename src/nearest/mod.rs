//! Nearest-facility lookups.
//!
//! The lookup is a capability trait so the full-scan reference
//! implementation and the R-tree index are interchangeable at call sites.
//! Both resolve distance ties to the smallest facility index, so swapping
//! one for the other never changes observable behavior.

mod demand;
mod index;
mod scan;

use geo::Point;

use crate::error::AnalysisError;

pub use demand::{demand_counts, DemandReport, DemandRow};
pub use index::NearestIndex;
pub use scan::NearestScan;

/// Result of a nearest-facility query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestHit {
    /// Index into the facility collection the lookup was built over.
    pub index: usize,
    /// Euclidean distance in CRS units.
    pub distance: f64,
}

/// A nearest-facility lookup over one facility collection.
pub trait NearestFacility {
    /// The facility closest to `point`, ties broken by smallest index.
    ///
    /// Fails with [`AnalysisError::EmptyInput`] when the facility set is
    /// empty.
    fn nearest(&self, point: Point<f64>) -> Result<NearestHit, AnalysisError>;

    /// Number of facilities behind this lookup.
    fn site_count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Crs, FeatureCollection, PointFeature};

    fn facilities(coords: &[(f64, f64)]) -> FeatureCollection {
        FeatureCollection::new(
            Crs::metric(32633),
            coords
                .iter()
                .map(|&(x, y)| PointFeature::new(x, y))
                .collect(),
        )
    }

    /// Scan and index must agree on every query, including exact ties.
    #[test]
    fn test_scan_and_index_agree() {
        let sites = facilities(&[
            (0.0, 0.0),
            (100.0, 0.0),
            (50.0, 80.0),
            (-30.0, -40.0),
            (200.0, 200.0),
        ]);
        let scan = NearestScan::new(&sites);
        let index = NearestIndex::build(&sites);

        let queries = [
            Point::new(60.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(-1000.0, -1000.0),
            Point::new(50.0, 0.0), // equidistant from the first two sites
            Point::new(49.0, 41.0),
        ];

        for q in queries {
            let a = scan.nearest(q).unwrap();
            let b = index.nearest(q).unwrap();
            assert_eq!(a.index, b.index, "disagreement at {:?}", q);
            assert!((a.distance - b.distance).abs() < 1e-9);
        }
    }

    #[test]
    fn test_tie_resolves_to_first_site() {
        // Two sites symmetric about x = 50
        let sites = facilities(&[(0.0, 0.0), (100.0, 0.0)]);

        let scan = NearestScan::new(&sites);
        let index = NearestIndex::build(&sites);

        assert_eq!(scan.nearest(Point::new(50.0, 0.0)).unwrap().index, 0);
        assert_eq!(index.nearest(Point::new(50.0, 0.0)).unwrap().index, 0);
    }
}
