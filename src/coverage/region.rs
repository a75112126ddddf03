//! Coverage region construction and containment tests.
//!
//! A coverage region is the union of closed disks of a fixed radius around
//! every facility point. Containment queries run against an R-tree over the
//! union's parts: envelope candidates first, exact test second.

use geo::{BooleanOps, BoundingRect, Intersects, LineString, MultiPolygon, Point, Polygon};
use rstar::{RTree, RTreeObject, AABB};
use std::f64::consts::PI;
use tracing::{debug, info};

use crate::error::AnalysisError;
use crate::models::{Crs, FeatureCollection};

/// Vertices per disk. The approximation is an inscribed polygon, so points
/// classified as covered are always within the true radius.
const DISK_SEGMENTS: usize = 64;

/// One part of the region union, indexed by envelope.
#[derive(Debug)]
struct RegionPart {
    index: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for RegionPart {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Union of closed coverage disks around a facility set.
///
/// Derived from a facility collection and a radius; rebuild it whenever
/// either changes.
#[derive(Debug)]
pub struct CoverageRegion {
    crs: Crs,
    radius: f64,
    geometry: MultiPolygon<f64>,
    tree: RTree<RegionPart>,
}

impl CoverageRegion {
    /// Build the union of disks of `radius` around every facility.
    ///
    /// The facility collection must be in a linear-unit CRS; `radius` is in
    /// those units and must be positive and finite. An empty facility set
    /// yields an empty region (every point tests uncovered).
    pub fn build(facilities: &FeatureCollection, radius: f64) -> Result<Self, AnalysisError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(AnalysisError::InvalidRadius(radius));
        }
        facilities.crs().ensure_linear()?;

        let disks: Vec<Polygon<f64>> = facilities
            .points()
            .map(|p| disk(p, radius, DISK_SEGMENTS))
            .collect();

        let geometry = union_all(&disks);

        debug!(
            "Region union: {} disks merged into {} parts",
            disks.len(),
            geometry.0.len()
        );

        let parts: Vec<RegionPart> = geometry
            .0
            .iter()
            .enumerate()
            .filter_map(|(index, poly)| {
                let rect = poly.bounding_rect()?;
                Some(RegionPart {
                    index,
                    envelope: AABB::from_corners(
                        [rect.min().x, rect.min().y],
                        [rect.max().x, rect.max().y],
                    ),
                })
            })
            .collect();

        info!(
            "Built coverage region: {} facilities, radius {}, {} parts",
            facilities.len(),
            radius,
            geometry.0.len()
        );

        Ok(Self {
            crs: facilities.crs(),
            radius,
            geometry,
            tree: RTree::bulk_load(parts),
        })
    }

    /// True iff the point lies inside the region or on its boundary.
    pub fn covers(&self, point: Point<f64>) -> bool {
        let query = AABB::from_point([point.x(), point.y()]);
        self.tree
            .locate_in_envelope_intersecting(&query)
            .any(|part| self.geometry.0[part.index].intersects(&point))
    }

    /// CRS the region was built in.
    pub fn crs(&self) -> Crs {
        self.crs
    }

    /// Radius the region was built with, in CRS units.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The union geometry, for export to downstream tooling.
    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    /// Number of disjoint parts in the union.
    pub fn part_count(&self) -> usize {
        self.geometry.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.0.is_empty()
    }
}

/// Polygonal approximation of a closed disk.
fn disk(center: Point<f64>, radius: f64, segments: usize) -> Polygon<f64> {
    let n = segments.max(4);
    let (cx, cy) = (center.x(), center.y());

    let mut coords = Vec::with_capacity(n + 1);
    for i in 0..n {
        let angle = 2.0 * PI * i as f64 / n as f64;
        coords.push((cx + radius * angle.cos(), cy + radius * angle.sin()));
    }
    // Close the ring
    coords.push(coords[0]);

    Polygon::new(LineString::from(coords), vec![])
}

/// Union a list of polygons into one (possibly multi-part) polygon.
fn union_all(polygons: &[Polygon<f64>]) -> MultiPolygon<f64> {
    let mut iter = polygons.iter();
    let first = match iter.next() {
        Some(p) => p,
        None => return MultiPolygon::new(Vec::new()),
    };

    let mut acc = MultiPolygon::new(vec![first.clone()]);
    for poly in iter {
        acc = acc.union(&MultiPolygon::new(vec![poly.clone()]));
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PointFeature;
    use geo::Area;

    fn metric_sites(coords: &[(f64, f64)]) -> FeatureCollection {
        FeatureCollection::new(
            Crs::metric(32633),
            coords
                .iter()
                .map(|&(x, y)| PointFeature::new(x, y))
                .collect(),
        )
    }

    #[test]
    fn test_disk_area() {
        let d = disk(Point::new(0.0, 0.0), 10.0, 64);
        let expected = PI * 100.0;
        let error = (d.unsigned_area() - expected).abs() / expected;
        assert!(error < 0.01, "disk area off by {:.2}%", error * 100.0);
    }

    #[test]
    fn test_region_contains_its_facilities() {
        let sites = metric_sites(&[(0.0, 0.0), (5000.0, 0.0), (-3000.0, 9000.0)]);
        let region = CoverageRegion::build(&sites, 1000.0).unwrap();

        for p in sites.points() {
            assert!(region.covers(p), "facility at {:?} not covered", p);
        }
    }

    #[test]
    fn test_overlapping_disks_merge() {
        let sites = metric_sites(&[(0.0, 0.0), (500.0, 0.0)]);
        let region = CoverageRegion::build(&sites, 1000.0).unwrap();
        assert_eq!(region.part_count(), 1);

        let far = metric_sites(&[(0.0, 0.0), (10_000.0, 0.0)]);
        let region = CoverageRegion::build(&far, 1000.0).unwrap();
        assert_eq!(region.part_count(), 2);
    }

    #[test]
    fn test_inside_and_outside() {
        let sites = metric_sites(&[(0.0, 0.0)]);
        let region = CoverageRegion::build(&sites, 10_000.0).unwrap();

        assert!(region.covers(Point::new(0.0, 5000.0)));
        assert!(!region.covers(Point::new(0.0, 15_000.0)));
    }

    #[test]
    fn test_boundary_counts_as_covered() {
        let sites = metric_sites(&[(0.0, 0.0)]);
        let region = CoverageRegion::build(&sites, 1000.0).unwrap();

        // (1000, 0) is a vertex of the disk approximation
        assert!(region.covers(Point::new(1000.0, 0.0)));
    }

    #[test]
    fn test_empty_facilities_empty_region() {
        let sites = metric_sites(&[]);
        let region = CoverageRegion::build(&sites, 1000.0).unwrap();

        assert!(region.is_empty());
        assert!(!region.covers(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_invalid_radius_rejected() {
        let sites = metric_sites(&[(0.0, 0.0)]);
        for bad in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let err = CoverageRegion::build(&sites, bad).unwrap_err();
            assert!(matches!(err, AnalysisError::InvalidRadius(_)));
        }
    }

    #[test]
    fn test_angular_crs_rejected() {
        let sites = FeatureCollection::new(Crs::WGS84, vec![PointFeature::new(-74.0, 40.7)]);
        let err = CoverageRegion::build(&sites, 10_000.0).unwrap_err();
        assert_eq!(err, AnalysisError::AngularCrs(Crs::WGS84));
    }
}
