//! R-tree-backed nearest-facility lookup.

use geo::Point;
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tracing::debug;

use super::{NearestFacility, NearestHit};
use crate::error::AnalysisError;
use crate::models::FeatureCollection;

/// Facility coordinate plus its index in the source collection.
struct SiteEntry {
    index: usize,
    position: [f64; 2],
}

impl RTreeObject for SiteEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for SiteEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial-index lookup with the same contract as [`super::NearestScan`]:
/// same facility on every query, ties resolved to the smallest index.
pub struct NearestIndex {
    tree: RTree<SiteEntry>,
    site_count: usize,
}

impl NearestIndex {
    /// Bulk-load an R-tree over the facility coordinates.
    pub fn build(facilities: &FeatureCollection) -> Self {
        let entries: Vec<SiteEntry> = facilities
            .points()
            .enumerate()
            .map(|(index, p)| SiteEntry {
                index,
                position: [p.x(), p.y()],
            })
            .collect();

        debug!("Built nearest-facility index over {} sites", entries.len());

        Self {
            tree: RTree::bulk_load(entries),
            site_count: facilities.len(),
        }
    }
}

impl NearestFacility for NearestIndex {
    fn nearest(&self, point: Point<f64>) -> Result<NearestHit, AnalysisError> {
        let query = [point.x(), point.y()];
        let mut neighbors = self.tree.nearest_neighbor_iter_with_distance_2(&query);

        let (first, best_d2) = neighbors
            .next()
            .ok_or(AnalysisError::EmptyInput("facilities"))?;

        // Drain exact ties so the winner matches the scan's stable argmin
        let mut winner = first.index;
        for (entry, d2) in neighbors {
            if d2 > best_d2 {
                break;
            }
            if entry.index < winner {
                winner = entry.index;
            }
        }

        Ok(NearestHit {
            index: winner,
            distance: best_d2.sqrt(),
        })
    }

    fn site_count(&self) -> usize {
        self.site_count
    }
}
