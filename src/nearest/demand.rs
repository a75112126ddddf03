//! Demand tally: how many uncovered points each facility is nearest to.

use hashbrown::HashMap;
use serde::Serialize;
use tracing::info;

use super::NearestFacility;
use crate::error::AnalysisError;
use crate::models::FeatureCollection;

/// Demand attributed to one facility.
#[derive(Debug, Clone, Serialize)]
pub struct DemandRow {
    /// Index into the facility collection.
    pub facility: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub count: u64,
}

/// Per-facility demand, rows in facility input order.
#[derive(Debug, Clone, Serialize)]
pub struct DemandReport {
    rows: Vec<DemandRow>,
}

impl DemandReport {
    pub fn rows(&self) -> &[DemandRow] {
        &self.rows
    }

    /// Sum of all counts; equals the number of tallied points.
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.count).sum()
    }

    /// The facility with the largest count, ties resolved to the earliest
    /// facility in input order. `None` only for an empty facility set.
    pub fn highest_demand(&self) -> Option<&DemandRow> {
        let mut best: Option<&DemandRow> = None;
        for row in &self.rows {
            if best.map_or(true, |b| row.count > b.count) {
                best = Some(row);
            }
        }
        best
    }
}

/// Tally the nearest facility for every point in `uncovered`.
///
/// `lookup` must have been built over `facilities`; the report's rows are
/// keyed by that collection's order so results are deterministic.
pub fn demand_counts<L: NearestFacility>(
    uncovered: &FeatureCollection,
    facilities: &FeatureCollection,
    lookup: &L,
) -> Result<DemandReport, AnalysisError> {
    uncovered.crs().ensure_matches(&facilities.crs())?;
    debug_assert_eq!(lookup.site_count(), facilities.len());

    if facilities.is_empty() && !uncovered.is_empty() {
        return Err(AnalysisError::EmptyInput("facilities"));
    }

    let mut tally: HashMap<usize, u64> = HashMap::new();
    for point in uncovered.points() {
        let hit = lookup.nearest(point)?;
        *tally.entry(hit.index).or_insert(0) += 1;
    }

    let rows: Vec<DemandRow> = facilities
        .iter()
        .enumerate()
        .map(|(facility, feature)| DemandRow {
            facility,
            name: feature.name.clone(),
            count: tally.get(&facility).copied().unwrap_or(0),
        })
        .collect();

    info!(
        "Demand tally: {} points across {} facilities",
        uncovered.len(),
        facilities.len()
    );

    Ok(DemandReport { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Crs, PointFeature};
    use crate::nearest::NearestScan;

    fn facilities() -> FeatureCollection {
        FeatureCollection::new(
            Crs::metric(32633),
            vec![
                PointFeature::named(0.0, 0.0, "ALPHA"),
                PointFeature::named(1000.0, 0.0, "BRAVO"),
                PointFeature::named(0.0, 1000.0, "CHARLIE"),
            ],
        )
    }

    fn points(coords: &[(f64, f64)]) -> FeatureCollection {
        FeatureCollection::new(
            Crs::metric(32633),
            coords
                .iter()
                .map(|&(x, y)| PointFeature::new(x, y))
                .collect(),
        )
    }

    #[test]
    fn test_counts_sum_to_point_count() {
        let sites = facilities();
        let uncovered = points(&[
            (10.0, 10.0),
            (990.0, 5.0),
            (980.0, -5.0),
            (5.0, 900.0),
            (2000.0, 0.0),
        ]);

        let scan = NearestScan::new(&sites);
        let report = demand_counts(&uncovered, &sites, &scan).unwrap();

        assert_eq!(report.total(), uncovered.len() as u64);
    }

    #[test]
    fn test_highest_demand() {
        let sites = facilities();
        let uncovered = points(&[(990.0, 5.0), (980.0, -5.0), (10.0, 10.0)]);

        let scan = NearestScan::new(&sites);
        let report = demand_counts(&uncovered, &sites, &scan).unwrap();

        let top = report.highest_demand().unwrap();
        assert_eq!(top.name.as_deref(), Some("BRAVO"));
        assert_eq!(top.count, 2);
    }

    #[test]
    fn test_highest_demand_tie_goes_to_first_facility() {
        let sites = facilities();
        // One point each for BRAVO and CHARLIE, none for ALPHA
        let uncovered = points(&[(990.0, 0.0), (0.0, 990.0)]);

        let scan = NearestScan::new(&sites);
        let report = demand_counts(&uncovered, &sites, &scan).unwrap();

        assert_eq!(report.highest_demand().unwrap().name.as_deref(), Some("BRAVO"));
    }

    #[test]
    fn test_no_uncovered_points() {
        let sites = facilities();
        let uncovered = points(&[]);

        let scan = NearestScan::new(&sites);
        let report = demand_counts(&uncovered, &sites, &scan).unwrap();

        assert_eq!(report.total(), 0);
        assert_eq!(report.rows().len(), 3);
    }

    #[test]
    fn test_empty_facilities_rejected() {
        let sites = FeatureCollection::empty(Crs::metric(32633));
        let uncovered = points(&[(0.0, 0.0)]);

        let scan = NearestScan::new(&sites);
        let err = demand_counts(&uncovered, &sites, &scan).unwrap_err();
        assert_eq!(err, AnalysisError::EmptyInput("facilities"));
    }
}
