//! JSON report emitted on stdout.
//!
//! Carries plain coordinates and attributes only; any map rendering is a
//! downstream consumer's job.

use serde::Serialize;

use triage::models::{Crs, PointFeature};
use triage::nearest::DemandReport;
use triage::proposal::ProposalOutcome;

#[derive(Serialize)]
pub struct Report<'a> {
    pub crs: Crs,
    pub radius: f64,
    pub collisions_total: usize,
    pub facilities_total: usize,
    pub uncovered_count: usize,
    pub uncovered_percentage: f64,
    pub demand: &'a DemandReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest_demand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal: Option<ProposalOutcome>,
    /// Uncovered points with their original attributes, in input order.
    pub uncovered: &'a [PointFeature],
}
