//! Evaluation of facility-siting proposals.
//!
//! Given the currently uncovered points, a set of proposed new sites is
//! scored by how far it pushes the uncovered percentage down. Malformed
//! proposals are rejected with a reason instead of failing the session, so
//! an interactive caller can prompt for a corrected proposal.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::coverage::{self, CoverageRegion};
use crate::models::{FeatureCollection, PointFeature};

/// A candidate facility location, in the same CRS as the analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposedSite {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ProposedSite {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, label: None }
    }
}

/// Outcome of a proposal evaluation.
///
/// Percentages are relative to the full collision count, rounded to two
/// decimals, matching the baseline uncovered-percentage computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProposalOutcome {
    /// Uncovered percentage dropped below the target threshold.
    GoalMet { percentage: f64 },
    /// Evaluated cleanly, but the threshold was not reached.
    GoalNotMet { percentage: f64 },
    /// The proposal itself was invalid. Recoverable; nothing was computed.
    Rejected { reason: String },
}

impl ProposalOutcome {
    /// The evaluated percentage, if the proposal was valid.
    pub fn percentage(&self) -> Option<f64> {
        match self {
            ProposalOutcome::GoalMet { percentage }
            | ProposalOutcome::GoalNotMet { percentage } => Some(*percentage),
            ProposalOutcome::Rejected { .. } => None,
        }
    }
}

/// Score `sites` against the currently uncovered points.
///
/// Builds a coverage region from the proposed sites alone and reclassifies
/// `uncovered` against it; the result is the percentage of `total_count`
/// still out of range. An empty proposal is valid and returns the baseline
/// percentage unchanged.
pub fn evaluate_proposal(
    sites: &[ProposedSite],
    radius: f64,
    uncovered: &FeatureCollection,
    total_count: usize,
    target_percentage: f64,
) -> ProposalOutcome {
    if total_count == 0 {
        return reject("total collision count is zero");
    }
    if !target_percentage.is_finite() {
        return reject("target percentage must be finite");
    }
    if let Some(bad) = sites.iter().position(|s| !s.x.is_finite() || !s.y.is_finite()) {
        return reject(format!("proposed site {} has non-finite coordinates", bad));
    }

    let proposed = FeatureCollection::new(
        uncovered.crs(),
        sites
            .iter()
            .map(|s| {
                let mut f = PointFeature::new(s.x, s.y);
                f.name = s.label.clone();
                f
            })
            .collect(),
    );

    let still_uncovered = if proposed.is_empty() {
        // No new coverage; the baseline stands
        uncovered.len()
    } else {
        let region = match CoverageRegion::build(&proposed, radius) {
            Ok(r) => r,
            Err(e) => return reject(e.to_string()),
        };
        match coverage::find_uncovered(uncovered, &region) {
            Ok(points) => points.len(),
            Err(e) => return reject(e.to_string()),
        }
    };

    let percentage = coverage::uncovered_percentage(still_uncovered, total_count);

    info!(
        "Proposal of {} sites: {} of {} points still uncovered ({}%)",
        sites.len(),
        still_uncovered,
        uncovered.len(),
        percentage
    );

    if percentage < target_percentage {
        ProposalOutcome::GoalMet { percentage }
    } else {
        ProposalOutcome::GoalNotMet { percentage }
    }
}

fn reject(reason: impl Into<String>) -> ProposalOutcome {
    ProposalOutcome::Rejected {
        reason: reason.into(),
    }
}
