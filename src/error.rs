//! Typed errors for the analysis pipeline.

use thiserror::Error;

use crate::models::Crs;

/// Errors produced by the coverage analyzer.
///
/// All variants are recoverable by the caller; none abort the session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// An operation needed at least one element in the named collection.
    #[error("input collection '{0}' is empty")]
    EmptyInput(&'static str),

    /// Two inputs were built in different coordinate reference systems.
    #[error("CRS mismatch: {left} vs {right} (reproject before analysis)")]
    CrsMismatch { left: Crs, right: Crs },

    /// A metric-only operation was attempted in an angular CRS, where
    /// buffer radii and distances in linear units are meaningless.
    #[error("{0} is an angular CRS; distance and buffer arithmetic requires linear units")]
    AngularCrs(Crs),

    /// Coverage radius outside (0, +inf).
    #[error("coverage radius must be positive and finite, got {0}")]
    InvalidRadius(f64),
}
