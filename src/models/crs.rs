//! Coordinate reference system tags.
//!
//! The analyzer never reprojects; it only checks that the inputs it is
//! handed agree with each other and that metric operations run in a
//! linear-unit CRS. Reprojection is the caller's responsibility.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Unit class of a CRS axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrsUnit {
    /// Linear, metres (e.g. UTM zones, EPSG:3857).
    Metre,
    /// Linear, US survey feet (e.g. EPSG:2263, NY Long Island).
    Foot,
    /// Angular, decimal degrees (e.g. EPSG:4326). Not valid for
    /// buffer/distance arithmetic.
    Degree,
}

/// A coordinate reference system, identified by EPSG code plus unit class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crs {
    pub epsg: u32,
    pub unit: CrsUnit,
}

impl Crs {
    /// WGS 84 geographic coordinates (lat/long).
    pub const WGS84: Crs = Crs::new(4326, CrsUnit::Degree);

    pub const fn new(epsg: u32, unit: CrsUnit) -> Self {
        Self { epsg, unit }
    }

    /// A projected CRS with metre units.
    pub const fn metric(epsg: u32) -> Self {
        Self::new(epsg, CrsUnit::Metre)
    }

    /// True for linear-unit (projected) systems.
    pub fn is_linear(&self) -> bool {
        matches!(self.unit, CrsUnit::Metre | CrsUnit::Foot)
    }

    /// Fail unless this CRS uses linear units.
    pub fn ensure_linear(&self) -> Result<(), AnalysisError> {
        if self.is_linear() {
            Ok(())
        } else {
            Err(AnalysisError::AngularCrs(*self))
        }
    }

    /// Fail unless `other` is the same CRS.
    pub fn ensure_matches(&self, other: &Crs) -> Result<(), AnalysisError> {
        if self == other {
            Ok(())
        } else {
            Err(AnalysisError::CrsMismatch {
                left: *self,
                right: *other,
            })
        }
    }
}

impl std::fmt::Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let unit = match self.unit {
            CrsUnit::Metre => "m",
            CrsUnit::Foot => "ft",
            CrsUnit::Degree => "deg",
        };
        write!(f, "EPSG:{} ({})", self.epsg, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_units() {
        assert!(Crs::metric(32633).is_linear());
        assert!(Crs::new(2263, CrsUnit::Foot).is_linear());
        assert!(!Crs::WGS84.is_linear());
    }

    #[test]
    fn test_ensure_matches() {
        let a = Crs::metric(32633);
        assert!(a.ensure_matches(&Crs::metric(32633)).is_ok());

        let err = a.ensure_matches(&Crs::WGS84).unwrap_err();
        assert!(matches!(err, AnalysisError::CrsMismatch { .. }));
    }

    #[test]
    fn test_ensure_linear_rejects_degrees() {
        let err = Crs::WGS84.ensure_linear().unwrap_err();
        assert_eq!(err, AnalysisError::AngularCrs(Crs::WGS84));
    }
}
