//! Point features and read-only feature collections.

use chrono::{DateTime, Utc};
use geo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Crs;

/// A single point record with its attributes.
///
/// Coordinates are planar values in the owning collection's CRS.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointFeature {
    pub x: f64,
    pub y: f64,

    /// Display name (e.g. a facility name). Incident points usually
    /// have none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Event timestamp, when the source data carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,

    /// Remaining source attributes, passed through untouched.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attrs: HashMap<String, String>,
}

impl PointFeature {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            name: None,
            recorded_at: None,
            attrs: HashMap::new(),
        }
    }

    pub fn named(x: f64, y: f64, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(x, y)
        }
    }

    /// Geometry view of this feature.
    pub fn point(&self) -> Point<f64> {
        Point::new(self.x, self.y)
    }
}

/// An ordered collection of point features sharing one CRS.
///
/// Loaded once per analysis session and read-only thereafter; derived
/// values (regions, partitions) are always recomputed, never patched in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection {
    crs: Crs,
    features: Vec<PointFeature>,
}

impl FeatureCollection {
    pub fn new(crs: Crs, features: Vec<PointFeature>) -> Self {
        Self { crs, features }
    }

    pub fn empty(crs: Crs) -> Self {
        Self::new(crs, Vec::new())
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    pub fn features(&self) -> &[PointFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointFeature> {
        self.features.iter()
    }

    /// Geometry view over all features, in input order.
    pub fn points(&self) -> impl Iterator<Item = Point<f64>> + '_ {
        self.features.iter().map(PointFeature::point)
    }
}
