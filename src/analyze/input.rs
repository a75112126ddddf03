//! GeoJSON input adapter.
//!
//! The core library only sees in-memory collections; everything about file
//! formats lives here in the binary. Only Point features are accepted.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use triage::models::{Crs, FeatureCollection, PointFeature};

#[derive(Deserialize)]
struct RawCollection {
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: serde_json::Map<String, Value>,
    geometry: Option<RawGeometry>,
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    /// Kept as raw JSON: non-point geometries nest their coordinate arrays.
    #[serde(default)]
    coordinates: Value,
}

/// Extract `(x, y)` from a Point coordinate array.
fn point_coordinates(geometry: &RawGeometry) -> Option<(f64, f64)> {
    if geometry.kind != "Point" {
        return None;
    }
    let coords = geometry.coordinates.as_array()?;
    if coords.len() < 2 {
        return None;
    }
    Some((coords[0].as_f64()?, coords[1].as_f64()?))
}

/// Property keys checked for an event timestamp, in order.
const TIMESTAMP_KEYS: [&str; 3] = ["recorded_at", "timestamp", "date"];

/// Load a GeoJSON FeatureCollection of points.
///
/// `name_key` selects the property used as the feature name; remaining
/// scalar properties are kept as string attributes. Non-point geometries
/// are skipped with a warning.
pub fn load_features(path: &Path, crs: Crs, name_key: &str) -> Result<FeatureCollection> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let raw: RawCollection = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let mut features = Vec::with_capacity(raw.features.len());
    let mut skipped = 0usize;

    for rf in raw.features {
        let (x, y) = match rf.geometry.as_ref().and_then(point_coordinates) {
            Some(coords) => coords,
            None => {
                skipped += 1;
                continue;
            }
        };

        let mut feature = PointFeature::new(x, y);

        for (key, value) in rf.properties {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => continue,
            };

            if key == name_key {
                feature.name = Some(text);
            } else if feature.recorded_at.is_none() && TIMESTAMP_KEYS.contains(&key.as_str()) {
                match DateTime::parse_from_rfc3339(&text) {
                    Ok(ts) => feature.recorded_at = Some(ts.with_timezone(&Utc)),
                    Err(_) => {
                        feature.attrs.insert(key, text);
                    }
                }
            } else {
                feature.attrs.insert(key, text);
            }
        }

        features.push(feature);
    }

    if skipped > 0 {
        warn!("Skipped {} non-point features in {}", skipped, path.display());
    }

    Ok(FeatureCollection::new(crs, features))
}
