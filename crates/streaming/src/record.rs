use foundation::{LonLat, SpatialReference};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FeatureQueryError;

/// Attribute naming the 3D model a feature places on the map.
pub const MODEL_FIELD: &str = "model";

/// Point geometry of a feature record.
///
/// Feature services report geographic points either as `x`/`y` or as
/// `longitude`/`latitude`; both spellings are accepted.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    #[serde(alias = "x")]
    pub longitude: f64,
    #[serde(alias = "y")]
    pub latitude: f64,
}

impl PointGeometry {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// One row of a remote dataset. Read-only to the overlay pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(default)]
    pub geometry: Option<PointGeometry>,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl FeatureRecord {
    pub fn new(longitude: f64, latitude: f64, attributes: Map<String, Value>) -> Self {
        Self {
            geometry: Some(PointGeometry::new(longitude, latitude)),
            attributes,
        }
    }

    /// Record carrying only a position and a model attribute.
    pub fn with_model(longitude: f64, latitude: f64, model: impl Into<String>) -> Self {
        let mut attributes = Map::new();
        attributes.insert(MODEL_FIELD.to_string(), Value::String(model.into()));
        Self::new(longitude, latitude, attributes)
    }

    pub fn position(&self) -> Option<LonLat> {
        self.geometry
            .map(|g| LonLat::new(g.longitude, g.latitude))
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn model(&self) -> Option<&Value> {
        self.attribute(MODEL_FIELD)
    }
}

/// The complete result of one query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureSet {
    /// Reference the service declared for the returned coordinates, if any.
    pub spatial_reference: Option<SpatialReference>,
    pub features: Vec<FeatureRecord>,
}

impl FeatureSet {
    pub fn new(spatial_reference: Option<SpatialReference>, features: Vec<FeatureRecord>) -> Self {
        Self {
            spatial_reference,
            features,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Records are placed without reprojection, so they must already be in
    /// the session reference. A set that declares no reference is trusted.
    pub fn ensure_spatial_reference(
        &self,
        expected: SpatialReference,
    ) -> Result<(), FeatureQueryError> {
        match self.spatial_reference {
            Some(actual) if actual != expected => Err(
                FeatureQueryError::spatial_reference_mismatch(expected, actual),
            ),
            _ => Ok(()),
        }
    }
}
