//! Feature record → 3D object marker.
//!
//! Mapping is total: every record yields a marker. Model identifiers are
//! interpolated verbatim into `{root}/{model}.glb`; an identifier that would
//! not name a file is still mapped, and is reported through
//! [`Marker::is_resolvable`].

use foundation::{LonLat, SpatialReference};
use serde_json::Value;
use streaming::FeatureRecord;

use crate::graphic::{Geometry, Graphic};
use crate::symbology::{ObjectSymbol, Symbol};

pub const DEFAULT_ASSET_ROOT: &str = "assets/3d";
pub const ASSET_EXTENSION: &str = "glb";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetIdError {
    /// The record has no model attribute (or it is null).
    Missing,
    /// The model attribute is an array or object.
    NotText,
    Empty,
    InvalidCharacter(char),
    /// `.` / `..` segments would escape the asset directory.
    PathTraversal,
}

impl std::fmt::Display for AssetIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "model identifier is missing"),
            Self::NotText => write!(f, "model identifier is not a scalar value"),
            Self::Empty => write!(f, "model identifier is empty"),
            Self::InvalidCharacter(c) => write!(f, "model identifier contains {c:?}"),
            Self::PathTraversal => write!(f, "model identifier escapes the asset directory"),
        }
    }
}

impl std::error::Error for AssetIdError {}

/// A model identifier known to name a single file in the asset directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetId(String);

impl AssetId {
    pub fn parse(raw: &str) -> Result<Self, AssetIdError> {
        if raw.is_empty() {
            return Err(AssetIdError::Empty);
        }
        if raw == "." || raw == ".." {
            return Err(AssetIdError::PathTraversal);
        }
        if let Some(c) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(AssetIdError::InvalidCharacter(c));
        }
        Ok(Self(raw.to_string()))
    }

    /// Validate a record's model attribute.
    pub fn from_value(value: Option<&Value>) -> Result<Self, AssetIdError> {
        match value {
            None | Some(Value::Null) => Err(AssetIdError::Missing),
            Some(Value::Array(_)) | Some(Value::Object(_)) => Err(AssetIdError::NotText),
            Some(v) => Self::parse(&model_text(Some(v))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn href(&self, root: &str) -> String {
        asset_href(root, &self.0)
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// `{root}/{model}.glb`, no escaping.
pub fn asset_href(root: &str, model: &str) -> String {
    format!("{}/{model}.{ASSET_EXTENSION}", root.trim_end_matches('/'))
}

/// Text of a model attribute as it lands in the asset path. Strings are used
/// verbatim, numbers and booleans in their JSON spelling, anything else is
/// empty.
pub fn model_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
        _ => String::new(),
    }
}

/// A 3D model placed at a feature's position.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LonLat,
    pub spatial_reference: SpatialReference,
    /// Asset reference handed to the renderer.
    pub href: String,
    /// The model identifier, if it is usable as a file name.
    pub asset: Result<AssetId, AssetIdError>,
}

impl Marker {
    /// Whether the renderer can be expected to find and place the model.
    pub fn is_resolvable(&self) -> bool {
        self.asset.is_ok() && self.position.is_finite()
    }
}

impl From<Marker> for Graphic {
    fn from(marker: Marker) -> Self {
        Graphic::new(
            Geometry::point(marker.position, marker.spatial_reference),
            Symbol::Point3d(ObjectSymbol::new(marker.href)),
        )
    }
}

/// Map one record. Coordinates are taken as-is in `spatial_reference`; a
/// record without geometry gets a NaN position.
pub fn map_feature(
    record: &FeatureRecord,
    spatial_reference: SpatialReference,
    asset_root: &str,
) -> Marker {
    let model = record.model();
    Marker {
        position: record
            .position()
            .unwrap_or(LonLat::new(f64::NAN, f64::NAN)),
        spatial_reference,
        href: asset_href(asset_root, &model_text(model)),
        asset: AssetId::from_value(model),
    }
}
