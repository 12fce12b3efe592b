use foundation::{LonLat, SpatialReference};
use serde::{Deserialize, Serialize};

use crate::symbology::Symbol;

/// Geometry handed to the renderer. Every variant carries the session's
/// spatial reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    Polyline {
        paths: Vec<LonLat>,
        #[serde(rename = "spatialReference")]
        spatial_reference: SpatialReference,
    },
    Point {
        longitude: f64,
        latitude: f64,
        #[serde(rename = "spatialReference")]
        spatial_reference: SpatialReference,
    },
}

impl Geometry {
    pub fn polyline(paths: Vec<LonLat>, spatial_reference: SpatialReference) -> Self {
        Self::Polyline {
            paths,
            spatial_reference,
        }
    }

    pub fn point(position: LonLat, spatial_reference: SpatialReference) -> Self {
        Self::Point {
            longitude: position.lon,
            latitude: position.lat,
            spatial_reference,
        }
    }

    pub fn spatial_reference(&self) -> SpatialReference {
        match self {
            Self::Polyline {
                spatial_reference, ..
            }
            | Self::Point {
                spatial_reference, ..
            } => *spatial_reference,
        }
    }

    pub fn vertex_count(&self) -> usize {
        match self {
            Self::Polyline { paths, .. } => paths.len(),
            Self::Point { .. } => 1,
        }
    }
}

/// One renderable item of an overlay: a geometry and its symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graphic {
    pub geometry: Geometry,
    pub symbol: Symbol,
}

impl Graphic {
    pub fn new(geometry: Geometry, symbol: Symbol) -> Self {
        Self { geometry, symbol }
    }
}

#[cfg(test)]
mod tests {
    use super::{Geometry, Graphic};
    use crate::symbology::{LineStyle, Symbol};
    use foundation::{LonLat, SpatialReference};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn polyline_graphic_json() {
        let graphic = Graphic::new(
            Geometry::polyline(
                vec![LonLat::new(-180.0, -90.0), LonLat::new(-180.0, -85.0)],
                SpatialReference::MARS_2000,
            ),
            Symbol::SimpleLine(LineStyle::default()),
        );
        let value = serde_json::to_value(&graphic).expect("json");
        assert_eq!(
            value["geometry"],
            json!({
                "type": "polyline",
                "paths": [[-180.0, -90.0], [-180.0, -85.0]],
                "spatialReference": { "wkid": 104971 }
            })
        );
    }

    #[test]
    fn point_carries_reference() {
        let geom = Geometry::point(LonLat::new(1.0, 2.0), SpatialReference::new(4326));
        assert_eq!(geom.spatial_reference(), SpatialReference::new(4326));
        assert_eq!(geom.vertex_count(), 1);
        let value = serde_json::to_value(&geom).expect("json");
        assert_eq!(value["longitude"], 1.0);
        assert_eq!(value["latitude"], 2.0);
    }
}
