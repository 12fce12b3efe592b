use serde::{Deserialize, Serialize};

/// Longitude/latitude pair in degrees.
///
/// Serialized as `[lon, lat]`, the vertex encoding used by polyline paths.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

impl From<[f64; 2]> for LonLat {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<LonLat> for [f64; 2] {
    fn from(p: LonLat) -> Self {
        [p.lon, p.lat]
    }
}

impl From<(i32, i32)> for LonLat {
    fn from((lon, lat): (i32, i32)) -> Self {
        Self::new(f64::from(lon), f64::from(lat))
    }
}
