use serde::{Deserialize, Serialize};

/// Coordinate system every geometry of a session is expressed in.
///
/// Identified by its well-known id. The value is supplied once at startup and
/// copied into each geometry; two geometries share a reference iff their wkids
/// are equal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpatialReference {
    pub wkid: u32,
}

impl SpatialReference {
    /// GCS Mars 2000 (planetocentric, degrees).
    pub const MARS_2000: Self = Self { wkid: 104_971 };

    pub const fn new(wkid: u32) -> Self {
        Self { wkid }
    }
}

impl Default for SpatialReference {
    fn default() -> Self {
        Self::MARS_2000
    }
}

impl std::fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wkid:{}", self.wkid)
    }
}

impl std::str::FromStr for SpatialReference {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let raw = raw.strip_prefix("wkid:").unwrap_or(raw);
        raw.parse::<u32>().map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::SpatialReference;

    #[test]
    fn default_is_mars_2000() {
        assert_eq!(SpatialReference::default().wkid, 104_971);
    }

    #[test]
    fn parses_plain_and_prefixed_wkid() {
        assert_eq!(
            "104971".parse::<SpatialReference>().expect("plain"),
            SpatialReference::MARS_2000
        );
        assert_eq!(
            "wkid:4326".parse::<SpatialReference>().expect("prefixed"),
            SpatialReference::new(4326)
        );
        assert!("mars".parse::<SpatialReference>().is_err());
    }

    #[test]
    fn serializes_as_wkid_object() {
        let json = serde_json::to_string(&SpatialReference::MARS_2000).expect("json");
        assert_eq!(json, r#"{"wkid":104971}"#);
    }
}
