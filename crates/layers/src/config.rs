use foundation::SpatialReference;
use streaming::{DatasetLocator, FeatureQuery};

use crate::graticule::GraticuleConfig;
use crate::markers::DEFAULT_ASSET_ROOT;

/// Everything the overlay builders need, supplied once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Reference of every geometry built in this session. Fetched records are
    /// expected to already be expressed in it.
    pub spatial_reference: SpatialReference,
    /// Dataset the 3D objects come from.
    pub objects_locator: DatasetLocator,
    pub api_key: Option<String>,
    /// Directory the 3D model files are served from.
    pub asset_root: String,
    pub graticule: GraticuleConfig,
}

impl OverlayConfig {
    pub fn new(objects_locator: DatasetLocator) -> Self {
        Self {
            spatial_reference: SpatialReference::default(),
            objects_locator,
            api_key: None,
            asset_root: DEFAULT_ASSET_ROOT.to_string(),
            graticule: GraticuleConfig::default(),
        }
    }

    pub fn with_spatial_reference(mut self, reference: SpatialReference) -> Self {
        self.spatial_reference = reference;
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_asset_root(mut self, asset_root: impl Into<String>) -> Self {
        self.asset_root = asset_root.into();
        self
    }

    /// The single "all records" query issued for the 3D overlay.
    pub fn objects_query(&self) -> FeatureQuery {
        FeatureQuery::all(self.objects_locator.clone())
            .with_out_spatial_reference(self.spatial_reference)
            .with_token(self.api_key.clone())
    }
}
