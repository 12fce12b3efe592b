use foundation::SpatialReference;
use layers::OverlayConfig;
use streaming::DatasetLocator;

/// Surface objects of the Mars viewer.
pub const DEFAULT_OBJECTS_URL: &str = "https://services7.arcgis.com/DhtXm9kBXs1EuvvD/arcgis/rest/services/Mars_Surface_Objects/FeatureServer";
pub const DEFAULT_ADDR: &str = "127.0.0.1:9200";

/// Overlay settings shared by the server and the fetch tool. Flags win over
/// environment variables, which win over the defaults.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OverlayArgs {
    /// Feature service holding the 3D objects [env: OBJECTS_URL]
    #[arg(long)]
    pub objects_url: Option<String>,

    /// Session spatial reference wkid (default: 104971, Mars 2000) [env: SPATIAL_REFERENCE]
    #[arg(long)]
    pub spatial_reference: Option<SpatialReference>,

    /// API key sent with feature queries [env: ARCGIS_API_KEY]
    #[arg(long)]
    pub api_key: Option<String>,

    /// Prefix of model hrefs (default: assets/3d) [env: ASSET_ROOT]
    #[arg(long)]
    pub asset_root: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsError {
    pub message: String,
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SettingsError {}

impl OverlayArgs {
    /// Build the overlay config, consulting `env` for unset flags.
    pub fn resolve(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<OverlayConfig, SettingsError> {
        let objects_url = self
            .objects_url
            .clone()
            .or_else(|| env("OBJECTS_URL"))
            .unwrap_or_else(|| DEFAULT_OBJECTS_URL.to_string());

        let spatial_reference = match self.spatial_reference {
            Some(sr) => sr,
            None => match env("SPATIAL_REFERENCE") {
                Some(raw) => raw.parse().map_err(|e| SettingsError {
                    message: format!("invalid SPATIAL_REFERENCE {raw:?}: {e}"),
                })?,
                None => SpatialReference::default(),
            },
        };

        let mut config = OverlayConfig::new(DatasetLocator::new(objects_url))
            .with_spatial_reference(spatial_reference)
            .with_api_key(self.api_key.clone().or_else(|| env("ARCGIS_API_KEY")));
        if let Some(root) = self.asset_root.clone().or_else(|| env("ASSET_ROOT")) {
            config = config.with_asset_root(root);
        }
        Ok(config)
    }
}
