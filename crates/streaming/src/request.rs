use foundation::SpatialReference;

/// Where a dataset lives: a feature service URL, optionally ending in a layer
/// index (`…/FeatureServer/0`). A bare service URL addresses layer 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetLocator(String);

impl DatasetLocator {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL of the layer's `query` operation.
    pub fn query_url(&self) -> String {
        let base = self.0.trim_end_matches('/');
        let ends_with_layer = base
            .rsplit('/')
            .next()
            .is_some_and(|seg| !seg.is_empty() && seg.bytes().all(|b| b.is_ascii_digit()));
        if ends_with_layer {
            format!("{base}/query")
        } else {
            format!("{base}/0/query")
        }
    }
}

impl std::fmt::Display for DatasetLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parameters of a feature query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureQuery {
    pub locator: DatasetLocator,
    pub where_clause: String,
    pub out_fields: Vec<String>,
    pub return_geometry: bool,
    /// Ask the service to express coordinates in this reference.
    pub out_spatial_reference: Option<SpatialReference>,
    /// API key sent as `token`.
    pub token: Option<String>,
}

impl FeatureQuery {
    /// Every record, every attribute, with geometry.
    pub fn all(locator: DatasetLocator) -> Self {
        Self {
            locator,
            where_clause: "1=1".to_string(),
            out_fields: vec!["*".to_string()],
            return_geometry: true,
            out_spatial_reference: None,
            token: None,
        }
    }

    pub fn with_out_spatial_reference(mut self, reference: SpatialReference) -> Self {
        self.out_spatial_reference = Some(reference);
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Query-string pairs for the service's REST `query` operation.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("where", self.where_clause.clone()),
            ("outFields", self.out_fields.join(",")),
            ("returnGeometry", self.return_geometry.to_string()),
        ];
        if let Some(sr) = self.out_spatial_reference {
            params.push(("outSR", sr.wkid.to_string()));
        }
        if let Some(token) = &self.token {
            params.push(("token", token.clone()));
        }
        params.push(("f", "json".to_string()));
        params
    }
}
