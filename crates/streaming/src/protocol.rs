//! Wire format of a feature-service `query` response.
//!
//! A successful response is a feature set:
//! `{"spatialReference":{"wkid":…},"features":[{"attributes":{…},"geometry":{…}}]}`.
//! Services report failures inside a 200 response as `{"error":{…}}`.

use foundation::SpatialReference;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{FeatureQueryError, FeatureQueryErrorKind};
use crate::record::{FeatureRecord, FeatureSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSpatialReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wkid: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_wkid: Option<u32>,
}

impl WireSpatialReference {
    pub fn resolve(&self) -> Option<SpatialReference> {
        self.wkid.or(self.latest_wkid).map(SpatialReference::new)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSetResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_reference: Option<WireSpatialReference>,
    /// Required: a body without it is not a feature set.
    pub features: Vec<FeatureRecord>,
    /// Set by the service when it truncated the result to its record limit.
    #[serde(default)]
    pub exceeded_transfer_limit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Error { error: ServiceError },
    FeatureSet(FeatureSetResponse),
}

/// Decode a `query` response body into a [`FeatureSet`].
pub fn decode_feature_set(body: &[u8]) -> Result<FeatureSet, FeatureQueryError> {
    let response: QueryResponse = serde_json::from_slice(body).map_err(|e| {
        FeatureQueryError::with_source(
            FeatureQueryErrorKind::Decode,
            "response is not a feature set",
            e,
        )
    })?;

    match response {
        QueryResponse::Error { error } => {
            let mut message = match error.code {
                Some(code) => format!("service error {code}: {}", error.message),
                None => format!("service error: {}", error.message),
            };
            if !error.details.is_empty() {
                message.push_str(&format!(" ({})", error.details.join("; ")));
            }
            Err(FeatureQueryError::new(FeatureQueryErrorKind::Service, message))
        }
        QueryResponse::FeatureSet(set) => {
            if set.exceeded_transfer_limit {
                // Paging is not performed; the truncated set is used as-is.
                warn!(
                    "feature service truncated the result at {} records",
                    set.features.len()
                );
            }
            Ok(FeatureSet::new(
                set.spatial_reference.as_ref().and_then(|sr| sr.resolve()),
                set.features,
            ))
        }
    }
}
