use tracing::debug;

use crate::error::{FeatureQueryError, FeatureQueryErrorKind};
use crate::protocol::decode_feature_set;
use crate::record::FeatureSet;
use crate::request::FeatureQuery;
use crate::source::{BoxFuture, FeatureSource};

/// Feature source backed by a feature service's REST `query` operation.
pub struct HttpFeatureSource {
    name: String,
    client: reqwest::Client,
}

impl HttpFeatureSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_client(name, reqwest::Client::new())
    }

    pub fn with_client(name: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            name: name.into(),
            client,
        }
    }
}

impl FeatureSource for HttpFeatureSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn query_all<'a>(
        &'a self,
        query: &'a FeatureQuery,
    ) -> BoxFuture<'a, Result<FeatureSet, FeatureQueryError>> {
        let url = query.locator.query_url();
        Box::pin(async move {
            debug!(source = %self.name, %url, "querying features");
            let resp = self
                .client
                .get(&url)
                .query(&query.params())
                .send()
                .await
                .map_err(|e| {
                    FeatureQueryError::with_source(
                        FeatureQueryErrorKind::Transport,
                        "HTTP request failed",
                        e,
                    )
                })?;

            let status = resp.status();
            if !status.is_success() {
                return Err(FeatureQueryError::new(
                    FeatureQueryErrorKind::Status(status.as_u16()),
                    format!("HTTP error: {status}"),
                ));
            }

            let bytes = resp.bytes().await.map_err(|e| {
                FeatureQueryError::with_source(
                    FeatureQueryErrorKind::Transport,
                    "Failed to read response",
                    e,
                )
            })?;

            let set = decode_feature_set(&bytes)?;
            debug!(source = %self.name, features = set.len(), "feature query resolved");
            Ok(set)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::HttpFeatureSource;
    use crate::error::FeatureQueryErrorKind;
    use crate::request::{DatasetLocator, FeatureQuery};
    use crate::source::FeatureSource;
    use axum::Router;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use foundation::{LonLat, SpatialReference};
    use std::collections::HashMap;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    const QUERY_PATH: &str = "/FeatureServer/0/query";
    const HABITAT_SET: &str = r#"{
        "spatialReference": { "wkid": 104971 },
        "features": [
            { "attributes": { "model": "habitat" }, "geometry": { "x": -60.0, "y": 5.0 } }
        ]
    }"#;

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve") });
        addr
    }

    fn query_for(addr: SocketAddr) -> FeatureQuery {
        FeatureQuery::all(DatasetLocator::new(format!("http://{addr}/FeatureServer")))
    }

    #[tokio::test]
    async fn resolves_feature_set_and_sends_query_params() {
        let seen: Arc<Mutex<Option<HashMap<String, String>>>> = Arc::default();
        let recorder = seen.clone();
        let app = Router::new().route(
            QUERY_PATH,
            get(move |Query(params): Query<HashMap<String, String>>| {
                *recorder.lock().expect("lock") = Some(params);
                async { HABITAT_SET }
            }),
        );
        let addr = serve(app).await;

        let query = query_for(addr)
            .with_out_spatial_reference(SpatialReference::MARS_2000)
            .with_token(Some("key-123".to_string()));
        let source = HttpFeatureSource::new("objects");
        let set = source.query_all(&query).await.expect("feature set");
        assert_eq!(set.spatial_reference, Some(SpatialReference::MARS_2000));
        assert_eq!(set.len(), 1);
        assert_eq!(set.features[0].position(), Some(LonLat::new(-60.0, 5.0)));

        let params = seen.lock().expect("lock").clone().expect("request seen");
        assert_eq!(params.get("where").map(String::as_str), Some("1=1"));
        assert_eq!(params.get("outFields").map(String::as_str), Some("*"));
        assert_eq!(params.get("returnGeometry").map(String::as_str), Some("true"));
        assert_eq!(params.get("outSR").map(String::as_str), Some("104971"));
        assert_eq!(params.get("token").map(String::as_str), Some("key-123"));
        assert_eq!(params.get("f").map(String::as_str), Some("json"));
    }

    #[tokio::test]
    async fn non_success_status() {
        let app = Router::new().route(
            QUERY_PATH,
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let addr = serve(app).await;
        let err = HttpFeatureSource::new("objects")
            .query_all(&query_for(addr))
            .await
            .expect_err("status error");
        assert_eq!(err.kind, FeatureQueryErrorKind::Status(500));
    }

    #[tokio::test]
    async fn service_error_in_ok_response() {
        let app = Router::new().route(
            QUERY_PATH,
            get(|| async { r#"{ "error": { "code": 400, "message": "Invalid query" } }"# }),
        );
        let addr = serve(app).await;
        let err = HttpFeatureSource::new("objects")
            .query_all(&query_for(addr))
            .await
            .expect_err("service error");
        assert_eq!(err.kind, FeatureQueryErrorKind::Service);
        assert_eq!(err.message, "service error 400: Invalid query");
    }

    #[tokio::test]
    async fn unreachable_service() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let err = HttpFeatureSource::new("objects")
            .query_all(&query_for(addr))
            .await
            .expect_err("transport error");
        assert_eq!(err.kind, FeatureQueryErrorKind::Transport);
    }
}
