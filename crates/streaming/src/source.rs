use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};

use foundation::SpatialReference;
use tokio::sync::{Mutex, oneshot};

use crate::error::{FeatureQueryError, FeatureQueryErrorKind};
use crate::record::{FeatureRecord, FeatureSet};
use crate::request::FeatureQuery;

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A remote (or stand-in) dataset that can be asked for all of its records.
///
/// Implementations must be `Send + Sync` for use across async tasks.
/// Methods return boxed futures for dyn-compatibility.
pub trait FeatureSource: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    /// Run `query` and return the complete result. No paging, no retry.
    fn query_all<'a>(
        &'a self,
        query: &'a FeatureQuery,
    ) -> BoxFuture<'a, Result<FeatureSet, FeatureQueryError>>;
}

/// Opens the gate of a gated [`MemoryFeatureSource`].
///
/// Dropping the gate without opening it leaves every pending query suspended
/// forever, like a request that never gets an answer.
#[derive(Debug)]
pub struct FeatureGate {
    tx: oneshot::Sender<()>,
}

impl FeatureGate {
    pub fn open(self) {
        let _ = self.tx.send(());
    }
}

/// In-memory feature source for testing and offline use.
#[derive(Debug)]
pub struct MemoryFeatureSource {
    name: String,
    spatial_reference: Option<SpatialReference>,
    features: Vec<FeatureRecord>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    queries: AtomicUsize,
}

impl MemoryFeatureSource {
    pub fn new(name: impl Into<String>, features: Vec<FeatureRecord>) -> Self {
        Self {
            name: name.into(),
            spatial_reference: None,
            features,
            gate: Mutex::new(None),
            queries: AtomicUsize::new(0),
        }
    }

    /// A source whose queries resolve only once the returned gate is opened.
    pub fn gated(name: impl Into<String>, features: Vec<FeatureRecord>) -> (Self, FeatureGate) {
        let (tx, rx) = oneshot::channel();
        let source = Self {
            gate: Mutex::new(Some(rx)),
            ..Self::new(name, features)
        };
        (source, FeatureGate { tx })
    }

    /// Declare the reference the records are expressed in.
    pub fn with_spatial_reference(mut self, reference: SpatialReference) -> Self {
        self.spatial_reference = Some(reference);
        self
    }

    /// Number of queries issued against this source.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl FeatureSource for MemoryFeatureSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn query_all<'a>(
        &'a self,
        _query: &'a FeatureQuery,
    ) -> BoxFuture<'a, Result<FeatureSet, FeatureQueryError>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            let gate = self.gate.lock().await.take();
            if let Some(rx) = gate
                && rx.await.is_err()
            {
                std::future::pending::<()>().await;
            }
            Ok(FeatureSet::new(
                self.spatial_reference,
                self.features.clone(),
            ))
        })
    }
}

/// Feature source whose every query is rejected.
#[derive(Debug, Clone)]
pub struct FailingFeatureSource {
    name: String,
    message: String,
}

impl FailingFeatureSource {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl FeatureSource for FailingFeatureSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn query_all<'a>(
        &'a self,
        _query: &'a FeatureQuery,
    ) -> BoxFuture<'a, Result<FeatureSet, FeatureQueryError>> {
        Box::pin(async move {
            Err(FeatureQueryError::new(
                FeatureQueryErrorKind::Transport,
                self.message.clone(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{FailingFeatureSource, FeatureSource, MemoryFeatureSource};
    use crate::record::FeatureRecord;
    use crate::request::{DatasetLocator, FeatureQuery};
    use foundation::SpatialReference;
    use std::sync::Arc;
    use std::time::Duration;

    fn query() -> FeatureQuery {
        FeatureQuery::all(DatasetLocator::new("memory://objects"))
    }

    #[tokio::test]
    async fn memory_source_returns_all_records_in_order() {
        let source = MemoryFeatureSource::new(
            "objects",
            vec![
                FeatureRecord::with_model(1.0, 2.0, "a"),
                FeatureRecord::with_model(3.0, 4.0, "b"),
            ],
        )
        .with_spatial_reference(SpatialReference::MARS_2000);
        let q = query();
        let set = source.query_all(&q).await.expect("query");
        assert_eq!(set.len(), 2);
        assert_eq!(set.spatial_reference, Some(SpatialReference::MARS_2000));
        assert_eq!(set.features[0].model(), Some(&serde_json::json!("a")));
        assert_eq!(source.query_count(), 1);
    }

    #[tokio::test]
    async fn gated_source_waits_for_gate() {
        let (source, gate) =
            MemoryFeatureSource::gated("objects", vec![FeatureRecord::with_model(0.0, 0.0, "a")]);
        let source = Arc::new(source);
        let task = tokio::spawn({
            let source = Arc::clone(&source);
            async move {
                let q = query();
                source.query_all(&q).await
            }
        });

        tokio::task::yield_now().await;
        assert!(!task.is_finished(), "query resolved before the gate opened");

        gate.open();
        let set = task.await.expect("join").expect("query");
        assert_eq!(set.len(), 1);
    }

    #[tokio::test]
    async fn dropped_gate_never_resolves() {
        let (source, gate) = MemoryFeatureSource::gated("objects", vec![]);
        drop(gate);
        let q = query();
        let outcome = tokio::time::timeout(Duration::from_millis(20), source.query_all(&q)).await;
        assert!(outcome.is_err());
    }

    #[tokio::test]
    async fn failing_source_rejects() {
        let source = FailingFeatureSource::new("objects", "network unreachable");
        let q = query();
        let err = source.query_all(&q).await.expect_err("rejected");
        assert_eq!(err.to_string(), "network unreachable");
    }
}
