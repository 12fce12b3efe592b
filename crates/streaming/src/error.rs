use foundation::SpatialReference;

/// What went wrong with a feature query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureQueryErrorKind {
    /// The request never produced a response (DNS, TLS, connection reset).
    Transport,
    /// The service answered with a non-success HTTP status.
    Status(u16),
    /// The service answered 200 with an error document.
    Service,
    /// The response body was not a feature set.
    Decode,
    /// The feature set declares coordinates in another spatial reference.
    SpatialReferenceMismatch {
        expected: SpatialReference,
        actual: SpatialReference,
    },
    /// The task running the query stopped before finishing.
    Interrupted,
}

/// Error type for feature query operations.
#[derive(Debug)]
pub struct FeatureQueryError {
    pub kind: FeatureQueryErrorKind,
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl std::fmt::Display for FeatureQueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FeatureQueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}

impl FeatureQueryError {
    pub fn new(kind: FeatureQueryErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        kind: FeatureQueryErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn spatial_reference_mismatch(expected: SpatialReference, actual: SpatialReference) -> Self {
        Self::new(
            FeatureQueryErrorKind::SpatialReferenceMismatch { expected, actual },
            format!("feature set is in {actual}, session expects {expected}"),
        )
    }
}
