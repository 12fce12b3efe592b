//! Feature query client: the one remote fetch the overlay pipeline performs.
//!
//! The pipeline only depends on [`FeatureSource`]; the HTTP implementation
//! speaks the feature-service JSON protocol, the memory implementations exist
//! for tests and offline demos.

pub mod error;
pub mod http;
pub mod protocol;
pub mod record;
pub mod request;
pub mod source;

pub use error::*;
pub use http::*;
pub use record::*;
pub use request::*;
pub use source::*;
