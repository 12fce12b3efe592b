pub mod coords;
pub mod range;
pub mod spatial_ref;

// Foundation crate: small, well-tested primitives only.
pub use coords::*;
pub use range::*;
pub use spatial_ref::*;
