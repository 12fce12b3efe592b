//! Map overlays built on top of the base layers: the latitude/longitude
//! graticule and the 3D objects placed from a remote feature dataset.

pub mod config;
pub mod graphic;
pub mod graticule;
pub mod labels;
pub mod layer;
pub mod markers;
pub mod objects;
pub mod overlay;
pub mod symbology;

pub use config::*;
pub use graphic::*;
pub use graticule::{GRATICULE_TITLE, Graticule, GraticuleConfig, build_graticule_overlay};
pub use layer::*;
pub use markers::{AssetId, AssetIdError, Marker, map_feature};
pub use objects::*;
pub use overlay::*;
