//! HTTP hand-off of the viewer overlays to the map client.

pub mod routes;
pub mod settings;
