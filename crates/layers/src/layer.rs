use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LayerId(pub u64);

/// Layer id of the graticule overlay.
pub const GRATICULE_LAYER_ID: LayerId = LayerId(1);
/// Layer id of the 3D object overlay.
pub const OBJECTS_LAYER_ID: LayerId = LayerId(2);

pub trait Layer {
    fn id(&self) -> LayerId;
    fn title(&self) -> String;
}
