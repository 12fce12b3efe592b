use serde::{Deserialize, Serialize};

/// RGBA color; channels 0-255 for RGB and 0-1 for alpha.
pub type Color = [f64; 4];

pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineDash {
    Solid,
    Dash,
    Dot,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub style: LineDash,
    pub color: Color,
    pub width: f64,
}

impl LineStyle {
    pub const fn new(style: LineDash, color: Color, width: f64) -> Self {
        Self {
            style,
            color,
            width,
        }
    }
}

impl Default for LineStyle {
    /// Graticule line: solid, 1 px, black.
    fn default() -> Self {
        Self::new(LineDash::Solid, BLACK, 1.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font: Font,
    pub halo_color: Color,
    pub halo_size: f64,
}

impl Default for TextStyle {
    /// Graticule label: 11 pt with a light translucent halo.
    fn default() -> Self {
        Self {
            font: Font { size: 11.0 },
            halo_color: [180.0, 180.0, 180.0, 0.6],
            halo_size: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSymbol {
    pub text: String,
    #[serde(flatten)]
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SymbolLayer {
    Object { resource: Resource },
}

/// Point symbol that places an external 3D model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSymbol {
    pub symbol_layers: Vec<SymbolLayer>,
}

impl ObjectSymbol {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            symbol_layers: vec![SymbolLayer::Object {
                resource: Resource { href: href.into() },
            }],
        }
    }

    pub fn href(&self) -> Option<&str> {
        match self.symbol_layers.first()? {
            SymbolLayer::Object { resource } => Some(resource.href.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Symbol {
    SimpleLine(LineStyle),
    Text(TextSymbol),
    #[serde(rename = "point-3d")]
    Point3d(ObjectSymbol),
}
