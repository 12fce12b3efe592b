//! Latitude/longitude grid ("graticule") with its labels.
//!
//! Generation is pure integer arithmetic over fixed ranges: the same config
//! and spatial reference always produce the same lines and labels in the same
//! order.

use foundation::{DegreeRange, LonLat, SpatialReference};

use crate::config::OverlayConfig;
use crate::graphic::{Geometry, Graphic};
use crate::labels::{GridLabel, latitude_labels, longitude_labels};
use crate::layer::GRATICULE_LAYER_ID;
use crate::overlay::Overlay;
use crate::symbology::{LineStyle, Symbol, TextStyle};

pub const GRATICULE_TITLE: &str = "Coordinate System";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GridLineKind {
    /// Constant longitude.
    Meridian,
    /// Constant latitude.
    Parallel,
}

/// One polyline of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub kind: GridLineKind,
    /// The constant coordinate of the line, in whole degrees.
    pub value: i32,
    pub vertices: Vec<LonLat>,
    pub spatial_reference: SpatialReference,
    pub style: LineStyle,
}

impl From<GridLine> for Graphic {
    fn from(line: GridLine) -> Self {
        Graphic::new(
            Geometry::polyline(line.vertices, line.spatial_reference),
            Symbol::SimpleLine(line.style),
        )
    }
}

/// Ranges and placements of the grid, in whole degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct GraticuleConfig {
    /// Longitudes of the meridians.
    pub meridians: DegreeRange,
    /// Latitudes of the vertices along each meridian.
    pub meridian_vertices: DegreeRange,
    /// Latitudes of the parallels.
    pub parallels: DegreeRange,
    /// Longitudes of the vertices along each parallel.
    pub parallel_vertices: DegreeRange,
    /// Longitudes that get a label.
    pub longitude_labels: DegreeRange,
    /// Latitude the longitude labels sit on. Latitude labels skip it.
    pub longitude_label_latitude: i32,
    /// Latitudes that get a label.
    pub latitude_labels: DegreeRange,
    /// Longitudes each latitude label is repeated at.
    pub latitude_label_longitudes: Vec<i32>,
    pub line_style: LineStyle,
    pub text_style: TextStyle,
}

impl Default for GraticuleConfig {
    fn default() -> Self {
        Self {
            meridians: DegreeRange::half_open(-180, 180, 20),
            meridian_vertices: DegreeRange::closed(-90, 90, 5),
            parallels: DegreeRange::closed(-80, 80, 10),
            // The end lies one step past 180, so each parallel ends on +180
            // and its last segment overlaps the -180 seam. Kept as is.
            parallel_vertices: DegreeRange::half_open(-180, 190, 10),
            longitude_labels: DegreeRange::closed(-160, 180, 20),
            longitude_label_latitude: 0,
            latitude_labels: DegreeRange::closed(-80, 80, 10),
            latitude_label_longitudes: vec![-120, 120],
            line_style: LineStyle::default(),
            text_style: TextStyle::default(),
        }
    }
}

/// The four geometry families of a graticule.
#[derive(Debug, Clone, PartialEq)]
pub struct Graticule {
    pub meridians: Vec<GridLine>,
    pub parallels: Vec<GridLine>,
    pub longitude_labels: Vec<GridLabel>,
    pub latitude_labels: Vec<GridLabel>,
}

impl Graticule {
    pub fn line_count(&self) -> usize {
        self.meridians.len() + self.parallels.len()
    }

    pub fn label_count(&self) -> usize {
        self.longitude_labels.len() + self.latitude_labels.len()
    }

    /// Meridians, then parallels, then longitude labels, then latitude labels.
    pub fn into_graphics(self) -> Vec<Graphic> {
        let mut out = Vec::with_capacity(self.line_count() + self.label_count());
        out.extend(self.meridians.into_iter().map(Graphic::from));
        out.extend(self.parallels.into_iter().map(Graphic::from));
        out.extend(self.longitude_labels.into_iter().map(Graphic::from));
        out.extend(self.latitude_labels.into_iter().map(Graphic::from));
        out
    }
}

pub fn generate(config: &GraticuleConfig, spatial_reference: SpatialReference) -> Graticule {
    let meridians = config
        .meridians
        .iter()
        .map(|lon| GridLine {
            kind: GridLineKind::Meridian,
            value: lon,
            vertices: config
                .meridian_vertices
                .iter()
                .map(|lat| LonLat::from((lon, lat)))
                .collect(),
            spatial_reference,
            style: config.line_style,
        })
        .collect();

    let parallels = config
        .parallels
        .iter()
        .map(|lat| GridLine {
            kind: GridLineKind::Parallel,
            value: lat,
            vertices: config
                .parallel_vertices
                .iter()
                .map(|lon| LonLat::from((lon, lat)))
                .collect(),
            spatial_reference,
            style: config.line_style,
        })
        .collect();

    Graticule {
        meridians,
        parallels,
        longitude_labels: longitude_labels(
            config.longitude_labels,
            config.longitude_label_latitude,
            spatial_reference,
            config.text_style,
        ),
        latitude_labels: latitude_labels(
            config.latitude_labels,
            config.longitude_label_latitude,
            &config.latitude_label_longitudes,
            spatial_reference,
            config.text_style,
        ),
    }
}

/// Builds the closed "Coordinate System" overlay.
pub fn build_graticule_overlay(config: &OverlayConfig) -> Overlay {
    let graticule = generate(&config.graticule, config.spatial_reference);
    tracing::debug!(
        lines = graticule.line_count(),
        labels = graticule.label_count(),
        "graticule generated"
    );
    Overlay::closed(GRATICULE_LAYER_ID, GRATICULE_TITLE, graticule.into_graphics())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelKind;
    use crate::layer::Layer;
    use crate::overlay::{FetchStatus, OverlayState};
    use pretty_assertions::assert_eq;
    use streaming::DatasetLocator;

    fn mars() -> Graticule {
        generate(&GraticuleConfig::default(), SpatialReference::MARS_2000)
    }

    #[test]
    fn meridians() {
        let g = mars();
        assert_eq!(g.meridians.len(), 18);
        let lons: Vec<i32> = g.meridians.iter().map(|m| m.value).collect();
        assert_eq!(lons, (-180..180).step_by(20).collect::<Vec<_>>());

        let expected_lats: Vec<f64> = (-90..=90).step_by(5).map(f64::from).collect();
        for m in &g.meridians {
            assert_eq!(m.kind, GridLineKind::Meridian);
            assert_eq!(m.vertices.len(), 37);
            assert!(m.vertices.iter().all(|v| v.lon == f64::from(m.value)));
            let lats: Vec<f64> = m.vertices.iter().map(|v| v.lat).collect();
            assert_eq!(lats, expected_lats);
        }
    }

    #[test]
    fn parallels_end_on_the_seam() {
        let g = mars();
        assert_eq!(g.parallels.len(), 17);
        let lats: Vec<i32> = g.parallels.iter().map(|p| p.value).collect();
        assert_eq!(lats, (-80..=80).step_by(10).collect::<Vec<_>>());

        let expected_lons: Vec<f64> = (-180..190).step_by(10).map(f64::from).collect();
        assert_eq!(expected_lons.len(), 37);
        for p in &g.parallels {
            assert_eq!(p.kind, GridLineKind::Parallel);
            let lons: Vec<f64> = p.vertices.iter().map(|v| v.lon).collect();
            assert_eq!(lons, expected_lons);
            assert!(p.vertices.iter().all(|v| v.lat == f64::from(p.value)));
            // First and last vertex are the same place on the globe.
            assert_eq!(p.vertices.first().map(|v| v.lon), Some(-180.0));
            assert_eq!(p.vertices.last().map(|v| v.lon), Some(180.0));
        }
    }

    #[test]
    fn longitude_labels_along_equator() {
        let g = mars();
        assert_eq!(g.longitude_labels.len(), 18);
        for (label, lon) in g.longitude_labels.iter().zip((-160..=180).step_by(20)) {
            assert_eq!(label.kind, LabelKind::Longitude);
            assert_eq!(label.position, LonLat::new(f64::from(lon), 0.0));
            assert_eq!(label.text, format!("{lon}°"));
        }
    }

    #[test]
    fn latitude_labels_skip_equator() {
        let g = mars();
        assert_eq!(g.latitude_labels.len(), 32);
        assert!(g.latitude_labels.iter().all(|l| l.position.lat != 0.0));
        assert!(
            g.latitude_labels
                .iter()
                .all(|l| l.position.lon == -120.0 || l.position.lon == 120.0)
        );
        assert_eq!(g.latitude_labels[0].text, "-80°");
        assert_eq!(g.latitude_labels[31].text, "80°");
    }

    #[test]
    fn styles_are_shared() {
        let g = mars();
        assert!(
            g.meridians
                .iter()
                .chain(&g.parallels)
                .all(|l| l.style == LineStyle::default())
        );
        assert!(
            g.longitude_labels
                .iter()
                .chain(&g.latitude_labels)
                .all(|l| l.style == TextStyle::default())
        );
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(mars(), mars());
    }

    #[test]
    fn every_geometry_carries_session_reference() {
        let reference = SpatialReference::new(49_900);
        let graphics = generate(&GraticuleConfig::default(), reference).into_graphics();
        assert!(
            graphics
                .iter()
                .all(|g| g.geometry.spatial_reference() == reference)
        );
    }

    #[test]
    fn overlay_order_and_state() {
        let config = OverlayConfig::new(DatasetLocator::new("memory://objects"));
        let overlay = build_graticule_overlay(&config);
        assert_eq!(overlay.title(), GRATICULE_TITLE);
        assert_eq!(overlay.state(), OverlayState::Populated);
        assert_eq!(overlay.fetch_status(), FetchStatus::NotRequested);
        assert_eq!(overlay.len(), 18 + 17 + 18 + 32);

        let graphics = overlay.graphics();
        let kinds: Vec<&str> = graphics
            .iter()
            .map(|g| match (&g.geometry, &g.symbol) {
                (Geometry::Polyline { paths, .. }, _) if paths[0].lon == paths[1].lon => "meridian",
                (Geometry::Polyline { .. }, _) => "parallel",
                (Geometry::Point { latitude, .. }, Symbol::Text(_)) if *latitude == 0.0 => {
                    "lon-label"
                }
                _ => "lat-label",
            })
            .collect();
        let mut expected = vec!["meridian"; 18];
        expected.extend(vec!["parallel"; 17]);
        expected.extend(vec!["lon-label"; 18]);
        expected.extend(vec!["lat-label"; 32]);
        assert_eq!(kinds, expected);
    }
}
