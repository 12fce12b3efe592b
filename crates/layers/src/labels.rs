use foundation::{DegreeRange, LonLat, SpatialReference};

use crate::graphic::{Geometry, Graphic};
use crate::symbology::{Symbol, TextStyle, TextSymbol};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LabelKind {
    /// Along the equator, one per labelled meridian.
    Longitude,
    /// At fixed longitudes, one per labelled parallel.
    Latitude,
}

/// Text placed at a point of the graticule.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLabel {
    pub kind: LabelKind,
    /// Coordinate value the label shows, in whole degrees.
    pub value: i32,
    pub position: LonLat,
    pub text: String,
    pub spatial_reference: SpatialReference,
    pub style: TextStyle,
}

impl GridLabel {
    pub fn new(
        kind: LabelKind,
        value: i32,
        position: LonLat,
        spatial_reference: SpatialReference,
        style: TextStyle,
    ) -> Self {
        Self {
            kind,
            value,
            position,
            text: degree_text(value),
            spatial_reference,
            style,
        }
    }
}

impl From<GridLabel> for Graphic {
    fn from(label: GridLabel) -> Self {
        Graphic::new(
            Geometry::point(label.position, label.spatial_reference),
            Symbol::Text(TextSymbol {
                text: label.text,
                style: label.style,
            }),
        )
    }
}

/// `-160` → `"-160°"`.
pub fn degree_text(value: i32) -> String {
    format!("{value}°")
}

/// One label per longitude in `longitudes`, all on the parallel `latitude`.
pub fn longitude_labels(
    longitudes: DegreeRange,
    latitude: i32,
    spatial_reference: SpatialReference,
    style: TextStyle,
) -> Vec<GridLabel> {
    longitudes
        .iter()
        .map(|lon| {
            GridLabel::new(
                LabelKind::Longitude,
                lon,
                LonLat::from((lon, latitude)),
                spatial_reference,
                style,
            )
        })
        .collect()
}

/// Labels for every latitude in `latitudes` except `skip`, repeated at each
/// of `at_longitudes`. The skipped latitude is the one the longitude labels
/// sit on.
pub fn latitude_labels(
    latitudes: DegreeRange,
    skip: i32,
    at_longitudes: &[i32],
    spatial_reference: SpatialReference,
    style: TextStyle,
) -> Vec<GridLabel> {
    let mut out = Vec::new();
    for lat in latitudes.iter() {
        if lat == skip {
            continue;
        }
        for &lon in at_longitudes {
            out.push(GridLabel::new(
                LabelKind::Latitude,
                lat,
                LonLat::from((lon, lat)),
                spatial_reference,
                style,
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn degree_text_keeps_sign() {
        assert_eq!(degree_text(-160), "-160°");
        assert_eq!(degree_text(0), "0°");
        assert_eq!(degree_text(180), "180°");
    }

    #[test]
    fn longitude_labels_sit_on_latitude() {
        let labels = longitude_labels(
            DegreeRange::closed(-40, 40, 40),
            0,
            SpatialReference::MARS_2000,
            TextStyle::default(),
        );
        let texts: Vec<&str> = labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["-40°", "0°", "40°"]);
        assert!(labels.iter().all(|l| l.position.lat == 0.0));
        assert!(labels.iter().all(|l| l.kind == LabelKind::Longitude));
    }

    #[test]
    fn latitude_labels_skip_and_repeat() {
        let labels = latitude_labels(
            DegreeRange::closed(-10, 10, 10),
            0,
            &[-120, 120],
            SpatialReference::MARS_2000,
            TextStyle::default(),
        );
        let placed: Vec<(f64, f64, &str)> = labels
            .iter()
            .map(|l| (l.position.lon, l.position.lat, l.text.as_str()))
            .collect();
        assert_eq!(
            placed,
            vec![
                (-120.0, -10.0, "-10°"),
                (120.0, -10.0, "-10°"),
                (-120.0, 10.0, "10°"),
                (120.0, 10.0, "10°"),
            ]
        );
    }

    #[test]
    fn label_graphic_is_text_point() {
        let label = GridLabel::new(
            LabelKind::Latitude,
            30,
            LonLat::new(120.0, 30.0),
            SpatialReference::MARS_2000,
            TextStyle::default(),
        );
        let graphic: Graphic = label.into();
        assert_eq!(
            graphic.geometry,
            Geometry::point(LonLat::new(120.0, 30.0), SpatialReference::MARS_2000)
        );
        match graphic.symbol {
            Symbol::Text(t) => assert_eq!(t.text, "30°"),
            other => panic!("expected text symbol, got {other:?}"),
        }
    }
}
