//! Planar polygon operations the cutout engine and bounds wrapper delegate to.

use geo::line_intersection::{line_intersection, LineIntersection};
use geo::{BooleanOps, BoundingRect, Coord, Intersects, Line};
use tracing::warn;

use crate::error::{GeoWrapError, Result};
use crate::types::{Extent, Feature, Geometry, LinearRing, Position};

/// External polygon-boolean capability.
///
/// Implementations must be pure: the same operands always give the same answer
/// and neither operand is modified.
pub trait PlanarBoolean {
    fn bounding_box(&self, feature: &Feature) -> Option<Extent>;

    /// `a` minus the areal part of `b`, as a MultiPolygon feature.
    ///
    /// Degenerate or self-intersecting operands fail with `BooleanOpFailure`.
    fn difference(&self, a: &Feature, b: &Feature) -> Result<Feature>;

    fn intersects(&self, feature: &Feature, extent: &Extent) -> bool;
}

/// `PlanarBoolean` backed by the `geo` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoBoolean;

impl PlanarBoolean for GeoBoolean {
    fn bounding_box(&self, feature: &Feature) -> Option<Extent> {
        to_geo(&feature.geometry)
            .bounding_rect()
            .map(|rect| Extent::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }

    fn difference(&self, a: &Feature, b: &Feature) -> Result<Feature> {
        if let Some(err) = first_non_finite(&a.geometry) {
            return Err(GeoWrapError::BooleanOpFailure(format!("minuend {}", err)));
        }
        let errors = validate_geometry(&b.geometry);
        if !errors.is_empty() {
            warn!(?errors, "rejecting subtrahend");
            return Err(GeoWrapError::BooleanOpFailure(errors.join("; ")));
        }

        let result = areal(&a.geometry).difference(&areal(&b.geometry));
        Ok(Feature::new(Geometry::MultiPolygon(from_geo_multi_polygon(
            &result,
        ))))
    }

    fn intersects(&self, feature: &Feature, extent: &Extent) -> bool {
        let window = geo::Rect::new(
            Coord {
                x: extent.min_x,
                y: extent.min_y,
            },
            Coord {
                x: extent.max_x,
                y: extent.max_y,
            },
        )
        .to_polygon();

        match &feature.geometry {
            Geometry::Point(p) => geo::Point::from(coord(p)).intersects(&window),
            Geometry::MultiPoint(points) => points
                .iter()
                .any(|p| geo::Point::from(coord(p)).intersects(&window)),
            Geometry::LineString(line) => line_string(line).intersects(&window),
            Geometry::MultiLineString(lines) => {
                lines.iter().any(|line| line_string(line).intersects(&window))
            }
            Geometry::Polygon(rings) => polygon(rings).intersects(&window),
            Geometry::MultiPolygon(polygons) => polygons
                .iter()
                .any(|rings| polygon(rings).intersects(&window)),
        }
    }
}

fn coord(p: &Position) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

fn line_string(points: &[Position]) -> geo::LineString<f64> {
    geo::LineString::new(points.iter().map(coord).collect())
}

fn polygon(rings: &[LinearRing]) -> geo::Polygon<f64> {
    match rings.split_first() {
        Some((exterior, interiors)) => geo::Polygon::new(
            line_string(exterior),
            interiors.iter().map(|ring| line_string(ring)).collect(),
        ),
        None => geo::Polygon::new(geo::LineString::new(vec![]), vec![]),
    }
}

fn to_geo(geometry: &Geometry) -> geo::Geometry<f64> {
    match geometry {
        Geometry::Point(p) => geo::Geometry::Point(coord(p).into()),
        Geometry::MultiPoint(points) => geo::Geometry::MultiPoint(geo::MultiPoint::new(
            points.iter().map(|p| coord(p).into()).collect(),
        )),
        Geometry::LineString(line) => geo::Geometry::LineString(line_string(line)),
        Geometry::MultiLineString(lines) => geo::Geometry::MultiLineString(
            geo::MultiLineString::new(lines.iter().map(|line| line_string(line)).collect()),
        ),
        Geometry::Polygon(rings) => geo::Geometry::Polygon(polygon(rings)),
        Geometry::MultiPolygon(polygons) => geo::Geometry::MultiPolygon(geo::MultiPolygon::new(
            polygons.iter().map(|rings| polygon(rings)).collect(),
        )),
    }
}

// points and lines have no area and subtract nothing
fn areal(geometry: &Geometry) -> geo::MultiPolygon<f64> {
    match geometry {
        Geometry::Polygon(rings) => geo::MultiPolygon::new(vec![polygon(rings)]),
        Geometry::MultiPolygon(polygons) => {
            geo::MultiPolygon::new(polygons.iter().map(|rings| polygon(rings)).collect())
        }
        _ => geo::MultiPolygon::new(vec![]),
    }
}

fn from_geo_ring(ring: &geo::LineString<f64>) -> LinearRing {
    ring.coords().map(|c| Position::new(c.x, c.y)).collect()
}

fn from_geo_multi_polygon(multi_polygon: &geo::MultiPolygon<f64>) -> Vec<Vec<LinearRing>> {
    multi_polygon
        .iter()
        .map(|p| {
            std::iter::once(p.exterior())
                .chain(p.interiors())
                .map(from_geo_ring)
                .collect()
        })
        .collect()
}

fn first_non_finite(geometry: &Geometry) -> Option<String> {
    let mut found = None;
    crate::types::for_each_point(geometry, |p| {
        if found.is_none() && !p.is_finite() {
            found = Some(format!("has a non-finite coordinate ({}, {})", p.x, p.y));
        }
    });
    found
}

/// Problems that make a geometry unusable as a boolean operand.
///
/// Checks every polygon ring for too few positions, non-finite coordinates,
/// spikes and crossing edges. Non-areal geometries only get the finiteness check.
pub fn validate_geometry(geometry: &Geometry) -> Vec<String> {
    match geometry {
        Geometry::Polygon(rings) => validate_polygon(rings),
        Geometry::MultiPolygon(polygons) => polygons
            .iter()
            .enumerate()
            .flat_map(|(i, rings)| {
                validate_polygon(rings)
                    .into_iter()
                    .map(move |err| format!("polygon {}: {}", i, err))
            })
            .collect(),
        other => first_non_finite(other).into_iter().collect(),
    }
}

fn validate_polygon(rings: &[LinearRing]) -> Vec<String> {
    if rings.is_empty() {
        return vec!["polygon has no rings".to_string()];
    }
    rings
        .iter()
        .enumerate()
        .filter_map(|(i, ring)| {
            let name = if i == 0 {
                "exterior ring".to_string()
            } else {
                format!("interior ring {}", i - 1)
            };
            validate_ring(ring).map(|err| format!("{} {}", name, err))
        })
        .collect()
}

fn validate_ring(ring: &[Position]) -> Option<String> {
    if ring.len() < 4 {
        return Some(format!("has {} positions, needs at least 4", ring.len()));
    }
    if let Some(idx) = ring.iter().position(|p| !p.is_finite()) {
        return Some(format!("has a non-finite coordinate at index {}", idx));
    }
    if has_spike(ring) || has_self_intersection(ring) {
        return Some("has a self-intersection".to_string());
    }
    None
}

// number of distinct vertices, dropping the closing one
fn open_len(ring: &[Position]) -> usize {
    if ring.first() == ring.last() {
        ring.len() - 1
    } else {
        ring.len()
    }
}

// a vertex visited twice at non-adjacent positions
fn has_spike(ring: &[Position]) -> bool {
    let n = open_len(ring);
    (0..n).any(|i| {
        (i + 2..n)
            .filter(|&j| !(i == 0 && j == n - 1))
            .any(|j| ring[i] == ring[j])
    })
}

fn has_self_intersection(ring: &[Position]) -> bool {
    let n = open_len(ring);
    let edge = |i: usize| Line::new(coord(&ring[i]), coord(&ring[(i + 1) % ring.len()]));

    for i in 0..n {
        let a = edge(i);
        for j in i + 2..n {
            // first and last edges share the closing vertex
            if i == 0 && j == n - 1 {
                continue;
            }
            let b = edge(j);
            match line_intersection(a, b) {
                None => {}
                Some(LineIntersection::SinglePoint { intersection, .. }) => {
                    let on_a = intersection == a.start || intersection == a.end;
                    let on_b = intersection == b.start || intersection == b.end;
                    if !(on_a && on_b) {
                        return true;
                    }
                }
                Some(LineIntersection::Collinear { .. }) => return true,
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: &[[f64; 2]]) -> LinearRing {
        coords.iter().map(|&c| Position::from(c)).collect()
    }

    #[test]
    fn test_bowtie_is_rejected() {
        let bowtie = Geometry::Polygon(vec![ring(&[
            [0., 0.],
            [10., 10.],
            [10., 0.],
            [0., 10.],
            [0., 0.],
        ])]);
        let errors = validate_geometry(&bowtie);
        assert_eq!(errors, vec!["exterior ring has a self-intersection".to_string()]);
    }

    #[test]
    fn test_square_is_valid() {
        let square = Geometry::Polygon(Extent::new(0., 0., 10., 10.).to_polygon());
        assert!(validate_geometry(&square).is_empty());
    }

    #[test]
    fn test_spike_is_rejected() {
        let spiked = Geometry::Polygon(vec![ring(&[
            [0., 0.],
            [4., 0.],
            [4., 4.],
            [6., 4.],
            [4., 4.],
            [0., 4.],
            [0., 0.],
        ])]);
        assert!(!validate_geometry(&spiked).is_empty());
    }

    #[test]
    fn test_short_ring_is_rejected() {
        let short = Geometry::Polygon(vec![ring(&[[0., 0.], [1., 1.], [0., 0.]])]);
        assert_eq!(
            validate_geometry(&short),
            vec!["exterior ring has 3 positions, needs at least 4".to_string()]
        );
    }

    #[test]
    fn test_difference_of_lines_keeps_minuend() {
        let globe = Feature::from_extent(&Extent::new(-180., -90., 180., 90.));
        let line = Feature::new(Geometry::LineString(ring(&[[0., 0.], [10., 10.]])));
        let result = GeoBoolean.difference(&globe, &line).unwrap();
        assert_eq!(
            GeoBoolean.bounding_box(&result),
            Some(Extent::new(-180., -90., 180., 90.))
        );
    }

    #[test]
    fn test_intersects_window() {
        let window = Extent::new(-180., -90., 180., 90.);
        let inside = Feature::new(Geometry::Point(Position::new(10., 10.)));
        let outside = Feature::new(Geometry::Point(Position::new(200., 10.)));
        assert!(GeoBoolean.intersects(&inside, &window));
        assert!(!GeoBoolean.intersects(&outside, &window));
    }
}
