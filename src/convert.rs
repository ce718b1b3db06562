//! Conversions between crate values and `geojson` values.

use std::str::FromStr;

use geojson::{GeoJson, Value};
use serde_json::Value as JsonValue;

use crate::error::{GeoWrapError, Result};
use crate::types::{Extent, Feature, Geometry, LineString, Polygon, Position, Shape};

fn convert_position(p: &[f64]) -> Result<Position> {
    match p {
        [x, y, ..] => Ok(Position::new(*x, *y)),
        _ => Err(GeoWrapError::InvalidPosition(p.len())),
    }
}

fn convert_line(points: &[geojson::Position]) -> Result<LineString> {
    points.iter().map(|p| convert_position(p)).collect()
}

fn convert_polygon(rings: &[Vec<geojson::Position>]) -> Result<Polygon> {
    rings.iter().map(|ring| convert_line(ring)).collect()
}

fn project_position(p: &Position) -> geojson::Position {
    vec![p.x, p.y]
}

fn project_line(points: &[Position]) -> Vec<geojson::Position> {
    points.iter().map(project_position).collect()
}

fn project_polygon(rings: &[Vec<Position>]) -> Vec<Vec<geojson::Position>> {
    rings.iter().map(|ring| project_line(ring)).collect()
}

impl TryFrom<&Value> for Geometry {
    type Error = GeoWrapError;

    fn try_from(value: &Value) -> Result<Self> {
        Ok(match value {
            Value::Point(p) => Geometry::Point(convert_position(p)?),
            Value::MultiPoint(points) => Geometry::MultiPoint(convert_line(points)?),
            Value::LineString(line) => Geometry::LineString(convert_line(line)?),
            Value::MultiLineString(lines) => Geometry::MultiLineString(convert_polygon(lines)?),
            Value::Polygon(rings) => Geometry::Polygon(convert_polygon(rings)?),
            Value::MultiPolygon(polygons) => Geometry::MultiPolygon(
                polygons
                    .iter()
                    .map(|rings| convert_polygon(rings))
                    .collect::<Result<_>>()?,
            ),
            Value::GeometryCollection(_) => {
                return Err(GeoWrapError::UnsupportedGeometryKind(
                    "GeometryCollection".to_string(),
                ))
            }
        })
    }
}

impl TryFrom<&geojson::Geometry> for Geometry {
    type Error = GeoWrapError;

    fn try_from(geometry: &geojson::Geometry) -> Result<Self> {
        Geometry::try_from(&geometry.value)
    }
}

impl From<&Geometry> for geojson::Geometry {
    fn from(geometry: &Geometry) -> Self {
        let value = match geometry {
            Geometry::Point(p) => Value::Point(project_position(p)),
            Geometry::MultiPoint(points) => Value::MultiPoint(project_line(points)),
            Geometry::LineString(line) => Value::LineString(project_line(line)),
            Geometry::MultiLineString(lines) => Value::MultiLineString(project_polygon(lines)),
            Geometry::Polygon(rings) => Value::Polygon(project_polygon(rings)),
            Geometry::MultiPolygon(polygons) => Value::MultiPolygon(
                polygons.iter().map(|rings| project_polygon(rings)).collect(),
            ),
        };
        geojson::Geometry::new(value)
    }
}

impl TryFrom<&geojson::Feature> for Feature {
    type Error = GeoWrapError;

    fn try_from(feature: &geojson::Feature) -> Result<Self> {
        let geometry = feature
            .geometry
            .as_ref()
            .ok_or_else(|| GeoWrapError::UnsupportedGeometryKind("null".to_string()))?;
        let bbox = feature
            .bbox
            .as_deref()
            .map(Extent::try_from)
            .transpose()?;

        Ok(Feature {
            geometry: Geometry::try_from(geometry)?,
            bbox,
            properties: feature.properties.clone().unwrap_or_default(),
            id: feature.id.clone(),
        })
    }
}

impl From<&Feature> for geojson::Feature {
    fn from(feature: &Feature) -> Self {
        geojson::Feature {
            bbox: feature.bbox.map(|bbox| bbox.to_array().to_vec()),
            geometry: Some(geojson::Geometry::from(&feature.geometry)),
            id: feature.id.clone(),
            properties: if feature.properties.is_empty() {
                None
            } else {
                Some(feature.properties.clone())
            },
            foreign_members: None,
        }
    }
}

/// Parses caller input: a JSON array is an extent, a GeoJSON Feature or
/// Geometry object is a feature.
pub fn parse_shape(json: &str) -> Result<Shape> {
    let value = JsonValue::from_str(json)?;
    if let JsonValue::Array(items) = &value {
        let components = items
            .iter()
            .map(|item| {
                item.as_f64().ok_or_else(|| {
                    GeoWrapError::InvalidExtent(format!("non-numeric component {}", item))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        return Ok(Shape::Extent(Extent::try_from(&components[..])?));
    }

    match GeoJson::from_json_value(value)? {
        GeoJson::Feature(feature) => Ok(Shape::Feature(Feature::try_from(&feature)?)),
        GeoJson::Geometry(geometry) => Ok(Shape::Feature(Feature::new(Geometry::try_from(
            &geometry,
        )?))),
        GeoJson::FeatureCollection(_) => Err(GeoWrapError::UnsupportedGeometryKind(
            "FeatureCollection".to_string(),
        )),
    }
}
