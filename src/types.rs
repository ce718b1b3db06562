use geojson::feature::Id;
use geojson::JsonObject;

use crate::error::{GeoWrapError, Result};

/// A `[longitude, latitude]` pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Position {
        Position { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Position {
    fn from([x, y]: [f64; 2]) -> Self {
        Position::new(x, y)
    }
}

pub type MultiPoint = Vec<Position>;
pub type LineString = Vec<Position>;
pub type LinearRing = Vec<Position>;
pub type MultiLineString = Vec<LineString>;
pub type Polygon = Vec<LinearRing>;
pub type MultiPolygon = Vec<Polygon>;

/// Axis-aligned rectangle `[min_x, min_y, max_x, max_y]` in degrees.
///
/// `max_x < min_x` is a valid state: the extent crosses the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// The whole valid longitude/latitude range.
pub const GLOBAL_EXTENT: Extent = Extent::new(-180., -90., 180., 90.);

impl Extent {
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Extent {
        Extent {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn crosses_seam(&self) -> bool {
        self.max_x < self.min_x
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }

    /// Fails with `InvalidExtent` when any component is NaN or infinite.
    pub fn validate(self) -> Result<Extent> {
        if self.to_array().iter().all(|v| v.is_finite()) {
            Ok(self)
        } else {
            Err(GeoWrapError::InvalidExtent(format!(
                "non-finite component in {:?}",
                self.to_array()
            )))
        }
    }

    /// Closed counter-clockwise rectangle ring.
    pub fn to_polygon(&self) -> Polygon {
        vec![vec![
            Position::new(self.min_x, self.min_y),
            Position::new(self.max_x, self.min_y),
            Position::new(self.max_x, self.max_y),
            Position::new(self.min_x, self.max_y),
            Position::new(self.min_x, self.min_y),
        ]]
    }

    pub(crate) fn expand(&mut self, p: &Position) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    fn empty() -> Extent {
        Extent::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY)
    }
}

impl TryFrom<&[f64]> for Extent {
    type Error = GeoWrapError;

    fn try_from(values: &[f64]) -> Result<Self> {
        match *values {
            [min_x, min_y, max_x, max_y] => Extent::new(min_x, min_y, max_x, max_y).validate(),
            _ => Err(GeoWrapError::InvalidExtent(format!(
                "expected 4 components, got {}",
                values.len()
            ))),
        }
    }
}

impl TryFrom<[f64; 4]> for Extent {
    type Error = GeoWrapError;

    fn try_from(values: [f64; 4]) -> Result<Self> {
        Extent::try_from(&values[..])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Position),
    MultiPoint(MultiPoint),
    LineString(LineString),
    MultiLineString(MultiLineString),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
}

impl Geometry {
    /// GeoJSON name of the geometry type.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    pub fn is_finite(&self) -> bool {
        let mut finite = true;
        for_each_point(self, |p| finite &= p.is_finite());
        finite
    }

    /// `None` when the geometry holds no positions.
    pub fn bounding_box(&self) -> Option<Extent> {
        let mut bbox = Extent::empty();
        let mut num_points = 0u32;
        for_each_point(self, |p| {
            bbox.expand(p);
            num_points += 1;
        });
        if num_points == 0 {
            None
        } else {
            Some(bbox)
        }
    }
}

pub fn for_each_point<F: FnMut(&Position)>(geometry: &Geometry, mut f: F) {
    match geometry {
        Geometry::Point(point) => f(point),
        Geometry::MultiPoint(points) | Geometry::LineString(points) => points.iter().for_each(f),
        Geometry::MultiLineString(lines) | Geometry::Polygon(lines) => {
            lines.iter().flatten().for_each(f)
        }
        Geometry::MultiPolygon(polygons) => polygons.iter().flatten().flatten().for_each(f),
    }
}

pub fn for_each_point_mut<F: FnMut(&mut Position)>(geometry: &mut Geometry, mut f: F) {
    match geometry {
        Geometry::Point(point) => f(point),
        Geometry::MultiPoint(points) | Geometry::LineString(points) => {
            points.iter_mut().for_each(f)
        }
        Geometry::MultiLineString(lines) | Geometry::Polygon(lines) => {
            lines.iter_mut().flatten().for_each(f)
        }
        Geometry::MultiPolygon(polygons) => {
            polygons.iter_mut().flatten().flatten().for_each(f)
        }
    }
}

/// GeoJSON-shaped feature. Foreign members are not carried.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Geometry,
    pub bbox: Option<Extent>,
    pub properties: JsonObject,
    pub id: Option<Id>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            bbox: None,
            properties: JsonObject::new(),
            id: None,
        }
    }

    pub fn with_bbox(geometry: Geometry, bbox: Extent) -> Self {
        Self {
            bbox: Some(bbox),
            ..Feature::new(geometry)
        }
    }

    /// Rectangle feature covering `extent`, carrying it as its bbox.
    pub fn from_extent(extent: &Extent) -> Self {
        Feature::with_bbox(Geometry::Polygon(extent.to_polygon()), *extent)
    }

    /// Computed from the coordinates; a stored `bbox` is ignored.
    pub fn bounding_box(&self) -> Option<Extent> {
        self.geometry.bounding_box()
    }
}

/// Anything the normalizer, bounds wrapper and cutout engine accept.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Extent(Extent),
    Feature(Feature),
}

impl Shape {
    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            Shape::Extent(extent) => extent.validate().map(|_| ()),
            Shape::Feature(feature) => {
                if !feature.geometry.is_finite() {
                    return Err(GeoWrapError::InvalidExtent(format!(
                        "{} has a non-finite coordinate",
                        feature.geometry.kind()
                    )));
                }
                match feature.bbox {
                    Some(bbox) => bbox.validate().map(|_| ()),
                    None => Ok(()),
                }
            }
        }
    }
}

impl From<Extent> for Shape {
    fn from(extent: Extent) -> Self {
        Shape::Extent(extent)
    }
}

impl From<Feature> for Shape {
    fn from(feature: Feature) -> Self {
        Shape::Feature(feature)
    }
}

/// Two descriptions of the same area: the canonical shape and a cheaper
/// equivalent for display.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPair {
    pub canonical: Feature,
    pub optimized: Feature,
}

/// Styled "globe minus feature" mask and the styled feature itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CutoutResult {
    pub outer: Option<Feature>,
    pub inner: Option<Feature>,
}

impl CutoutResult {
    pub fn is_empty(&self) -> bool {
        self.outer.is_none() && self.inner.is_none()
    }
}
