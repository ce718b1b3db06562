use tracing::debug;

use crate::error::Result;
use crate::translate::translate_feature;
use crate::types::{Extent, Feature, Geometry, NormalizedPair, Position, Shape};
use crate::wrap::clamp_latitude;

// eastward shift that brings a min longitude below -180 back into range
fn east_shift(min_x: f64) -> f64 {
    ((min_x - 180.) / -360.).floor() * 360.
}

// westward (negative) shift for a min longitude at or past +180
fn west_shift(min_x: f64) -> f64 {
    ((min_x + 180.) / -360.).ceil() * 360.
}

/// Canonical bounds of an extent.
///
/// `min_x` ends up in `[-180, 180]` and `max_x >= min_x`; `max_x` may exceed 180
/// when the extent crosses the antimeridian.
pub fn normalize_extent(extent: Extent) -> Extent {
    let Extent {
        mut min_x,
        mut max_x,
        ..
    } = extent;

    if max_x - min_x >= 360. {
        min_x = -180.;
        max_x = 180.;
    } else if min_x < -180. {
        let dx = east_shift(min_x);
        min_x += dx;
        max_x += dx;
    } else if min_x > 180. {
        let dx = west_shift(min_x);
        min_x += dx;
        max_x += dx;
    }

    if max_x < min_x {
        max_x += 360.;
    }

    Extent::new(
        min_x,
        clamp_latitude(extent.min_y),
        max_x,
        clamp_latitude(extent.max_y),
    )
}

fn normalize_feature(feature: &Feature) -> Feature {
    let Some(bbox) = feature.bounding_box() else {
        return feature.clone();
    };

    let dx = if bbox.min_x < -180. {
        east_shift(bbox.min_x)
    } else if bbox.min_x >= 180. {
        west_shift(bbox.min_x)
    } else {
        0.
    };

    if dx == 0. {
        return feature.clone();
    }
    debug!(dx, kind = feature.geometry.kind(), "shifting feature into canonical band");
    translate_feature(feature, dx, 0.)
}

// top and bottom edges of a full-width band
fn band_edges(extent: &Extent) -> Feature {
    let edge = |y: f64| vec![Position::new(-180., y), Position::new(180., y)];
    Feature::with_bbox(
        Geometry::MultiLineString(vec![edge(extent.max_y), edge(extent.min_y)]),
        *extent,
    )
}

pub fn normalize(shape: &Shape) -> Result<NormalizedPair> {
    shape.validate()?;

    match shape {
        Shape::Extent(extent) => {
            let bounds = normalize_extent(*extent);
            if bounds != *extent {
                debug!(from = ?extent.to_array(), to = ?bounds.to_array(), "normalized extent");
            }
            let canonical = Feature::from_extent(&bounds);
            let optimized = if bounds.min_x == -180. && bounds.max_x == 180. {
                band_edges(&bounds)
            } else {
                canonical.clone()
            };
            Ok(NormalizedPair {
                canonical,
                optimized,
            })
        }
        Shape::Feature(feature) => {
            let canonical = normalize_feature(feature);
            Ok(NormalizedPair {
                optimized: canonical.clone(),
                canonical,
            })
        }
    }
}
