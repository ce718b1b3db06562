use tracing::debug;

use crate::boolean::PlanarBoolean;
use crate::error::{GeoWrapError, Result};
use crate::translate::translate_feature;
use crate::types::{Extent, Shape};

// shift that moves `min_x` into the window of width `max_width`
fn window_shift(min_x: f64, max_width: f64) -> f64 {
    ((min_x + 180.) / -max_width).ceil() * max_width
}

/// Re-projects `shape` into the longitude window of `bounds`.
///
/// Returns `None` when the wrapped shape lies entirely outside `bounds`. Extents
/// are only tested against the latitude range; features are tested for a real
/// intersection through `engine`.
pub fn wrap_to_bounds<E: PlanarBoolean>(
    shape: &Shape,
    bounds: &Extent,
    engine: &E,
) -> Result<Option<Shape>> {
    shape.validate()?;
    let bounds = bounds.validate()?;
    let max_width = bounds.width();
    if max_width <= 0. {
        return Err(GeoWrapError::InvalidExtent(format!(
            "bounds window must have positive width, got {}",
            max_width
        )));
    }

    match shape {
        Shape::Extent(extent) => {
            let mut geom = *extent;
            if geom.width() >= max_width {
                geom.min_x = bounds.min_x;
                geom.max_x = bounds.max_x;
            }

            geom.min_y = geom.min_y.max(bounds.min_y);
            geom.max_y = geom.max_y.min(bounds.max_y);
            if geom.min_y > geom.max_y {
                return Ok(None);
            }

            let dx = window_shift(geom.min_x, max_width);
            geom.min_x += dx;
            geom.max_x += dx;
            if geom.max_x > 180. {
                geom.max_x -= 360.;
            }
            Ok(Some(Shape::Extent(geom)))
        }
        Shape::Feature(feature) => {
            let Some(bbox) = engine.bounding_box(feature) else {
                return Ok(None);
            };
            let dx = window_shift(bbox.min_x, max_width);
            let shifted = if dx == 0. {
                feature.clone()
            } else {
                debug!(dx, "wrapping feature into bounds window");
                translate_feature(feature, dx, 0.)
            };

            if engine.intersects(&shifted, &bounds) {
                Ok(Some(Shape::Feature(shifted)))
            } else {
                Ok(None)
            }
        }
    }
}
