use serde_json::Value;
use tracing::{trace, warn};

use crate::boolean::PlanarBoolean;
use crate::error::{GeoWrapError, Result};
use crate::normalize::normalize;
use crate::translate::translate_feature;
use crate::types::{CutoutResult, Feature, Shape, GLOBAL_EXTENT};
use crate::CutoutStyle;

/// Upper bound on subtraction passes.
///
/// After normalization `min_x` lies in `[-180, 180]` and anything a full turn wide
/// spans exactly `[-180, 180]`, so `max_x < 540` and at most two copies of a
/// shape are ever visible.
pub const MAX_CUTOUT_PASSES: usize = 2;

const TRANSPARENT: &str = "rgba(0, 0, 0, 0)";

/// Rectangle covering the whole globe; a fresh value on every call.
pub fn global_polygon() -> Feature {
    Feature::from_extent(&GLOBAL_EXTENT)
}

/// Longitude offsets of every visible copy of a shape whose bbox ends at `max_x`.
pub(crate) fn cutout_offsets(max_x: f64) -> impl Iterator<Item = f64> {
    (0..MAX_CUTOUT_PASSES)
        .map(move |i| -360. * i as f64)
        .take_while(move |dx| max_x + dx > -180.)
}

fn styled(mut feature: Feature, fill: &str, stroke: &str, stroke_width: f64) -> Feature {
    let properties = &mut feature.properties;
    properties.insert("fill".to_string(), Value::from(fill));
    properties.insert("stroke".to_string(), Value::from(stroke));
    properties.insert("strokeWidth".to_string(), Value::from(stroke_width));
    feature
}

fn subtract_copies<E: PlanarBoolean>(canonical: &Feature, engine: &E) -> Result<Feature> {
    let Some(bbox) = engine.bounding_box(canonical) else {
        return Ok(global_polygon());
    };
    if bbox.width() > 360. {
        warn!(
            width = bbox.width(),
            "feature is wider than a full turn, only {} copies are cut", MAX_CUTOUT_PASSES
        );
    }

    let mut mask = global_polygon();
    for dx in cutout_offsets(bbox.max_x) {
        trace!(dx, "subtracting copy from mask");
        mask = if dx == 0. {
            engine.difference(&mask, canonical)?
        } else {
            engine.difference(&mask, &translate_feature(canonical, dx, 0.))?
        };
    }
    Ok(mask)
}

/// Builds the dimming mask for everything outside `shape` and the styled shape.
///
/// A boolean-engine failure yields an empty result rather than an error; invalid
/// extents still fail.
pub fn cutout<E: PlanarBoolean>(
    shape: &Shape,
    style: &CutoutStyle,
    engine: &E,
) -> Result<CutoutResult> {
    let pair = normalize(shape)?;

    let mask = match subtract_copies(&pair.canonical, engine) {
        Ok(mask) => mask,
        Err(GeoWrapError::BooleanOpFailure(reason)) => {
            warn!(%reason, "skipping cutout");
            return Ok(CutoutResult::default());
        }
        Err(err) => return Err(err),
    };

    let outer = Some(styled(mask, &style.outer_fill, TRANSPARENT, 0.));
    let inner = Some(styled(
        pair.optimized,
        &style.fill,
        &style.stroke,
        style.stroke_width,
    ));
    Ok(CutoutResult { outer, inner })
}
