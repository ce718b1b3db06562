use crate::types::{for_each_point_mut, Extent, Feature, Shape};

/// Raw shift of both corners; the result is not re-wrapped.
pub fn translate_extent(extent: &Extent, dx: f64, dy: f64) -> Extent {
    Extent::new(
        extent.min_x + dx,
        extent.min_y + dy,
        extent.max_x + dx,
        extent.max_y + dy,
    )
}

/// Shifts every position of the geometry, and the stored bbox if there is one.
/// Nesting and geometry kind are preserved.
pub fn translate_feature(feature: &Feature, dx: f64, dy: f64) -> Feature {
    let mut shifted = feature.clone();
    for_each_point_mut(&mut shifted.geometry, |point| {
        point.x += dx;
        point.y += dy;
    });
    if let Some(bbox) = &mut shifted.bbox {
        *bbox = translate_extent(bbox, dx, dy);
    }
    shifted
}

pub fn translate(shape: &Shape, dx: f64, dy: f64) -> Shape {
    match shape {
        Shape::Extent(extent) => Shape::Extent(translate_extent(extent, dx, dy)),
        Shape::Feature(feature) => Shape::Feature(translate_feature(feature, dx, dy)),
    }
}
