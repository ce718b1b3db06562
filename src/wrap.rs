use crate::error::Result;
use crate::types::{Extent, Position};

/// Wraps a longitude into `[-180, 180]`.
///
/// Values already in range are returned untouched, so `180` and `-180` stay put.
/// Equivalent to repeatedly adding or subtracting 360 but runs in constant time
/// however far out of range the input is. Non-finite input yields NaN.
pub fn wrap_longitude(x: f64) -> f64 {
    if x > 180. {
        x - ((x - 180.) / 360.).ceil() * 360.
    } else if x < -180. {
        x + ((-180. - x) / 360.).ceil() * 360.
    } else {
        x
    }
}

/// Clamps into `[-90, 90]`; NaN stays NaN.
pub fn clamp_latitude(y: f64) -> f64 {
    if y > 90. {
        90.
    } else if y < -90. {
        -90.
    } else {
        y
    }
}

pub fn wrap_coordinate(p: Position) -> Position {
    Position::new(wrap_longitude(p.x), clamp_latitude(p.y))
}

/// Brings an extent into the canonical ranges.
///
/// Anything wider than a full turn becomes the whole globe in X. Otherwise both
/// longitudes are wrapped independently, which may leave `max_x < min_x` for an
/// extent crossing the antimeridian. Non-finite components fail with
/// `InvalidExtent`.
pub fn wrap_extent(extent: Extent) -> Result<Extent> {
    let extent = extent.validate()?;
    let min_y = clamp_latitude(extent.min_y);
    let max_y = clamp_latitude(extent.max_y);

    if extent.width() > 360. {
        return Ok(Extent::new(-180., min_y, 180., max_y));
    }

    Ok(Extent::new(
        wrap_longitude(extent.min_x),
        min_y,
        wrap_longitude(extent.max_x),
        max_y,
    ))
}
