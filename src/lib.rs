//! Antimeridian-safe normalization and cutout masks for geographic extents and
//! GeoJSON-shaped features.
//!
//! Shapes drawn by users or returned by servers may carry longitudes far outside
//! `[-180, 180]` or cross the seam. [`normalize`] brings them into one canonical
//! band, [`wrap_to_bounds`] re-projects them into a viewport window and [`cutout`]
//! builds a "globe minus shape" mask to dim everything outside a selection.

use serde::{Deserialize, Serialize};

mod boolean;
mod bounds;
mod convert;
mod cutout;
mod error;
mod normalize;
mod translate;
mod types;
mod wrap;


pub use crate::boolean::{validate_geometry, GeoBoolean, PlanarBoolean};
pub use crate::bounds::wrap_to_bounds;
pub use crate::convert::parse_shape;
pub use crate::cutout::{cutout, global_polygon, MAX_CUTOUT_PASSES};
pub use crate::error::{GeoWrapError, Result};
pub use crate::normalize::{normalize, normalize_extent};
pub use crate::translate::{translate, translate_extent, translate_feature};
pub use crate::types::*;
pub use crate::wrap::{clamp_latitude, wrap_coordinate, wrap_extent, wrap_longitude};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CutoutStyle {
    pub fill: String,       // fill of the selected shape
    pub outer_fill: String, // fill of the mask around it
    pub stroke: String,     // outline of the selected shape
    pub stroke_width: f64,
}

impl Default for CutoutStyle {
    fn default() -> Self {
        Self {
            fill: "rgba(0, 0, 0, 0)".to_string(),
            outer_fill: "rgba(0, 0, 0, 0.6)".to_string(),
            stroke: "#ffffff".to_string(),
            stroke_width: 1.,
        }
    }
}

impl CutoutStyle {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// [`cutout`] with the `geo`-backed engine.
pub fn cutout_geo(shape: &Shape, style: &CutoutStyle) -> Result<CutoutResult> {
    cutout(shape, style, &GeoBoolean)
}
