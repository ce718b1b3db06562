use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoWrapError {
    #[error("Invalid extent: {0}")]
    InvalidExtent(String),

    #[error("Unsupported geometry kind: {0}")]
    UnsupportedGeometryKind(String),

    #[error("Boolean operation failed: {0}")]
    BooleanOpFailure(String),

    #[error("Position needs at least 2 ordinates, got {0}")]
    InvalidPosition(usize),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}

pub type Result<T> = std::result::Result<T, GeoWrapError>;
