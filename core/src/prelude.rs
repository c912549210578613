use serde::{Deserialize, Serialize};

/// Public boundary dataset with one feature per federative unit.
pub const DEFAULT_BOUNDARY_URL: &str =
    "https://cdn.jsdelivr.net/gh/fititnt/gis-dataset-brasil@master/geojson/state/BR-2019-state.geojson";

/// Shared configuration for the map core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub boundary_url: String,
    pub request_timeout_secs: u64,
    pub initial_zoom: f64,
    /// Point the zoomable group is centered on, as (lon, lat).
    pub view_center: (f64, f64),
    pub projection: ProjectionConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            boundary_url: DEFAULT_BOUNDARY_URL.to_string(),
            request_timeout_secs: 15,
            initial_zoom: 1.1,
            view_center: (-52.0, -15.0),
            projection: ProjectionConfig::default(),
        }
    }
}

/// Mercator projection parameters and the viewport it renders into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub scale: f64,
    pub center: (f64, f64),
    pub width: f64,
    pub height: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            scale: 700.0,
            center: (-54.0, -15.0),
            width: 820.0,
            height: 540.0,
        }
    }
}

/// Reasons a remote boundary dataset could not be used.
///
/// Every variant is handled the same way by the resolver: the embedded
/// fallback is substituted and the error is only logged.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("failed to read response body: {0}")]
    Body(String),
    #[error("invalid GeoJSON: {0}")]
    Parse(String),
    #[error("malformed boundary dataset: {0}")]
    Malformed(String),
}

pub type ResolveResult<T> = Result<T, ResolveError>;

/// Failure reported by an indicator lookup collaborator.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("indicator lookup unavailable: {0}")]
    Unavailable(String),
    #[error("no indicators for {0}")]
    NotFound(String),
}

pub type IndicatorResult<T> = Result<T, IndicatorError>;
