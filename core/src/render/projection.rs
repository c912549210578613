use crate::prelude::ProjectionConfig;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;

/// Web Mercator breaks down at the poles; latitudes are clamped to this.
const MAX_LATITUDE: f64 = 85.051_128_78;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Spherical Mercator scaled so that `center` lands in the middle of the
/// viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorProjection {
    config: ProjectionConfig,
    center_x: f64,
    center_y: f64,
}

impl MercatorProjection {
    pub fn new(config: ProjectionConfig) -> Self {
        let (lon, lat) = config.center;
        Self {
            config,
            center_x: lon.to_radians(),
            center_y: mercator_y(lat),
        }
    }

    pub fn width(&self) -> f64 {
        self.config.width
    }

    pub fn height(&self) -> f64 {
        self.config.height
    }

    pub fn project(&self, lon: f64, lat: f64) -> ScreenPoint {
        ScreenPoint {
            x: self.config.width / 2.0 + self.config.scale * (lon.to_radians() - self.center_x),
            y: self.config.height / 2.0 - self.config.scale * (mercator_y(lat) - self.center_y),
        }
    }

    /// Inverse of [`Self::project`], returning (lon, lat).
    pub fn invert(&self, point: ScreenPoint) -> (f64, f64) {
        let x = (point.x - self.config.width / 2.0) / self.config.scale + self.center_x;
        let y = self.center_y - (point.y - self.config.height / 2.0) / self.config.scale;
        let lat = 2.0 * y.exp().atan() - 2.0 * FRAC_PI_4;
        (x.to_degrees(), lat.to_degrees())
    }
}

fn mercator_y(lat: f64) -> f64 {
    let phi = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    (FRAC_PI_4 + phi / 2.0).tan().ln()
}
