use crate::prelude::MapConfig;

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 8.0;
pub const ZOOM_STEP: f64 = 0.2;

/// Zoom level and center of the map. Zoom stays within
/// [`MIN_ZOOM`]..=[`MAX_ZOOM`] after every mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    zoom: f64,
    center: (f64, f64),
}

impl ViewState {
    pub fn new(zoom: f64, center: (f64, f64)) -> Self {
        let mut view = Self {
            zoom: MIN_ZOOM,
            center,
        };
        view.set_zoom(zoom);
        view
    }

    pub fn from_config(config: &MapConfig) -> Self {
        Self::new(config.initial_zoom, config.view_center)
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// (lon, lat) the zoomed view is centered on.
    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    /// Clamps into range; NaN is ignored.
    pub fn set_zoom(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        self.zoom = value.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn can_zoom_in(&self) -> bool {
        self.zoom < MAX_ZOOM
    }

    pub fn can_zoom_out(&self) -> bool {
        self.zoom > MIN_ZOOM
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::from_config(&MapConfig::default())
    }
}
