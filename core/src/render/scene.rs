use super::projection::{MercatorProjection, ScreenPoint};
use crate::geodata::GeoDataset;
use crate::prelude::{MapConfig, ProjectionConfig};
use crate::view::{AccessibilityFlags, InteractionState, StyleDescriptor, ViewState};
use serde::{Deserialize, Serialize};

pub const LOADING_LABEL: &str = "Carregando mapa…";

/// Zoom transform applied on top of the projected geometry:
/// `screen = projected * scale + translate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translate: ScreenPoint,
    pub scale: f64,
}

impl Transform {
    pub fn apply(&self, point: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(
            point.x * self.scale + self.translate.x,
            point.y * self.scale + self.translate.y,
        )
    }

    pub fn invert(&self, point: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(
            (point.x - self.translate.x) / self.scale,
            (point.y - self.translate.y) / self.scale,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionElement {
    pub id: String,
    pub label: String,
    /// Projected rings, before [`Scene::transform`] is applied.
    pub rings: Vec<Vec<ScreenPoint>>,
    pub style: StyleDescriptor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneElement {
    Region(RegionElement),
    Placeholder { label: String, position: ScreenPoint },
}

/// Everything needed to draw one frame of the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub transform: Transform,
    pub elements: Vec<SceneElement>,
}

impl Scene {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.elements.as_slice(), [SceneElement::Placeholder { .. }])
    }

    pub fn regions(&self) -> impl Iterator<Item = &RegionElement> {
        self.elements.iter().filter_map(|element| match element {
            SceneElement::Region(region) => Some(region),
            SceneElement::Placeholder { .. } => None,
        })
    }
}

/// Stateless composition of dataset, view, interaction and accessibility
/// into a [`Scene`].
#[derive(Debug, Clone, Copy)]
pub struct MapRenderer {
    projection: MercatorProjection,
}

impl MapRenderer {
    pub fn new(config: ProjectionConfig) -> Self {
        Self {
            projection: MercatorProjection::new(config),
        }
    }

    pub fn from_config(config: &MapConfig) -> Self {
        Self::new(config.projection)
    }

    pub fn projection(&self) -> &MercatorProjection {
        &self.projection
    }

    pub fn transform(&self, view: &ViewState) -> Transform {
        let (lon, lat) = view.center();
        let center = self.projection.project(lon, lat);
        let k = view.zoom();
        Transform {
            translate: ScreenPoint::new(
                self.projection.width() / 2.0 - center.x * k,
                self.projection.height() / 2.0 - center.y * k,
            ),
            scale: k,
        }
    }

    /// `dataset` is `None` while resolution is pending, which yields a
    /// single placeholder element.
    pub fn render(
        &self,
        dataset: Option<&GeoDataset>,
        view: &ViewState,
        interaction: &InteractionState,
        flags: AccessibilityFlags,
    ) -> Scene {
        let elements = match dataset {
            None => vec![SceneElement::Placeholder {
                label: LOADING_LABEL.to_string(),
                position: ScreenPoint::new(
                    self.projection.width() / 2.0,
                    self.projection.height() / 2.0,
                ),
            }],
            Some(dataset) => dataset
                .regions()
                .iter()
                .map(|region| {
                    SceneElement::Region(RegionElement {
                        id: region.id.clone(),
                        label: region.accessible_label().to_string(),
                        rings: region
                            .boundary
                            .rings()
                            .into_iter()
                            .map(|ring| {
                                ring.into_iter()
                                    .map(|(lon, lat)| self.projection.project(lon, lat))
                                    .collect()
                            })
                            .collect(),
                        style: interaction.resolve_style(&region.id, flags),
                    })
                })
                .collect(),
        };

        Scene {
            width: self.projection.width(),
            height: self.projection.height(),
            transform: self.transform(view),
            elements,
        }
    }

    /// Region under a point given in viewport pixels, for dispatching raw
    /// pointer events by region id.
    pub fn region_at<'a>(
        &self,
        dataset: &'a GeoDataset,
        view: &ViewState,
        point: ScreenPoint,
    ) -> Option<&'a str> {
        let projected = self.transform(view).invert(point);
        let (lon, lat) = self.projection.invert(projected);
        dataset.region_at(lon, lat).map(|region| region.id.as_str())
    }
}

impl Default for MapRenderer {
    fn default() -> Self {
        Self::new(ProjectionConfig::default())
    }
}
