pub mod projection;
pub mod scene;

pub use projection::{MercatorProjection, ScreenPoint};
pub use scene::{MapRenderer, RegionElement, Scene, SceneElement, Transform, LOADING_LABEL};
