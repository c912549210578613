//! Core state machine for the Brazil economic indicators map.
//!
//! The modules cover boundary resolution with an embedded fallback, zoom and
//! pointer interaction state, accessibility-driven styling, and the pure
//! renderer that turns all of it into a drawable scene.

pub mod geodata;
pub mod indicators;
pub mod prelude;
pub mod render;
pub mod telemetry;
pub mod view;

pub use prelude::{IndicatorError, MapConfig, ProjectionConfig, ResolveError};
