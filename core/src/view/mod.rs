pub mod accessibility;
pub mod interaction;
pub mod style;
pub mod viewport;

pub use accessibility::AccessibilityFlags;
pub use interaction::InteractionState;
pub use style::{page_style, region_style, PageStyle, Rgb, StyleDescriptor, StyleTier};
pub use viewport::{ViewState, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
