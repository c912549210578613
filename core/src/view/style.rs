use super::accessibility::AccessibilityFlags;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

pub const MAP_FILL: Rgb = Rgb::new(0x66, 0xB4, 0xA4);
pub const MAP_FILL_HOVER: Rgb = Rgb::new(0x7C, 0xC9, 0xB8);
pub const MAP_FILL_PRESSED: Rgb = Rgb::new(0x58, 0xA6, 0x95);
pub const MAP_STROKE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

pub const CONTRAST_FILL: Rgb = Rgb::new(0xAD, 0xD8, 0xE6);
pub const CONTRAST_FILL_HOVER: Rgb = Rgb::new(0x87, 0xCE, 0xFA);
pub const CONTRAST_FILL_PRESSED: Rgb = Rgb::new(0x46, 0x82, 0xB4);
pub const CONTRAST_STROKE: Rgb = Rgb::new(0x00, 0x00, 0x00);

pub const REGION_STROKE_WIDTH: f32 = 1.0;

/// Visual treatment tiers, in increasing precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleTier {
    Default,
    Hover,
    Pressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleDescriptor {
    pub tier: StyleTier,
    pub fill: Rgb,
    pub stroke: Rgb,
    pub stroke_width: f32,
}

/// Pure mapping from tier and accessibility flags to region colors.
pub fn region_style(tier: StyleTier, flags: AccessibilityFlags) -> StyleDescriptor {
    let fill = match (tier, flags.high_contrast) {
        (StyleTier::Default, false) => MAP_FILL,
        (StyleTier::Hover, false) => MAP_FILL_HOVER,
        (StyleTier::Pressed, false) => MAP_FILL_PRESSED,
        (StyleTier::Default, true) => CONTRAST_FILL,
        (StyleTier::Hover, true) => CONTRAST_FILL_HOVER,
        (StyleTier::Pressed, true) => CONTRAST_FILL_PRESSED,
    };
    let stroke = if flags.high_contrast {
        CONTRAST_STROKE
    } else {
        MAP_STROKE
    };
    StyleDescriptor {
        tier,
        fill,
        stroke,
        stroke_width: REGION_STROKE_WIDTH,
    }
}

/// Page-level colors and type scale shared by the map card and the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageStyle {
    pub background: Rgb,
    pub surface: Rgb,
    pub text: Rgb,
    pub muted_text: Rgb,
    pub body_size: f32,
    pub heading_size: f32,
    pub value_size: f32,
    pub emphasized_value_size: f32,
}

pub fn page_style(flags: AccessibilityFlags) -> PageStyle {
    let (background, surface, text, muted_text) = if flags.high_contrast {
        (
            Rgb::new(0x00, 0x00, 0x00),
            Rgb::new(0x11, 0x11, 0x11),
            Rgb::new(0xFF, 0xFF, 0xFF),
            Rgb::new(0xE5, 0xE7, 0xEB),
        )
    } else {
        (
            Rgb::new(0xF9, 0xFA, 0xFB),
            Rgb::new(0xFF, 0xFF, 0xFF),
            Rgb::new(0x11, 0x18, 0x27),
            Rgb::new(0x6B, 0x72, 0x80),
        )
    };
    let body_size = if flags.large_text { 18.0 } else { 16.0 };
    PageStyle {
        background,
        surface,
        text,
        muted_text,
        body_size,
        heading_size: body_size * 1.75,
        value_size: body_size * 1.5,
        emphasized_value_size: body_size * 1.875,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_FLAGS: [AccessibilityFlags; 4] = [
        AccessibilityFlags {
            high_contrast: false,
            large_text: false,
        },
        AccessibilityFlags {
            high_contrast: false,
            large_text: true,
        },
        AccessibilityFlags {
            high_contrast: true,
            large_text: false,
        },
        AccessibilityFlags {
            high_contrast: true,
            large_text: true,
        },
    ];

    #[test]
    fn high_contrast_swaps_every_fill() {
        for tier in [StyleTier::Default, StyleTier::Hover, StyleTier::Pressed] {
            let normal = region_style(tier, ALL_FLAGS[0]);
            let contrast = region_style(tier, ALL_FLAGS[2]);
            assert_ne!(normal.fill, contrast.fill);
            assert_eq!(contrast.stroke, CONTRAST_STROKE);
        }
    }

    #[test]
    fn large_text_does_not_touch_region_colors() {
        for tier in [StyleTier::Default, StyleTier::Hover, StyleTier::Pressed] {
            assert_eq!(
                region_style(tier, ALL_FLAGS[0]),
                region_style(tier, ALL_FLAGS[1])
            );
        }
    }

    #[test]
    fn page_style_follows_flags() {
        assert_eq!(page_style(ALL_FLAGS[1]).body_size, 18.0);
        assert_eq!(page_style(ALL_FLAGS[0]).body_size, 16.0);
        assert_eq!(page_style(ALL_FLAGS[3]).background, Rgb::new(0, 0, 0));
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(MAP_FILL.to_hex(), "#66B4A4");
        assert_eq!(CONTRAST_FILL_PRESSED.to_hex(), "#4682B4");
    }
}
