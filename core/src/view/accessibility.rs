use serde::{Deserialize, Serialize};

/// Presentation toggles. Neither affects data or geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessibilityFlags {
    pub high_contrast: bool,
    pub large_text: bool,
}

impl AccessibilityFlags {
    pub fn new(high_contrast: bool, large_text: bool) -> Self {
        Self {
            high_contrast,
            large_text,
        }
    }

    pub fn set_high_contrast(&mut self, enabled: bool) {
        self.high_contrast = enabled;
    }

    pub fn set_large_text(&mut self, enabled: bool) {
        self.large_text = enabled;
    }

    pub fn toggle_high_contrast(&mut self) {
        self.high_contrast = !self.high_contrast;
    }

    pub fn toggle_large_text(&mut self) {
        self.large_text = !self.large_text;
    }
}

impl Default for AccessibilityFlags {
    fn default() -> Self {
        Self {
            high_contrast: false,
            large_text: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_are_independent() {
        let mut flags = AccessibilityFlags::default();
        flags.toggle_high_contrast();
        assert_eq!(flags, AccessibilityFlags::new(true, true));
        flags.toggle_large_text();
        assert_eq!(flags, AccessibilityFlags::new(true, false));
        flags.toggle_high_contrast();
        assert_eq!(flags, AccessibilityFlags::new(false, false));
    }
}
