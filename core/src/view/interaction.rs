use super::accessibility::AccessibilityFlags;
use super::style::{region_style, StyleDescriptor, StyleTier};

/// Which region the pointer is over and which one is being pressed.
///
/// Events are applied in the order they are dispatched; nothing else mutates
/// this state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    hovered: Option<String>,
    pressed: Option<String>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn pressed(&self) -> Option<&str> {
        self.pressed.as_deref()
    }

    pub fn pointer_enter(&mut self, region_id: &str) {
        self.hovered = Some(region_id.to_string());
    }

    /// Ignored unless `region_id` is the hovered region, so a late leave
    /// from a previous region cannot clear the current hover.
    pub fn pointer_leave(&mut self, region_id: &str) {
        if self.hovered.as_deref() == Some(region_id) {
            self.hovered = None;
        }
    }

    pub fn pointer_down(&mut self, region_id: &str) {
        self.pressed = Some(region_id.to_string());
    }

    /// Global release.
    pub fn pointer_up(&mut self) {
        self.pressed = None;
    }

    pub fn focus(&mut self, region_id: &str) {
        self.pointer_enter(region_id);
    }

    pub fn blur(&mut self, region_id: &str) {
        self.pointer_leave(region_id);
    }

    /// Keyboard traversal: blurs the focused region and focuses the one after
    /// it in `order`, wrapping at the end. Returns the newly focused id.
    pub fn focus_next(&mut self, order: &[&str]) -> Option<&str> {
        self.step_focus(order, true)
    }

    pub fn focus_previous(&mut self, order: &[&str]) -> Option<&str> {
        self.step_focus(order, false)
    }

    fn step_focus(&mut self, order: &[&str], forward: bool) -> Option<&str> {
        let last = order.len().checked_sub(1)?;
        let current = self
            .hovered
            .as_deref()
            .and_then(|id| order.iter().position(|candidate| *candidate == id));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => last,
            (Some(index), true) if index == last => 0,
            (Some(index), true) => index + 1,
            (Some(0), false) => last,
            (Some(index), false) => index - 1,
        };
        if let Some(previous) = self.hovered.clone() {
            self.blur(&previous);
        }
        self.focus(order[next]);
        self.hovered()
    }

    /// Pointer left the map surface entirely.
    pub fn surface_exit(&mut self) {
        self.hovered = None;
        self.pressed = None;
    }

    /// Moves hover to `region_id` (or nowhere), emitting leave before enter.
    pub fn hover_to(&mut self, region_id: Option<&str>) {
        if self.hovered.as_deref() == region_id {
            return;
        }
        if let Some(previous) = self.hovered.clone() {
            self.pointer_leave(&previous);
        }
        if let Some(next) = region_id {
            self.pointer_enter(next);
        }
    }

    pub fn tier(&self, region_id: &str) -> StyleTier {
        if self.pressed.as_deref() == Some(region_id) {
            StyleTier::Pressed
        } else if self.hovered.as_deref() == Some(region_id) {
            StyleTier::Hover
        } else {
            StyleTier::Default
        }
    }

    pub fn resolve_style(&self, region_id: &str, flags: AccessibilityFlags) -> StyleDescriptor {
        region_style(self.tier(region_id), flags)
    }
}
