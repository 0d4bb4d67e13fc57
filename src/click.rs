use glam::Vec2;

use crate::kitten::Kitten;
use crate::viewport::Viewport;

/// Where a fresh press landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickTarget {
    Kitten,
    /// Anywhere else; throws a treat from this point.
    Floor(Vec2),
}

/// Tracks the primary button and turns presses into click targets.
pub struct ClickState {
    was_down: bool,
    /// Presses seen so far.
    pub clicks: u64,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            was_down: false,
            clicks: 0,
        }
    }

    /// Feed the raw button state once per frame. Returns a target only on
    /// the frame the button goes down.
    pub fn update(
        &mut self,
        down: bool,
        pointer: Vec2,
        kitten: &Kitten,
        viewport: &Viewport,
    ) -> Option<ClickTarget> {
        let pressed = down && !self.was_down;
        self.was_down = down;
        if !pressed {
            return None;
        }

        self.clicks += 1;
        if kitten.hit_test(pointer, viewport) {
            Some(ClickTarget::Kitten)
        } else {
            Some(ClickTarget::Floor(pointer))
        }
    }
}

impl Default for ClickState {
    fn default() -> Self {
        Self::new()
    }
}
