use glam::Vec2;
use thiserror::Error;

/// Treats are drawn as squares of this many pixels.
pub const TREAT_SIZE: f32 = 20.0;
/// Distance from the bottom edge to the treat floor.
const FLOOR_INSET: f32 = 30.0;
/// Kitten stays inside [SAFE_MIN, SAFE_MAX] percent on both axes.
pub const SAFE_MIN: f32 = 10.0;
pub const SAFE_MAX: f32 = 90.0;

#[derive(Debug, Error, PartialEq)]
pub enum ViewportError {
    #[error("viewport must have a positive finite size, got {width}x{height}")]
    InvalidSize { width: f32, height: f32 },
}

/// Visible area in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, ViewportError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(ViewportError::InvalidSize { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Percent-of-viewport position to pixels.
    pub fn percent_to_px(&self, pct: Vec2) -> Vec2 {
        pct / 100.0 * self.size()
    }

    /// Pixel position to percent-of-viewport.
    pub fn px_to_percent(&self, px: Vec2) -> Vec2 {
        px / self.size() * 100.0
    }

    /// Clamp a percent position into the safe margin.
    pub fn clamp_percent(pct: Vec2) -> Vec2 {
        pct.clamp(Vec2::splat(SAFE_MIN), Vec2::splat(SAFE_MAX))
    }

    /// Lowest y a treat can reach (top-left corner).
    pub fn floor_y(&self) -> f32 {
        (self.height - FLOOR_INSET).max(0.0)
    }

    /// Rightmost x a treat can reach (top-left corner).
    pub fn max_treat_x(&self) -> f32 {
        (self.width - TREAT_SIZE).max(0.0)
    }
}
