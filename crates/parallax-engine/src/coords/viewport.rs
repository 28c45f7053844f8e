use super::Vec2;

/// Viewport size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height, or `None` for a degenerate viewport.
    #[inline]
    pub fn aspect(self) -> Option<f32> {
        self.is_valid().then(|| self.width / self.height)
    }

    /// Maps a logical-pixel position to `[-1, 1]` on both axes.
    ///
    /// `(-1, -1)` is the top-left corner, `(1, 1)` the bottom-right. Returns
    /// `None` for a degenerate viewport.
    #[inline]
    pub fn normalize(self, pos: Vec2) -> Option<Vec2> {
        if !self.is_valid() {
            return None;
        }
        Some(Vec2::new(
            pos.x / self.width * 2.0 - 1.0,
            pos.y / self.height * 2.0 - 1.0,
        ))
    }
}
