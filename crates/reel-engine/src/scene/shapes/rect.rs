use crate::color::Color;
use crate::coords::Vec2;
use crate::scene::{DrawCmd, DrawList};

/// Axis-aligned filled-rectangle draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub origin: Vec2,
    pub size: Vec2,
    pub color: Color,
}

impl DrawList {
    /// Records an axis-aligned filled rectangle.
    #[inline]
    pub fn push_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.push(DrawCmd::Rect(RectCmd { origin, size, color }));
    }
}
