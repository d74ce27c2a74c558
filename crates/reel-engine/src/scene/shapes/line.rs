use crate::color::Color;
use crate::coords::Vec2;
use crate::scene::{DrawCmd, DrawList};

/// Line-segment draw payload. `thickness` is in canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub from: Vec2,
    pub to: Vec2,
    pub thickness: f32,
    pub color: Color,
}

impl DrawList {
    /// Records a line segment.
    #[inline]
    pub fn push_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
        self.push(DrawCmd::Line(LineCmd { from, to, thickness, color }));
    }
}
