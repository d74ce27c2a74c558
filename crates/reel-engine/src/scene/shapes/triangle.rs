use crate::color::Color;
use crate::coords::Vec2;
use crate::scene::{DrawCmd, DrawList};

/// Filled-triangle draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleCmd {
    pub points: [Vec2; 3],
    pub color: Color,
}

impl DrawList {
    /// Records a filled triangle.
    #[inline]
    pub fn push_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.push(DrawCmd::Triangle(TriangleCmd { points: [a, b, c], color }));
    }
}
