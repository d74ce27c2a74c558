//! Safe layers over the raw frame types.
//!
//! [`Frame`] is the scene-side view: drawing methods plus input queries.
//! [`CommandBuffer`] is the host-side sink the draw calls land in.

use core::ffi::c_void;

use crate::ffi::{FrameInput, Key, RawDrawCmd, RawDrawCmdKind, RawFrame};
use crate::geom::{Color, Vec2};

/// Scene-side view of one frame.
///
/// Constructed by the `export_scene!` shims from the `RawFrame` the host
/// passed in; scene code never touches the raw pointers.
pub struct Frame<'a> {
    raw: &'a RawFrame,
}

impl<'a> Frame<'a> {
    /// Wraps a raw frame.
    ///
    /// # Safety
    /// `raw.sink` and `raw.push` must be valid for the lifetime `'a`; the
    /// host guarantees this for the duration of one `update` call.
    #[inline]
    pub unsafe fn from_raw(raw: &'a RawFrame) -> Self {
        Self { raw }
    }

    #[inline]
    fn push(&mut self, cmd: RawDrawCmd) {
        unsafe { (self.raw.push)(self.raw.sink, &cmd) };
    }

    /// Fills the whole canvas.
    pub fn clear(&mut self, color: Color) {
        self.push(RawDrawCmd {
            kind: RawDrawCmdKind::Clear,
            points: [[0.0; 2]; 3],
            scalar: 0.0,
            color: color.to_array(),
        });
    }

    /// Draws a filled triangle.
    pub fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.push(RawDrawCmd {
            kind: RawDrawCmdKind::Triangle,
            points: [[a.x, a.y], [b.x, b.y], [c.x, c.y]],
            scalar: 0.0,
            color: color.to_array(),
        });
    }

    /// Draws a filled circle.
    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(RawDrawCmd {
            kind: RawDrawCmdKind::Circle,
            points: [[center.x, center.y], [0.0; 2], [0.0; 2]],
            scalar: radius,
            color: color.to_array(),
        });
    }

    /// Draws an axis-aligned filled rectangle.
    pub fn rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.push(RawDrawCmd {
            kind: RawDrawCmdKind::Rect,
            points: [[origin.x, origin.y], [size.x, size.y], [0.0; 2]],
            scalar: 0.0,
            color: color.to_array(),
        });
    }

    /// Draws a line segment of the given thickness.
    pub fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
        self.push(RawDrawCmd {
            kind: RawDrawCmdKind::Line,
            points: [[from.x, from.y], [to.x, to.y], [0.0; 2]],
            scalar: thickness,
            color: color.to_array(),
        });
    }

    /// Whether `key` went down this frame.
    #[inline]
    pub fn pressed(&self, key: Key) -> bool {
        self.raw.input.pressed(key)
    }

    /// Whether `key` is currently down.
    #[inline]
    pub fn held(&self, key: Key) -> bool {
        self.raw.input.held(key)
    }
}

/// Host-side draw command sink.
///
/// The host keeps one buffer alive across frames (capacity is reused), resets
/// it, hands a [`RawFrame`] over it to the scene's `update`, then drains the
/// recorded commands into its renderer.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<RawDrawCmd>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards recorded commands, keeping capacity.
    #[inline]
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Commands recorded since the last [`reset`](Self::reset), in submission
    /// order.
    #[inline]
    pub fn commands(&self) -> &[RawDrawCmd] {
        &self.commands
    }

    /// Builds the `RawFrame` to pass across the module boundary.
    ///
    /// The returned value borrows `self` through a raw pointer; it must not
    /// outlive the buffer and the buffer must not be mutated while the frame
    /// is in use. In the host loop both are guaranteed by the strictly
    /// sequential update call.
    pub fn raw_frame(&mut self, input: FrameInput) -> RawFrame {
        RawFrame {
            sink: self as *mut CommandBuffer as *mut c_void,
            push: push_into_buffer,
            input,
        }
    }
}

unsafe extern "C" fn push_into_buffer(sink: *mut c_void, cmd: *const RawDrawCmd) {
    if sink.is_null() || cmd.is_null() {
        return;
    }
    let buffer = unsafe { &mut *(sink as *mut CommandBuffer) };
    buffer.commands.push(unsafe { *cmd });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_over(buffer: &mut CommandBuffer, input: FrameInput) -> RawFrame {
        buffer.raw_frame(input)
    }

    #[test]
    fn draw_calls_land_in_the_buffer_in_order() {
        let mut buffer = CommandBuffer::new();
        let raw = frame_over(&mut buffer, FrameInput::default());
        {
            let mut frame = unsafe { Frame::from_raw(&raw) };
            frame.clear(Color::BLACK);
            frame.circle(Vec2::new(10.0, 20.0), 5.0, Color::WHITE);
            frame.rect(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), Color::RED);
        }

        let cmds = buffer.commands();
        assert_eq!(cmds.len(), 3);
        assert_eq!(cmds[0].kind, RawDrawCmdKind::Clear);
        assert_eq!(cmds[1].kind, RawDrawCmdKind::Circle);
        assert_eq!(cmds[1].points[0], [10.0, 20.0]);
        assert_eq!(cmds[1].scalar, 5.0);
        assert_eq!(cmds[2].kind, RawDrawCmdKind::Rect);
        assert_eq!(cmds[2].points[1], [3.0, 4.0]);
    }

    #[test]
    fn reset_keeps_capacity_but_drops_commands() {
        let mut buffer = CommandBuffer::new();
        let raw = frame_over(&mut buffer, FrameInput::default());
        unsafe { Frame::from_raw(&raw) }.clear(Color::BLACK);
        assert_eq!(buffer.commands().len(), 1);

        buffer.reset();
        assert!(buffer.commands().is_empty());
    }

    #[test]
    fn input_queries_pass_through() {
        let mut input = FrameInput::default();
        input.press(Key::KeyR);
        input.hold(Key::Space);

        let mut buffer = CommandBuffer::new();
        let raw = frame_over(&mut buffer, input);
        let frame = unsafe { Frame::from_raw(&raw) };

        assert!(frame.pressed(Key::KeyR));
        assert!(frame.held(Key::Space));
        assert!(!frame.pressed(Key::Space));
    }
}
