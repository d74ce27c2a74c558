use reel_engine::color::Color;
use reel_engine::coords::Vec2;
use reel_engine::core::{App, AppControl, FrameCtx};
use reel_engine::input::{InputFrame, InputState, Key as HostKey};
use reel_engine::render::CanvasRenderer;
use reel_engine::scene::DrawList;
use reel_reload::{SceneLoader, SceneSlot};
use reel_scene::{
    CommandBuffer, FrameInput, Key as SceneKey, RawDrawCmd, RawDrawCmdKind, CANVAS_SIZE,
};

/// The host application: owns the scene slot and turns each frame's scene
/// output into engine draw calls.
///
/// Per frame, in strict sequence: poll the slot (initial load, retry, or
/// reload check), dispatch `update` over a command buffer, translate the
/// recorded commands into the draw list, render. A slot with no live scene
/// (artifact missing, reload mid-rebuild) renders an empty canvas and keeps
/// polling; it is never a reason to exit.
pub struct HostApp {
    slot: SceneSlot<SceneLoader>,
    buffer: CommandBuffer,
    draw_list: DrawList,
    renderer: CanvasRenderer,
}

impl HostApp {
    pub fn new(slot: SceneSlot<SceneLoader>) -> Self {
        Self {
            slot,
            buffer: CommandBuffer::new(),
            draw_list: DrawList::new(),
            renderer: CanvasRenderer::new(),
        }
    }
}

impl App for HostApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.pressed.contains(&HostKey::Escape) {
            return AppControl::Exit;
        }

        self.slot.poll();

        self.buffer.reset();
        let raw = self.buffer.raw_frame(frame_input(ctx.input, ctx.input_frame));
        self.slot.update(&raw, ctx.time.dt);
        drop(raw);

        self.draw_list.clear();
        translate_commands(self.buffer.commands(), &mut self.draw_list);

        ctx.window
            .set_title(&format!("reel - {:.2} ms/frame", ctx.time.avg_ms));

        let canvas = Vec2::new(CANVAS_SIZE.x, CANVAS_SIZE.y);
        let (renderer, draw_list) = (&mut self.renderer, &self.draw_list);
        ctx.render(canvas, Color::DARK_GRAY, |rctx, target| {
            renderer.render(rctx, target, draw_list);
        })
    }
}

/// Builds the scene-facing input snapshot from the engine's keyboard state.
fn frame_input(state: &InputState, frame: &InputFrame) -> FrameInput {
    let mut input = FrameInput::default();
    for key in &frame.pressed {
        if let Some(key) = scene_key(*key) {
            input.press(key);
        }
    }
    for key in state.keys_down() {
        if let Some(key) = scene_key(key) {
            input.hold(key);
        }
    }
    input
}

fn scene_key(key: HostKey) -> Option<SceneKey> {
    match key {
        HostKey::Space => Some(SceneKey::Space),
        HostKey::ArrowUp => Some(SceneKey::ArrowUp),
        HostKey::ArrowDown => Some(SceneKey::ArrowDown),
        HostKey::ArrowLeft => Some(SceneKey::ArrowLeft),
        HostKey::ArrowRight => Some(SceneKey::ArrowRight),
        HostKey::E => Some(SceneKey::KeyE),
        HostKey::R => Some(SceneKey::KeyR),
        HostKey::Escape | HostKey::Unknown(_) => None,
    }
}

/// Lowers recorded scene commands into engine draw calls.
fn translate_commands(commands: &[RawDrawCmd], list: &mut DrawList) {
    for cmd in commands {
        let color = color_of(cmd);
        match cmd.kind {
            RawDrawCmdKind::Clear => {
                list.push_rect(Vec2::zero(), Vec2::new(CANVAS_SIZE.x, CANVAS_SIZE.y), color);
            }
            RawDrawCmdKind::Triangle => {
                list.push_triangle(
                    point(cmd, 0),
                    point(cmd, 1),
                    point(cmd, 2),
                    color,
                );
            }
            RawDrawCmdKind::Circle => {
                list.push_circle(point(cmd, 0), cmd.scalar, color);
            }
            RawDrawCmdKind::Rect => {
                list.push_rect(point(cmd, 0), point(cmd, 1), color);
            }
            RawDrawCmdKind::Line => {
                list.push_line(point(cmd, 0), point(cmd, 1), cmd.scalar, color);
            }
        }
    }
}

fn point(cmd: &RawDrawCmd, index: usize) -> Vec2 {
    Vec2::new(cmd.points[index][0], cmd.points[index][1])
}

fn color_of(cmd: &RawDrawCmd) -> Color {
    Color::new(cmd.color[0], cmd.color[1], cmd.color[2], cmd.color[3])
}

#[cfg(test)]
mod tests {
    use reel_engine::scene::DrawCmd;

    use super::*;

    #[test]
    fn clear_becomes_a_canvas_sized_rect() {
        let cmd = RawDrawCmd {
            kind: RawDrawCmdKind::Clear,
            points: [[0.0; 2]; 3],
            scalar: 0.0,
            color: [0.0, 0.0, 0.0, 1.0],
        };

        let mut list = DrawList::new();
        translate_commands(&[cmd], &mut list);

        match &list.items()[0] {
            DrawCmd::Rect(r) => {
                assert_eq!(r.origin, Vec2::zero());
                assert_eq!(r.size, Vec2::new(CANVAS_SIZE.x, CANVAS_SIZE.y));
            }
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn shapes_translate_field_for_field() {
        let cmds = [
            RawDrawCmd {
                kind: RawDrawCmdKind::Circle,
                points: [[10.0, 20.0], [0.0; 2], [0.0; 2]],
                scalar: 4.0,
                color: [1.0, 1.0, 1.0, 1.0],
            },
            RawDrawCmd {
                kind: RawDrawCmdKind::Line,
                points: [[0.0, 0.0], [5.0, 5.0], [0.0; 2]],
                scalar: 2.0,
                color: [1.0, 0.0, 0.0, 1.0],
            },
        ];

        let mut list = DrawList::new();
        translate_commands(&cmds, &mut list);

        match &list.items()[0] {
            DrawCmd::Circle(c) => {
                assert_eq!(c.center, Vec2::new(10.0, 20.0));
                assert_eq!(c.radius, 4.0);
            }
            other => panic!("expected circle, got {other:?}"),
        }
        match &list.items()[1] {
            DrawCmd::Line(l) => {
                assert_eq!(l.to, Vec2::new(5.0, 5.0));
                assert_eq!(l.thickness, 2.0);
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn host_keys_map_onto_the_scene_contract() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_key(&mut frame, HostKey::R, true, false);
        state.apply_key(&mut frame, HostKey::Escape, true, false);

        let input = frame_input(&state, &frame);
        assert!(input.pressed(SceneKey::KeyR));
        // Escape is host-side only; it never reaches scenes.
        assert_eq!(input.pressed & !(1 << SceneKey::KeyR as u32), 0);
    }
}
