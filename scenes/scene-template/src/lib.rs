//! Scene template: a white triangle on black.
//!
//! Copy this crate to start a new scene; the only required pieces are a
//! state type implementing [`SceneBehavior`] and the `export_scene!` call.

use reel_scene::{Color, Frame, SceneBehavior, Vec2, CANVAS_SIZE};

struct TemplateScene;

impl SceneBehavior for TemplateScene {
    fn init() -> Self {
        TemplateScene
    }

    fn update(&mut self, frame: &mut Frame<'_>, _dt: f32) {
        frame.clear(Color::BLACK);

        let center = CANVAS_SIZE * 0.5;
        frame.triangle(
            center + Vec2::new(0.0, -CANVAS_SIZE.y / 4.0),
            center + Vec2::new(-CANVAS_SIZE.x / 4.0, CANVAS_SIZE.y / 4.0),
            center + Vec2::new(CANVAS_SIZE.x / 4.0, CANVAS_SIZE.y / 4.0),
            Color::WHITE,
        );
    }
}

reel_scene::export_scene!(TemplateScene);

#[cfg(test)]
mod tests {
    use reel_scene::{CommandBuffer, FrameInput, RawDrawCmdKind};

    use super::*;

    #[test]
    fn update_clears_then_draws_one_triangle() {
        let mut scene = TemplateScene::init();
        let mut buffer = CommandBuffer::new();
        let raw = buffer.raw_frame(FrameInput::default());

        {
            let mut frame = unsafe { Frame::from_raw(&raw) };
            scene.update(&mut frame, 1.0 / 60.0);
        }

        let cmds = buffer.commands();
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0].kind, RawDrawCmdKind::Clear);
        assert_eq!(cmds[1].kind, RawDrawCmdKind::Triangle);
    }
}
