//! Starfield fly-through.
//!
//! Stars live in a centered space: x/y across the canvas, z receding into
//! the screen. Each frame a star is perspective-projected at its current and
//! previous depth, and the gap is filled with a streak triangle that reads
//! as a motion trail. Space pauses.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use reel_scene::{Color, Frame, Key, SceneBehavior, Vec2, CANVAS_SIZE};

const STAR_COUNT: usize = 800;

const HALF_W: f32 = CANVAS_SIZE.x / 2.0;
const HALF_H: f32 = CANVAS_SIZE.y / 2.0;

/// Depth units per second (15 per frame at 60 Hz); scaling by dt keeps the
/// speed stable on uncapped displays.
const SPEED: f32 = 900.0;

struct Star {
    x: f32,
    y: f32,
    z: f32,
    last_z: f32,
}

struct StarfieldScene {
    stars: Vec<Star>,
    rng: StdRng,
    paused: bool,
}

impl StarfieldScene {
    fn spawn(rng: &mut StdRng) -> Star {
        // z stays off zero so the projection divide is always defined.
        let z = rng.gen_range(1.0..=HALF_W);
        Star {
            x: rng.gen_range(-HALF_W..=HALF_W),
            y: rng.gen_range(-HALF_H..=HALF_H),
            z,
            last_z: z,
        }
    }

    fn respawn_far(star: &mut Star, rng: &mut StdRng) {
        star.x = rng.gen_range(-HALF_W..=HALF_W);
        star.y = rng.gen_range(-HALF_H..=HALF_H);
        star.z = HALF_W;
        star.last_z = star.z;
    }
}

fn remap(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Centered space → canvas coordinates.
fn to_canvas(x: f32, y: f32) -> Vec2 {
    Vec2::new(x + HALF_W, y + HALF_H)
}

impl SceneBehavior for StarfieldScene {
    fn init() -> Self {
        let mut rng = StdRng::from_entropy();
        let stars = (0..STAR_COUNT).map(|_| Self::spawn(&mut rng)).collect();
        Self { stars, rng, paused: false }
    }

    fn update(&mut self, frame: &mut Frame<'_>, dt: f32) {
        if frame.pressed(Key::Space) {
            self.paused = !self.paused;
        }

        frame.clear(Color::BLACK);

        for star in &mut self.stars {
            let x = remap(star.x / star.z, 0.0, 1.0, 0.0, CANVAS_SIZE.x);
            let y = remap(star.y / star.z, 0.0, 1.0, 0.0, CANVAS_SIZE.y);
            let r = remap(star.z, 0.0, HALF_W, 5.0, 0.0);

            let last_x = remap(star.x / star.last_z, 0.0, 1.0, 0.0, CANVAS_SIZE.x);
            let last_y = remap(star.y / star.last_z, 0.0, 1.0, 0.0, CANVAS_SIZE.y);

            let last = to_canvas(last_x, last_y);

            // Streak triangle from two points on the star's rim toward the
            // previous position; which rim points depends on the quadrant,
            // so the streak always trails outward.
            if x > 0.0 && y > 0.0 {
                frame.triangle(to_canvas(x - r, y), to_canvas(x, y - r), last, Color::WHITE);
            } else if x < 0.0 && y > 0.0 {
                frame.triangle(to_canvas(x, y - r), to_canvas(x + r, y), last, Color::WHITE);
            } else if x > 0.0 && y < 0.0 {
                frame.triangle(to_canvas(x, y + r), to_canvas(x - r, y), last, Color::WHITE);
            } else if x < 0.0 && y < 0.0 {
                frame.triangle(to_canvas(x + r, y), to_canvas(x, y + r), last, Color::WHITE);
            }

            frame.circle(to_canvas(x, y), r, Color::WHITE);

            if self.paused {
                continue;
            }

            star.last_z = star.z;
            star.z -= SPEED * dt;
            if star.z < 1.0 {
                Self::respawn_far(star, &mut self.rng);
            }
        }
    }
}

reel_scene::export_scene!(StarfieldScene);

#[cfg(test)]
mod tests {
    use reel_scene::{CommandBuffer, FrameInput, RawDrawCmdKind};

    use super::*;

    fn run_frame(scene: &mut StarfieldScene, input: FrameInput, dt: f32) -> CommandBuffer {
        let mut buffer = CommandBuffer::new();
        let raw = buffer.raw_frame(input);
        {
            let mut frame = unsafe { Frame::from_raw(&raw) };
            scene.update(&mut frame, dt);
        }
        buffer
    }

    #[test]
    fn remap_matches_the_projection_identities() {
        assert_eq!(remap(0.0, 0.0, 1.0, 0.0, 800.0), 0.0);
        assert_eq!(remap(1.0, 0.0, 1.0, 0.0, 800.0), 800.0);
        // Far plane maps to radius 0, near plane to 5.
        assert_eq!(remap(HALF_W, 0.0, HALF_W, 5.0, 0.0), 0.0);
        assert_eq!(remap(0.0, 0.0, HALF_W, 5.0, 0.0), 5.0);
    }

    #[test]
    fn stars_advance_and_respawn_at_the_far_plane() {
        let mut scene = StarfieldScene::init();
        for star in &mut scene.stars {
            star.z = 1.5;
        }

        // One second at full speed pushes every star past the near plane.
        run_frame(&mut scene, FrameInput::default(), 1.0);

        for star in &scene.stars {
            assert_eq!(star.z, HALF_W);
            assert!(star.x >= -HALF_W && star.x <= HALF_W);
        }
    }

    #[test]
    fn space_toggles_pause_and_freezes_depth() {
        let mut scene = StarfieldScene::init();
        let mut input = FrameInput::default();
        input.press(Key::Space);

        run_frame(&mut scene, input, 0.016);
        assert!(scene.paused);

        let depths: Vec<f32> = scene.stars.iter().map(|s| s.z).collect();
        run_frame(&mut scene, FrameInput::default(), 0.016);
        let after: Vec<f32> = scene.stars.iter().map(|s| s.z).collect();
        assert_eq!(depths, after);
    }

    #[test]
    fn every_frame_starts_with_a_clear() {
        let mut scene = StarfieldScene::init();
        let buffer = run_frame(&mut scene, FrameInput::default(), 0.016);
        assert_eq!(buffer.commands()[0].kind, RawDrawCmdKind::Clear);
        // 800 circles, one per star, whatever the streaks did.
        let circles = buffer
            .commands()
            .iter()
            .filter(|c| c.kind == RawDrawCmdKind::Circle)
            .count();
        assert_eq!(circles, STAR_COUNT);
    }
}
