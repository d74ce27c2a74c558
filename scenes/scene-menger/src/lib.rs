//! Menger sponge subdivision.
//!
//! A single cube subdivides on Space: each cube splits into the 20 children
//! of the 3×3×3 lattice whose cells touch at most one axis center. The
//! camera orbits the origin; faces are projected scene-side and painted
//! far-to-near, with wire edges on top of each face.

mod math;

use math::{Camera, Vec3};
use reel_scene::{Color, Frame, Key, SceneBehavior, Vec2};

/// Hard cap on the cube set; three subdivisions (8000 cubes) fit, a fourth
/// does not and is refused.
const MAX_CUBES: usize = 1024 * 10;

const ORBIT_HEIGHT: f32 = 10.0;
const ORBIT_RADIUS: f32 = 14.0;
const ORBIT_SPEED: f32 = 0.5; // radians per second

#[derive(Debug, Copy, Clone)]
struct Cube {
    position: Vec3,
    size: f32,
}

struct MengerScene {
    cubes: Vec<Cube>,
    next: Vec<Cube>,
    orbit_angle: f32,
}

impl MengerScene {
    /// One subdivision step over the whole set. Refuses (and keeps the
    /// current set) when the result would exceed [`MAX_CUBES`].
    fn subdivide(&mut self) {
        let projected = self.cubes.len() * 20;
        if projected > MAX_CUBES {
            eprintln!("subdivision refused: {projected} cubes would exceed the cap of {MAX_CUBES}");
            return;
        }

        self.next.clear();
        for cube in &self.cubes {
            let w = cube.size / 3.0;
            for x in -1i32..=1 {
                for y in -1i32..=1 {
                    for z in -1i32..=1 {
                        // The center cell and the six face centers are the
                        // holes of the sponge.
                        if x.abs() + y.abs() + z.abs() <= 1 {
                            continue;
                        }
                        self.next.push(Cube {
                            position: cube.position
                                + Vec3::new(x as f32 * w, y as f32 * w, z as f32 * w),
                            size: w,
                        });
                    }
                }
            }
        }

        std::mem::swap(&mut self.cubes, &mut self.next);
    }

    fn camera(&self) -> Camera {
        Camera::look_at(
            Vec3::new(
                self.orbit_angle.sin() * ORBIT_RADIUS,
                ORBIT_HEIGHT,
                self.orbit_angle.cos() * ORBIT_RADIUS,
            ),
            Vec3::ZERO,
            45.0_f32.to_radians(),
        )
    }

    fn draw_grid(&self, frame: &mut Frame<'_>, camera: &Camera) {
        const EXTENT: i32 = 5;
        for i in -EXTENT..=EXTENT {
            let a = camera.project(Vec3::new(i as f32, 0.0, -EXTENT as f32));
            let b = camera.project(Vec3::new(i as f32, 0.0, EXTENT as f32));
            if let (Some((a, _)), Some((b, _))) = (a, b) {
                frame.line(a, b, 1.0, Color::GRAY);
            }

            let a = camera.project(Vec3::new(-EXTENT as f32, 0.0, i as f32));
            let b = camera.project(Vec3::new(EXTENT as f32, 0.0, i as f32));
            if let (Some((a, _)), Some((b, _))) = (a, b) {
                frame.line(a, b, 1.0, Color::GRAY);
            }
        }
    }

    fn draw_cubes(&self, frame: &mut Frame<'_>, camera: &Camera) {
        struct Face {
            depth: f32,
            corners: [Vec2; 4],
        }

        let mut faces: Vec<Face> = Vec::with_capacity(self.cubes.len() * 6);

        for cube in &self.cubes {
            let h = cube.size / 2.0;
            let c = cube.position;

            let corners = [
                Vec3::new(c.x - h, c.y - h, c.z - h),
                Vec3::new(c.x + h, c.y - h, c.z - h),
                Vec3::new(c.x + h, c.y + h, c.z - h),
                Vec3::new(c.x - h, c.y + h, c.z - h),
                Vec3::new(c.x - h, c.y - h, c.z + h),
                Vec3::new(c.x + h, c.y - h, c.z + h),
                Vec3::new(c.x + h, c.y + h, c.z + h),
                Vec3::new(c.x - h, c.y + h, c.z + h),
            ];

            let mut projected = [None; 8];
            for (i, corner) in corners.iter().enumerate() {
                projected[i] = camera.project(*corner);
            }

            for quad in FACE_INDICES {
                let mut pts = [Vec2::default(); 4];
                let mut depth = 0.0;
                let mut visible = true;
                for (slot, &index) in quad.iter().enumerate() {
                    match projected[index] {
                        Some((p, d)) => {
                            pts[slot] = p;
                            depth += d;
                        }
                        None => {
                            visible = false;
                            break;
                        }
                    }
                }
                if visible {
                    faces.push(Face { depth: depth / 4.0, corners: pts });
                }
            }
        }

        // Painter's order: far faces first.
        faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        for face in &faces {
            let [a, b, c, d] = face.corners;
            frame.triangle(a, b, c, Color::RED);
            frame.triangle(a, c, d, Color::RED);

            frame.line(a, b, 1.0, Color::MAROON);
            frame.line(b, c, 1.0, Color::MAROON);
            frame.line(c, d, 1.0, Color::MAROON);
            frame.line(d, a, 1.0, Color::MAROON);
        }
    }
}

/// Corner indices per cube face (-Z, +Z, -Y, +Y, -X, +X).
const FACE_INDICES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [3, 2, 6, 7],
    [0, 3, 7, 4],
    [1, 2, 6, 5],
];

impl SceneBehavior for MengerScene {
    fn init() -> Self {
        Self {
            cubes: vec![Cube { position: Vec3::ZERO, size: 5.0 }],
            next: Vec::new(),
            orbit_angle: 0.0,
        }
    }

    fn update(&mut self, frame: &mut Frame<'_>, dt: f32) {
        self.orbit_angle += ORBIT_SPEED * dt;

        if frame.pressed(Key::Space) {
            self.subdivide();
        }

        frame.clear(Color::BLACK);

        let camera = self.camera();
        self.draw_grid(frame, &camera);
        self.draw_cubes(frame, &camera);
    }
}

reel_scene::export_scene!(MengerScene);

#[cfg(test)]
mod tests {
    use reel_scene::{CommandBuffer, FrameInput};

    use super::*;

    #[test]
    fn subdivision_follows_the_twenty_child_rule() {
        let mut scene = MengerScene::init();
        assert_eq!(scene.cubes.len(), 1);

        scene.subdivide();
        assert_eq!(scene.cubes.len(), 20);

        scene.subdivide();
        assert_eq!(scene.cubes.len(), 400);
    }

    #[test]
    fn children_shrink_by_a_third() {
        let mut scene = MengerScene::init();
        scene.subdivide();
        for cube in &scene.cubes {
            assert!((cube.size - 5.0 / 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn oversized_subdivision_is_refused() {
        let mut scene = MengerScene::init();
        for _ in 0..3 {
            scene.subdivide();
        }
        assert_eq!(scene.cubes.len(), 8000);

        // 8000 * 20 blows the cap; the set must be left as-is.
        scene.subdivide();
        assert_eq!(scene.cubes.len(), 8000);
    }

    #[test]
    fn space_triggers_exactly_one_subdivision() {
        let mut scene = MengerScene::init();
        let mut buffer = CommandBuffer::new();

        let mut input = FrameInput::default();
        input.press(Key::Space);
        let raw = buffer.raw_frame(input);
        {
            let mut frame = unsafe { Frame::from_raw(&raw) };
            scene.update(&mut frame, 0.016);
        }
        assert_eq!(scene.cubes.len(), 20);
    }
}
