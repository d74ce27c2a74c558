//! Snake on a wrapping grid.
//!
//! Input is buffered into an event queue and applied at a fixed turn
//! cadence: at most one direction change is queued between turns, reversals
//! are rejected, and the board wraps at every edge. R resets, E extends.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use reel_scene::{Color, Frame, Key, SceneBehavior, Vec2, CANVAS_SIZE};

const CELL: i32 = 20;
const BOARD_W: i32 = CANVAS_SIZE.x as i32 / CELL;
const BOARD_H: i32 = CANVAS_SIZE.y as i32 / CELL;

/// Seconds between turns (16 turns per second).
const TURN_SECONDS: f32 = 0.0625;

/// Queued events are bounded; only one turn fits per tick anyway.
const MAX_EVENTS: usize = 24;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum SnakeEvent {
    TurnUp,
    TurnDown,
    TurnLeft,
    TurnRight,
    Extend,
}

impl SnakeEvent {
    fn is_turn(self) -> bool {
        !matches!(self, SnakeEvent::Extend)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
struct Cell {
    x: i32,
    y: i32,
}

#[derive(Debug, Copy, Clone, Default)]
struct Link {
    position: Cell,
    previous: Cell,
}

struct SnakeScene {
    links: Vec<Link>,
    direction: Direction,
    events: Vec<SnakeEvent>,
    move_queued: bool,
    turn_timer: f32,
    rng: StdRng,
}

impl SnakeScene {
    fn reset(&mut self) {
        self.links.clear();
        self.links.push(Link {
            position: Cell {
                x: self.rng.gen_range(0..BOARD_W),
                y: self.rng.gen_range(0..BOARD_H),
            },
            previous: Cell::default(),
        });
        self.direction = Direction::Up;
        self.events.clear();
        self.move_queued = false;
    }

    /// Queues an event for the next turn. Once a direction change is queued,
    /// everything else is dropped until the turn resolves, so mashing arrows
    /// between ticks cannot stack turns.
    fn enqueue(&mut self, event: SnakeEvent) {
        if self.move_queued || self.events.len() >= MAX_EVENTS {
            return;
        }

        self.events.push(event);
        if event.is_turn() {
            self.move_queued = true;
        }
    }

    fn extend(&mut self) {
        let Some(tail) = self.links.last().copied() else { return };
        self.links.push(Link {
            position: tail.previous,
            previous: tail.previous,
        });
    }

    /// Advances the snake one cell and applies the queued events.
    ///
    /// The head moves under the *current* direction first; a queued turn
    /// takes effect on the following tick.
    fn end_turn(&mut self) {
        let head = &mut self.links[0];
        head.previous = head.position;
        match self.direction {
            Direction::Up => head.position.y -= 1,
            Direction::Down => head.position.y += 1,
            Direction::Left => head.position.x -= 1,
            Direction::Right => head.position.x += 1,
        }

        head.position.x = head.position.x.rem_euclid(BOARD_W);
        head.position.y = head.position.y.rem_euclid(BOARD_H);

        for i in 0..self.events.len() {
            let event = self.events[i];
            match event {
                SnakeEvent::Extend => self.extend(),
                SnakeEvent::TurnUp if self.direction != Direction::Down => {
                    self.direction = Direction::Up;
                }
                SnakeEvent::TurnDown if self.direction != Direction::Up => {
                    self.direction = Direction::Down;
                }
                SnakeEvent::TurnLeft if self.direction != Direction::Right => {
                    self.direction = Direction::Left;
                }
                SnakeEvent::TurnRight if self.direction != Direction::Left => {
                    self.direction = Direction::Right;
                }
                _ => {}
            }
        }
        self.events.clear();
        self.move_queued = false;

        // Body follows: every link steps into the cell its predecessor just
        // vacated.
        let mut leader = self.links[0];
        for link in self.links.iter_mut().skip(1) {
            link.previous = link.position;
            link.position = leader.previous;
            leader = *link;
        }
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        for link in &self.links {
            frame.rect(
                Vec2::new(
                    (link.position.x * CELL) as f32,
                    (link.position.y * CELL) as f32,
                ),
                Vec2::new(CELL as f32, CELL as f32),
                Color::WHITE,
            );
        }
    }
}

impl SceneBehavior for SnakeScene {
    fn init() -> Self {
        let mut scene = Self {
            links: Vec::new(),
            direction: Direction::Up,
            events: Vec::new(),
            move_queued: false,
            turn_timer: 0.0,
            rng: StdRng::from_entropy(),
        };
        scene.reset();
        scene
    }

    fn update(&mut self, frame: &mut Frame<'_>, dt: f32) {
        if frame.pressed(Key::KeyR) {
            self.reset();
        }
        if frame.pressed(Key::KeyE) {
            self.enqueue(SnakeEvent::Extend);
        }
        if frame.pressed(Key::ArrowUp) {
            self.enqueue(SnakeEvent::TurnUp);
        }
        if frame.pressed(Key::ArrowDown) {
            self.enqueue(SnakeEvent::TurnDown);
        }
        if frame.pressed(Key::ArrowLeft) {
            self.enqueue(SnakeEvent::TurnLeft);
        }
        if frame.pressed(Key::ArrowRight) {
            self.enqueue(SnakeEvent::TurnRight);
        }

        frame.clear(Color::BLACK);
        self.draw(frame);

        if self.turn_timer >= TURN_SECONDS {
            self.end_turn();
            self.turn_timer = 0.0;
        }
        self.turn_timer += dt;
    }
}

reel_scene::export_scene!(SnakeScene);
