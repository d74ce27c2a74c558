//! Reel engine crate.
//!
//! Owns the platform + GPU runtime pieces the demo host builds on: the winit
//! event loop, wgpu device/surface management, frame timing, keyboard input,
//! and a small draw-command renderer for a fixed-size logical canvas.

pub mod core;
pub mod device;
pub mod input;
pub mod render;
pub mod scene;
pub mod time;
pub mod window;

pub mod color;
pub mod coords;
pub mod logging;
