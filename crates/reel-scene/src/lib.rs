//! Scene contract crate.
//!
//! This crate defines the ABI between the reel host and the scene modules it
//! loads at runtime. Both sides compile it in:
//! - a scene crate implements [`SceneBehavior`] and invokes [`export_scene!`],
//!   which generates the single exported entry point the loader resolves
//! - the host builds a [`CommandBuffer`]-backed [`RawFrame`] per frame and
//!   dispatches through the [`SceneFns`] table it resolved from the module
//!
//! Everything that crosses the module boundary is `#[repr(C)]` plain data or
//! a function pointer; the safe [`Frame`] / [`SceneBehavior`] layer keeps the
//! unsafety confined to the generated shims.

mod export;
mod ffi;
mod frame;
mod geom;

pub use export::SceneBehavior;
pub use ffi::{
    FrameInput, GetSceneFns, Key, RawDrawCmd, RawDrawCmdKind, RawFrame, SceneFns,
    SCENE_ENTRY_POINT,
};
pub use frame::{CommandBuffer, Frame};
pub use geom::{Color, Vec2};

/// Logical canvas size, in canvas pixels. Scenes draw in this coordinate
/// space; the host scales it into the window.
pub const CANVAS_SIZE: Vec2 = Vec2::new(800.0, 600.0);
