//! Input subsystem.
//!
//! Keyboard only; the demos never read the pointer. The public API is
//! platform-agnostic; the window runtime translates winit events into
//! [`Key`]s and feeds them through [`InputState::apply_key`].

mod state;
mod types;

pub use state::{InputFrame, InputState};
pub use types::Key;
