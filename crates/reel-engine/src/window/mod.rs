//! Window runtime.
//!
//! Owns the winit event loop and the single demo window, translates platform
//! input, and drives the application's per-frame callback.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
