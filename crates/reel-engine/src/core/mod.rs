//! Core engine-facing contracts.
//!
//! The stable interface between the runtime (platform loop) and the
//! application layer: a trait for the app, a per-frame context, and nothing
//! that leaks runtime internals.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
