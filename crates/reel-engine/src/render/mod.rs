//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams and issue GPU commands via wgpu.
//! Each renderer owns its GPU resources (pipelines, buffers).
//!
//! Convention:
//! - CPU geometry is in canvas pixels (top-left origin, +Y down)
//! - the vertex shader letterboxes the canvas into the window and converts
//!   to NDC using a shared uniform (see `shapes::common`)

mod canvas;
mod ctx;
pub mod shapes;

pub use canvas::CanvasRenderer;
pub use ctx::{RenderCtx, RenderTarget};
