//! Shared GPU types and the letterbox transform used by both renderers.

use bytemuck::{Pod, Zeroable};

use crate::coords::{Vec2, Viewport};
use crate::render::RenderCtx;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn straight_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState::ALPHA_BLENDING
}

// ── canvas uniform ────────────────────────────────────────────────────────

/// Uniform shared by all shaders.
///
/// `window.xy` is the logical window size. `transform` packs the letterbox
/// mapping from canvas to window coordinates:
/// `window_pos = canvas_pos * transform.xy + transform.zw`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct CanvasUniform {
    pub window: [f32; 4],
    pub transform: [f32; 4],
}

pub(super) fn canvas_ubo_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<CanvasUniform>() as u64)
        .expect("CanvasUniform has non-zero size by construction")
}

/// Letterbox scale + offset for fitting `canvas` into `viewport`.
///
/// The canvas is scaled by window height and centered horizontally, leaving
/// side gutters on wide windows.
pub(crate) fn canvas_transform(viewport: Viewport, canvas: Vec2) -> (f32, Vec2) {
    if !viewport.is_valid() || canvas.x <= 0.0 || canvas.y <= 0.0 {
        return (1.0, Vec2::zero());
    }
    let scale = viewport.height / canvas.y;
    let offset = Vec2::new((viewport.width - canvas.x * scale) / 2.0, 0.0);
    (scale, offset)
}

pub(super) fn canvas_uniform(ctx: &RenderCtx<'_>) -> CanvasUniform {
    let (scale, offset) = canvas_transform(ctx.viewport, ctx.canvas);
    CanvasUniform {
        window: [
            ctx.viewport.width.max(1.0),
            ctx.viewport.height.max(1.0),
            0.0,
            0.0,
        ],
        transform: [scale, scale, offset.x, offset.y],
    }
}

// ── scissor rect ──────────────────────────────────────────────────────────

/// Physical-pixel scissor rect covering the letterboxed canvas area.
///
/// Keeps scene geometry from spilling into the gutters. Returns `None` when
/// the visible area is empty (renderer should skip its draw calls).
pub(super) fn canvas_scissor(ctx: &RenderCtx<'_>) -> Option<(u32, u32, u32, u32)> {
    let (scale, offset) = canvas_transform(ctx.viewport, ctx.canvas);
    let sf = ctx.scale_factor.max(0.01);

    let surface_w = (ctx.viewport.width * sf).max(0.0) as u32;
    let surface_h = (ctx.viewport.height * sf).max(0.0) as u32;

    let x = ((offset.x * sf).max(0.0) as u32).min(surface_w);
    let y = ((offset.y * sf).max(0.0) as u32).min(surface_h);
    let x2 = (((offset.x + ctx.canvas.x * scale) * sf).max(0.0) as u32).min(surface_w);
    let y2 = (((offset.y + ctx.canvas.y * scale) * sf).max(0.0) as u32).min(surface_h);

    let (w, h) = (x2.saturating_sub(x), y2.saturating_sub(y));
    if w == 0 || h == 0 { None } else { Some((x, y, w, h)) }
}

// ── quad vertex (instanced circle) ────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Vec2 = Vec2::new(800.0, 600.0);

    // ── canvas_transform ──────────────────────────────────────────────────

    #[test]
    fn identity_when_window_matches_canvas() {
        let (scale, offset) = canvas_transform(Viewport::new(800.0, 600.0), CANVAS);
        assert_eq!(scale, 1.0);
        assert_eq!(offset, Vec2::zero());
    }

    #[test]
    fn scales_by_height_and_centers_horizontally() {
        let (scale, offset) = canvas_transform(Viewport::new(1600.0, 1200.0), CANVAS);
        assert_eq!(scale, 2.0);
        assert_eq!(offset, Vec2::zero());

        let (scale, offset) = canvas_transform(Viewport::new(1000.0, 600.0), CANVAS);
        assert_eq!(scale, 1.0);
        assert_eq!(offset, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn degenerate_sizes_fall_back_to_identity() {
        let (scale, offset) = canvas_transform(Viewport::new(0.0, 0.0), CANVAS);
        assert_eq!(scale, 1.0);
        assert_eq!(offset, Vec2::zero());

        let (scale, _) = canvas_transform(Viewport::new(800.0, 600.0), Vec2::zero());
        assert_eq!(scale, 1.0);
    }
}
