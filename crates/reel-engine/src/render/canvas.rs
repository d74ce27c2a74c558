use crate::render::shapes::{CircleRenderer, MeshRenderer};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::DrawList;

/// Composite renderer for a recorded draw list.
///
/// Two passes: flat mesh geometry (triangles, rects, lines), then circles.
/// Commands of the same kind keep their submission order; across the two
/// kinds, circles composite on top of mesh geometry. The demos draw
/// backgrounds with rects and accents with circles, so this matches their
/// intent.
pub struct CanvasRenderer {
    mesh: MeshRenderer,
    circles: CircleRenderer,
}

impl CanvasRenderer {
    pub fn new() -> Self {
        Self {
            mesh: MeshRenderer::new(),
            circles: CircleRenderer::new(),
        }
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
    ) {
        if draw_list.is_empty() {
            return;
        }
        self.mesh.render(ctx, target, draw_list);
        self.circles.render(ctx, target, draw_list);
    }
}

impl Default for CanvasRenderer {
    fn default() -> Self {
        Self::new()
    }
}
