use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    draw_quads, instanced_quad_pipeline, InstanceBuffer, InstanceSpans, QuadBuffers, ViewportUniform,
};

/// Solid rectangle renderer.
///
/// `prepare` uploads every rect of the frame once; `draw` then records one
/// instanced call per batch of consecutive rect commands. Geometry stays in
/// logical pixels and is converted to NDC in the vertex shader.
#[derive(Default)]
pub struct RectRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    quad: Option<QuadBuffers>,
    instances: InstanceBuffer,
    spans: InstanceSpans,
}

impl RectRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads instances for every `DrawCmd::Rect` in `draw_list`.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, draw_list: &DrawList) {
        let instances = collect_instances(draw_list, ctx.viewport.width, ctx.viewport.height, &mut self.spans);
        if instances.is_empty() {
            self.instances.upload::<RectInstance>(ctx, "pixie rect instances", &[]);
            return;
        }

        self.ensure_resources(ctx);
        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        ctx.queue
            .write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::from_ctx(ctx)));
        self.instances.upload(ctx, "pixie rect instances", &instances);
    }

    /// Draws the prepared rects belonging to draw-list `items`.
    pub fn draw(&self, target: &mut RenderTarget<'_>, items: Range<usize>) {
        let (Some(pipeline), Some(bind_group), Some(quad)) =
            (self.pipeline.as_ref(), self.bind_group.as_ref(), self.quad.as_ref())
        else {
            return;
        };

        draw_quads(
            target,
            "pixie rect pass",
            pipeline,
            bind_group,
            quad,
            &self.instances,
            self.spans.instances(items),
        );
    }

    fn ensure_resources(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx, "pixie rect quad"));
        }

        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("pixie rect bgl"),
            entries: &[ViewportUniform::layout_entry()],
        });

        let ubo = ViewportUniform::create_buffer(ctx, "pixie rect viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("pixie rect bind group"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.pipeline = Some(instanced_quad_pipeline(
            ctx,
            "pixie rect pipeline",
            include_str!("shaders/rect.wgsl"),
            &bgl,
            RectInstance::layout(),
        ));
        self.pipeline_format = Some(ctx.surface_format);
        self.bind_group = Some(bind_group);
        self.viewport_ubo = Some(ubo);
    }
}

/// Builds GPU instances in list order, skipping empty rects and rects fully
/// outside the viewport. Records which item produced which instance in `spans`.
fn collect_instances(
    draw_list: &DrawList,
    width: f32,
    height: f32,
    spans: &mut InstanceSpans,
) -> Vec<RectInstance> {
    let mut out = Vec::new();
    spans.begin();
    for item in draw_list.items() {
        if let DrawCmd::Rect(cmd) = item {
            let r = cmd.rect.normalized();
            if !r.is_empty() && r.is_finite() && r.overlaps_viewport(width, height) {
                out.push(RectInstance {
                    origin: [r.origin.x, r.origin.y],
                    size: [r.size.x, r.size.y],
                    color: cmd.color.to_array(),
                });
            }
        }
        spans.end_item(out.len());
    }
    out
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct RectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
}

impl RectInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::paint::Color;

    #[test]
    fn offscreen_and_empty_rects_are_culled() {
        let mut dl = DrawList::new();
        dl.push_fill_rect(Rect::new(100.0, 100.0, 40.0, 40.0), Color::white());
        dl.push_fill_rect(Rect::new(-500.0, 100.0, 40.0, 40.0), Color::white());
        dl.push_fill_rect(Rect::new(10.0, 10.0, 0.0, 40.0), Color::white());

        let inst = collect_instances(&dl, 800.0, 600.0, &mut InstanceSpans::default());
        assert_eq!(inst.len(), 1);
        assert_eq!(inst[0].origin, [100.0, 100.0]);
        assert_eq!(inst[0].size, [40.0, 40.0]);
    }

    #[test]
    fn text_commands_are_ignored() {
        let mut dl = DrawList::new();
        dl.push_text("x", crate::coords::Vec2::ZERO, 12.0, Color::white());
        assert!(collect_instances(&dl, 800.0, 600.0, &mut InstanceSpans::default()).is_empty());
    }

    #[test]
    fn culled_rects_own_no_instances() {
        let mut dl = DrawList::new();
        dl.push_fill_rect(Rect::new(-500.0, 0.0, 10.0, 10.0), Color::white());
        dl.push_text("x", crate::coords::Vec2::ZERO, 12.0, Color::white());
        dl.push_fill_rect(Rect::new(100.0, 100.0, 40.0, 40.0), Color::white());

        let mut spans = InstanceSpans::default();
        collect_instances(&dl, 800.0, 600.0, &mut spans);
        assert!(spans.instances(0..1).is_empty());
        assert_eq!(spans.instances(1..3), 0..1);
    }
}
