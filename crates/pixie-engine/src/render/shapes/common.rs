//! GPU types and helpers shared by the shape renderers.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};

// ── blend ─────────────────────────────────────────────────────────────────

/// Source-over for premultiplied colors.
pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    pub(super) fn from_ctx(ctx: &RenderCtx<'_>) -> Self {
        Self {
            viewport: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
            _pad: [0.0; 2],
        }
    }

    pub(super) const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    pub(super) fn layout_entry() -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(Self::SIZE),
            },
            count: None,
        }
    }

    pub(super) fn create_buffer(ctx: &RenderCtx<'_>, label: &'static str) -> wgpu::Buffer {
        ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: Self::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }
}

// ── unit quad ─────────────────────────────────────────────────────────────

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

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Unit quad vertex + index buffers, instanced by every shape renderer.
pub(super) struct QuadBuffers {
    pub vbo: wgpu::Buffer,
    pub ibo: wgpu::Buffer,
}

impl QuadBuffers {
    pub(super) fn new(ctx: &RenderCtx<'_>, label: &'static str) -> Self {
        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self { vbo, ibo }
    }

    pub(super) const INDEX_COUNT: u32 = QUAD_INDICES.len() as u32;
}

// ── instance buffer ───────────────────────────────────────────────────────

/// Growable per-instance vertex buffer, written once per frame.
#[derive(Default)]
pub(super) struct InstanceBuffer {
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
    len: u32,
}

impl InstanceBuffer {
    /// Uploads `data`, growing to the next power of two when needed.
    pub(super) fn upload<T: Pod>(&mut self, ctx: &RenderCtx<'_>, label: &'static str, data: &[T]) {
        self.len = 0;
        if data.is_empty() {
            return;
        }

        let required = data.len();
        if required > self.capacity || self.buffer.is_none() {
            let cap = grown_capacity(required);
            self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: (cap * std::mem::size_of::<T>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = cap;
        }

        if let Some(buffer) = self.buffer.as_ref() {
            ctx.queue.write_buffer(buffer, 0, bytemuck::cast_slice(data));
            self.len = required as u32;
        }
    }

    /// Buffer holding this frame's instances, if any were uploaded.
    pub(super) fn current(&self) -> Option<&wgpu::Buffer> {
        self.buffer.as_ref().filter(|_| self.len > 0)
    }

    pub(super) fn len(&self) -> u32 {
        self.len
    }
}

pub(super) fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(64)
}

// ── per-item spans ────────────────────────────────────────────────────────

/// Maps draw-list items to the instances a renderer produced for them.
///
/// Instances are collected in list order, so any contiguous item range owns a
/// contiguous instance range. `offsets[i]` is the instance count before item `i`.
#[derive(Debug, Default, Clone, PartialEq)]
pub(super) struct InstanceSpans {
    offsets: Vec<u32>,
}

impl InstanceSpans {
    pub(super) fn begin(&mut self) {
        self.offsets.clear();
        self.offsets.push(0);
    }

    /// Closes the current item with `total` instances produced so far.
    pub(super) fn end_item(&mut self, total: usize) {
        self.offsets.push(total as u32);
    }

    /// Instances owned by `items`. Items past the end own nothing.
    pub(super) fn instances(&self, items: Range<usize>) -> Range<u32> {
        let last = self.offsets.last().copied().unwrap_or(0);
        let at = |i: usize| self.offsets.get(i).copied().unwrap_or(last);
        at(items.start)..at(items.end)
    }
}

// ── draw ──────────────────────────────────────────────────────────────────

/// Records one pass drawing `range` of the uploaded instances.
pub(super) fn draw_quads(
    target: &mut RenderTarget<'_>,
    label: &'static str,
    pipeline: &wgpu::RenderPipeline,
    bind_group: &wgpu::BindGroup,
    quad: &QuadBuffers,
    instances: &InstanceBuffer,
    range: Range<u32>,
) {
    if range.is_empty() || range.end > instances.len() {
        return;
    }
    let Some(vbo) = instances.current() else { return };

    let mut rpass = target.load_pass(label);
    rpass.set_pipeline(pipeline);
    rpass.set_bind_group(0, bind_group, &[]);
    rpass.set_vertex_buffer(0, quad.vbo.slice(..));
    rpass.set_vertex_buffer(1, vbo.slice(..));
    rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
    rpass.draw_indexed(0..QuadBuffers::INDEX_COUNT, 0, range);
}

// ── pipeline ──────────────────────────────────────────────────────────────

/// Builds a triangle-list pipeline drawing instanced unit quads with
/// premultiplied-alpha blending. Shaders expose `vs_main` and `fs_main`.
pub(super) fn instanced_quad_pipeline(
    ctx: &RenderCtx<'_>,
    label: &'static str,
    shader_src: &'static str,
    bind_group_layout: &wgpu::BindGroupLayout,
    instance_layout: wgpu::VertexBufferLayout<'static>,
) -> wgpu::RenderPipeline {
    let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(shader_src.into()),
    });

    let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[bind_group_layout],
        immediate_size: 0,
    });

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[QuadVertex::layout(), instance_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(premul_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_uniform_is_16_bytes() {
        assert_eq!(ViewportUniform::SIZE, 16);
    }

    #[test]
    fn capacity_has_floor_and_grows_by_powers_of_two() {
        assert_eq!(grown_capacity(1), 64);
        assert_eq!(grown_capacity(64), 64);
        assert_eq!(grown_capacity(65), 128);
        assert_eq!(grown_capacity(1000), 1024);
    }

    // ── spans ──

    fn spans(counts: &[usize]) -> InstanceSpans {
        let mut s = InstanceSpans::default();
        s.begin();
        let mut total = 0;
        for c in counts {
            total += c;
            s.end_item(total);
        }
        s
    }

    #[test]
    fn spans_map_item_ranges_to_instance_ranges() {
        // item 0: 3 glyphs, item 1: not ours, item 2: 1 rect
        let s = spans(&[3, 0, 1]);
        assert_eq!(s.instances(0..1), 0..3);
        assert_eq!(s.instances(1..2), 3..3);
        assert_eq!(s.instances(1..3), 3..4);
    }

    #[test]
    fn spans_past_the_end_are_empty() {
        let s = spans(&[2]);
        assert!(s.instances(5..7).is_empty());
        assert!(InstanceSpans::default().instances(0..1).is_empty());
    }
}
