use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList, TextCmd};
use crate::text::FontSystem;

use super::common::{
    draw_quads, instanced_quad_pipeline, InstanceBuffer, InstanceSpans, QuadBuffers, ViewportUniform,
};

const ATLAS_SIZE: u32 = 1024;
const GLYPH_PADDING: u32 = 1;

// ── atlas packing ─────────────────────────────────────────────────────────

/// Shelf packer: glyphs fill rows left to right; a new row starts below the
/// tallest glyph of the current one.
#[derive(Debug)]
struct ShelfPacker {
    size: u32,
    padding: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    fn new(size: u32, padding: u32) -> Self {
        Self {
            size,
            padding,
            cursor_x: padding,
            cursor_y: padding,
            row_height: 0,
            full: false,
        }
    }

    /// Returns the top-left of a free `w`×`h` slot, or `None` once full.
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full || w + 2 * self.padding > self.size || h + 2 * self.padding > self.size {
            return None;
        }

        if self.cursor_x + w + self.padding > self.size {
            self.cursor_y += self.row_height + self.padding;
            self.cursor_x = self.padding;
            self.row_height = 0;
        }

        if self.cursor_y + h + self.padding > self.size || self.cursor_x + w + self.padding > self.size {
            self.full = true;
            return None;
        }

        let slot = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + self.padding;
        self.row_height = self.row_height.max(h);
        Some(slot)
    }
}

struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Renderer for `DrawCmd::Text`.
///
/// Glyphs are laid out with fontdue at physical pixel size, rasterized on
/// first use into an R8 coverage atlas and cached for the renderer's lifetime.
/// Like `RectRenderer`, it uploads once per frame and draws per batch.
pub struct TextRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    atlas: Option<wgpu::Texture>,
    quad: Option<QuadBuffers>,
    instances: InstanceBuffer,
    spans: InstanceSpans,

    packer: ShelfPacker,
    glyph_cache: HashMap<GlyphRasterConfig, CachedGlyph>,
    warned_full: bool,

    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group: None,
            viewport_ubo: None,
            atlas: None,
            quad: None,
            instances: InstanceBuffer::default(),
            spans: InstanceSpans::default(),
            packer: ShelfPacker::new(ATLAS_SIZE, GLYPH_PADDING),
            glyph_cache: HashMap::new(),
            warned_full: false,
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out and uploads glyph instances for every `DrawCmd::Text` in `draw_list`.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, draw_list: &DrawList, fonts: &FontSystem) {
        self.spans.begin();
        if fonts.is_empty() || draw_list.texts().next().is_none() {
            self.instances.upload::<GlyphInstance>(ctx, "pixie text instances", &[]);
            return;
        }

        self.ensure_resources(ctx);

        let scale = ctx.scale_factor.max(0.01);
        let mut instances: Vec<GlyphInstance> = Vec::new();

        for item in draw_list.items() {
            if let DrawCmd::Text(cmd) = item {
                self.layout_text(ctx, cmd, fonts, scale, &mut instances);
            }
            self.spans.end_item(instances.len());
        }

        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        ctx.queue
            .write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::from_ctx(ctx)));
        self.instances.upload(ctx, "pixie text instances", &instances);
    }

    /// Draws the prepared glyphs belonging to draw-list `items`.
    pub fn draw(&self, target: &mut RenderTarget<'_>, items: Range<usize>) {
        let (Some(pipeline), Some(bind_group), Some(quad)) =
            (self.pipeline.as_ref(), self.bind_group.as_ref(), self.quad.as_ref())
        else {
            return;
        };

        draw_quads(
            target,
            "pixie text pass",
            pipeline,
            bind_group,
            quad,
            &self.instances,
            self.spans.instances(items),
        );
    }

    fn layout_text(
        &mut self,
        ctx: &RenderCtx<'_>,
        cmd: &TextCmd,
        fonts: &FontSystem,
        scale: f32,
        out: &mut Vec<GlyphInstance>,
    ) {
        self.layout.reset(&LayoutSettings {
            x: cmd.origin.x * scale,
            y: cmd.origin.y * scale,
            ..LayoutSettings::default()
        });
        for (font, run) in fonts.runs(&cmd.text) {
            self.layout
                .append(fonts.fonts(), &TextStyle::new(run, cmd.size * scale, font.0));
        }

        // Copy positions out so the layout borrow ends before `place_glyph`.
        let glyphs: Vec<_> = self
            .layout
            .glyphs()
            .iter()
            .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
            .map(|g| (g.key, g.font_index, g.x, g.y, g.width as f32, g.height as f32))
            .collect();

        for (key, font_index, x, y, w, h) in glyphs {
            if !self.glyph_cache.contains_key(&key) {
                let Some(font) = fonts.fonts().get(font_index) else { continue };
                let (metrics, bitmap) = font.rasterize_config(key);
                if let Some(entry) = self.place_glyph(ctx, &bitmap, metrics.width as u32, metrics.height as u32) {
                    self.glyph_cache.insert(key, entry);
                }
            }

            let Some(cached) = self.glyph_cache.get(&key) else { continue };

            out.push(GlyphInstance {
                dst_min: [x / scale, y / scale],
                dst_max: [(x + w) / scale, (y + h) / scale],
                uv_min: cached.uv_min,
                uv_max: cached.uv_max,
                color: cmd.color.to_array(),
            });
        }
    }

    fn place_glyph(&mut self, ctx: &RenderCtx<'_>, bitmap: &[u8], w: u32, h: u32) -> Option<CachedGlyph> {
        if w == 0 || h == 0 {
            return None;
        }

        let Some((gx, gy)) = self.packer.place(w, h) else {
            if !self.warned_full {
                log::warn!("glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); some glyphs will not be drawn");
                self.warned_full = true;
            }
            return None;
        };

        let atlas = self.atlas.as_ref()?;
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: atlas,
                mip_level: 0,
                origin: wgpu::Origin3d { x: gx, y: gy, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        let atlas_f = ATLAS_SIZE as f32;
        Some(CachedGlyph {
            uv_min: [gx as f32 / atlas_f, gy as f32 / atlas_f],
            uv_max: [(gx + w) as f32 / atlas_f, (gy + h) as f32 / atlas_f],
        })
    }

    fn ensure_resources(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx, "pixie text quad"));
        }

        if self.atlas.is_none() {
            self.atlas = Some(ctx.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("pixie glyph atlas"),
                size: wgpu::Extent3d {
                    width: ATLAS_SIZE,
                    height: ATLAS_SIZE,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::R8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            }));
        }

        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        let Some(atlas) = self.atlas.as_ref() else { return };

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("pixie text bgl"),
            entries: &[
                ViewportUniform::layout_entry(),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let view = atlas.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("pixie text sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let ubo = ViewportUniform::create_buffer(ctx, "pixie text viewport ubo");

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("pixie text bind group"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::TextureView(&view) },
                wgpu::BindGroupEntry { binding: 2, resource: wgpu::BindingResource::Sampler(&sampler) },
            ],
        });

        self.pipeline = Some(instanced_quad_pipeline(
            ctx,
            "pixie text pipeline",
            include_str!("shaders/text.wgsl"),
            &bgl,
            GlyphInstance::layout(),
        ));
        self.pipeline_format = Some(ctx.surface_format);
        self.bind_group = Some(bind_group);
        self.viewport_ubo = Some(ubo);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min:  [f32; 2],
    uv_max:  [f32; 2],
    color:   [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packer_fills_rows_left_to_right() {
        let mut p = ShelfPacker::new(32, 1);
        assert_eq!(p.place(10, 8), Some((1, 1)));
        assert_eq!(p.place(10, 4), Some((12, 1)));
    }

    #[test]
    fn packer_wraps_below_tallest_glyph() {
        let mut p = ShelfPacker::new(32, 1);
        p.place(10, 8);
        p.place(10, 4);
        // 23 + 10 + 1 > 32 → next row at 1 + 8 + 1.
        assert_eq!(p.place(10, 5), Some((1, 10)));
    }

    #[test]
    fn packer_reports_full_and_stays_full() {
        let mut p = ShelfPacker::new(16, 1);
        assert!(p.place(14, 14).is_some());
        assert_eq!(p.place(4, 4), None);
        assert_eq!(p.place(1, 1), None);
    }

    #[test]
    fn oversized_glyph_does_not_fill_atlas() {
        let mut p = ShelfPacker::new(16, 1);
        assert_eq!(p.place(20, 2), None);
        assert_eq!(p.place(4, 4), Some((1, 1)));
    }
}
