use std::ops::Range;

use winit::window::Window;

use crate::coords::Viewport;
use crate::core::AppControl;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::paint::Color;
use crate::scene::{DrawKind, DrawList};
use crate::text::FontSystem;

use super::shapes::rect::RectRenderer;
use super::shapes::text::TextRenderer;
use super::{RenderCtx, RenderTarget};

/// Draws a whole `DrawList` into the window surface.
///
/// Commands paint in list order: each run of same-kind commands becomes one
/// pass, so a rect recorded after text covers that text.
pub struct SceneRenderer {
    rects: RectRenderer,
    text: TextRenderer,
    fonts: FontSystem,
}

impl SceneRenderer {
    pub fn new(fonts: FontSystem) -> Self {
        Self {
            rects: RectRenderer::new(),
            text: TextRenderer::new(),
            fonts,
        }
    }

    /// Clears the surface with `clear`, draws `list`, then presents.
    pub fn render(
        &mut self,
        gpu: &mut Gpu<'_>,
        window: &Window,
        list: &DrawList,
        clear: Color,
    ) -> AppControl {
        let scale_factor = window.scale_factor();
        let viewport = Viewport::from_physical(window.inner_size(), scale_factor);
        if viewport.is_empty() {
            return AppControl::Continue;
        }

        let mut frame = match gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
        };

        // Clear pass; dropped before the encoder is borrowed again.
        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("pixie clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.r as f64,
                            g: clear.g as f64,
                            b: clear.b as f64,
                            a: clear.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        let rctx = RenderCtx::new(
            gpu.device(),
            gpu.queue(),
            gpu.surface_format(),
            viewport,
            scale_factor as f32,
        );

        self.rects.prepare(&rctx, list);
        self.text.prepare(&rctx, list, &self.fonts);

        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            for (kind, items) in batches(list) {
                match kind {
                    DrawKind::Rect => self.rects.draw(&mut target, items),
                    DrawKind::Text => self.text.draw(&mut target, items),
                }
            }
        }

        window.pre_present_notify();
        gpu.submit(frame);

        AppControl::Continue
    }
}

/// Splits `list` into runs of consecutive same-kind commands, in paint order.
fn batches(list: &DrawList) -> Vec<(DrawKind, Range<usize>)> {
    let mut out: Vec<(DrawKind, Range<usize>)> = Vec::new();
    for (i, cmd) in list.items().iter().enumerate() {
        let kind = cmd.kind();
        match out.last_mut() {
            Some((last, range)) if *last == kind => range.end = i + 1,
            _ => out.push((kind, i..i + 1)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};

    #[test]
    fn text_then_rect_paints_rect_last() {
        let mut dl = DrawList::new();
        dl.push_text("hi", Vec2::new(20.0, 20.0), 24.0, Color::white());
        dl.push_fill_rect(Rect::new(20.0, 20.0, 40.0, 40.0), Color::white());

        assert_eq!(batches(&dl), vec![(DrawKind::Text, 0..1), (DrawKind::Rect, 1..2)]);
    }

    #[test]
    fn consecutive_commands_share_a_batch() {
        let mut dl = DrawList::new();
        dl.push_fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::white());
        dl.push_fill_rect(Rect::new(2.0, 0.0, 1.0, 1.0), Color::white());
        dl.push_text("a", Vec2::ZERO, 12.0, Color::white());
        dl.push_fill_rect(Rect::new(4.0, 0.0, 1.0, 1.0), Color::white());

        assert_eq!(
            batches(&dl),
            vec![(DrawKind::Rect, 0..2), (DrawKind::Text, 2..3), (DrawKind::Rect, 3..4)]
        );
    }

    #[test]
    fn empty_list_has_no_batches() {
        assert!(batches(&DrawList::new()).is_empty());
    }
}
