use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, StartCtx, UpdateCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::InputState;
use crate::paint::Color;
use crate::render::SceneRenderer;
use crate::scene::DrawList;
use crate::text::FontSystem;
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
    /// Background color the surface is cleared to each frame.
    pub clear_color: Color,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "pixie".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            resizable: true,
            clear_color: Color::black(),
        }
    }
}

/// Entry point for the windowed host.
pub struct Runtime;

impl Runtime {
    /// Runs `app` until its window is closed or it returns `AppControl::Exit`.
    ///
    /// Failure to open the window or initialize the GPU is returned as an error.
    pub fn run<A: App>(initial: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut state = AppState::new(initial, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A: App> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    started: bool,

    entry: Option<WindowEntry>,
    renderer: Option<SceneRenderer>,
    draw_list: DrawList,

    error: Option<anyhow::Error>,
}

impl<A: App> AppState<A> {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            started: false,
            entry: None,
            renderer: None,
            draw_list: DrawList::new(),
            error: None,
        }
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        if !self.started {
            let mut ctx = StartCtx::new(self.config.clone());
            self.app.on_start(&mut ctx);
            self.config = ctx.into_config();
            self.started = true;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        log::info!(
            "opened window \"{}\" ({}x{})",
            self.config.title,
            self.config.initial_size.width,
            self.config.initial_size.height
        );

        let gpu_init = self.gpu_init.clone();
        let mut entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        // GPU setup time must not count as the first frame's dt.
        entry.with_clock_mut(|c| c.reset());
        entry.with_window(|w| w.request_redraw());

        if self.renderer.is_none() {
            self.renderer = Some(SceneRenderer::new(FontSystem::with_system_fonts()));
        }
        self.entry = Some(entry);
        Ok(())
    }
}

impl<A: App> ApplicationHandler for AppState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.open_window(event_loop) {
            log::error!("{e:#}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Continuous redraw: the app moves things every frame.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.entry.as_mut() else { return };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        if let Some(ev) = translate_window_event(&event) {
            entry.with_input_state_mut(|s| s.apply_event(ev));
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                self.entry = None;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            }

            WindowEvent::RedrawRequested => {
                let Some(renderer) = self.renderer.as_mut() else { return };
                let (app, draw_list, clear) = (&mut self.app, &mut self.draw_list, self.config.clear_color);

                let control = entry.with_mut(|fields| {
                    let time = fields.clock.tick();
                    let update = app.on_update(&UpdateCtx::new(time, &*fields.input_state));

                    draw_list.clear();
                    app.on_draw(draw_list);

                    let render = renderer.render(fields.gpu, fields.window, draw_list, clear);
                    if update == AppControl::Exit || render == AppControl::Exit {
                        AppControl::Exit
                    } else {
                        AppControl::Continue
                    }
                });

                if control == AppControl::Exit {
                    log::info!("exit requested");
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}
