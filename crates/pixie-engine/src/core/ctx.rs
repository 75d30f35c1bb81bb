use crate::input::{InputState, Key};
use crate::time::FrameTime;
use crate::window::RuntimeConfig;

/// Startup context passed to [`App::on_start`](super::App::on_start).
///
/// Wraps the window configuration the host will use to open the window.
#[derive(Debug)]
pub struct StartCtx {
    config: RuntimeConfig,
}

impl StartCtx {
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.config.title = title.into();
    }

    /// Sets the logical window size in logical pixels.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.config.initial_size = winit::dpi::LogicalSize::new(width, height);
    }

    pub fn set_resizable(&mut self, resizable: bool) {
        self.config.resizable = resizable;
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn into_config(self) -> RuntimeConfig {
        self.config
    }
}

/// Per-frame context passed to [`App::on_update`](super::App::on_update).
pub struct UpdateCtx<'a> {
    pub time: FrameTime,
    pub input: &'a InputState,
}

impl<'a> UpdateCtx<'a> {
    #[inline]
    pub fn new(time: FrameTime, input: &'a InputState) -> Self {
        Self { time, input }
    }

    /// Seconds elapsed since the previous frame.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.time.dt
    }

    /// Whether `key` is currently held.
    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.input.key_down(key)
    }
}
