use std::time::Instant;

use crate::input::{InputEvent, InputState, Key, KeyState};
use crate::scene::DrawList;
use crate::time::FrameTime;
use crate::window::RuntimeConfig;

use super::app::{App, AppControl};
use super::ctx::{StartCtx, UpdateCtx};

/// Display-less host.
///
/// Runs the same `on_start` / `on_update` / `on_draw` sequence as the windowed
/// runtime, but the caller supplies key state and `dt` explicitly and the draw
/// list is kept for inspection instead of being rendered.
pub struct Headless<A: App> {
    app: A,
    config: RuntimeConfig,
    input: InputState,
    draw_list: DrawList,
    frame_index: u64,
}

impl<A: App> Headless<A> {
    /// Starts `app` with the default window configuration.
    pub fn start(app: A) -> Self {
        Self::start_with(RuntimeConfig::default(), app)
    }

    /// Starts `app`, letting it adjust `config` in `on_start`.
    pub fn start_with(config: RuntimeConfig, mut app: A) -> Self {
        let mut ctx = StartCtx::new(config);
        app.on_start(&mut ctx);

        let mut input = InputState::default();
        input.focused = true;

        Self {
            app,
            config: ctx.into_config(),
            input,
            draw_list: DrawList::new(),
            frame_index: 0,
        }
    }

    pub fn press(&mut self, key: Key) {
        self.key_event(key, KeyState::Pressed);
    }

    pub fn release(&mut self, key: Key) {
        self.key_event(key, KeyState::Released);
    }

    fn key_event(&mut self, key: Key, state: KeyState) {
        self.input.apply_event(InputEvent::Key {
            key,
            state,
            repeat: false,
        });
    }

    /// Runs one frame (update, then draw) with the given `dt` in seconds.
    pub fn step(&mut self, dt: f32) -> AppControl {
        let time = FrameTime {
            dt,
            now: Instant::now(),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);

        let control = self.app.on_update(&UpdateCtx::new(time, &self.input));

        self.draw_list.clear();
        self.app.on_draw(&mut self.draw_list);

        control
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    /// Window configuration as left by `on_start`.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Draw commands recorded by the most recent frame.
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Number of frames stepped so far.
    pub fn frames(&self) -> u64 {
        self.frame_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::paint::Color;

    #[derive(Default)]
    struct Probe {
        started: bool,
        updates: u32,
        last_dt: f32,
        saw_space: bool,
    }

    impl App for Probe {
        fn on_start(&mut self, ctx: &mut StartCtx) {
            self.started = true;
            ctx.set_title("probe");
            ctx.set_size(320.0, 200.0);
        }

        fn on_update(&mut self, ctx: &UpdateCtx<'_>) -> AppControl {
            self.updates += 1;
            self.last_dt = ctx.dt();
            self.saw_space = ctx.key_down(Key::Space);
            if self.updates >= 3 { AppControl::Exit } else { AppControl::Continue }
        }

        fn on_draw(&self, list: &mut DrawList) {
            list.push_text("probe", Vec2::new(0.0, 0.0), 16.0, Color::white());
            list.push_fill_rect(Rect::new(1.0, 2.0, 3.0, 4.0), Color::white());
        }
    }

    #[test]
    fn start_applies_window_config() {
        let h = Headless::start(Probe::default());
        assert!(h.app().started);
        assert_eq!(h.config().title, "probe");
        assert_eq!(h.config().initial_size.width, 320.0);
        assert_eq!(h.config().initial_size.height, 200.0);
        assert_eq!(h.frames(), 0);
    }

    #[test]
    fn step_runs_update_then_draw() {
        let mut h = Headless::start(Probe::default());
        assert_eq!(h.step(0.5), AppControl::Continue);
        assert_eq!(h.app().updates, 1);
        assert_eq!(h.app().last_dt, 0.5);
        assert_eq!(h.draw_list().len(), 2);
    }

    #[test]
    fn draw_list_is_cleared_between_frames() {
        let mut h = Headless::start(Probe::default());
        h.step(0.1);
        h.step(0.1);
        assert_eq!(h.draw_list().len(), 2);
    }

    #[test]
    fn key_state_is_polled() {
        let mut h = Headless::start(Probe::default());
        h.press(Key::Space);
        h.step(0.1);
        assert!(h.app().saw_space);
        h.release(Key::Space);
        h.step(0.1);
        assert!(!h.app().saw_space);
    }

    #[test]
    fn exit_is_forwarded() {
        let mut h = Headless::start(Probe::default());
        h.step(0.1);
        h.step(0.1);
        assert_eq!(h.step(0.1), AppControl::Exit);
    }
}
