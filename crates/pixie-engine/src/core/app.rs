use crate::scene::DrawList;

use super::ctx::{StartCtx, UpdateCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Hosts guarantee the call order `on_start`, then (`on_update`, `on_draw`)
/// repeated once per frame, all on the same thread.
pub trait App {
    /// Called once before the first frame. Window properties set on `ctx`
    /// are applied when the window is created.
    fn on_start(&mut self, ctx: &mut StartCtx) {
        let _ = ctx;
    }

    /// Called once per frame with the elapsed time and current input state.
    fn on_update(&mut self, ctx: &UpdateCtx<'_>) -> AppControl;

    /// Called once per frame after `on_update`. Records draw commands into `list`.
    fn on_draw(&self, list: &mut DrawList);
}
