use pixie_engine::core::{App, AppControl, StartCtx, UpdateCtx};
use pixie_engine::coords::Vec2;
use pixie_engine::paint::Color;
use pixie_engine::scene::DrawList;

use crate::bindings::KeyBindings;
use crate::player::Player;

pub const WINDOW_TITLE: &str = "pixie";
pub const WINDOW_WIDTH: f32 = 800.0;
pub const WINDOW_HEIGHT: f32 = 600.0;

pub const DISPLAY_TEXT: &str = "Hello, World! 👾";
pub const TEXT_ORIGIN: Vec2 = Vec2::new(20.0, 20.0);
pub const TEXT_SIZE: f32 = 24.0;

/// Owns the player and the display string and drives them from the host's
/// frame callbacks.
#[derive(Debug)]
pub struct FrameLoopController {
    bindings: KeyBindings,
    player: Player,
    display: String,
    window_size: (f32, f32),
}

impl FrameLoopController {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            player: Player::default(),
            display: String::new(),
            window_size: (0.0, 0.0),
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// Logical window size set at startup.
    pub fn window_size(&self) -> (f32, f32) {
        self.window_size
    }
}

impl App for FrameLoopController {
    fn on_start(&mut self, ctx: &mut StartCtx) {
        ctx.set_title(WINDOW_TITLE);
        ctx.set_size(WINDOW_WIDTH as f64, WINDOW_HEIGHT as f64);
        ctx.set_resizable(false);

        self.window_size = (WINDOW_WIDTH, WINDOW_HEIGHT);
        self.display = DISPLAY_TEXT.to_string();
        self.player = Player::default();
    }

    fn on_update(&mut self, ctx: &UpdateCtx<'_>) -> AppControl {
        let dir = self.bindings.direction(|k| ctx.key_down(k));
        self.player.advance(dir, ctx.dt());
        AppControl::Continue
    }

    fn on_draw(&self, list: &mut DrawList) {
        list.push_text(self.display.as_str(), TEXT_ORIGIN, TEXT_SIZE, Color::white());
        list.push_fill_rect(self.player.bounds(), Color::white());
    }
}
