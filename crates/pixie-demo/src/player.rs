use pixie_engine::coords::{Rect, Vec2};

/// The player square.
///
/// Position is unconstrained: it may go negative or past the window edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Side length in pixels.
    pub s: f32,
    /// Speed in pixels per second.
    pub v: f32,
}

impl Player {
    pub const START: Vec2 = Vec2::new(100.0, 100.0);
    pub const SIDE: f32 = 40.0;
    pub const SPEED: f32 = 200.0;

    /// Moves by `v * dt` along each axis component of `dir` (-1, 0 or 1).
    ///
    /// Axes are independent, so diagonal movement is not normalized.
    pub fn advance(&mut self, dir: Vec2, dt: f32) {
        let delta = dir * (self.v * dt);
        self.x += delta.x;
        self.y += delta.y;
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn bounds(&self) -> Rect {
        Rect::square(self.position(), self.s)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: Self::START.x,
            y: Self::START.y,
            s: Self::SIDE,
            v: Self::SPEED,
        }
    }
}
