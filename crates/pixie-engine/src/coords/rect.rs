use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Square with top-left corner at `origin`.
    #[inline]
    pub const fn square(origin: Vec2, side: f32) -> Self {
        Self {
            origin,
            size: Vec2::new(side, side),
        }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let (x, w) = if self.size.x < 0.0 {
            (self.origin.x + self.size.x, -self.size.x)
        } else {
            (self.origin.x, self.size.x)
        };
        let (y, h) = if self.size.y < 0.0 {
            (self.origin.y + self.size.y, -self.size.y)
        } else {
            (self.origin.y, self.size.y)
        };
        Rect::new(x, y, w, h)
    }

    /// True if any part of the rect lies inside a `width`×`height` viewport at the origin.
    #[inline]
    pub fn overlaps_viewport(self, width: f32, height: f32) -> bool {
        let r = self.normalized();
        let max = r.max();
        max.x > 0.0 && max.y > 0.0 && r.origin.x < width && r.origin.y < height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_positive_is_identity() {
        let rect = r(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_negative_width() {
        let n = r(10.0, 0.0, -4.0, 5.0).normalized();
        assert_eq!(n.origin.x, 6.0);
        assert_eq!(n.size.x, 4.0);
    }

    // ── square ────────────────────────────────────────────────────────────

    #[test]
    fn square_has_equal_sides() {
        let sq = Rect::square(Vec2::new(100.0, 100.0), 40.0);
        assert_eq!(sq, r(100.0, 100.0, 40.0, 40.0));
        assert_eq!(sq.max(), Vec2::new(140.0, 140.0));
    }

    // ── overlaps_viewport ─────────────────────────────────────────────────

    #[test]
    fn inside_viewport_overlaps() {
        assert!(r(100.0, 100.0, 40.0, 40.0).overlaps_viewport(800.0, 600.0));
    }

    #[test]
    fn partially_offscreen_overlaps() {
        assert!(r(-20.0, 10.0, 40.0, 40.0).overlaps_viewport(800.0, 600.0));
    }

    #[test]
    fn fully_offscreen_does_not_overlap() {
        assert!(!r(-40.0, 10.0, 40.0, 40.0).overlaps_viewport(800.0, 600.0));
        assert!(!r(800.0, 10.0, 40.0, 40.0).overlaps_viewport(800.0, 600.0));
    }

    // ── is_empty ──────────────────────────────────────────────────────────

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
