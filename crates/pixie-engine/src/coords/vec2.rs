use core::ops::{Add, AddAssign, Mul};

/// Point or offset in logical pixels (+Y down).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        *self = *self + rhs;
    }
}

/// Uniform scale, e.g. a direction times `speed * dt`.
impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_keeps_axes_independent() {
        assert_eq!(Vec2::new(1.0, -1.0) * 20.0, Vec2::new(20.0, -20.0));
    }

    #[test]
    fn add_assign_accumulates() {
        let mut p = Vec2::new(100.0, 100.0);
        p += Vec2::new(20.0, -20.0);
        assert_eq!(p, Vec2::new(120.0, 80.0));
    }
}
