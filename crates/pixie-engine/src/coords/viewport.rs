use winit::dpi::PhysicalSize;

/// Drawable area in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Converts a surface size in physical pixels using the window scale factor.
    pub fn from_physical(size: PhysicalSize<u32>, scale_factor: f64) -> Self {
        let logical = size.to_logical::<f32>(scale_factor);
        Self::new(logical.width, logical.height)
    }

    /// A minimized window reports a zero-sized surface; nothing is drawn then.
    #[inline]
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_size_is_divided_by_scale() {
        let vp = Viewport::from_physical(PhysicalSize::new(1600, 1200), 2.0);
        assert_eq!(vp, Viewport::new(800.0, 600.0));
    }

    #[test]
    fn zero_or_nan_dimensions_are_empty() {
        assert!(Viewport::new(0.0, 600.0).is_empty());
        assert!(Viewport::new(f32::NAN, 600.0).is_empty());
        assert!(!Viewport::new(800.0, 600.0).is_empty());
    }
}
