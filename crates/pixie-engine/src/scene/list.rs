use crate::coords::{Rect, Vec2};
use crate::paint::Color;

use super::cmd::{DrawCmd, RectCmd, TextCmd};

/// Recorded draw stream for a frame.
///
/// `clear()` keeps the allocation so a warmed-up list does not allocate per frame.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns commands in paint order.
    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(cmd);
    }

    /// Records text with its top-left corner at `origin`.
    pub fn push_text(&mut self, text: impl Into<String>, origin: Vec2, size: f32, color: Color) {
        self.push(DrawCmd::Text(TextCmd {
            text: text.into(),
            origin,
            size,
            color,
        }));
    }

    /// Records a solid filled rectangle.
    #[inline]
    pub fn push_fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCmd::Rect(RectCmd { rect, color }));
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectCmd> {
        self.items.iter().filter_map(|c| match c {
            DrawCmd::Rect(r) => Some(r),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextCmd> {
        self.items.iter().filter_map(|c| match c {
            DrawCmd::Text(t) => Some(t),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut dl = DrawList::new();
        dl.push_text("hi", Vec2::new(20.0, 20.0), 16.0, Color::white());
        dl.push_fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::white());

        assert!(matches!(dl.items()[0], DrawCmd::Text(_)));
        assert!(matches!(dl.items()[1], DrawCmd::Rect(_)));
    }

    #[test]
    fn filters_by_kind() {
        let mut dl = DrawList::new();
        dl.push_fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::white());
        dl.push_text("a", Vec2::ZERO, 12.0, Color::white());
        dl.push_fill_rect(Rect::new(2.0, 0.0, 1.0, 1.0), Color::white());

        assert_eq!(dl.rects().count(), 2);
        assert_eq!(dl.texts().map(|t| t.text.as_str()).collect::<Vec<_>>(), ["a"]);
    }

    #[test]
    fn clear_empties_list() {
        let mut dl = DrawList::new();
        dl.push_fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::white());
        dl.clear();
        assert!(dl.is_empty());
    }
}
