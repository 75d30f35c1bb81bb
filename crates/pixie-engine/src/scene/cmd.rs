use crate::coords::{Rect, Vec2};
use crate::paint::Color;

/// Filled rectangle payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub color: Color,
}

/// Text payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    /// Top-left of the text block in logical pixels.
    pub origin: Vec2,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
}

/// Renderer-agnostic draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Text(TextCmd),
}

/// Command type without payload, used to group consecutive commands.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawKind {
    Rect,
    Text,
}

impl DrawCmd {
    pub fn kind(&self) -> DrawKind {
        match self {
            DrawCmd::Rect(_) => DrawKind::Rect,
            DrawCmd::Text(_) => DrawKind::Text,
        }
    }
}
