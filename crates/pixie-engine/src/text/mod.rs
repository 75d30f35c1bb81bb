//! Font loading and fallback selection.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
