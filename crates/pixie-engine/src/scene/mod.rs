//! Scene (draw stream) types.
//!
//! Apps record renderer-agnostic draw commands into a `DrawList` during
//! `on_draw`; renderers consume it afterwards. Commands paint in insertion
//! order, so later commands appear on top.

mod cmd;
mod list;

pub use cmd::{DrawCmd, DrawKind, RectCmd, TextCmd};
pub use list::DrawList;
