//! Pixie engine crate.
//!
//! Owns the window, GPU, input and frame-timing pieces that drive a single
//! [`core::App`]. Application code only sees the engine's own types.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;
