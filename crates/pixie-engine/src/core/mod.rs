//! Core engine-facing contracts.
//!
//! This module defines the interface between a host (the windowed runtime or
//! the headless stepper) and the application it drives. The host calls
//! `on_start` once, then `on_update` followed by `on_draw` once per frame.

mod app;
mod ctx;
mod headless;

pub use app::{App, AppControl};
pub use ctx::{StartCtx, UpdateCtx};
pub use headless::Headless;
