//! Moving-square demo.
//!
//! A single [`FrameLoopController`] drives one player square around an
//! 800×600 window. Which keys move it is configuration ([`KeyBindings`]);
//! the two binaries differ only in their default preset.

pub mod bindings;
pub mod config;
pub mod controller;
pub mod player;

pub use bindings::{Direction, KeyBindings};
pub use config::{ConfigError, DemoConfig};
pub use controller::FrameLoopController;
pub use player::Player;

use anyhow::Result;
use pixie_engine::device::GpuInit;
use pixie_engine::logging::{init_logging, LoggingConfig};
use pixie_engine::window::{Runtime, RuntimeConfig};

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "pixie.toml";

/// Shared entry point of the demo binaries.
///
/// `preset` is used unless `pixie.toml` provides a `[bindings]` table.
pub fn run(preset: KeyBindings) -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = DemoConfig::load_or(CONFIG_FILE, preset)?;
    log::info!("key bindings: {}", config.bindings);

    let controller = FrameLoopController::new(config.bindings);
    Runtime::run(RuntimeConfig::default(), GpuInit::default(), controller)
}
