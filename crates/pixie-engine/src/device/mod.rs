//! GPU device + surface management.
//!
//! Creates the wgpu instance/adapter/device/queue for the window, keeps the
//! surface configured across resizes and hands out one `GpuFrame` per frame.

mod gpu;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
