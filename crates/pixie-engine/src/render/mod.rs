//! GPU rendering subsystem.
//!
//! Renderers consume a `scene::DrawList` and issue wgpu commands. Each
//! renderer owns its GPU resources and creates them lazily on first use.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod ctx;
mod scene_renderer;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
pub use scene_renderer::SceneRenderer;
