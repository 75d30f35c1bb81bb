/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends the instance may use. Defaults to `WGPU_BACKEND` when set
    /// (e.g. `vulkan` or `gl,vulkan`), otherwise all.
    pub backends: wgpu::Backends,

    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// FIFO is the only mode guaranteed everywhere, including software
    /// rasterizers behind a virtual display.
    pub present_mode: wgpu::PresentMode,

    /// Adapter preference. `LowPower` picks the integrated or software adapter
    /// in containers that expose no discrete GPU.
    pub power_preference: wgpu::PowerPreference,

    /// Allow falling back to a software adapter when no hardware adapter
    /// matches the surface.
    pub allow_fallback_adapter: bool,

    pub required_limits: wgpu::Limits,

    /// Hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: parse_backends(std::env::var("WGPU_BACKEND").ok().as_deref()),
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            power_preference: wgpu::PowerPreference::LowPower,
            allow_fallback_adapter: true,
            required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}

/// Comma-separated backend names; empty or unset means all backends.
pub(crate) fn parse_backends(value: Option<&str>) -> wgpu::Backends {
    match value {
        Some(v) if !v.trim().is_empty() => wgpu::Backends::from_comma_list(v),
        _ => wgpu::Backends::all(),
    }
}
