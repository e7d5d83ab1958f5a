/// Initialization parameters for the GPU layer.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform or backend requirement exists.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends the instance may pick from.
    ///
    /// Defaults to WebGL2 (`GL`) on wasm32 and every native backend elsewhere.
    pub backends: wgpu::Backends,

    /// Prefer an sRGB surface format when available.
    ///
    /// Off by default: vertex colors are written to the surface as-is.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Depth buffer format, or `None` to render without depth testing.
    pub depth_format: Option<wgpu::TextureFormat>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface.
    ///
    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl GpuInit {
    /// Enables a depth buffer of the given format.
    pub fn with_depth(mut self, format: wgpu::TextureFormat) -> Self {
        self.depth_format = Some(format);
        self
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        #[cfg(target_arch = "wasm32")]
        let (backends, required_limits) =
            (wgpu::Backends::GL, wgpu::Limits::downlevel_webgl2_defaults());

        #[cfg(not(target_arch = "wasm32"))]
        let (backends, required_limits) = (wgpu::Backends::all(), wgpu::Limits::default());

        Self {
            backends,
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            depth_format: None,
            required_features: wgpu::Features::empty(),
            required_limits,
            desired_maximum_frame_latency: 2,
        }
    }
}
