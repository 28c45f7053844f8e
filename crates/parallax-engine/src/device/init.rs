/// Surface and adapter preferences used when the window's GPU context is
/// created.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB swapchain format when one exists. Photos are uploaded as
    /// sRGB textures, so this keeps colors unchanged on screen.
    pub prefer_srgb: bool,

    /// `Fifo` paces the render loop to the display refresh rate.
    pub present_mode: wgpu::PresentMode,

    /// Requested compositing mode; replaced by a supported one if needed.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub power_preference: wgpu::PowerPreference,

    /// Request the adapter's own limits instead of the portable defaults.
    ///
    /// Large photos need more than the default 8192 texel texture edge.
    pub adapter_limits: bool,

    /// Hint only; support depends on platform and backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            power_preference: wgpu::PowerPreference::HighPerformance,
            adapter_limits: true,
            desired_maximum_frame_latency: 2,
        }
    }
}
