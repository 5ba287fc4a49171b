use super::helpers;

/// Offscreen attachments sized to the swapchain.
///
/// - `msaa_*` is the multisampled color target resolved into the swapchain.
/// - `depth_*` is the matching multisampled depth buffer.
pub(crate) struct RenderTargets {
    pub(crate) msaa_tex: wgpu::Texture,
    pub(crate) msaa_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    color_format: wgpu::TextureFormat,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let (msaa_tex, msaa_view) =
            helpers::create_texture(device, "msaa_color", width, height, color_format);
        let (depth_tex, depth_view) =
            helpers::create_texture(device, "depth", width, height, helpers::DEPTH_FORMAT);
        Self {
            msaa_tex,
            msaa_view,
            depth_tex,
            depth_view,
            color_format,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.destroy();
        *self = Self::new(device, width, height, self.color_format);
    }

    pub(crate) fn destroy(&self) {
        self.msaa_tex.destroy();
        self.depth_tex.destroy();
    }
}
