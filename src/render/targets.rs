use super::helpers;
use wgpu;

pub const SCENE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Offscreen targets for the scene pass.
///
/// - `scene_*` holds the lit model over a transparent clear; the noise pass samples it.
/// - `depth_*` is the matching depth buffer.
pub(crate) struct RenderTargets {
    pub(crate) scene_tex: wgpu::Texture,
    pub(crate) scene_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (scene_tex, scene_view) = create_scene_color(device, width, height);
        let (depth_tex, depth_view) = helpers::create_depth_target(device, (width, height));
        Self {
            scene_tex,
            scene_view,
            depth_tex,
            depth_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        (self.scene_tex, self.scene_view) = create_scene_color(device, width, height);
        (self.depth_tex, self.depth_view) = helpers::create_depth_target(device, (width, height));
    }

    pub(crate) fn size(&self) -> (u32, u32) {
        (self.scene_tex.width(), self.scene_tex.height())
    }
}

fn create_scene_color(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    helpers::create_target(
        device,
        "scene_tex",
        (width, height),
        SCENE_FORMAT,
        wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
    )
}
