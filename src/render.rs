use crate::constants::{CLEAR_RGBA, MAX_POINT_LIGHTS};
use crate::dom;
use ambient_core::{RenderSurface, SceneState, SurfaceError, ViewportState};
use glam::{EulerRot, Mat4, Quat};
use web_sys as web;

mod helpers;
mod particles;
mod solids;
mod targets;
use particles::{create_particle_resources, ParticleResources};
use solids::{create_solid_resources, SolidResources};
use targets::RenderTargets;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    field_model: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    light_pos: [[f32; 4]; MAX_POINT_LIGHTS],
    light_color: [[f32; 4]; MAX_POINT_LIGHTS],
    particle: [f32; 4],
}

impl Globals {
    fn from_scene(scene: &SceneState, width_px: u32, height_px: u32, aspect: f32) -> Self {
        let cam = &scene.camera;
        let field = &scene.particles;
        let lighting = &scene.lighting;
        let field_model = Mat4::from_quat(Quat::from_euler(
            EulerRot::XYZ,
            field.rotation[0],
            field.rotation[1],
            0.0,
        ));
        let mut light_pos = [[0.0; 4]; MAX_POINT_LIGHTS];
        let mut light_color = [[0.0; 4]; MAX_POINT_LIGHTS];
        for (i, l) in lighting.points.iter().take(MAX_POINT_LIGHTS).enumerate() {
            light_pos[i] = [l.position[0], l.position[1], l.position[2], l.range];
            light_color[i] = [
                l.color[0] * l.intensity,
                l.color[1] * l.intensity,
                l.color[2] * l.intensity,
                1.0,
            ];
        }
        let a = lighting.ambient_intensity;
        Self {
            view: cam.view_matrix().to_cols_array_2d(),
            proj: cam.projection_matrix(aspect).to_cols_array_2d(),
            field_model: field_model.to_cols_array_2d(),
            camera_pos: [
                cam.position.x,
                cam.position.y,
                cam.position.z,
                lighting.fog_density,
            ],
            ambient: [
                lighting.ambient_color[0] * a,
                lighting.ambient_color[1] * a,
                lighting.ambient_color[2] * a,
                0.0,
            ],
            light_pos,
            light_color,
            particle: [field.size, field.opacity, width_px as f32, height_px as f32],
        }
    }
}

/// WebGPU drawing surface bound to one canvas element.
pub struct GpuState {
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    particles: ParticleResources,
    solids: SolidResources,
    width: u32,
    height: u32,
}

impl GpuState {
    pub async fn new(
        canvas: web::HtmlCanvasElement,
        viewport: &ViewportState,
    ) -> anyhow::Result<Self> {
        if !dom::webgpu_available() {
            anyhow::bail!("WebGPU is not supported by this browser");
        }
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("ambient_device"),
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let (width, height) = clamp_to_limits(viewport.pixel_size(), &device);
        dom::set_canvas_backing_size(&canvas, width, height);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height, format);

        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&globals_bgl],
            push_constant_ranges: &[],
        });
        let particles = create_particle_resources(&device, &layout, format);
        let solids = create_solid_resources(&device, &layout, format);

        log::info!(
            "[gpu] surface {}x{} format={:?} alpha={:?}",
            width,
            height,
            format,
            alpha_mode
        );

        Ok(Self {
            canvas,
            surface,
            device,
            queue,
            config,
            targets,
            globals_buffer,
            globals_bind_group,
            particles,
            solids,
            width,
            height,
        })
    }

    fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            dom::set_canvas_backing_size(&self.canvas, width, height);
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
        }
    }
}

impl RenderSurface for GpuState {
    fn configure(&mut self, viewport: &ViewportState) {
        let (w, h) = clamp_to_limits(viewport.pixel_size(), &self.device);
        if w == self.width && h == self.height {
            // also recovers a lost swapchain
            self.surface.configure(&self.device, &self.config);
            return;
        }
        self.resize_if_needed(w, h);
    }

    fn draw(&mut self, scene: &SceneState, viewport: &ViewportState) -> Result<(), SurfaceError> {
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                return Err(SurfaceError::Lost)
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(()),
            Err(e) => return Err(SurfaceError::Unavailable(e.to_string())),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let globals = Globals::from_scene(scene, self.width, self.height, viewport.aspect());
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
        self.particles
            .upload(&self.device, &self.queue, &scene.particles);
        self.solids.upload(&self.device, &self.queue, &scene.solids);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let [r, g, b, a] = CLEAR_RGBA;
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.msaa_view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            self.solids.draw(&mut rpass);
            self.particles.draw(&mut rpass);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn release(mut self) {
        self.particles.destroy();
        self.solids.destroy();
        self.targets.destroy();
        self.globals_buffer.destroy();
        dom::detach_canvas(&self.canvas);
        self.device.destroy();
        log::info!("[gpu] released");
    }
}

fn clamp_to_limits((w, h): (u32, u32), device: &wgpu::Device) -> (u32, u32) {
    let max = device.limits().max_texture_dimension_2d;
    (w.clamp(1, max), h.clamp(1, max))
}
