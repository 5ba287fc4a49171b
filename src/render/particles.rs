use super::helpers::{self, PipelineDesc};
use crate::constants::PARTICLE_QUAD;
use ambient_core::ParticleField;
use wgpu::util::DeviceExt;

const QUAD_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x3];
const POINT_STRIDE: u64 = std::mem::size_of::<[f32; 3]>() as u64;

/// Per-point buffers, created on the first frame once the field size is known.
pub(crate) struct ParticleBuffers {
    pub(crate) positions: wgpu::Buffer,
    pub(crate) colors: wgpu::Buffer,
    pub(crate) count: u32,
}

pub(crate) struct ParticleResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) quad: wgpu::Buffer,
    pub(crate) buffers: Option<ParticleBuffers>,
}

pub(crate) fn create_particle_resources(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
) -> ParticleResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("particles_shader"),
        source: wgpu::ShaderSource::Wgsl(ambient_core::PARTICLES_WGSL.into()),
    });
    let buffers = [
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<[f32; 2]>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &QUAD_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: POINT_STRIDE,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &POSITION_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: POINT_STRIDE,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &COLOR_ATTRS,
        },
    ];
    let pipeline = helpers::make_scene_pipeline(
        device,
        layout,
        &shader,
        color_format,
        PipelineDesc {
            label: "particles_pipeline",
            vs_entry: "vs_particle",
            fs_entry: "fs_particle",
            buffers: &buffers,
            topology: wgpu::PrimitiveTopology::TriangleList,
            blend: helpers::ADDITIVE,
            depth_write: false,
        },
    );
    let quad = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("particle_quad"),
        contents: bytemuck::cast_slice(&PARTICLE_QUAD),
        usage: wgpu::BufferUsages::VERTEX,
    });
    ParticleResources {
        pipeline,
        quad,
        buffers: None,
    }
}

impl ParticleResources {
    /// Upload this frame's positions, allocating buffers on first use.
    /// Colors are static and written once.
    pub(crate) fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, field: &ParticleField) {
        let count = field.len() as u32;
        if self.buffers.as_ref().map(|b| b.count) != Some(count) {
            if let Some(old) = self.buffers.take() {
                old.destroy();
            }
            let colors: Vec<[f32; 3]> = match &field.colors {
                Some(c) => c.clone(),
                None => vec![field.tint; field.len()],
            };
            self.buffers = Some(ParticleBuffers {
                positions: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("particle_positions"),
                    contents: bytemuck::cast_slice(&field.positions),
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                }),
                colors: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("particle_colors"),
                    contents: bytemuck::cast_slice(&colors),
                    usage: wgpu::BufferUsages::VERTEX,
                }),
                count,
            });
            return;
        }
        if let Some(b) = &self.buffers {
            queue.write_buffer(&b.positions, 0, bytemuck::cast_slice(&field.positions));
        }
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        let Some(b) = &self.buffers else {
            return;
        };
        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(0, self.quad.slice(..));
        pass.set_vertex_buffer(1, b.positions.slice(..));
        pass.set_vertex_buffer(2, b.colors.slice(..));
        pass.draw(0..PARTICLE_QUAD.len() as u32, 0..b.count);
    }

    pub(crate) fn destroy(&mut self) {
        self.quad.destroy();
        if let Some(b) = self.buffers.take() {
            b.destroy();
        }
    }
}

impl ParticleBuffers {
    fn destroy(&self) {
        self.positions.destroy();
        self.colors.destroy();
    }
}
