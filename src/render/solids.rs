use super::helpers::{self, PipelineDesc};
use ambient_core::{FloatingSolid, Mesh};
use std::ops::Range;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SolidVertex {
    pub(crate) position: [f32; 3],
    pub(crate) normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SolidInstance {
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) color: [f32; 4],
    pub(crate) params: [f32; 4],
}

impl SolidInstance {
    fn from_solid(s: &FloatingSolid) -> Self {
        Self {
            model: s.model_matrix().to_cols_array_2d(),
            color: [s.tint[0], s.tint[1], s.tint[2], s.opacity],
            params: [s.emissive, 0.0, 0.0, 0.0],
        }
    }
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const INSTANCE_ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
    2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4,
    6 => Float32x4, 7 => Float32x4
];

/// Mesh data for the current solid set, one vertex range per solid.
pub(crate) struct SolidGeometry {
    lines: wgpu::Buffer,
    fills: wgpu::Buffer,
    instances: wgpu::Buffer,
    line_ranges: Vec<Range<u32>>,
    fill_ranges: Vec<Range<u32>>,
    wireframe: Vec<bool>,
}

pub(crate) struct SolidResources {
    pub(crate) line_pipeline: wgpu::RenderPipeline,
    pub(crate) fill_pipeline: wgpu::RenderPipeline,
    pub(crate) geometry: Option<SolidGeometry>,
}

pub(crate) fn create_solid_resources(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
) -> SolidResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("solids_shader"),
        source: wgpu::ShaderSource::Wgsl(ambient_core::SOLIDS_WGSL.into()),
    });
    let buffers = [
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SolidVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SolidInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRS,
        },
    ];
    let line_pipeline = helpers::make_scene_pipeline(
        device,
        layout,
        &shader,
        color_format,
        PipelineDesc {
            label: "solid_lines_pipeline",
            vs_entry: "vs_solid",
            fs_entry: "fs_solid",
            buffers: &buffers,
            topology: wgpu::PrimitiveTopology::LineList,
            blend: wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING,
            depth_write: false,
        },
    );
    let fill_pipeline = helpers::make_scene_pipeline(
        device,
        layout,
        &shader,
        color_format,
        PipelineDesc {
            label: "solid_fills_pipeline",
            vs_entry: "vs_solid",
            fs_entry: "fs_solid",
            buffers: &buffers,
            topology: wgpu::PrimitiveTopology::TriangleList,
            blend: wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING,
            depth_write: true,
        },
    );
    SolidResources {
        line_pipeline,
        fill_pipeline,
        geometry: None,
    }
}

impl SolidGeometry {
    fn build(device: &wgpu::Device, solids: &[FloatingSolid]) -> Self {
        let mut lines: Vec<SolidVertex> = Vec::new();
        let mut fills: Vec<SolidVertex> = Vec::new();
        let mut line_ranges = Vec::with_capacity(solids.len());
        let mut fill_ranges = Vec::with_capacity(solids.len());
        for s in solids {
            let mesh = Mesh::for_shape(s.shape, s.size);
            let normals = mesh.vertex_normals();

            let start = lines.len() as u32;
            for [a, b] in mesh.edges() {
                for i in [a as usize, b as usize] {
                    lines.push(SolidVertex {
                        position: mesh.positions[i].to_array(),
                        normal: normals[i].to_array(),
                    });
                }
            }
            line_ranges.push(start..lines.len() as u32);

            let start = fills.len() as u32;
            for t in &mesh.triangles {
                let n = mesh.face_normal(t).to_array();
                for i in t {
                    fills.push(SolidVertex {
                        position: mesh.positions[*i as usize].to_array(),
                        normal: n,
                    });
                }
            }
            fill_ranges.push(start..fills.len() as u32);
        }
        let instances: Vec<SolidInstance> = solids.iter().map(SolidInstance::from_solid).collect();
        Self {
            lines: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("solid_lines"),
                contents: bytemuck::cast_slice(&lines),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            fills: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("solid_fills"),
                contents: bytemuck::cast_slice(&fills),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            instances: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("solid_instances"),
                contents: bytemuck::cast_slice(&instances),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            }),
            line_ranges,
            fill_ranges,
            wireframe: solids.iter().map(|s| s.wireframe).collect(),
        }
    }

    fn matches(&self, solids: &[FloatingSolid]) -> bool {
        self.wireframe.len() == solids.len()
            && self
                .wireframe
                .iter()
                .zip(solids)
                .all(|(w, s)| *w == s.wireframe)
    }

    fn destroy(&self) {
        self.lines.destroy();
        self.fills.destroy();
        self.instances.destroy();
    }
}

impl SolidResources {
    /// Write this frame's transforms; geometry is built on first use.
    pub(crate) fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, solids: &[FloatingSolid]) {
        if solids.is_empty() {
            return;
        }
        match &self.geometry {
            Some(g) if g.matches(solids) => {
                let instances: Vec<SolidInstance> =
                    solids.iter().map(SolidInstance::from_solid).collect();
                queue.write_buffer(&g.instances, 0, bytemuck::cast_slice(&instances));
            }
            _ => {
                if let Some(old) = self.geometry.take() {
                    old.destroy();
                }
                self.geometry = Some(SolidGeometry::build(device, solids));
            }
        }
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        let Some(g) = &self.geometry else {
            return;
        };
        pass.set_vertex_buffer(1, g.instances.slice(..));

        // filled faces first so their depth hides edges behind them
        pass.set_pipeline(&self.fill_pipeline);
        pass.set_vertex_buffer(0, g.fills.slice(..));
        for (i, range) in g.fill_ranges.iter().enumerate() {
            if !g.wireframe[i] {
                let i = i as u32;
                pass.draw(range.clone(), i..i + 1);
            }
        }

        pass.set_pipeline(&self.line_pipeline);
        pass.set_vertex_buffer(0, g.lines.slice(..));
        for (i, range) in g.line_ranges.iter().enumerate() {
            if g.wireframe[i] {
                let i = i as u32;
                pass.draw(range.clone(), i..i + 1);
            }
        }
    }

    pub(crate) fn destroy(&mut self) {
        if let Some(g) = self.geometry.take() {
            g.destroy();
        }
    }
}
