use thiserror::Error;

use crate::renderer::buffers::{GpuMesh, normal_layout, position_layout};

/// WGSL validation failure caught while building a pass. Fatal at
/// startup; the pipeline is never retried.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("{label} shader failed validation: {message}")]
    Compile { label: String, message: String },
}

/// Which of the two scene programs a pass runs.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    Background,
    Fireball,
}

impl PassKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            PassKind::Background => "Background",
            PassKind::Fireball => "Fireball",
        }
    }

    // The background paints a backdrop pinned to the far plane, so it
    // never writes depth; the fireball needs it for self-occlusion.
    fn depth_write(self) -> bool {
        match self {
            PassKind::Background => false,
            PassKind::Fireball => true,
        }
    }
}

/// Uniform block shared by both scene shaders. Each shader reads the
/// fields it needs and ignores the rest.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub model: [[f32; 4]; 4],
    pub view_proj: [[f32; 4]; 4],
    pub top_color: [f32; 4],
    pub bottom_color: [f32; 4],
    pub time: u32,
    pub flame_size: f32,
    pub _pad: [f32; 2],
}

/// One shader program: compiled WGSL module, its render pipeline, and
/// a private uniform buffer so two passes in the same frame never
/// clobber each other's bindings.
pub struct ShaderPass {
    pub kind: PassKind,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ShaderPass {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        kind: PassKind,
        source: &str,
    ) -> Result<Self, ShaderError> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{} Shader", kind.label())),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} Uniform Buffer", kind.label())),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("{} Bind Group Layout", kind.label())),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Bind Group", kind.label())),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} Pipeline Layout", kind.label())),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{} Pipeline", kind.label())),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[position_layout(), normal_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: kind.depth_write(),
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(ShaderError::Compile {
                label: kind.label().to_string(),
                message: error.to_string(),
            });
        }

        Ok(Self {
            kind,
            pipeline,
            uniform_buffer,
            bind_group,
        })
    }

    pub fn write_uniforms(&self, queue: &wgpu::Queue, uniforms: &SceneUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[*uniforms]));
    }

    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, mesh: &GpuMesh) {
        render_pass.set_vertex_buffer(0, mesh.position_buffer.slice(..));
        render_pass.set_vertex_buffer(1, mesh.normal_buffer.slice(..));
        render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_uniforms_match_the_wgsl_block() {
        // mat4x4 + mat4x4 + vec4 + vec4 + u32 + f32 + vec2 padding.
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 176);
        assert_eq!(std::mem::offset_of!(SceneUniforms, view_proj), 64);
        assert_eq!(std::mem::offset_of!(SceneUniforms, top_color), 128);
        assert_eq!(std::mem::offset_of!(SceneUniforms, bottom_color), 144);
        assert_eq!(std::mem::offset_of!(SceneUniforms, time), 160);
        assert_eq!(std::mem::offset_of!(SceneUniforms, flame_size), 164);
    }

    #[test]
    fn scene_uniforms_cast_to_bytes() {
        let uniforms = SceneUniforms {
            model: glam::Mat4::IDENTITY.to_cols_array_2d(),
            view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
            top_color: [1.0, 0.5, 0.25, 1.0],
            bottom_color: [0.0, 0.0, 0.0, 1.0],
            time: 7,
            flame_size: 1.3,
            _pad: [0.0; 2],
        };
        let bytes: &[u8] = bytemuck::cast_slice(std::slice::from_ref(&uniforms));
        assert_eq!(bytes.len(), 176);
    }

    #[test]
    fn pass_kinds_disagree_on_depth_writes() {
        assert!(!PassKind::Background.depth_write());
        assert!(PassKind::Fireball.depth_write());
    }
}
