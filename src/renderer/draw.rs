use glam::Mat4;

use crate::renderer::buffers::GpuMesh;
use crate::renderer::camera::Camera;
use crate::renderer::pass::{SceneUniforms, ShaderPass};

/// Per-call shader inputs. Colors arrive already normalized to 0..1.
pub struct RenderParams {
    pub top_color: [f32; 4],
    pub bottom_color: [f32; 4],
    pub time: u32,
    pub flame_size: f32,
}

/// Run one shader pass over `drawables` in sequence order.
///
/// Rebinds the pass's whole uniform block every call, so repeated calls
/// within a frame stay independent. `clear` wipes color and depth;
/// later passes load what earlier ones wrote. An empty drawable list
/// still writes uniforms and opens the pass, issuing zero draws.
#[allow(clippy::too_many_arguments)]
pub fn render(
    queue: &wgpu::Queue,
    encoder: &mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    depth: &wgpu::TextureView,
    camera: &Camera,
    pass: &ShaderPass,
    params: &RenderParams,
    drawables: &[&GpuMesh],
    clear: bool,
) {
    pass.write_uniforms(queue, &build_uniforms(camera, params));

    let (color_load, depth_load) = if clear {
        (
            wgpu::LoadOp::Clear(wgpu::Color::BLACK),
            wgpu::LoadOp::Clear(1.0),
        )
    } else {
        (wgpu::LoadOp::Load, wgpu::LoadOp::Load)
    };

    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(&format!("{} Render Pass", pass.kind.label())),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: color_load,
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth,
            depth_ops: Some(wgpu::Operations {
                load: depth_load,
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
    });

    pass.bind(&mut render_pass);
    for mesh in drawables {
        pass.draw(&mut render_pass, mesh);
    }
}

/// All drawables share one model matrix (identity; meshes are placed at
/// generation time).
fn build_uniforms(camera: &Camera, params: &RenderParams) -> SceneUniforms {
    SceneUniforms {
        model: Mat4::IDENTITY.to_cols_array_2d(),
        view_proj: camera.view_projection_matrix().to_cols_array_2d(),
        top_color: params.top_color,
        bottom_color: params.bottom_color,
        time: params.time,
        flame_size: params.flame_size,
        _pad: [0.0; 2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniforms_carry_the_camera_and_params() {
        let camera = Camera::default();
        let params = RenderParams {
            top_color: [0.1, 0.2, 0.3, 1.0],
            bottom_color: [0.4, 0.5, 0.6, 1.0],
            time: 42,
            flame_size: 1.5,
        };

        let uniforms = build_uniforms(&camera, &params);
        assert_eq!(uniforms.model, Mat4::IDENTITY.to_cols_array_2d());
        assert_eq!(
            uniforms.view_proj,
            camera.view_projection_matrix().to_cols_array_2d()
        );
        assert_eq!(uniforms.top_color, params.top_color);
        assert_eq!(uniforms.bottom_color, params.bottom_color);
        assert_eq!(uniforms.time, 42);
        assert_eq!(uniforms.flame_size, 1.5);
    }
}
