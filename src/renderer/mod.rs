pub mod buffers;
pub mod camera;
pub mod draw;
pub mod gpu;
pub mod pass;

pub use buffers::GpuMesh;
pub use camera::Camera;
pub use draw::{RenderParams, render};
pub use gpu::GpuState;
pub use pass::{PassKind, SceneUniforms, ShaderError, ShaderPass};
