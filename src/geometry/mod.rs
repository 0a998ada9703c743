pub mod icosphere;
pub mod mesh;
pub mod primitives;

pub use icosphere::{MAX_SUBDIVISIONS, generate_icosphere};
pub use mesh::Mesh;
pub use primitives::{generate_cube, generate_square};
