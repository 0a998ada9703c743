//! Flat primitives used alongside the icosphere: a unit square and a
//! unit cube. The cube doubles as the background surface, so each face
//! carries its own four vertices and a constant normal.

use glam::Vec3;

use super::mesh::Mesh;

/// Square of half-extent 1 in the XY plane around `center`, facing +Z.
pub fn generate_square(center: Vec3) -> Mesh {
    let corners = [
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(-1.0, 1.0, 0.0),
    ];

    let mut vertices = Vec::with_capacity(12);
    let mut normals = Vec::with_capacity(12);
    for corner in corners {
        let p = corner + center;
        vertices.extend_from_slice(&p.to_array());
        normals.extend_from_slice(&Vec3::Z.to_array());
    }

    Mesh {
        vertices,
        normals,
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Cube of half-extent 1 around `center`, 4 vertices per face so every
/// face keeps a flat normal.
pub fn generate_cube(center: Vec3) -> Mesh {
    let mut mesh = Mesh {
        vertices: Vec::with_capacity(24 * 3),
        normals: Vec::with_capacity(24 * 3),
        indices: Vec::with_capacity(36),
    };

    // (normal, u, v) with u cross v == normal keeps the winding
    // counter-clockwise from outside.
    let faces = [
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    ];
    for (normal, u, v) in faces {
        push_face(&mut mesh, center, normal, u, v);
    }

    mesh
}

fn push_face(mesh: &mut Mesh, center: Vec3, normal: Vec3, u: Vec3, v: Vec3) {
    let base = mesh.vertex_count() as u32;
    for corner in [normal - u - v, normal + u - v, normal + u + v, normal - u + v] {
        let p = corner + center;
        mesh.vertices.extend_from_slice(&p.to_array());
        mesh.normals.extend_from_slice(&normal.to_array());
    }
    mesh.indices
        .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_counts_and_normals() {
        let mesh = generate_square(Vec3::ZERO);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.is_well_formed());
        for n in mesh.normals.chunks_exact(3) {
            assert_eq!(n, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn square_is_centered() {
        let center = Vec3::new(2.0, -1.0, 0.5);
        let mesh = generate_square(center);
        for v in mesh.vertices.chunks_exact(3) {
            assert_eq!((v[0] - center.x).abs(), 1.0);
            assert_eq!((v[1] - center.y).abs(), 1.0);
            assert_eq!(v[2], center.z);
        }
    }

    #[test]
    fn cube_counts() {
        let mesh = generate_cube(Vec3::ZERO);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.is_well_formed());
    }

    #[test]
    fn cube_faces_have_flat_outward_normals() {
        let mesh = generate_cube(Vec3::ZERO);
        for (v, n) in mesh
            .vertices
            .chunks_exact(3)
            .zip(mesh.normals.chunks_exact(3))
        {
            let normal = Vec3::new(n[0], n[1], n[2]);
            assert_eq!(normal.length(), 1.0);
            // The vertex lies on the face the normal names.
            let p = Vec3::new(v[0], v[1], v[2]);
            assert_eq!(p.dot(normal), 1.0);
        }
    }

    #[test]
    fn cube_winding_encloses_its_volume() {
        let mesh = generate_cube(Vec3::ZERO);
        let mut volume = 0.0f32;
        for tri in mesh.indices.chunks_exact(3) {
            let v = |i: u32| {
                let i = i as usize * 3;
                Vec3::new(mesh.vertices[i], mesh.vertices[i + 1], mesh.vertices[i + 2])
            };
            volume += v(tri[0]).dot(v(tri[1]).cross(v(tri[2]))) / 6.0;
        }
        assert!((volume - 8.0).abs() < 1e-4, "signed volume = {volume}");
    }
}
