//! Icosphere generation by recursive icosahedron subdivision.
//!
//! Starts from the regular 12-vertex icosahedron and splits every face
//! into four, pushing each new edge midpoint back onto the sphere. A
//! per-pass midpoint cache keyed by the edge's (lower, upper) vertex
//! indices keeps shared edges welded, so the surface stays closed at
//! every level.

use std::collections::HashMap;

use glam::Vec3;

use super::mesh::Mesh;

/// Upper bound the panel slider enforces; 20 * 4^8 triangles is already
/// more than the viewer can use.
pub const MAX_SUBDIVISIONS: u32 = 8;

// Regular icosahedron on the golden rectangles (±X, ±Z), unit
// circumradius.
const X: f32 = 0.525_731_1;
const Z: f32 = 0.850_650_8;

const BASE_VERTICES: [[f32; 3]; 12] = [
    [-X, Z, 0.0],
    [X, Z, 0.0],
    [-X, -Z, 0.0],
    [X, -Z, 0.0],
    [0.0, -X, Z],
    [0.0, X, Z],
    [0.0, -X, -Z],
    [0.0, X, -Z],
    [Z, 0.0, -X],
    [Z, 0.0, X],
    [-Z, 0.0, -X],
    [-Z, 0.0, X],
];

const BASE_FACES: [[u32; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Generate an icosphere of `radius` around `center`.
///
/// Each subdivision level splits every face into four, so the triangle
/// count is 20 * 4^level and the welded vertex count is 10 * 4^level + 2.
/// Identical inputs always produce identical output. Winding is
/// counter-clockwise seen from outside; normals are the unit radial
/// directions.
pub fn generate_icosphere(center: Vec3, radius: f32, level: u32) -> Mesh {
    debug_assert!(
        level <= MAX_SUBDIVISIONS,
        "subdivision level {level} out of range"
    );
    debug_assert!(radius > 0.0, "icosphere radius must be positive");

    let mut positions: Vec<Vec3> = BASE_VERTICES
        .iter()
        .map(|v| Vec3::from_array(*v).normalize() * radius)
        .collect();
    let mut faces: Vec<[u32; 3]> = BASE_FACES.to_vec();

    for _ in 0..level {
        // One cache per pass: both faces sharing an edge resolve it to
        // the same welded midpoint.
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut split = Vec::with_capacity(faces.len() * 4);

        for [a, b, c] in faces {
            let ab = midpoint(&mut positions, &mut midpoints, radius, a, b);
            let bc = midpoint(&mut positions, &mut midpoints, radius, b, c);
            let ca = midpoint(&mut positions, &mut midpoints, radius, c, a);

            split.push([a, ab, ca]);
            split.push([b, bc, ab]);
            split.push([c, ca, bc]);
            split.push([ab, bc, ca]);
        }

        faces = split;
    }

    let mut vertices = Vec::with_capacity(positions.len() * 3);
    let mut normals = Vec::with_capacity(positions.len() * 3);
    for p in &positions {
        // Radial direction before translating, so off-origin spheres
        // keep correct normals.
        let n = p.normalize();
        let v = *p + center;
        vertices.extend_from_slice(&v.to_array());
        normals.extend_from_slice(&n.to_array());
    }

    let mut indices = Vec::with_capacity(faces.len() * 3);
    for [a, b, c] in &faces {
        indices.push(*a);
        indices.push(*b);
        indices.push(*c);
    }

    Mesh {
        vertices,
        normals,
        indices,
    }
}

/// Welded midpoint of edge (a, b), pushed back onto the radius sphere.
fn midpoint(
    positions: &mut Vec<Vec3>,
    cache: &mut HashMap<(u32, u32), u32>,
    radius: f32,
    a: u32,
    b: u32,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    if let Some(&idx) = cache.get(&key) {
        return idx;
    }

    let mid = ((positions[a as usize] + positions[b as usize]) * 0.5).normalize() * radius;
    let idx = positions.len() as u32;
    positions.push(mid);
    cache.insert(key, idx);
    idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn edge_counts(mesh: &Mesh) -> HashMap<(u32, u32), u32> {
        let mut counts = HashMap::new();
        for tri in mesh.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = if a < b { (a, b) } else { (b, a) };
                *counts.entry(key).or_insert(0u32) += 1;
            }
        }
        counts
    }

    #[test]
    fn level_zero_is_the_icosahedron() {
        let mesh = generate_icosphere(Vec3::ZERO, 1.0, 0);
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.triangle_count(), 20);
        assert!(mesh.is_well_formed());
    }

    #[test]
    fn counts_match_closed_form_at_every_level() {
        for level in 0..=MAX_SUBDIVISIONS {
            let mesh = generate_icosphere(Vec3::ZERO, 1.0, level);
            let quads = 4u32.pow(level) as usize;
            assert_eq!(mesh.triangle_count(), 20 * quads, "level {level}");
            assert_eq!(mesh.vertex_count(), 10 * quads + 2, "level {level}");
            assert!(mesh.is_well_formed(), "level {level}");
        }
    }

    #[test]
    fn vertices_lie_on_the_sphere() {
        let center = Vec3::new(1.0, -2.0, 3.0);
        let mesh = generate_icosphere(center, 2.0, 5);
        for v in mesh.vertices.chunks_exact(3) {
            let p = Vec3::new(v[0], v[1], v[2]);
            let dist = (p - center).length();
            assert!((dist - 2.0).abs() < 1e-4, "|p - center| = {dist}");
        }
    }

    #[test]
    fn normals_are_unit_radial() {
        let center = Vec3::new(0.5, 0.0, -1.0);
        let mesh = generate_icosphere(center, 3.0, 3);
        for (v, n) in mesh
            .vertices
            .chunks_exact(3)
            .zip(mesh.normals.chunks_exact(3))
        {
            let p = Vec3::new(v[0], v[1], v[2]);
            let normal = Vec3::new(n[0], n[1], n[2]);
            assert!((normal.length() - 1.0).abs() < 1e-4);
            let radial = (p - center).normalize();
            assert!(normal.distance(radial) < 1e-4);
        }
    }

    #[test]
    fn every_edge_is_shared_by_two_faces() {
        let mesh = generate_icosphere(Vec3::ZERO, 1.0, 4);
        for (edge, count) in edge_counts(&mesh) {
            assert_eq!(count, 2, "edge {edge:?} used {count} times");
        }
    }

    #[test]
    fn winding_encloses_positive_volume() {
        // Signed volume of a closed CCW surface is positive and, for a
        // unit sphere approximation, just below 4/3 pi.
        let mesh = generate_icosphere(Vec3::ZERO, 1.0, 3);
        let mut volume = 0.0f32;
        for tri in mesh.indices.chunks_exact(3) {
            let v = |i: u32| {
                let i = i as usize * 3;
                Vec3::new(mesh.vertices[i], mesh.vertices[i + 1], mesh.vertices[i + 2])
            };
            volume += v(tri[0]).dot(v(tri[1]).cross(v(tri[2]))) / 6.0;
        }
        assert!(volume > 3.8 && volume < 4.2, "signed volume = {volume}");
    }

    #[test]
    fn identical_inputs_are_deterministic() {
        let a = generate_icosphere(Vec3::ZERO, 1.0, 4);
        let b = generate_icosphere(Vec3::ZERO, 1.0, 4);
        assert_eq!(a.vertices, b.vertices);
        assert_eq!(a.normals, b.normals);
        assert_eq!(a.indices, b.indices);
    }
}
