/// Indexed triangle mesh with flat attribute arrays.
///
/// Positions and normals are tightly packed xyz triples, ready for GPU
/// upload without conversion. `indices` holds counter-clockwise triangle
/// triples into the vertex list.
pub struct Mesh {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Every index addresses a real vertex and every vertex carries a
    /// normal.
    pub fn is_well_formed(&self) -> bool {
        let verts = self.vertex_count() as u32;
        self.vertices.len() % 3 == 0
            && self.indices.len() % 3 == 0
            && self.normals.len() == self.vertices.len()
            && self.indices.iter().all(|&i| i < verts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_triangle() {
        let mesh = Mesh {
            vertices: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            indices: vec![0, 1, 2],
        };
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.is_well_formed());
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mesh = Mesh {
            vertices: vec![0.0; 9],
            normals: vec![0.0; 9],
            indices: vec![0, 1, 3],
        };
        assert!(!mesh.is_well_formed());
    }

    #[test]
    fn missing_normals_are_rejected() {
        let mesh = Mesh {
            vertices: vec![0.0; 9],
            normals: vec![0.0; 6],
            indices: vec![0, 1, 2],
        };
        assert!(!mesh.is_well_formed());
    }
}
