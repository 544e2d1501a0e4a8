//! # Procedural Geometry
//!
//! Mesh data and generators for the primitive shapes the viewer is built
//! from. Everything here is plain CPU-side data; the renderer uploads it.

pub mod primitives;

/// Generated mesh data ready for GPU upload.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryData {
    /// Vertex positions (x, y, z).
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex normals (x, y, z).
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices, counter-clockwise winding.
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Scales positions in place, correcting normals by the inverse scale.
    ///
    /// Used for shapes authored as a uniform primitive and then stretched,
    /// like the ellipsoid head.
    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) {
        debug_assert!(sx > 0.0 && sy > 0.0 && sz > 0.0);
        for p in &mut self.positions {
            p[0] *= sx;
            p[1] *= sy;
            p[2] *= sz;
        }
        for n in &mut self.normals {
            let scaled = [n[0] / sx, n[1] / sy, n[2] / sz];
            let len =
                (scaled[0] * scaled[0] + scaled[1] * scaled[1] + scaled[2] * scaled[2]).sqrt();
            if len > 0.0 {
                *n = [scaled[0] / len, scaled[1] / len, scaled[2] / len];
            }
        }
    }

    /// Computes smooth per-vertex normals from triangle faces.
    ///
    /// Fallback for loaded assets that ship positions without normals.
    /// A trailing partial triangle or an index outside the vertex range
    /// contributes nothing.
    pub fn face_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
        let mut normals = vec![[0.0f32; 3]; positions.len()];

        for triangle in indices.chunks_exact(3) {
            let [i0, i1, i2] = [
                triangle[0] as usize,
                triangle[1] as usize,
                triangle[2] as usize,
            ];
            if i0 >= positions.len() || i1 >= positions.len() || i2 >= positions.len() {
                continue;
            }
            let v0 = positions[i0];
            let v1 = positions[i1];
            let v2 = positions[i2];

            let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
            let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
            let face = [
                e1[1] * e2[2] - e1[2] * e2[1],
                e1[2] * e2[0] - e1[0] * e2[2],
                e1[0] * e2[1] - e1[1] * e2[0],
            ];

            for &i in &[i0, i1, i2] {
                normals[i][0] += face[0];
                normals[i][1] += face[1];
                normals[i][2] += face[2];
            }
        }

        for n in &mut normals {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            if len > 0.0 {
                n[0] /= len;
                n[1] /= len;
                n[2] /= len;
            }
        }

        normals
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_keeps_normals_unit_length() {
        let mut sphere = primitives::sphere(1.0, 8, 6);
        sphere.scale(1.0, 1.15, 1.0);
        for n in &sphere.normals {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn face_normals_of_upward_triangle_point_up() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]];
        let normals = GeometryData::face_normals(&positions, &[0, 1, 2]);
        for n in normals {
            assert!((n[1] - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn face_normals_skip_out_of_range_indices() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        let normals = GeometryData::face_normals(&positions, &[0, 1, 2]);
        assert_eq!(normals, vec![[0.0; 3]; 2]);
    }

    #[test]
    fn face_normals_ignore_a_trailing_partial_triangle() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]];
        let normals = GeometryData::face_normals(&positions, &[0, 1, 2, 0, 2]);
        for n in normals {
            assert!((n[1] - 1.0).abs() < 1e-5);
        }
    }
}
