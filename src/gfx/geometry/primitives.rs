//! # Primitive Shape Generation
//!
//! Sphere, cylinder, and box generators, Y-up, centered on the origin.
//! Dimensions must be positive; a non-positive dimension is a caller bug,
//! checked only in debug builds.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a UV sphere.
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `width_segments` - Number of longitude segments (min 3)
/// * `height_segments` - Number of latitude segments (min 2)
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> GeometryData {
    debug_assert!(radius > 0.0);
    let mut data = GeometryData::new();

    let long_segs = width_segments.max(3);
    let lat_segs = height_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32;
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;

            let x = sin_theta * phi.cos();
            let y = cos_theta;
            let z = sin_theta * phi.sin();

            data.positions.push([x * radius, y * radius, z * radius]);
            data.normals.push([x, y, z]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.push(first);
            data.indices.push(first + 1);
            data.indices.push(second);

            data.indices.push(second);
            data.indices.push(first + 1);
            data.indices.push(second + 1);
        }
    }

    data
}

/// Generate a capped cylinder along the Y axis, optionally tapered.
///
/// # Arguments
/// * `radius_top` - Radius at +height/2
/// * `radius_bottom` - Radius at -height/2
/// * `height` - Extent along Y
/// * `segments` - Number of radial segments (min 3)
pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> GeometryData {
    debug_assert!(radius_top > 0.0 && radius_bottom > 0.0 && height > 0.0);
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;
    // Tapered sides tilt the normal by the slope of the profile.
    let slope = (radius_bottom - radius_top) / height;

    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let cos_a = angle.cos();
        let sin_a = angle.sin();

        let n_len = (1.0 + slope * slope).sqrt();
        let normal = [cos_a / n_len, slope / n_len, sin_a / n_len];

        data.positions
            .push([radius_bottom * cos_a, -half_height, radius_bottom * sin_a]);
        data.normals.push(normal);

        data.positions
            .push([radius_top * cos_a, half_height, radius_top * sin_a]);
        data.normals.push(normal);
    }

    for i in 0..segs {
        let bottom = i * 2;
        let top = bottom + 1;
        let bottom_next = bottom + 2;
        let top_next = bottom + 3;

        data.indices.push(bottom);
        data.indices.push(top);
        data.indices.push(bottom_next);

        data.indices.push(top);
        data.indices.push(top_next);
        data.indices.push(bottom_next);
    }

    // Caps get their own ring so the flat faces shade flat.
    for &(y, radius, ny) in &[
        (-half_height, radius_bottom, -1.0f32),
        (half_height, radius_top, 1.0f32),
    ] {
        let center = data.positions.len() as u32;
        data.positions.push([0.0, y, 0.0]);
        data.normals.push([0.0, ny, 0.0]);

        let ring_start = data.positions.len() as u32;
        for i in 0..=segs {
            let angle = i as f32 * 2.0 * PI / segs as f32;
            data.positions
                .push([radius * angle.cos(), y, radius * angle.sin()]);
            data.normals.push([0.0, ny, 0.0]);
        }

        for i in 0..segs {
            let current = ring_start + i;
            let next = ring_start + i + 1;
            if ny < 0.0 {
                data.indices.push(center);
                data.indices.push(current);
                data.indices.push(next);
            } else {
                data.indices.push(center);
                data.indices.push(next);
                data.indices.push(current);
            }
        }
    }

    data
}

/// Generate an axis-aligned box with the given extents.
pub fn cuboid(width: f32, height: f32, depth: f32) -> GeometryData {
    debug_assert!(width > 0.0 && height > 0.0 && depth > 0.0);
    let mut data = GeometryData::new();

    let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);

    let positions = [
        // Front face
        [-hx, -hy, hz],
        [hx, -hy, hz],
        [hx, hy, hz],
        [-hx, hy, hz],
        // Back face
        [-hx, -hy, -hz],
        [-hx, hy, -hz],
        [hx, hy, -hz],
        [hx, -hy, -hz],
        // Left face
        [-hx, -hy, -hz],
        [-hx, -hy, hz],
        [-hx, hy, hz],
        [-hx, hy, -hz],
        // Right face
        [hx, -hy, hz],
        [hx, -hy, -hz],
        [hx, hy, -hz],
        [hx, hy, hz],
        // Top face
        [-hx, hy, hz],
        [hx, hy, hz],
        [hx, hy, -hz],
        [-hx, hy, -hz],
        // Bottom face
        [-hx, -hy, -hz],
        [hx, -hy, -hz],
        [hx, -hy, hz],
        [-hx, -hy, hz],
    ];

    let face_normals: [[f32; 3]; 6] = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    data.positions = positions.to_vec();
    for normal in face_normals {
        for _ in 0..4 {
            data.normals.push(normal);
        }
    }

    for face in 0..6u32 {
        let base = face * 4;
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_extents() {
        let data = cuboid(0.08, 0.06, 0.18);
        assert_eq!(data.vertex_count(), 24);
        assert_eq!(data.triangle_count(), 12);
        let max_z = data
            .positions
            .iter()
            .map(|p| p[2])
            .fold(f32::MIN, f32::max);
        assert!((max_z - 0.09).abs() < 1e-6);
    }

    #[test]
    fn sphere_radius_and_counts() {
        let data = sphere(0.13, 32, 32);
        assert_eq!(data.positions.len(), data.normals.len());
        for p in &data.positions {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((r - 0.13).abs() < 1e-5);
        }
    }

    #[test]
    fn cylinder_spans_height_and_taper() {
        let data = cylinder(0.055, 0.065, 0.12, 16);
        let min_y = data.positions.iter().map(|p| p[1]).fold(f32::MAX, f32::min);
        let max_y = data.positions.iter().map(|p| p[1]).fold(f32::MIN, f32::max);
        assert!((min_y + 0.06).abs() < 1e-6);
        assert!((max_y - 0.06).abs() < 1e-6);

        // Widest ring sits at the bottom.
        let bottom_r = data.positions[0][0].hypot(data.positions[0][2]);
        assert!((bottom_r - 0.065).abs() < 1e-5);
    }

    #[test]
    fn sphere_triangles_wind_outward() {
        let data = sphere(1.0, 8, 6);
        for tri in data.indices.chunks(3) {
            let [a, b, c] = [
                data.positions[tri[0] as usize],
                data.positions[tri[1] as usize],
                data.positions[tri[2] as usize],
            ];
            let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let n = [
                e1[1] * e2[2] - e1[2] * e2[1],
                e1[2] * e2[0] - e1[0] * e2[2],
                e1[0] * e2[1] - e1[1] * e2[0],
            ];
            let centroid = [
                (a[0] + b[0] + c[0]) / 3.0,
                (a[1] + b[1] + c[1]) / 3.0,
                (a[2] + b[2] + c[2]) / 3.0,
            ];
            let dot = n[0] * centroid[0] + n[1] * centroid[1] + n[2] * centroid[2];
            assert!(dot >= 0.0, "inward-facing triangle {tri:?}");
        }
    }

    #[test]
    fn cylinder_side_normals_are_unit() {
        let data = cylinder(0.045, 0.04, 0.28, 16);
        for n in &data.normals {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }
}
