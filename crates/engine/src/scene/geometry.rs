//! Procedural meshes.
//!
//! Both primitives are centered on the origin and wound counter-clockwise
//! when looked at from the side their normals point to.

use gs_format::Mesh;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

// (normal, right, up) with right x up == normal
const CUBE_FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
];

// corners of a quad in (right, up) units, two counter-clockwise triangles
const QUAD_CORNERS: [(f32, f32); 6] = [
    (-1.0, -1.0),
    (1.0, -1.0),
    (1.0, 1.0),
    (-1.0, -1.0),
    (1.0, 1.0),
    (-1.0, 1.0),
];

fn check_size(name: &str, size: f32) -> Result<(), GeometryError> {
    if !size.is_finite() || size <= 0.0 {
        return Err(GeometryError::InvalidArgument(format!(
            "{} must be positive and finite, got {}",
            name, size
        )));
    }
    Ok(())
}

/// A `size` x `size` square in the XY plane facing -Z.
///
/// The texture's `(0, 0)` corner sits at `(-x, +y)`. With `scale_uv` the
/// texture coordinates run from 0 to `size` so repeating textures keep their
/// world size, otherwise from 0 to 1.
pub fn plane(size: f32, scale_uv: bool) -> Result<Mesh, GeometryError> {
    check_size("plane size", size)?;

    let half = size / 2.0;
    let uv_scale = if scale_uv { size } else { 1.0 };

    // facing -Z means right = -X when up = +Y
    let corners = [
        (1.0, 1.0),
        (-1.0, -1.0),
        (-1.0, 1.0),
        (1.0, 1.0),
        (1.0, -1.0),
        (-1.0, -1.0),
    ];

    let mut mesh = Mesh::default();
    for (x, y) in corners {
        mesh.vertices.extend_from_slice(&[x * half, y * half, 0.0]);
        mesh.normals.extend_from_slice(&[0.0, 0.0, -1.0]);
        mesh.uv_coords.extend_from_slice(&[
            (x + 1.0) / 2.0 * uv_scale,
            (1.0 - y) / 2.0 * uv_scale,
        ]);
    }
    Ok(mesh)
}

/// An axis aligned cube reaching `half_size` along every axis, each face
/// mapped to the full texture. With `scale_uv` the coordinates run from 0 to
/// `half_size`.
pub fn cube(half_size: f32, scale_uv: bool) -> Result<Mesh, GeometryError> {
    check_size("cube half size", half_size)?;

    let uv_scale = if scale_uv { half_size } else { 1.0 };
    let mut mesh = Mesh::default();

    for (normal, right, up) in CUBE_FACES {
        for (r, u) in QUAD_CORNERS {
            for axis in 0..3 {
                mesh.vertices
                    .push((normal[axis] + right[axis] * r + up[axis] * u) * half_size);
            }
            mesh.normals.extend_from_slice(&normal);
            mesh.uv_coords
                .extend_from_slice(&[(r + 1.0) / 2.0 * uv_scale, (u + 1.0) / 2.0 * uv_scale]);
        }
    }
    Ok(mesh)
}

#[cfg(test)]
mod test {
    use super::*;

    fn triangle_normal(vertices: &[f32]) -> [f32; 3] {
        let a = [vertices[0], vertices[1], vertices[2]];
        let b = [vertices[3], vertices[4], vertices[5]];
        let c = [vertices[6], vertices[7], vertices[8]];
        let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        let n = [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ];
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        [n[0] / len, n[1] / len, n[2] / len]
    }

    #[test]
    fn test_cube_winding_matches_normals() {
        let mesh = cube(0.5, false).unwrap();
        assert!(mesh.is_well_formed());
        assert_eq!(mesh.triangle_count(), 12);

        for (triangle, normals) in mesh.vertices.chunks(9).zip(mesh.normals.chunks(9)) {
            let computed = triangle_normal(triangle);
            let centroid: Vec<f32> = (0..3)
                .map(|axis| (triangle[axis] + triangle[axis + 3] + triangle[axis + 6]) / 3.0)
                .collect();
            let outward: f32 = (0..3).map(|axis| computed[axis] * centroid[axis]).sum();
            assert!(outward > 0.0, "triangle {:?} faces inward", triangle);

            for stored in normals.chunks(3) {
                for axis in 0..3 {
                    assert!((stored[axis] - computed[axis]).abs() < 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_cube_extent() {
        let mesh = cube(2.0, false).unwrap();
        assert!(mesh.vertices.iter().all(|v| v.abs() == 2.0));
    }

    #[test]
    fn test_plane_faces_negative_z() {
        let mesh = plane(4.0, false).unwrap();
        assert!(mesh.is_well_formed());
        assert_eq!(mesh.vertex_count(), 6);
        for triangle in mesh.vertices.chunks(9) {
            let n = triangle_normal(triangle);
            assert!((n[2] + 1.0).abs() < 1e-6);
        }
        assert!(mesh.vertices.iter().all(|v| v.abs() == 2.0 || *v == 0.0));
        assert!(mesh.uv_coords.iter().all(|uv| (0.0..=1.0).contains(uv)));
    }

    #[test]
    fn test_scaled_uv() {
        let mesh = plane(25.0, true).unwrap();
        let max = mesh.uv_coords.iter().cloned().fold(0.0, f32::max);
        assert_eq!(max, 25.0);

        let mesh = cube(3.0, true).unwrap();
        let max = mesh.uv_coords.iter().cloned().fold(0.0, f32::max);
        assert_eq!(max, 3.0);
    }

    #[test]
    fn test_plane_uv_corners() {
        let mesh = plane(2.0, false).unwrap();
        let uv_at = |x: f32, y: f32| {
            let index = mesh
                .vertices
                .chunks(3)
                .position(|v| v[0] == x && v[1] == y)
                .unwrap();
            [mesh.uv_coords[index * 2], mesh.uv_coords[index * 2 + 1]]
        };

        assert_eq!(uv_at(1.0, 1.0), [1.0, 0.0]);
        assert_eq!(uv_at(-1.0, 1.0), [0.0, 0.0]);
        assert_eq!(uv_at(-1.0, -1.0), [0.0, 1.0]);
        assert_eq!(uv_at(1.0, -1.0), [1.0, 1.0]);
    }

    #[test]
    fn test_invalid_size() {
        assert!(plane(0.0, false).is_err());
        assert!(plane(f32::NAN, false).is_err());
        assert!(matches!(
            cube(-1.0, false),
            Err(GeometryError::InvalidArgument(_))
        ));
        assert!(cube(f32::INFINITY, true).is_err());
    }
}
