//! Boolean intersection tests between collider shapes.
//!
//! Shapes are snapshots taken at query time, none of the tests move or
//! resolve anything.

use gfx_maths::*;
use log::warn;

const EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb {
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshTestMode {
    /// Only the first triangle of the mesh is tested.
    FirstTriangle,
    AllTriangles,
}

impl Default for MeshTestMode {
    fn default() -> Self {
        MeshTestMode::FirstTriangle
    }
}

/// Flattened world space triangles, 9 floats per triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleMesh<'a> {
    pub triangles: &'a [f32],
    pub mode: MeshTestMode,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    Sphere(Sphere),
    Mesh(TriangleMesh<'a>),
    Aabb(Aabb),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Sphere,
    Mesh,
    Aabb,
}

impl Shape<'_> {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Sphere(_) => ShapeKind::Sphere,
            Shape::Mesh(_) => ShapeKind::Mesh,
            Shape::Aabb(_) => ShapeKind::Aabb,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intersection {
    Hit,
    Miss,
    /// No test exists for this pair of shapes.
    Unsupported(ShapeKind, ShapeKind),
}

impl Intersection {
    pub fn is_hit(&self) -> bool {
        *self == Intersection::Hit
    }
}

impl From<bool> for Intersection {
    fn from(hit: bool) -> Self {
        if hit {
            Intersection::Hit
        } else {
            Intersection::Miss
        }
    }
}

/// The collision shape attached to an entity. Sphere and box are centered
/// on the entity position, mesh triangles are already in world space.
#[derive(Debug, Clone, PartialEq)]
pub enum Collider {
    Sphere { radius: f32 },
    Mesh { triangles: Vec<f32>, mode: MeshTestMode },
    Aabb { half_extents: Vec3 },
}

impl Collider {
    pub fn sphere(radius: f32) -> Self {
        Collider::Sphere { radius }
    }

    pub fn mesh(triangles: Vec<f32>) -> Self {
        Collider::Mesh {
            triangles,
            mode: MeshTestMode::default(),
        }
    }

    pub fn aabb(half_extents: Vec3) -> Self {
        Collider::Aabb { half_extents }
    }

    pub fn shape(&self, position: Vec3) -> Shape<'_> {
        match self {
            Collider::Sphere { radius } => Shape::Sphere(Sphere {
                center: position,
                radius: *radius,
            }),
            Collider::Mesh { triangles, mode } => Shape::Mesh(TriangleMesh {
                triangles,
                mode: *mode,
            }),
            Collider::Aabb { half_extents } => Shape::Aabb(Aabb {
                center: position,
                half_extents: *half_extents,
            }),
        }
    }
}

pub fn intersect(a: &Shape, b: &Shape) -> Intersection {
    match (a, b) {
        (Shape::Sphere(a), Shape::Sphere(b)) => sphere_x_sphere(a, b).into(),
        (Shape::Sphere(sphere), Shape::Mesh(mesh)) | (Shape::Mesh(mesh), Shape::Sphere(sphere)) => {
            sphere_x_mesh(sphere, mesh).into()
        }
        (Shape::Aabb(a), Shape::Aabb(b)) => aabb_x_aabb(a, b).into(),
        (Shape::Sphere(_), Shape::Aabb(_))
        | (Shape::Aabb(_), Shape::Sphere(_))
        | (Shape::Mesh(_), Shape::Mesh(_))
        | (Shape::Mesh(_), Shape::Aabb(_))
        | (Shape::Aabb(_), Shape::Mesh(_)) => {
            warn!("No collision test for {:?} x {:?}", a.kind(), b.kind());
            Intersection::Unsupported(a.kind(), b.kind())
        }
    }
}

pub fn sphere_x_sphere(a: &Sphere, b: &Sphere) -> bool {
    let radii = a.radius + b.radius;
    (b.center - a.center).sqr_magnitude() < radii * radii
}

/// Hits when the center projects into the triangle, at any distance from its
/// plane, or when an edge passes closer than the radius.
pub fn sphere_x_triangle(sphere: &Sphere, triangle: &[Vec3; 3]) -> bool {
    let [a, b, c] = *triangle;

    if let Some([u, v, w]) = barycentric(sphere.center, triangle) {
        if u >= -EPSILON && v >= -EPSILON && w >= -EPSILON && u + v + w <= 1.0 + EPSILON {
            return true;
        }
    }

    let radius_sqr = sphere.radius * sphere.radius;
    [(a, b), (b, c), (c, a)]
        .iter()
        .any(|&(p, q)| segment_distance_sqr(sphere.center, p, q) < radius_sqr)
}

pub fn sphere_x_mesh(sphere: &Sphere, mesh: &TriangleMesh) -> bool {
    let mut triangles = mesh.triangles.chunks_exact(9).map(|t| {
        [
            Vec3::new(t[0], t[1], t[2]),
            Vec3::new(t[3], t[4], t[5]),
            Vec3::new(t[6], t[7], t[8]),
        ]
    });

    match mesh.mode {
        MeshTestMode::FirstTriangle => triangles
            .next()
            .map_or(false, |triangle| sphere_x_triangle(sphere, &triangle)),
        MeshTestMode::AllTriangles => triangles.any(|triangle| sphere_x_triangle(sphere, &triangle)),
    }
}

/// Boxes that only touch do not intersect.
pub fn aabb_x_aabb(a: &Aabb, b: &Aabb) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());

    a_max.x > b_min.x
        && b_max.x > a_min.x
        && a_max.y > b_min.y
        && b_max.y > a_min.y
        && a_max.z > b_min.z
        && b_max.z > a_min.z
}

fn dot(a: Vec3, b: Vec3) -> f32 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

// barycentric coordinates of `p` projected onto the triangle plane,
// None for degenerate triangles
fn barycentric(p: Vec3, triangle: &[Vec3; 3]) -> Option<[f32; 3]> {
    let [a, b, c] = *triangle;
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;

    let d00 = dot(v0, v0);
    let d01 = dot(v0, v1);
    let d11 = dot(v1, v1);
    let d20 = dot(v2, v0);
    let d21 = dot(v2, v1);

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < EPSILON {
        return None;
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    Some([1.0 - v - w, v, w])
}

fn segment_distance_sqr(point: Vec3, p: Vec3, q: Vec3) -> f32 {
    let pq = q - p;
    let length_sqr = dot(pq, pq);
    let t = if length_sqr > 0.0 {
        (dot(point - p, pq) / length_sqr).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (point - (p + pq * t)).sqr_magnitude()
}

#[cfg(test)]
mod test {
    use super::*;

    fn sphere(x: f32, y: f32, z: f32, radius: f32) -> Sphere {
        Sphere {
            center: Vec3::new(x, y, z),
            radius,
        }
    }

    fn unit_box(x: f32) -> Aabb {
        Aabb {
            center: Vec3::new(x, 0.0, 0.0),
            half_extents: Vec3::one(),
        }
    }

    const TRIANGLE: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];

    #[test]
    fn test_sphere_x_sphere() {
        let a = sphere(0.0, 0.0, 0.0, 1.0);
        let b = sphere(1.5, 0.0, 0.0, 1.0);
        assert!(sphere_x_sphere(&a, &b));
        assert!(sphere_x_sphere(&b, &a));

        // touching is a miss
        let c = sphere(2.0, 0.0, 0.0, 1.0);
        assert!(!sphere_x_sphere(&a, &c));
        assert!(!sphere_x_sphere(&c, &a));
    }

    #[test]
    fn test_sphere_over_face_hits_at_any_height() {
        let triangle = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        assert!(sphere_x_triangle(&sphere(0.25, 0.25, 100.0, 0.1), &triangle));
        assert!(sphere_x_triangle(&sphere(0.25, 0.25, 0.0, 0.1), &triangle));
    }

    #[test]
    fn test_sphere_near_edge() {
        let triangle = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        assert!(sphere_x_triangle(&sphere(0.5, -0.5, 0.0, 0.6), &triangle));
        assert!(!sphere_x_triangle(&sphere(0.5, -0.5, 0.0, 0.4), &triangle));
        assert!(!sphere_x_triangle(&sphere(5.0, 5.0, 0.0, 1.0), &triangle));
    }

    #[test]
    fn test_degenerate_triangle_uses_edges() {
        let line = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ];
        assert!(sphere_x_triangle(&sphere(1.0, 0.5, 0.0, 0.6), &line));
        assert!(!sphere_x_triangle(&sphere(1.0, 5.0, 0.0, 0.6), &line));
    }

    #[test]
    fn test_mesh_modes() {
        let mut triangles = TRIANGLE.to_vec();
        triangles.extend(TRIANGLE.iter().map(|v| v + 10.0));
        let target = sphere(10.25, 10.25, 10.0, 0.1);

        let first = TriangleMesh {
            triangles: &triangles,
            mode: MeshTestMode::FirstTriangle,
        };
        assert!(!sphere_x_mesh(&target, &first));

        let all = TriangleMesh {
            triangles: &triangles,
            mode: MeshTestMode::AllTriangles,
        };
        assert!(sphere_x_mesh(&target, &all));
    }

    #[test]
    fn test_short_mesh_never_hits() {
        let mesh = TriangleMesh {
            triangles: &TRIANGLE[..8],
            mode: MeshTestMode::AllTriangles,
        };
        assert!(!sphere_x_mesh(&sphere(0.0, 0.0, 0.0, 10.0), &mesh));
    }

    #[test]
    fn test_aabb() {
        assert!(!aabb_x_aabb(&unit_box(0.0), &unit_box(2.0)));
        assert!(aabb_x_aabb(&unit_box(0.0), &unit_box(1.999)));
        assert!(aabb_x_aabb(&unit_box(1.999), &unit_box(0.0)));
        assert!(!aabb_x_aabb(&unit_box(0.0), &unit_box(-3.0)));
    }

    #[test]
    fn test_dispatch() {
        let triangles = TRIANGLE.to_vec();
        let ball = Shape::Sphere(sphere(0.25, 0.25, 0.5, 0.1));
        let mesh = Shape::Mesh(TriangleMesh {
            triangles: &triangles,
            mode: MeshTestMode::FirstTriangle,
        });
        let cube = Shape::Aabb(unit_box(0.0));

        assert_eq!(intersect(&ball, &mesh), Intersection::Hit);
        assert_eq!(intersect(&mesh, &ball), Intersection::Hit);
        assert_eq!(intersect(&cube, &cube), Intersection::Hit);
        assert_eq!(
            intersect(&ball, &cube),
            Intersection::Unsupported(ShapeKind::Sphere, ShapeKind::Aabb)
        );
        assert_eq!(
            intersect(&mesh, &mesh),
            Intersection::Unsupported(ShapeKind::Mesh, ShapeKind::Mesh)
        );
    }

    #[test]
    fn test_collider_shape_follows_position() {
        let collider = Collider::sphere(2.0);
        match collider.shape(Vec3::new(1.0, 2.0, 3.0)) {
            Shape::Sphere(s) => {
                assert_eq!(s.center, Vec3::new(1.0, 2.0, 3.0));
                assert_eq!(s.radius, 2.0);
            }
            other => panic!("unexpected shape: {:?}", other),
        }
    }
}
