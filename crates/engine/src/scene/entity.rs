use gfx_maths::*;

use crate::core::camera::Camera;

use super::collision::{intersect, Collider, Intersection, Shape};
use super::light::Light;
use super::model::{FrameUniforms, Model};
use super::transform::Transform;

#[derive(Debug)]
pub struct Entity {
    pub name: String,
    pub transform: Transform,
    pub model: Option<Model>,
    collider: Option<Collider>,
}

impl Entity {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            transform: Transform::default(),
            model: None,
            collider: None,
        }
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = Some(model);
        self
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    pub fn set_collider(&mut self, collider: Collider) {
        self.collider = Some(collider);
    }

    pub fn clear_collider(&mut self) {
        self.collider = None;
    }

    pub fn collider(&self) -> Option<&Collider> {
        self.collider.as_ref()
    }

    /// The collider placed at the current position.
    pub fn shape(&self) -> Option<Shape<'_>> {
        self.collider
            .as_ref()
            .map(|collider| collider.shape(self.transform.position))
    }

    /// `None` when either entity has no collider.
    pub fn collide(&self, other: &Entity) -> Option<Intersection> {
        let a = self.shape()?;
        let b = other.shape()?;
        Some(intersect(&a, &b))
    }

    pub fn world_matrix(&self) -> Mat4 {
        self.transform.model_matrix()
    }

    pub fn update(&mut self, camera: &Camera, light: &Light) {
        let uniforms = FrameUniforms {
            model: self.world_matrix(),
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            view_position: camera.position,
            light,
        };

        if let Some(model) = &mut self.model {
            model.update(&uniforms);
        }
    }

    pub fn render(&self) {
        if let Some(model) = &self.model {
            model.render();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_collide_needs_two_colliders() {
        let mut a = Entity::new("a");
        let b = Entity::new("b").at(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(a.collide(&b), None);

        a.set_collider(Collider::sphere(1.0));
        assert_eq!(a.collide(&b), None);
        assert_eq!(b.collide(&a), None);
    }

    #[test]
    fn test_collide_reads_live_position() {
        let mut a = Entity::new("a");
        a.set_collider(Collider::sphere(1.0));
        let mut b = Entity::new("b").at(Vec3::new(1.5, 0.0, 0.0));
        b.set_collider(Collider::sphere(1.0));

        assert_eq!(a.collide(&b), Some(Intersection::Hit));
        b.set_position(Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(a.collide(&b), Some(Intersection::Miss));
    }

    #[test]
    fn test_sphere_against_ground_plane() {
        let ground = crate::scene::geometry::plane(25.0, false).unwrap();
        let mut plane = Entity::new("ground");
        plane.set_collider(Collider::mesh(ground.vertices));

        let mut ball = Entity::new("ball").at(Vec3::new(2.0, 3.0, 0.0));
        ball.set_collider(Collider::sphere(1.0));

        assert_eq!(ball.collide(&plane), Some(Intersection::Hit));
        assert_eq!(plane.collide(&ball), Some(Intersection::Hit));

        // only the first triangle of the plane is tested
        ball.set_position(Vec3::new(3.0, -2.0, 0.0));
        assert_eq!(ball.collide(&plane), Some(Intersection::Miss));
    }
}
