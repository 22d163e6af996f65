use std::f32::consts::FRAC_PI_2;

use gfx_maths::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective,
    /// Orthographic with the given half height of the view volume.
    Orthographic { half_height: f32 },
}

/// A first person camera looking down -Z at `yaw = -PI / 2`, `pitch = 0`.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
    fovy: f32,
    aspect: f32,
    near: f32,
    far: f32,
    projection: Projection,
    projection_matrix: Mat4,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self::builder().aspect(aspect).build()
    }

    pub fn builder() -> CameraBuilder {
        CameraBuilder {
            position: Vec3::zero(),
            fovy: 90.0f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            projection: Projection::Perspective,
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    /// Clamped to straight up and straight down.
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.max(-FRAC_PI_2).min(FRAC_PI_2);
    }

    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        self.yaw += yaw;
        self.set_pitch(self.pitch + pitch);
    }

    pub fn front(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
    }

    fn rotation(&self) -> Quaternion {
        Quaternion::axis_angle(Vec3::new(0.0, 1.0, 0.0), -(self.yaw + FRAC_PI_2))
            * Quaternion::axis_angle(Vec3::new(1.0, 0.0, 0.0), self.pitch)
    }

    pub fn move_in_view_direction(&mut self, movement: &Vec3) {
        let rotation = self.rotation();
        self.position += rotation * movement;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::rotate(-self.rotation()) * Mat4::translate(-self.position)
    }

    /// The view matrix without its translation, for geometry that stays
    /// centered on the camera.
    pub fn rotation_view_matrix(&self) -> Mat4 {
        Mat4::rotate(-self.rotation())
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    pub fn set_fovy(&mut self, fovy: f32) {
        self.fovy = fovy;
        self.update_projection_matrix();
    }

    fn update_projection_matrix(&mut self) {
        self.projection_matrix = match self.projection {
            Projection::Perspective => {
                Mat4::perspective_vulkan(self.fovy, self.near, self.far, self.aspect)
            }
            Projection::Orthographic { half_height } => {
                let half_width = half_height * self.aspect;
                Mat4::orthographic_vulkan(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.near,
                    self.far,
                )
            }
        };
    }
}

pub struct CameraBuilder {
    position: Vec3,
    fovy: f32,
    aspect: f32,
    near: f32,
    far: f32,
    projection: Projection,
}

impl CameraBuilder {
    pub fn position(mut self, pos: Vec3) -> Self {
        self.position = pos;
        self
    }

    /// Vertical field of view in degrees.
    pub fn fovy(mut self, fovy: f32) -> Self {
        let fovy = fovy.to_radians();
        const MIN: f32 = 0.01;
        const MAX: f32 = std::f32::consts::PI - 0.01;

        self.fovy = fovy.max(MIN).min(MAX);
        if (self.fovy - fovy).abs() > 1e-6 {
            log::warn!("FovY out of bounds: {} <= `{}` <= {}", MIN, fovy, MAX);
        }
        self
    }

    pub fn aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    pub fn near(mut self, near: f32) -> Self {
        if near <= 0.0 {
            log::warn!("Near is negative: `{}`", near);
        }
        self.near = near;
        self
    }

    pub fn far(mut self, far: f32) -> Self {
        if far <= 0.0 {
            log::warn!("Far is negative: `{}`", far);
        }
        self.far = far;
        self
    }

    pub fn orthographic(mut self, half_height: f32) -> Self {
        self.projection = Projection::Orthographic { half_height };
        self
    }

    pub fn build(self) -> Camera {
        if self.far < self.near {
            log::warn!("Far is closer than near: `{}` `{}`", self.far, self.near);
        }

        let mut cam = Camera {
            position: self.position,
            yaw: -FRAC_PI_2,
            pitch: 0.0,
            fovy: self.fovy,
            aspect: self.aspect,
            near: self.near,
            far: self.far,
            projection: self.projection,
            projection_matrix: Mat4::identity(),
        };
        cam.update_projection_matrix();
        cam
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = Camera::new(1.0);
        camera.rotate(0.0, 10.0);
        assert_eq!(camera.pitch(), FRAC_PI_2);
        camera.set_pitch(-10.0);
        assert_eq!(camera.pitch(), -FRAC_PI_2);
    }

    #[test]
    fn test_default_front() {
        let camera = Camera::new(1.0);
        let front = camera.front();
        assert!(front.x.abs() < 1e-6);
        assert!(front.y.abs() < 1e-6);
        assert!((front.z + 1.0).abs() < 1e-6);
    }
}
