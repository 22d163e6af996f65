use gfx_maths::*;

/// Position, euler rotation in radians and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zero(),
            rotation: Vec3::zero(),
            scale: Vec3::one(),
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// `Rx * Ry * Rz`: applied to a vector, the Z rotation happens first,
    /// then Y, then X.
    pub fn rotation_quaternion(&self) -> Quaternion {
        Quaternion::axis_angle(Vec3::new(1.0, 0.0, 0.0), self.rotation.x)
            * Quaternion::axis_angle(Vec3::new(0.0, 1.0, 0.0), self.rotation.y)
            * Quaternion::axis_angle(Vec3::new(0.0, 0.0, 1.0), self.rotation.z)
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::local_to_world(self.position, self.rotation_quaternion(), self.scale)
    }

    pub fn inverse_model_matrix(&self) -> Mat4 {
        Mat4::world_to_local(self.position, self.rotation_quaternion(), self.scale)
    }
}
