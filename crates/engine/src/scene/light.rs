use gfx_maths::*;

/// Phong point light: ambient, diffuse and specular terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
    pub ambient_intensity: f32,
    pub diffuse_intensity: f32,
    pub specular_intensity: f32,
    pub specular_power: f32,
}

impl Light {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_ambient(mut self, intensity: f32) -> Self {
        self.ambient_intensity = intensity;
        self
    }
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::zero(),
            color: Vec3::one(),
            ambient_intensity: 0.03,
            diffuse_intensity: 0.7,
            specular_intensity: 0.8,
            specular_power: 32.0,
        }
    }
}
