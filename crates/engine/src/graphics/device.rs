use std::ops::Range;

use gfx_maths::*;

use super::error::GraphicsResult;
use super::texture::ImageData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Triangles,
    Lines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerOptions {
    /// Repeat instead of clamping outside of `[0, 1]`
    pub repeat: bool,
    pub build_mipmaps: bool,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self {
            repeat: false,
            build_mipmaps: true,
        }
    }
}

/// Attribute buffers of a draw. They are bound to `in_position`,
/// `in_normal` and `in_uv` of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBinding {
    pub position: BufferHandle,
    pub normal: BufferHandle,
    pub uv: BufferHandle,
}

#[derive(Debug, Clone, Copy)]
pub enum Uniform {
    Mat4(Mat4),
    Vec3(Vec3),
    Vec4(Vec4),
    Float(f32),
    Int(i32),
}

/// The rendering backend. Methods take `&self` because resources are shared
/// through `Rc` and released from `Drop`, implementors keep their state
/// behind interior mutability.
pub trait GraphicsDevice {
    fn create_buffer(&self, data: &[u8]) -> GraphicsResult<BufferHandle>;
    /// Overwrites the start of the buffer. Writing past its size is an error.
    fn write_buffer(&self, buffer: BufferHandle, data: &[u8]) -> GraphicsResult<()>;
    fn release_buffer(&self, buffer: BufferHandle);

    fn create_texture(
        &self,
        image: &ImageData,
        sampler: SamplerOptions,
    ) -> GraphicsResult<TextureHandle>;
    /// `faces` holds six RGB images of `size`x`size` in +X, -X, +Y, -Y, +Z, -Z order.
    fn create_cubemap(&self, size: u32, faces: &[u8]) -> GraphicsResult<TextureHandle>;
    fn release_texture(&self, texture: TextureHandle);
    fn bind_texture(&self, unit: u32, texture: TextureHandle);

    fn create_program(&self, name: &str) -> GraphicsResult<ProgramHandle>;
    fn set_uniform(&self, program: ProgramHandle, name: &str, value: Uniform);

    fn set_depth_test(&self, enabled: bool);
    fn clear(&self, color: Vec3);
    fn draw(
        &self,
        program: ProgramHandle,
        vertices: VertexBinding,
        range: Range<usize>,
        mode: DrawMode,
    );
}
