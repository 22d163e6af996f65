use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};

use gfx_maths::*;
use log::trace;

use super::device::{
    BufferHandle, DrawMode, GraphicsDevice, ProgramHandle, SamplerOptions, TextureHandle,
    Uniform, VertexBinding,
};
use super::error::{GraphicsError, GraphicsResult};
use super::texture::{ImageData, TextureLoader};

/// A recorded draw call together with the texture bound to unit 0 at the
/// time of the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub program: ProgramHandle,
    pub vertices: VertexBinding,
    pub texture: Option<TextureHandle>,
    pub range: Range<usize>,
    pub mode: DrawMode,
}

#[derive(Default)]
struct HeadlessState {
    next_id: u64,
    buffers: HashMap<BufferHandle, Vec<u8>>,
    textures: HashMap<TextureHandle, (u32, u32)>,
    programs: HashMap<ProgramHandle, String>,
    uniforms: HashMap<(ProgramHandle, String), Uniform>,
    bound: HashMap<u32, TextureHandle>,
    draws: VecDeque<DrawCall>,
    depth_test: bool,
}

impl HeadlessState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Number of draw calls [`HeadlessDevice`] keeps by default.
pub const DRAW_LOG_LIMIT: usize = 4096;

/// A device that keeps every resource in memory and records what would have
/// been drawn. Used to run without a window.
///
/// Only the most recent draws are kept, see [`HeadlessDevice::set_draw_limit`].
pub struct HeadlessDevice {
    state: RefCell<HeadlessState>,
    buffer_budget: Cell<Option<usize>>,
    draw_limit: Cell<usize>,
}

impl Default for HeadlessDevice {
    fn default() -> Self {
        Self {
            state: RefCell::default(),
            buffer_budget: Cell::new(None),
            draw_limit: Cell::new(DRAW_LOG_LIMIT),
        }
    }
}

impl HeadlessDevice {
    /// Caps the draw log. Older draws are dropped first.
    pub fn set_draw_limit(&self, limit: usize) {
        self.draw_limit.set(limit);
        let mut state = self.state.borrow_mut();
        while state.draws.len() > limit {
            state.draws.pop_front();
        }
    }

    /// Makes buffer creation fail once `count` more buffers have been created.
    pub fn limit_buffers(&self, count: usize) {
        self.buffer_budget.set(Some(count));
    }

    pub fn live_buffers(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    pub fn live_textures(&self) -> usize {
        self.state.borrow().textures.len()
    }

    pub fn buffer_data(&self, buffer: BufferHandle) -> Option<Vec<u8>> {
        self.state.borrow().buffers.get(&buffer).cloned()
    }

    pub fn buffer_floats(&self, buffer: BufferHandle) -> Option<Vec<f32>> {
        self.buffer_data(buffer).map(|bytes| {
            bytes
                .chunks_exact(4)
                .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
                .collect()
        })
    }

    pub fn texture_size(&self, texture: TextureHandle) -> Option<(u32, u32)> {
        self.state.borrow().textures.get(&texture).copied()
    }

    pub fn program_name(&self, program: ProgramHandle) -> Option<String> {
        self.state.borrow().programs.get(&program).cloned()
    }

    pub fn uniform(&self, program: ProgramHandle, name: &str) -> Option<Uniform> {
        self.state
            .borrow()
            .uniforms
            .get(&(program, name.to_string()))
            .copied()
    }

    pub fn depth_test(&self) -> bool {
        self.state.borrow().depth_test
    }

    pub fn draws(&self) -> Vec<DrawCall> {
        self.state.borrow().draws.iter().cloned().collect()
    }

    /// Returns and forgets the draws recorded so far.
    pub fn take_draws(&self) -> Vec<DrawCall> {
        std::mem::take(&mut self.state.borrow_mut().draws).into()
    }
}

impl GraphicsDevice for HeadlessDevice {
    fn create_buffer(&self, data: &[u8]) -> GraphicsResult<BufferHandle> {
        if let Some(budget) = self.buffer_budget.get() {
            if budget == 0 {
                return Err(GraphicsError::Resource("out of buffer memory".to_string()));
            }
            self.buffer_budget.set(Some(budget - 1));
        }

        let mut state = self.state.borrow_mut();
        let handle = BufferHandle(state.next_id());
        state.buffers.insert(handle, data.to_vec());
        trace!("Created buffer {} ({} bytes)", handle.0, data.len());
        Ok(handle)
    }

    fn write_buffer(&self, buffer: BufferHandle, data: &[u8]) -> GraphicsResult<()> {
        let mut state = self.state.borrow_mut();
        let contents = state
            .buffers
            .get_mut(&buffer)
            .ok_or_else(|| GraphicsError::Resource(format!("unknown buffer {}", buffer.0)))?;
        if data.len() > contents.len() {
            return Err(GraphicsError::Resource(format!(
                "write of {} bytes exceeds buffer {} of {} bytes",
                data.len(),
                buffer.0,
                contents.len()
            )));
        }
        contents[..data.len()].copy_from_slice(data);
        Ok(())
    }

    fn release_buffer(&self, buffer: BufferHandle) {
        self.state.borrow_mut().buffers.remove(&buffer);
    }

    fn create_texture(
        &self,
        image: &ImageData,
        _sampler: SamplerOptions,
    ) -> GraphicsResult<TextureHandle> {
        let mut state = self.state.borrow_mut();
        let handle = TextureHandle(state.next_id());
        state.textures.insert(handle, (image.width, image.height));
        Ok(handle)
    }

    fn create_cubemap(&self, size: u32, faces: &[u8]) -> GraphicsResult<TextureHandle> {
        if faces.len() != size as usize * size as usize * 3 * 6 {
            return Err(GraphicsError::InvalidArgument(format!(
                "cubemap of size {} needs six rgb faces",
                size
            )));
        }
        let mut state = self.state.borrow_mut();
        let handle = TextureHandle(state.next_id());
        state.textures.insert(handle, (size, size));
        Ok(handle)
    }

    fn release_texture(&self, texture: TextureHandle) {
        let mut state = self.state.borrow_mut();
        state.textures.remove(&texture);
        state.bound.retain(|_, bound| *bound != texture);
    }

    fn bind_texture(&self, unit: u32, texture: TextureHandle) {
        self.state.borrow_mut().bound.insert(unit, texture);
    }

    fn create_program(&self, name: &str) -> GraphicsResult<ProgramHandle> {
        let mut state = self.state.borrow_mut();
        let handle = ProgramHandle(state.next_id());
        state.programs.insert(handle, name.to_string());
        Ok(handle)
    }

    fn set_uniform(&self, program: ProgramHandle, name: &str, value: Uniform) {
        self.state
            .borrow_mut()
            .uniforms
            .insert((program, name.to_string()), value);
    }

    fn set_depth_test(&self, enabled: bool) {
        self.state.borrow_mut().depth_test = enabled;
    }

    fn clear(&self, _color: Vec3) {}

    fn draw(
        &self,
        program: ProgramHandle,
        vertices: VertexBinding,
        range: Range<usize>,
        mode: DrawMode,
    ) {
        let limit = self.draw_limit.get();
        if limit == 0 {
            return;
        }

        let mut state = self.state.borrow_mut();
        if state.draws.len() >= limit {
            state.draws.pop_front();
        }
        let texture = state.bound.get(&0).copied();
        state.draws.push_back(DrawCall {
            program,
            vertices,
            texture,
            range,
            mode,
        });
    }
}

/// Serves images registered up front, every other path is not found.
#[derive(Debug, Default)]
pub struct MemoryTextureLoader {
    images: HashMap<PathBuf, ImageData>,
}

impl MemoryTextureLoader {
    pub fn insert(&mut self, path: impl Into<PathBuf>, image: ImageData) {
        self.images.insert(path.into(), image);
    }

    pub fn with(mut self, path: impl Into<PathBuf>, image: ImageData) -> Self {
        self.insert(path, image);
        self
    }
}

impl TextureLoader for MemoryTextureLoader {
    fn load_image(&self, path: &Path) -> GraphicsResult<ImageData> {
        self.images.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no image at {}", path.display()),
            )
            .into()
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_buffer_lifecycle() {
        let device = HeadlessDevice::default();
        let buffer = device.create_buffer(&[1, 2, 3, 4]).unwrap();
        assert_eq!(device.live_buffers(), 1);

        device.write_buffer(buffer, &[9, 9]).unwrap();
        assert_eq!(device.buffer_data(buffer), Some(vec![9, 9, 3, 4]));
        assert!(device.write_buffer(buffer, &[0; 5]).is_err());

        device.release_buffer(buffer);
        assert_eq!(device.live_buffers(), 0);
        assert!(device.write_buffer(buffer, &[0]).is_err());
    }

    #[test]
    fn test_buffer_limit() {
        let device = HeadlessDevice::default();
        device.limit_buffers(1);
        assert!(device.create_buffer(&[]).is_ok());
        assert!(matches!(
            device.create_buffer(&[]),
            Err(GraphicsError::Resource(_))
        ));
    }

    #[test]
    fn test_draw_records_bound_texture() {
        let device = HeadlessDevice::default();
        let image = ImageData::solid(1, 1, [255, 0, 0]);
        let texture = device
            .create_texture(&image, SamplerOptions::default())
            .unwrap();
        let program = device.create_program("base").unwrap();
        let buffer = device.create_buffer(&[]).unwrap();
        let binding = VertexBinding {
            position: buffer,
            normal: buffer,
            uv: buffer,
        };

        device.bind_texture(0, texture);
        device.draw(program, binding, 0..3, DrawMode::Triangles);
        device.release_texture(texture);
        device.draw(program, binding, 3..6, DrawMode::Lines);

        let draws = device.take_draws();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].texture, Some(texture));
        assert_eq!(draws[1].texture, None);
        assert_eq!(draws[1].range, 3..6);
        assert!(device.draws().is_empty());
        assert_eq!(device.program_name(program).as_deref(), Some("base"));
    }

    #[test]
    fn test_draw_log_is_capped() {
        let device = HeadlessDevice::default();
        let program = device.create_program("base").unwrap();
        let buffer = device.create_buffer(&[]).unwrap();
        let binding = VertexBinding {
            position: buffer,
            normal: buffer,
            uv: buffer,
        };

        for i in 0..DRAW_LOG_LIMIT + 10 {
            device.draw(program, binding, i..i + 3, DrawMode::Triangles);
        }
        let draws = device.draws();
        assert_eq!(draws.len(), DRAW_LOG_LIMIT);
        assert_eq!(draws[0].range, 10..13);

        device.set_draw_limit(2);
        let draws = device.take_draws();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[1].range, DRAW_LOG_LIMIT + 9..DRAW_LOG_LIMIT + 12);
    }

    #[test]
    fn test_memory_loader() {
        let loader = MemoryTextureLoader::default().with("a.png", ImageData::solid(1, 1, [0; 3]));
        assert!(loader.load_image(Path::new("a.png")).is_ok());
        assert!(matches!(
            loader.load_image(Path::new("b.png")),
            Err(GraphicsError::Io(_))
        ));
    }
}
