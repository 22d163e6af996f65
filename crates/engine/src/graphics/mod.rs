pub mod buffer;
pub mod context;
pub mod device;
pub mod error;
pub mod headless;
pub mod texture;

pub use buffer::{GpuBuffer, VertexBuffers};
pub use context::{RendererContext, DEFAULT_PLAYBACK_INTERVAL};
pub use device::{
    BufferHandle, DrawMode, GraphicsDevice, ProgramHandle, SamplerOptions, TextureHandle,
    Uniform, VertexBinding,
};
pub use error::{GraphicsError, GraphicsResult};
pub use headless::{DrawCall, HeadlessDevice, MemoryTextureLoader, DRAW_LOG_LIMIT};
pub use texture::{FileTextureLoader, ImageData, Texture, TextureLoader};
