use std::rc::Rc;

use gs_format::Frame;

use super::device::{BufferHandle, GraphicsDevice, VertexBinding};
use super::error::{GraphicsError, GraphicsResult};

/// A float buffer on the device, released when dropped.
pub struct GpuBuffer {
    device: Rc<dyn GraphicsDevice>,
    handle: BufferHandle,
    size: usize,
}

impl Drop for GpuBuffer {
    fn drop(&mut self) {
        self.device.release_buffer(self.handle);
    }
}

impl GpuBuffer {
    pub fn new(device: &Rc<dyn GraphicsDevice>, data: &[f32]) -> GraphicsResult<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let handle = device.create_buffer(bytes)?;

        Ok(Self {
            device: Rc::clone(device),
            handle,
            size: bytes.len(),
        })
    }

    pub fn write(&mut self, data: &[f32]) -> GraphicsResult<()> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        if bytes.len() > self.size {
            return Err(GraphicsError::Resource(format!(
                "write of {} bytes exceeds buffer size {}",
                bytes.len(),
                self.size
            )));
        }
        self.device.write_buffer(self.handle, bytes)
    }

    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Position, normal and uv buffers of one model.
pub struct VertexBuffers {
    position: GpuBuffer,
    normal: GpuBuffer,
    uv: GpuBuffer,
    vertex_count: usize,
}

impl VertexBuffers {
    pub fn new(device: &Rc<dyn GraphicsDevice>, frame: &Frame) -> GraphicsResult<Self> {
        let position = GpuBuffer::new(device, &frame.concat_vertices())?;
        let normal = GpuBuffer::new(device, &frame.concat_normals())?;
        let uv = GpuBuffer::new(device, &frame.concat_uv_coords())?;

        Ok(Self {
            position,
            normal,
            uv,
            vertex_count: frame.vertex_count(),
        })
    }

    /// Re-uploads positions and normals, arranged in the material order of
    /// `layout`, the frame the buffers were created from. UVs are shared by
    /// every frame of an animation and stay untouched.
    pub fn stream_frame(&mut self, frame: &Frame, layout: &Frame) -> GraphicsResult<()> {
        self.position.write(&frame.concat_vertices_like(layout))?;
        self.normal.write(&frame.concat_normals_like(layout))
    }

    pub fn binding(&self) -> VertexBinding {
        VertexBinding {
            position: self.position.handle(),
            normal: self.normal.handle(),
            uv: self.uv.handle(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }
}
