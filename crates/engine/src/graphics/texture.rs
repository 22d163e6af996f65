use std::path::Path;
use std::rc::Rc;

use log::debug;

use super::context::RendererContext;
use super::device::{GraphicsDevice, SamplerOptions, TextureHandle};
use super::error::{GraphicsError, GraphicsResult};

/// Tightly packed 8 bit RGB pixels, bottom row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ImageData {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> GraphicsResult<Self> {
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(GraphicsError::InvalidArgument(format!(
                "{}x{} rgb image needs {} bytes, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn solid(width: u32, height: u32, color: [u8; 3]) -> Self {
        let pixels = color
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }
}

pub trait TextureLoader {
    fn load_image(&self, path: &Path) -> GraphicsResult<ImageData>;
}

/// Decodes image files from disk with the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileTextureLoader;

impl TextureLoader for FileTextureLoader {
    fn load_image(&self, path: &Path) -> GraphicsResult<ImageData> {
        // flipped so that row 0 is the bottom row
        let image = image::open(path)?.flipv().to_rgb8();
        let (width, height) = image.dimensions();
        Ok(ImageData {
            width,
            height,
            pixels: image.into_raw(),
        })
    }
}

/// A 2D texture or cubemap on the device, released when dropped.
pub struct Texture {
    device: Rc<dyn GraphicsDevice>,
    handle: TextureHandle,
}

impl Drop for Texture {
    fn drop(&mut self) {
        self.device.release_texture(self.handle);
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Texture({})", self.handle.0)
    }
}

impl Texture {
    pub fn new(
        device: &Rc<dyn GraphicsDevice>,
        image: &ImageData,
        sampler: SamplerOptions,
    ) -> GraphicsResult<Self> {
        let handle = device.create_texture(image, sampler)?;
        Ok(Self {
            device: Rc::clone(device),
            handle,
        })
    }

    pub fn from_file(
        context: &RendererContext,
        path: &Path,
        sampler: SamplerOptions,
    ) -> GraphicsResult<Self> {
        if path.as_os_str().is_empty() {
            return Err(GraphicsError::InvalidArgument(
                "texture path is empty".to_string(),
            ));
        }

        debug!("Loading texture: {}", path.display());
        let image = context.load_image(path)?;
        Self::new(context.device(), &image, sampler)
    }

    /// Builds a cubemap from six square faces in +X, -X, +Y, -Y, +Z, -Z order.
    pub fn cubemap(device: &Rc<dyn GraphicsDevice>, faces: &[ImageData; 6]) -> GraphicsResult<Self> {
        let size = faces[0].width;
        let mut pixels = Vec::with_capacity(faces.iter().map(|f| f.pixels.len()).sum());

        for face in faces {
            if face.width != size || face.height != size {
                return Err(GraphicsError::InvalidArgument(format!(
                    "cubemap faces must be {}x{}, found {}x{}",
                    size, size, face.width, face.height
                )));
            }
            pixels.extend_from_slice(&face.pixels);
        }

        let handle = device.create_cubemap(size, &pixels)?;
        Ok(Self {
            device: Rc::clone(device),
            handle,
        })
    }

    pub fn bind(&self, unit: u32) {
        self.device.bind_texture(unit, self.handle);
    }

    pub fn handle(&self) -> TextureHandle {
        self.handle
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_image_data_size_is_checked() {
        assert!(ImageData::new(2, 2, vec![0; 12]).is_ok());
        assert!(matches!(
            ImageData::new(2, 2, vec![0; 11]),
            Err(GraphicsError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_solid_image() {
        let image = ImageData::solid(2, 1, [1, 2, 3]);
        assert_eq!(image.pixels, vec![1, 2, 3, 1, 2, 3]);
    }
}
