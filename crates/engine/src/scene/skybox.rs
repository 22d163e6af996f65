use std::path::Path;
use std::rc::Rc;

use gs_format::Frame;
use log::{info, warn};

use crate::core::camera::Camera;
use crate::graphics::{
    DrawMode, GraphicsDevice, GraphicsError, GraphicsResult, ImageData, ProgramHandle,
    RendererContext, Texture, Uniform, VertexBuffers,
};

use super::geometry;

const FACE_NAMES: [&str; 6] = ["right", "left", "top", "bottom", "back", "front"];

/// Cubemap slot of a face alias. Slots follow +X, -X, +Y, -Y, +Z, -Z.
pub fn face_slot(alias: &str) -> Option<usize> {
    match alias.to_lowercase().as_str() {
        "right" | "+x" | "x+" | "posx" | "xpos" => Some(0),
        "left" | "-x" | "x-" | "negx" | "xneg" => Some(1),
        "top" | "+y" | "y+" | "posy" | "ypos" => Some(2),
        "bottom" | "-y" | "y-" | "negy" | "yneg" => Some(3),
        "back" | "+z" | "z+" | "posz" | "zpos" => Some(4),
        "front" | "-z" | "z-" | "negz" | "zneg" => Some(5),
        _ => None,
    }
}

/// A camera centered cube drawn behind everything else.
pub struct Skybox {
    device: Rc<dyn GraphicsDevice>,
    program: ProgramHandle,
    buffers: VertexBuffers,
    cubemap: Texture,
}

impl Skybox {
    /// `faces` maps aliases such as `top`, `+y` or `negx` to image files.
    pub fn new(context: &RendererContext, faces: &[(&str, &Path)]) -> GraphicsResult<Self> {
        let mut paths: [Option<&Path>; 6] = [None; 6];
        for (alias, path) in faces {
            match face_slot(alias) {
                Some(slot) => paths[slot] = Some(*path),
                None => warn!("Ignoring unknown skybox face `{}`", alias),
            }
        }

        let mut images = Vec::with_capacity(6);
        for (slot, path) in paths.iter().copied().enumerate() {
            let path = path.ok_or_else(|| {
                GraphicsError::InvalidArgument(format!(
                    "skybox face `{}` is missing",
                    FACE_NAMES[slot]
                ))
            })?;
            images.push(context.load_image(path)?);
        }
        let images: [ImageData; 6] = images
            .try_into()
            .map_err(|_| GraphicsError::InvalidArgument("skybox needs six faces".to_string()))?;

        let program = context.program("skybox")?;
        let cubemap = Texture::cubemap(context.device(), &images)?;

        let frame = Frame {
            name: "skybox".to_string(),
            meshes: vec![geometry::cube(1.0, false)?],
            ..Frame::default()
        };
        let buffers = VertexBuffers::new(context.device(), &frame)?;

        info!("Created skybox with {}px faces", images[0].width);
        Ok(Self {
            device: Rc::clone(context.device()),
            program,
            buffers,
            cubemap,
        })
    }

    pub fn update(&self, camera: &Camera) {
        self.device.set_uniform(
            self.program,
            "u_projection",
            Uniform::Mat4(camera.projection_matrix()),
        );
        self.device.set_uniform(
            self.program,
            "u_view",
            Uniform::Mat4(camera.rotation_view_matrix()),
        );
    }

    pub fn render(&self) {
        self.device.set_depth_test(false);
        self.cubemap.bind(0);
        self.device.draw(
            self.program,
            self.buffers.binding(),
            0..self.buffers.vertex_count(),
            DrawMode::Triangles,
        );
        self.device.set_depth_test(true);
    }

    pub fn cubemap(&self) -> &Texture {
        &self.cubemap
    }
}
