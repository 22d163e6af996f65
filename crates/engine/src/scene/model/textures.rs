use std::path::Path;

use gs_format::Frame;
use log::debug;

use crate::graphics::{
    GraphicsError, GraphicsResult, RendererContext, SamplerOptions, Texture,
};

/// Where the textures of a model come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSource<'a> {
    None,
    /// One texture for the whole model.
    File(&'a Path),
    /// One texture per mesh, named by the mesh material inside this directory.
    PerMaterial(&'a Path),
}

impl<'a> From<Option<&'a Path>> for TextureSource<'a> {
    fn from(path: Option<&'a Path>) -> Self {
        match path {
            Some(path) => TextureSource::File(path),
            None => TextureSource::None,
        }
    }
}

#[derive(Debug)]
pub enum TextureSet {
    None,
    Single(Texture),
    /// Bound in the material order of the default frame.
    PerSubmesh(Vec<Texture>),
}

impl TextureSet {
    pub(crate) fn load(
        context: &RendererContext,
        source: TextureSource,
        frame: &Frame,
        sampler: SamplerOptions,
    ) -> GraphicsResult<Self> {
        match source {
            TextureSource::None => Ok(TextureSet::None),
            TextureSource::File(path) => {
                Ok(TextureSet::Single(Texture::from_file(context, path, sampler)?))
            }
            TextureSource::PerMaterial(dir) => {
                let mut textures = Vec::with_capacity(frame.meshes.len());
                for mesh in &frame.meshes {
                    if mesh.material.is_empty() {
                        return Err(GraphicsError::InvalidArgument(
                            "mesh without material cannot get a per material texture".to_string(),
                        ));
                    }
                    debug!("Texture for material `{}`", mesh.material);
                    textures.push(Texture::from_file(context, &dir.join(&mesh.material), sampler)?);
                }
                Ok(TextureSet::PerSubmesh(textures))
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TextureSet::None => 0,
            TextureSet::Single(_) => 1,
            TextureSet::PerSubmesh(textures) => textures.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
