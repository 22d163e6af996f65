use std::fmt::Debug;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use gfx_maths::*;
use gs_format::{load_frame, load_sequence, AnimationSequence, Frame, Mesh};
use log::{error, info};

use crate::core::time::Clock;
use crate::graphics::{
    DrawMode, GraphicsDevice, GraphicsError, GraphicsResult, ProgramHandle, RendererContext,
    SamplerOptions, Uniform, VertexBuffers,
};

use super::geometry;
use super::light::Light;

pub mod playback;
pub mod textures;

pub use playback::{Playback, PlaybackState};
pub use textures::{TextureSet, TextureSource};

// programs that read the light uniforms
const LIT_PROGRAMS: [&str; 3] = ["base", "flat", "normal"];
// programs that read `u_color`
const COLOR_PROGRAMS: [&str; 2] = ["flat", "unlitflat"];

#[derive(Debug, Clone)]
pub struct ModelOptions {
    pub program: String,
    pub color: Vec4,
    pub wireframe: bool,
    pub sampler: SamplerOptions,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            program: "base".to_string(),
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            wireframe: false,
            sampler: SamplerOptions::default(),
        }
    }
}

impl ModelOptions {
    pub fn program(mut self, name: &str) -> Self {
        self.program = name.to_string();
        self
    }

    pub fn color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    pub fn wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    pub fn repeat(mut self, repeat: bool) -> Self {
        self.sampler.repeat = repeat;
        self
    }
}

/// Matrices and light a model needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameUniforms<'a> {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub view_position: Vec3,
    pub light: &'a Light,
}

pub enum GeometrySource {
    Static(Frame),
    Animated {
        sequence: Rc<AnimationSequence>,
        playback: Playback,
    },
}

impl GeometrySource {
    /// The frame buffers are laid out for.
    pub fn default_frame(&self) -> &Frame {
        match self {
            GeometrySource::Static(frame) => frame,
            GeometrySource::Animated { sequence, .. } => &sequence.frames()[0],
        }
    }

    pub fn current_frame(&self) -> &Frame {
        match self {
            GeometrySource::Static(frame) => frame,
            GeometrySource::Animated { sequence, playback } => {
                &sequence.frames()[playback.frame()]
            }
        }
    }
}

/// A renderable mesh with its textures and, when animated, its playback.
///
/// All meshes of a frame share one set of vertex buffers. With per submesh
/// textures every material is drawn as its own range of those buffers.
pub struct Model {
    device: Rc<dyn GraphicsDevice>,
    clock: Rc<dyn Clock>,
    program_name: String,
    program: ProgramHandle,
    color: Vec4,
    pub wireframe: bool,
    geometry: GeometrySource,
    textures: TextureSet,
    buffers: VertexBuffers,
}

impl Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("program", &self.program_name)
            .field("vertices", &self.buffers.vertex_count())
            .field("textures", &self.textures.len())
            .field("frames", &self.frame_count())
            .finish()
    }
}

impl Model {
    pub fn from_frame(
        context: &RendererContext,
        frame: Frame,
        textures: TextureSource,
        options: ModelOptions,
    ) -> GraphicsResult<Self> {
        Self::build(context, GeometrySource::Static(frame), textures, options)
    }

    /// A static model drawn with a single texture.
    pub fn from_meshes(
        context: &RendererContext,
        meshes: Vec<Mesh>,
        texture: Option<&Path>,
        options: ModelOptions,
    ) -> GraphicsResult<Self> {
        let frame = Frame {
            meshes,
            ..Frame::default()
        };
        Self::from_frame(context, frame, texture.into(), options)
    }

    pub fn from_frame_file(
        context: &RendererContext,
        path: &Path,
        textures: TextureSource,
        options: ModelOptions,
    ) -> GraphicsResult<Self> {
        let frame = load_frame(path)?;
        Self::from_frame(context, frame, textures, options)
    }

    pub fn plane(
        context: &RendererContext,
        size: f32,
        scale_uv: bool,
        texture: Option<&Path>,
        options: ModelOptions,
    ) -> GraphicsResult<Self> {
        let mesh = geometry::plane(size, scale_uv)?;
        Self::from_meshes(context, vec![mesh], texture, options)
    }

    pub fn cube(
        context: &RendererContext,
        half_size: f32,
        scale_uv: bool,
        texture: Option<&Path>,
        options: ModelOptions,
    ) -> GraphicsResult<Self> {
        let mesh = geometry::cube(half_size, scale_uv)?;
        Self::from_meshes(context, vec![mesh], texture, options)
    }

    /// A static model with one texture per material, loaded from `texture_dir`.
    pub fn multi_material(
        context: &RendererContext,
        frame: Frame,
        texture_dir: &Path,
        options: ModelOptions,
    ) -> GraphicsResult<Self> {
        Self::from_frame(context, frame, TextureSource::PerMaterial(texture_dir), options)
    }

    /// An animated model. Fails before any resource is created if the frames
    /// of the sequence are not interchangeable.
    pub fn from_sequence(
        context: &RendererContext,
        sequence: Rc<AnimationSequence>,
        textures: TextureSource,
        options: ModelOptions,
    ) -> GraphicsResult<Self> {
        sequence.validate()?;

        let playback = Playback::new(sequence.frame_count(), context.playback_interval());
        Self::build(
            context,
            GeometrySource::Animated { sequence, playback },
            textures,
            options,
        )
    }

    pub fn animated(
        context: &RendererContext,
        sequence: Rc<AnimationSequence>,
        texture: Option<&Path>,
        options: ModelOptions,
    ) -> GraphicsResult<Self> {
        Self::from_sequence(context, sequence, texture.into(), options)
    }

    pub fn animated_multi_material(
        context: &RendererContext,
        sequence: Rc<AnimationSequence>,
        texture_dir: &Path,
        options: ModelOptions,
    ) -> GraphicsResult<Self> {
        Self::from_sequence(
            context,
            sequence,
            TextureSource::PerMaterial(texture_dir),
            options,
        )
    }

    pub fn animated_file(
        context: &RendererContext,
        path: &Path,
        texture: Option<&Path>,
        options: ModelOptions,
    ) -> GraphicsResult<Self> {
        let sequence = Rc::new(load_sequence(path)?);
        Self::animated(context, sequence, texture, options)
    }

    pub fn animated_multi_material_file(
        context: &RendererContext,
        path: &Path,
        texture_dir: &Path,
        options: ModelOptions,
    ) -> GraphicsResult<Self> {
        let sequence = Rc::new(load_sequence(path)?);
        Self::animated_multi_material(context, sequence, texture_dir, options)
    }

    // textures are created before buffers, an error in either step drops
    // everything made so far
    fn build(
        context: &RendererContext,
        geometry: GeometrySource,
        textures: TextureSource,
        options: ModelOptions,
    ) -> GraphicsResult<Self> {
        profile_function!();

        let frame = geometry.default_frame();
        if let Some(mesh) = frame.meshes.iter().find(|m| !m.is_well_formed()) {
            return Err(GraphicsError::InvalidArgument(format!(
                "mesh `{}` has mismatched attribute lengths",
                mesh.material
            )));
        }

        let program = context.program(&options.program)?;
        let textures = TextureSet::load(context, textures, frame, options.sampler)?;
        let buffers = VertexBuffers::new(context.device(), frame)?;

        info!(
            "Created model `{}`: {} meshes, {} vertices, {} textures",
            frame.name,
            frame.meshes.len(),
            buffers.vertex_count(),
            textures.len()
        );

        let mut model = Self {
            device: Rc::clone(context.device()),
            clock: Rc::clone(context.clock()),
            program_name: options.program,
            program,
            color: options.color,
            wireframe: options.wireframe,
            geometry,
            textures,
            buffers,
        };
        model.set_color(options.color);
        Ok(model)
    }

    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
        if COLOR_PROGRAMS.contains(&self.program_name.as_str()) {
            self.device
                .set_uniform(self.program, "u_color", Uniform::Vec4(color));
        }
    }

    pub fn color(&self) -> Vec4 {
        self.color
    }

    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    pub fn textures(&self) -> &TextureSet {
        &self.textures
    }

    pub fn buffers(&self) -> &VertexBuffers {
        &self.buffers
    }

    pub fn current_frame(&self) -> &Frame {
        self.geometry.current_frame()
    }

    pub fn current_frame_index(&self) -> usize {
        match &self.geometry {
            GeometrySource::Static(_) => 0,
            GeometrySource::Animated { playback, .. } => playback.frame(),
        }
    }

    pub fn frame_count(&self) -> usize {
        match &self.geometry {
            GeometrySource::Static(_) => 1,
            GeometrySource::Animated { sequence, .. } => sequence.frame_count(),
        }
    }

    pub fn playback(&self) -> Option<&Playback> {
        match &self.geometry {
            GeometrySource::Static(_) => None,
            GeometrySource::Animated { playback, .. } => Some(playback),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playback().map_or(false, Playback::is_playing)
    }

    pub fn is_looping(&self) -> bool {
        self.playback().map_or(false, Playback::is_looping)
    }

    pub fn set_playback_interval(&mut self, interval: Duration) {
        if let GeometrySource::Animated { playback, .. } = &mut self.geometry {
            playback.set_interval(interval);
        }
    }

    /// Starts the animation from its first frame. Static models ignore it.
    pub fn play(&mut self, looping: bool) {
        let now = self.clock.now();
        if let GeometrySource::Animated { sequence, playback } = &mut self.geometry {
            let previous = playback.frame();
            playback.play(looping, now);
            if previous != 0 {
                let frames = sequence.frames();
                stream_frame(&mut self.buffers, &frames[0], &frames[0], 0);
            }
        }
    }

    pub fn stop(&mut self) {
        if let GeometrySource::Animated { playback, .. } = &mut self.geometry {
            playback.stop();
        }
    }

    pub fn pause(&mut self) {
        if let GeometrySource::Animated { playback, .. } = &mut self.geometry {
            playback.pause();
        }
    }

    pub fn unpause(&mut self) {
        if let GeometrySource::Animated { playback, .. } = &mut self.geometry {
            playback.unpause();
        }
    }

    /// Writes the per frame uniforms and steps the animation.
    pub fn update(&mut self, uniforms: &FrameUniforms) {
        profile_function!();

        let device = &self.device;
        device.set_uniform(self.program, "u_model", Uniform::Mat4(uniforms.model));
        device.set_uniform(self.program, "u_view", Uniform::Mat4(uniforms.view));
        device.set_uniform(
            self.program,
            "u_projection",
            Uniform::Mat4(uniforms.projection),
        );

        if LIT_PROGRAMS.contains(&self.program_name.as_str()) {
            let light = uniforms.light;
            device.set_uniform(
                self.program,
                "u_view_position",
                Uniform::Vec3(uniforms.view_position),
            );
            device.set_uniform(self.program, "u_light_position", Uniform::Vec3(light.position));
            device.set_uniform(self.program, "u_light_color", Uniform::Vec3(light.color));
            device.set_uniform(
                self.program,
                "u_ambient_intensity",
                Uniform::Float(light.ambient_intensity),
            );
            device.set_uniform(
                self.program,
                "u_diffuse_intensity",
                Uniform::Float(light.diffuse_intensity),
            );
            device.set_uniform(
                self.program,
                "u_specular_intensity",
                Uniform::Float(light.specular_intensity),
            );
            device.set_uniform(
                self.program,
                "u_specular_power",
                Uniform::Float(light.specular_power),
            );
        }

        self.advance();
    }

    fn advance(&mut self) {
        let now = self.clock.now();
        if let GeometrySource::Animated { sequence, playback } = &mut self.geometry {
            if let Some(index) = playback.advance(now) {
                let frames = sequence.frames();
                if let Some(frame) = frames.get(index) {
                    stream_frame(&mut self.buffers, frame, &frames[0], index);
                }
            }
        }
    }

    pub fn render(&self) {
        profile_function!();

        let mode = if self.wireframe {
            DrawMode::Lines
        } else {
            DrawMode::Triangles
        };
        let binding = self.buffers.binding();

        match &self.textures {
            TextureSet::PerSubmesh(textures) => {
                // buffers and textures both follow the default frame's material order
                let layout = &self.geometry.default_frame().meshes;
                let mut start = 0;
                for (texture, mesh) in textures.iter().zip(layout) {
                    let count = mesh.vertex_count();
                    texture.bind(0);
                    self.device
                        .draw(self.program, binding, start..start + count, mode);
                    start += count;
                }
            }
            TextureSet::Single(texture) => {
                texture.bind(0);
                self.device
                    .draw(self.program, binding, 0..self.buffers.vertex_count(), mode);
            }
            TextureSet::None => {
                self.device
                    .draw(self.program, binding, 0..self.buffers.vertex_count(), mode);
            }
        }
    }
}

// a failed upload leaves the previous frame on screen
fn stream_frame(buffers: &mut VertexBuffers, frame: &Frame, layout: &Frame, index: usize) {
    if let Err(err) = buffers.stream_frame(frame, layout) {
        error!("Failed to upload animation frame {}: {}", index, err);
    }
}
