//! A small real-time 3D engine built around vertex animated,
//! multi-material models.
//!
//! Rendering goes through the [`graphics::GraphicsDevice`] trait, so the
//! crate can be driven by any backend, or by [`graphics::HeadlessDevice`]
//! without a window.

#[macro_use]
mod profiler_macros;

pub mod core;
pub mod graphics;
pub mod scene;
pub mod startup;

pub use gs_format as format;

pub mod prelude {
    pub use crate::core::camera::Camera;
    pub use crate::core::engine::Engine;
    pub use crate::core::gameloop::{FrameInfo, Platform, SceneHooks};
    pub use crate::core::time::{Clock, ManualClock, SystemClock};
    pub use crate::graphics::{
        FileTextureLoader, GraphicsDevice, GraphicsError, GraphicsResult, HeadlessDevice,
        RendererContext,
    };
    pub use crate::scene::collision::{Collider, Intersection, MeshTestMode};
    pub use crate::scene::entity::Entity;
    pub use crate::scene::light::Light;
    pub use crate::scene::model::{Model, ModelOptions, TextureSource};
    pub use crate::scene::skybox::Skybox;
    pub use crate::scene::Scene;
    pub use crate::startup::{init_logging, EngineConfig};
    pub use gfx_maths::*;
}
