use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use env_logger::Env;
use serde::Deserialize;

use crate::core::time::Clock;
use crate::graphics::{GraphicsDevice, GraphicsError, GraphicsResult, RendererContext, TextureLoader};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window_width: u32,
    pub window_height: u32,
    /// `0` for no limit
    pub max_fps: u32,
    pub playback_interval_ms: u64,
    pub texture_dir: PathBuf,
    /// Overrides the build dependent default filter.
    pub log_level: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            max_fps: 60,
            playback_interval_ms: 41,
            texture_dir: PathBuf::from("assets/textures"),
            log_level: None,
        }
    }
}

impl EngineConfig {
    pub fn from_toml(text: &str) -> GraphicsResult<Self> {
        toml::from_str(text).map_err(|e| GraphicsError::Other(anyhow::Error::new(e)))
    }

    pub fn from_file(path: &Path) -> GraphicsResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }

    pub fn playback_interval(&self) -> Duration {
        Duration::from_millis(self.playback_interval_ms)
    }

    pub fn renderer_context(
        &self,
        device: Rc<dyn GraphicsDevice>,
        loader: Box<dyn TextureLoader>,
        clock: Rc<dyn Clock>,
    ) -> RendererContext {
        RendererContext::new(device, loader, clock).with_playback_interval(self.playback_interval())
    }
}

/// Sets up `env_logger`. `RUST_LOG` wins over `level`, which wins over the
/// build default. Later calls are ignored.
pub fn init_logging(level: Option<&str>) {
    #[cfg(debug_assertions)]
    let default = "debug";
    #[cfg(not(debug_assertions))]
    let default = "warn";

    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level.unwrap_or(default)))
        .try_init();
}
