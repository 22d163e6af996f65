use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use log::debug;

use crate::core::time::Clock;

use super::device::{GraphicsDevice, ProgramHandle};
use super::error::GraphicsResult;
use super::texture::{ImageData, TextureLoader};

/// Default time between two animation frames (about 24 fps).
pub const DEFAULT_PLAYBACK_INTERVAL: Duration = Duration::from_millis(41);

/// Everything a model needs to create its resources. Handed by reference to
/// every constructor.
pub struct RendererContext {
    device: Rc<dyn GraphicsDevice>,
    loader: Box<dyn TextureLoader>,
    clock: Rc<dyn Clock>,
    programs: RefCell<HashMap<String, ProgramHandle>>,
    playback_interval: Duration,
}

impl RendererContext {
    pub fn new(
        device: Rc<dyn GraphicsDevice>,
        loader: Box<dyn TextureLoader>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            device,
            loader,
            clock,
            programs: RefCell::new(HashMap::new()),
            playback_interval: DEFAULT_PLAYBACK_INTERVAL,
        }
    }

    pub fn with_playback_interval(mut self, interval: Duration) -> Self {
        self.playback_interval = interval;
        self
    }

    pub fn device(&self) -> &Rc<dyn GraphicsDevice> {
        &self.device
    }

    pub fn clock(&self) -> &Rc<dyn Clock> {
        &self.clock
    }

    pub fn playback_interval(&self) -> Duration {
        self.playback_interval
    }

    pub fn load_image(&self, path: &Path) -> GraphicsResult<ImageData> {
        self.loader.load_image(path)
    }

    /// Looks up a shader program by name, creating it on first use.
    pub fn program(&self, name: &str) -> GraphicsResult<ProgramHandle> {
        if let Some(program) = self.programs.borrow().get(name) {
            return Ok(*program);
        }

        debug!("Creating program `{}`", name);
        let program = self.device.create_program(name)?;
        self.programs.borrow_mut().insert(name.to_string(), program);
        Ok(program)
    }
}
