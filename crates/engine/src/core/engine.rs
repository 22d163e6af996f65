use std::rc::Rc;
use std::thread;
use std::time::Duration;

use gfx_maths::*;
use log::{debug, info};

use crate::graphics::{GraphicsDevice, RendererContext};
use crate::scene::Scene;
use crate::startup::EngineConfig;

use super::gameloop::{FrameInfo, FrameStats, Platform, SceneHooks};
use super::time::Clock;

/// Drives a scene: game logic, scene update, draw, statistics.
pub struct Engine {
    pub scene: Scene,
    pub clear_color: Vec3,
    device: Rc<dyn GraphicsDevice>,
    clock: Rc<dyn Clock>,
    min_frame_time: Option<Duration>,
    stats: FrameStats,
    frame: u64,
    start: Duration,
    last_tick: Duration,
}

impl Engine {
    pub fn new(context: &RendererContext, scene: Scene) -> Self {
        let now = context.clock().now();
        Self {
            scene,
            clear_color: Vec3::zero(),
            device: Rc::clone(context.device()),
            clock: Rc::clone(context.clock()),
            min_frame_time: None,
            stats: FrameStats::default(),
            frame: 0,
            start: now,
            last_tick: now,
        }
    }

    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.set_max_fps(config.max_fps);
        self
    }

    /// Caps the frame rate of [`Engine::run`]. `0` removes the cap.
    pub fn set_max_fps(&mut self, max_fps: u32) {
        self.min_frame_time = if max_fps == 0 {
            None
        } else {
            Some(Duration::from_secs(1) / max_fps)
        };
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Runs a single frame.
    pub fn tick(&mut self, hooks: &mut dyn SceneHooks) -> FrameInfo {
        profile_function!();

        let now = self.clock.now();
        let info = FrameInfo {
            frame: self.frame,
            delta: now.saturating_sub(self.last_tick),
            elapsed: now.saturating_sub(self.start),
        };
        self.last_tick = now;

        hooks.update(&mut self.scene, &info);

        self.device.clear(self.clear_color);
        self.scene.update();
        self.scene.render();

        self.stats.push(info.delta);
        self.frame += 1;
        info
    }

    /// Ticks until the platform asks to quit.
    pub fn run(&mut self, platform: &mut dyn Platform, hooks: &mut dyn SceneHooks) {
        info!("Entering main loop");

        while platform.poll_events() {
            let start = self.clock.now();
            self.tick(hooks);
            platform.present();

            #[cfg(feature = "profiler")]
            puffin::GlobalProfiler::lock().new_frame();

            if let Some(min_frame_time) = self.min_frame_time {
                let spent = self.clock.now().saturating_sub(start);
                if spent < min_frame_time {
                    thread::sleep(min_frame_time - spent);
                }
            }

            if self.frame % 600 == 0 {
                debug!(
                    "{:.1} fps, {:.3} ms per frame",
                    self.stats.fps(),
                    self.stats.average_frame_time().as_secs_f64() * 1000.0
                );
            }
        }

        info!("Left main loop after {} frames", self.frame);
    }
}
