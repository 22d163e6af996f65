use std::collections::VecDeque;
use std::time::Duration;

use crate::scene::Scene;

/// Number of frames the statistics average over.
pub const STATS_WINDOW: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    /// Frames completed before this one.
    pub frame: u64,
    pub delta: Duration,
    pub elapsed: Duration,
}

/// Game logic run once per tick, before the scene is updated and drawn.
pub trait SceneHooks {
    fn update(&mut self, scene: &mut Scene, frame: &FrameInfo);
}

impl<F: FnMut(&mut Scene, &FrameInfo)> SceneHooks for F {
    fn update(&mut self, scene: &mut Scene, frame: &FrameInfo) {
        self(scene, frame)
    }
}

/// Window and event handling provided by the host.
pub trait Platform {
    /// Processes pending events, returns `false` once the host wants to quit.
    fn poll_events(&mut self) -> bool;
    fn present(&mut self);
}

/// Frame times of the last [`STATS_WINDOW`] frames.
#[derive(Debug, Default, Clone)]
pub struct FrameStats {
    samples: VecDeque<Duration>,
}

impl FrameStats {
    pub fn push(&mut self, frame_time: Duration) {
        if self.samples.len() == STATS_WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(frame_time);
    }

    pub fn average_frame_time(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        self.samples.iter().sum::<Duration>() / self.samples.len() as u32
    }

    pub fn fps(&self) -> f32 {
        let average = self.average_frame_time().as_secs_f32();
        if average > 0.0 {
            1.0 / average
        } else {
            0.0
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_stats_window() {
        let mut stats = FrameStats::default();
        assert_eq!(stats.fps(), 0.0);

        for _ in 0..STATS_WINDOW {
            stats.push(Duration::from_millis(100));
        }
        for _ in 0..STATS_WINDOW {
            stats.push(Duration::from_millis(20));
        }

        assert_eq!(stats.len(), STATS_WINDOW);
        assert_eq!(stats.average_frame_time(), Duration::from_millis(20));
        assert!((stats.fps() - 50.0).abs() < 1e-3);
    }
}
