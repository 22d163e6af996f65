use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing { looping: bool },
}

/// Frame index and timing of a vertex animation.
///
/// The index only moves in [`Playback::advance`], at most one frame per
/// call and only once `interval` has passed since the last step.
#[derive(Debug, Clone)]
pub struct Playback {
    frame_count: usize,
    frame: usize,
    state: PlaybackState,
    looping: bool,
    interval: Duration,
    last_advance: Duration,
}

impl Playback {
    pub fn new(frame_count: usize, interval: Duration) -> Self {
        Self {
            frame_count: frame_count.max(1),
            frame: 0,
            state: PlaybackState::Stopped,
            looping: false,
            interval,
            last_advance: Duration::ZERO,
        }
    }

    /// Restarts from the first frame.
    pub fn play(&mut self, looping: bool, now: Duration) {
        self.frame = 0;
        self.looping = looping;
        self.state = PlaybackState::Playing { looping };
        self.last_advance = now;
    }

    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    pub fn pause(&mut self) {
        self.stop();
    }

    /// Continues from the current frame with the loop flag of the last `play`.
    pub fn unpause(&mut self) {
        self.state = PlaybackState::Playing {
            looping: self.looping,
        };
    }

    /// Steps to the next frame if playing and the interval has elapsed.
    /// Returns the new index when it changed.
    pub fn advance(&mut self, now: Duration) -> Option<usize> {
        let looping = match self.state {
            PlaybackState::Playing { looping } => looping,
            PlaybackState::Stopped => return None,
        };
        if now.saturating_sub(self.last_advance) < self.interval {
            return None;
        }
        self.last_advance = now;

        let previous = self.frame;
        self.frame += 1;
        if self.frame >= self.frame_count {
            // non looping playback holds the last frame and keeps playing
            self.frame = if looping { 0 } else { self.frame_count - 1 };
        }

        if self.frame != previous {
            Some(self.frame)
        } else {
            None
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing { .. })
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }
}
