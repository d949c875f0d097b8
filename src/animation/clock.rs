use crate::foundation::core::{Fps, FrameIndex};

/// Outcome of advancing one animation by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    /// More frames are needed.
    Running,
    /// Finished; the scheduler drops it from the active set.
    Done,
}

/// Monotonic frame counter advanced once per rendered frame.
///
/// Every stepper reads time exclusively through this clock, so a host that never ticks
/// never animates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameClock {
    current: FrameIndex,
    fps: Fps,
}

impl FrameClock {
    /// Clock at frame 0 ticking at `fps`.
    pub fn new(fps: Fps) -> Self {
        Self {
            current: FrameIndex(0),
            fps,
        }
    }

    /// Advance by `increment` frames and return the new frame.
    pub fn tick(&mut self, increment: u64) -> FrameIndex {
        self.current = FrameIndex(self.current.0.saturating_add(increment));
        self.current
    }

    /// Current frame.
    pub fn get(&self) -> FrameIndex {
        self.current
    }

    /// Frames elapsed since `reference` (negative if `reference` is ahead of the clock).
    pub fn get_delta(&self, reference: FrameIndex) -> i64 {
        self.current.delta_from(reference)
    }

    /// Configured ticks per second.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Convert a duration in seconds to frames at this clock's rate.
    pub fn secs_to_frames(&self, secs: f64) -> f64 {
        self.fps.secs_to_frames(secs)
    }

    /// Force the counter to `frame`. Debug and test hook; breaks monotonicity.
    pub fn reset_to(&mut self, frame: FrameIndex) {
        tracing::debug!(from = self.current.0, to = frame.0, "frame clock reset");
        self.current = frame;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
