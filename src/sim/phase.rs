//! Phase-based animation
//!
//! A plane's phase is derived from its health: full health loops the normal
//! frames, partial health shows the hurt frame, zero health plays the destroy
//! frames once. The step after the last destroy frame reports `Finished`, and
//! only then may the owner reset the plane.

use serde::{Deserialize, Serialize};

/// Lifecycle stage derived from health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Normal,
    Hurt,
    Destroying,
}

impl Phase {
    pub fn of(hp: i32, max_hp: i32) -> Self {
        if hp >= max_hp {
            Phase::Normal
        } else if hp > 0 {
            Phase::Hurt
        } else {
            Phase::Destroying
        }
    }
}

/// The frame currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frame {
    Normal(u8),
    Hurt,
    Destroy(u8),
}

/// Frame counts for one sprite kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSet {
    pub normal: u8,
    pub destroy: u8,
}

/// Outcome of one animation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStep {
    /// A frame was selected
    Shown,
    /// The destroy sequence has been fully shown; the plane must reset
    Finished,
}

/// Animation cursor of a plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    pub frames: FrameSet,
    normal_index: u8,
    destroy_index: u8,
    frame: Frame,
}

impl Animation {
    pub fn new(frames: FrameSet) -> Self {
        Self {
            frames,
            normal_index: 0,
            destroy_index: 0,
            frame: Frame::Normal(0),
        }
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Destroy frames shown so far
    pub fn destroy_progress(&self) -> u8 {
        self.destroy_index
    }

    /// Advance one animation step for the given health
    pub fn advance(&mut self, hp: i32, max_hp: i32) -> PhaseStep {
        match Phase::of(hp, max_hp) {
            Phase::Normal => {
                self.frame = Frame::Normal(self.normal_index);
                let count = self.frames.normal.max(1);
                self.normal_index = (self.normal_index + 1) % count;
                PhaseStep::Shown
            }
            Phase::Hurt => {
                self.frame = Frame::Hurt;
                PhaseStep::Shown
            }
            Phase::Destroying => {
                if self.destroy_index < self.frames.destroy {
                    self.frame = Frame::Destroy(self.destroy_index);
                    self.destroy_index += 1;
                    PhaseStep::Shown
                } else {
                    PhaseStep::Finished
                }
            }
        }
    }

    /// Back to the first normal frame
    pub fn reset(&mut self) {
        self.normal_index = 0;
        self.destroy_index = 0;
        self.frame = Frame::Normal(0);
    }
}
