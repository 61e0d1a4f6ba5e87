use super::frames::FrameRect;
use crate::error::DeskfoxError;

/// Frame clock for one fox state.
///
/// The counter only moves while the owning state is active, so coming back
/// to a state picks the cycle up where it was left.
#[derive(Debug, Clone)]
pub struct Animation {
    frames: Vec<FrameRect>,
    /// Ticks each frame stays on screen.
    frame_speed: u32,
    ticks: u64,
    current: FrameRect,
}

impl Animation {
    pub fn new(
        name: &'static str,
        frames: Vec<FrameRect>,
        frame_speed: u32,
    ) -> Result<Self, DeskfoxError> {
        let Some(&first) = frames.first() else {
            return Err(DeskfoxError::EmptyAnimation(name));
        };
        if frame_speed == 0 {
            return Err(DeskfoxError::ZeroFrameSpeed(name));
        }

        Ok(Self {
            frames,
            frame_speed,
            ticks: 0,
            current: first,
        })
    }

    /// Advance by one tick and select the frame for it.
    pub fn update(&mut self) {
        let frame_count = self.frames.len() as u64;
        let index = (self.ticks / self.frame_speed as u64) % frame_count;
        self.current = self.frames[index as usize];
        self.ticks += 1;
    }

    pub fn current_frame(&self) -> FrameRect {
        self.current
    }

    #[cfg(test)]
    pub fn frames(&self) -> &[FrameRect] {
        &self.frames
    }

    /// Ticks consumed so far.
    #[cfg(test)]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
