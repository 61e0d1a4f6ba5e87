use glam::IVec2;

use crate::error::DeskfoxError;
use crate::fox::Fox;
use crate::systems::{behavior, RandomSource, Stimulus, Viewport};

/// Simulation ticks per second. The dwell timer counts in these.
pub const TICKS_PER_SECOND: u64 = 60;

/// Services the simulation needs from the desktop: where the pointer is,
/// where the window is, and how big things are.
pub trait Host {
    /// Pointer in overlay-local logical pixels, `None` if unknown.
    fn pointer(&self) -> Option<IVec2>;
    fn left_button_down(&self) -> bool;
    fn window_position(&self) -> IVec2;
    fn set_window_position(&mut self, pos: IVec2);
    fn screen_width(&self) -> i32;
    fn window_width(&self) -> i32;
}

/// One running fox plus the clocks that drive it.
pub struct Session {
    pub fox: Fox,
    /// Whole seconds since the last state change that reset it.
    dwell: u32,
    tick_count: u64,
}

impl Session {
    pub fn new(spawn: IVec2) -> Result<Self, DeskfoxError> {
        Ok(Self {
            fox: Fox::new(spawn)?,
            dwell: 0,
            tick_count: 0,
        })
    }

    pub fn dwell(&self) -> u32 {
        self.dwell
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Run one fixed tick: animate, place the window, read input, age the
    /// dwell timer, then let the state machine (and motion) run.
    pub fn tick<H, R>(&mut self, host: &mut H, rng: &mut R)
    where
        H: Host + ?Sized,
        R: RandomSource + ?Sized,
    {
        self.fox.animate();

        host.set_window_position(self.fox.position);

        let stimulus = Stimulus {
            pointer: host.pointer(),
            left_pressed: host.left_button_down(),
        };

        if self.tick_count % TICKS_PER_SECOND == 0 {
            self.dwell += 1;
        }

        let view = Viewport {
            window_x: host.window_position().x,
            screen_width: host.screen_width(),
            overlay_width: host.window_width(),
        };

        behavior::update(&mut self.fox, &mut self.dwell, &stimulus, &view, rng);

        self.tick_count += 1;
    }
}
