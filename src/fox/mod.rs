pub mod animation;
pub mod frames;

use glam::IVec2;

use self::animation::Animation;
use self::frames::{generate_frames, FrameRect, SPRITE_HEIGHT, SPRITE_WIDTH};
use crate::error::DeskfoxError;

/// Ticks each animation frame stays on screen.
const FRAME_SPEED: u32 = 15;
/// Starting speed; only its sign is read, to pick the facing direction.
const INITIAL_SPEED: i32 = 2;
/// Starting per-tick displacement while trotting or pouncing.
const INITIAL_POUNCE_SPEED: i32 = 1;

/// What the fox is doing. The discriminant is its row on the sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FoxState {
    Idle = 0,
    LookBehind = 1,
    Trotting = 2,
    Pouncing = 3,
    Shocked = 4,
    Sleeping = 5,
    Dying = 6,
}

impl FoxState {
    pub const ALL: [FoxState; 7] = [
        Self::Idle,
        Self::LookBehind,
        Self::Trotting,
        Self::Pouncing,
        Self::Shocked,
        Self::Sleeping,
        Self::Dying,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::LookBehind => "LookBehind",
            Self::Trotting => "Trotting",
            Self::Pouncing => "Pouncing",
            Self::Shocked => "Shocked",
            Self::Sleeping => "Sleeping",
            Self::Dying => "Dying",
        }
    }

    /// Number of frames drawn on this state's sheet row.
    pub fn frame_count(self) -> usize {
        match self {
            Self::Idle => 5,
            Self::LookBehind => 14,
            Self::Trotting => 8,
            Self::Pouncing => 11,
            Self::Shocked => 5,
            Self::Sleeping => 6,
            Self::Dying => 7,
        }
    }

    pub fn row(self) -> i32 {
        self as i32
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Smallest sheet (width, height) in pixels that holds every animation row.
pub fn sheet_extent() -> (u32, u32) {
    let widest = FoxState::ALL
        .iter()
        .map(|s| s.frame_count())
        .max()
        .unwrap_or(0) as u32;
    (
        widest * SPRITE_WIDTH as u32,
        FoxState::ALL.len() as u32 * SPRITE_HEIGHT as u32,
    )
}

/// The creature: current state, one animation per state, and where it is.
pub struct Fox {
    state: FoxState,
    animations: Vec<Animation>,
    /// Top-left of the overlay window in screen pixels.
    pub position: IVec2,
    /// Only the sign matters: negative means the sprite is mirrored.
    pub speed: i32,
    /// Horizontal step per tick while trotting or pouncing.
    pub pounce_speed: i32,
}

impl Fox {
    pub fn new(position: IVec2) -> Result<Self, DeskfoxError> {
        let animations = FoxState::ALL
            .iter()
            .map(|&state| {
                Animation::new(
                    state.label(),
                    generate_frames(state.frame_count(), state.row(), state.row() + 1),
                    FRAME_SPEED,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            state: FoxState::Idle,
            animations,
            position,
            speed: INITIAL_SPEED,
            pounce_speed: INITIAL_POUNCE_SPEED,
        })
    }

    /// Where the fox starts: horizontally centered, one window plus one
    /// sprite above the bottom of the screen.
    pub fn spawn_position(screen: IVec2, overlay: IVec2) -> IVec2 {
        IVec2::new(screen.x / 2, screen.y - overlay.y - SPRITE_HEIGHT)
    }

    pub fn state(&self) -> FoxState {
        self.state
    }

    pub fn set_state(&mut self, next: FoxState) {
        if next != self.state {
            log::debug!("fox: {} -> {}", self.state.label(), next.label());
        }
        self.state = next;
    }

    /// Advance the active state's animation by one tick. Other states keep
    /// their counters.
    pub fn animate(&mut self) {
        self.animations[self.state.index()].update();
    }

    pub fn animation(&self, state: FoxState) -> &Animation {
        &self.animations[state.index()]
    }

    pub fn current_frame(&self) -> FrameRect {
        self.animation(self.state).current_frame()
    }

    pub fn faces_left(&self) -> bool {
        self.speed < 0
    }
}
