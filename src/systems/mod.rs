pub mod behavior;
pub mod movement;

pub use behavior::{RandomSource, Stimulus};
pub use movement::Viewport;
