#[cfg(windows)]
pub mod win32;

use glam::IVec2;

/// Convert a physical pixel offset from the window origin into logical
/// canvas pixels. Floors, so points left of or above the window stay
/// negative.
pub fn to_canvas(offset: IVec2, scale: i32) -> IVec2 {
    IVec2::new(offset.x.div_euclid(scale), offset.y.div_euclid(scale))
}
