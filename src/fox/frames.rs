use glam::IVec2;

/// Width of one sprite cell on the sheet, in pixels.
pub const SPRITE_WIDTH: i32 = 32;
/// Height of one sprite cell on the sheet, in pixels.
pub const SPRITE_HEIGHT: i32 = 32;

/// Source rectangle of one animation frame on the sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRect {
    pub min: IVec2,
    pub max: IVec2,
}

/// Lay out `frame_count` cells left to right along sheet row `row`.
///
/// Every frame shares the vertical span `row * SPRITE_HEIGHT ..
/// row_offset * SPRITE_HEIGHT`; callers pass `row + 1` for a single row.
/// A zero count gives an empty table.
pub fn generate_frames(frame_count: usize, row: i32, row_offset: i32) -> Vec<FrameRect> {
    (0..frame_count as i32)
        .map(|i| FrameRect {
            min: IVec2::new(i * SPRITE_WIDTH, row * SPRITE_HEIGHT),
            max: IVec2::new((i + 1) * SPRITE_WIDTH, row_offset * SPRITE_HEIGHT),
        })
        .collect()
}
