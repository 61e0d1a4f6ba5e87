use crate::error::DeskfoxError;
use crate::fox;

/// The fox sprite sheet, one row per state, 32x32 cells.
static FOX_PNG: &[u8] = include_bytes!("../assets/fox.png");

/// Decoded RGBA8 sprite sheet ready for upload.
pub struct SpriteSheet {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl SpriteSheet {
    /// Decode the sheet compiled into the binary.
    pub fn embedded() -> Result<Self, DeskfoxError> {
        Self::decode(FOX_PNG)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DeskfoxError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();

        let (need_width, need_height) = fox::sheet_extent();
        if width < need_width || height < need_height {
            return Err(DeskfoxError::SheetTooSmall {
                width,
                height,
                need_width,
                need_height,
            });
        }

        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }
}
