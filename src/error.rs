use thiserror::Error;

/// Everything that can stop the fox from appearing on screen.
#[derive(Debug, Error)]
pub enum DeskfoxError {
    /// The embedded sprite sheet is not a valid image.
    #[error("failed to decode sprite sheet: {0}")]
    SpriteDecode(#[from] image::ImageError),

    /// The sprite sheet decoded but cannot hold every animation row.
    #[error("sprite sheet is {width}x{height}, frame layout needs at least {need_width}x{need_height}")]
    SheetTooSmall {
        width: u32,
        height: u32,
        need_width: u32,
        need_height: u32,
    },

    /// An animation was built without frames.
    #[error("animation `{0}` has no frames")]
    EmptyAnimation(&'static str),

    /// An animation was built with a zero ticks-per-frame divisor.
    #[error("animation `{0}` has a zero frame speed")]
    ZeroFrameSpeed(&'static str),

    #[error("no monitor found")]
    NoMonitor,

    #[error(transparent)]
    Window(#[from] winit::error::OsError),

    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create wgpu surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create wgpu device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
