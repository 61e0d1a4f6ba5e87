use glam::IVec2;
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use windows::Win32::Foundation::{HWND, POINT};
use windows::Win32::Graphics::Dwm::{DwmSetWindowAttribute, DWMWINDOWATTRIBUTE};
use windows::Win32::UI::Input::KeyboardAndMouse::GetAsyncKeyState;
use windows::Win32::UI::WindowsAndMessaging::{
    GetCursorPos, GetWindowLongPtrW, SetWindowLongPtrW, SetWindowPos, GWL_EXSTYLE,
    SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, WS_EX_TOOLWINDOW,
};

const VK_LBUTTON: i32 = 0x01;
/// High bit of `GetAsyncKeyState`: key is down right now.
const KEY_HELD: i16 = 0x8000u16 as i16;

/// Extract the Win32 HWND from a winit window.
fn get_hwnd(window: &winit::window::Window) -> Option<HWND> {
    let handle = window.window_handle().ok()?;
    match handle.as_raw() {
        RawWindowHandle::Win32(h) => Some(HWND(h.hwnd.get() as *mut core::ffi::c_void)),
        _ => None,
    }
}

fn set_dwm_u32(hwnd: HWND, attribute: i32, value: u32) {
    unsafe {
        let _ = DwmSetWindowAttribute(
            hwnd,
            DWMWINDOWATTRIBUTE(attribute),
            &value as *const u32 as *const core::ffi::c_void,
            std::mem::size_of::<u32>() as u32,
        );
    }
}

/// Apply overlay styles: no taskbar button, no DWM frame, no GDI
/// redirection surface. The window stays clickable.
unsafe fn make_overlay(hwnd: HWND) {
    // winit's with_transparent sets WS_EX_LAYERED, which fights the
    // DirectComposition visual wgpu presents through.
    const WS_EX_LAYERED: isize = 0x00080000;
    const WS_EX_NOREDIRECTIONBITMAP: isize = 0x00200000;

    let style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);
    let new_style =
        (style & !WS_EX_LAYERED) | WS_EX_TOOLWINDOW.0 as isize | WS_EX_NOREDIRECTIONBITMAP;
    SetWindowLongPtrW(hwnd, GWL_EXSTYLE, new_style);
    log::debug!("Window ex-style 0x{:08X} -> 0x{:08X}", style, new_style);

    let _ = SetWindowPos(
        hwnd,
        HWND::default(),
        0,
        0,
        0,
        0,
        SWP_FRAMECHANGED | SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
    );

    // DWMWA_NCRENDERING_POLICY = DWMNCRP_DISABLED
    set_dwm_u32(hwnd, 2, 2);
    // DWMWA_WINDOW_CORNER_PREFERENCE = DWMWCP_DONOTROUND
    set_dwm_u32(hwnd, 33, 1);
    // DWMWA_BORDER_COLOR = DWMWA_COLOR_NONE
    set_dwm_u32(hwnd, 34, 0xFFFF_FFFE);
    // DWMWA_SYSTEMBACKDROP_TYPE = DWMSBT_NONE
    set_dwm_u32(hwnd, 38, 1);
}

/// Turn the fox window into a borderless tool-window overlay.
pub fn setup_overlay(window: &winit::window::Window) {
    let Some(hwnd) = get_hwnd(window) else {
        log::warn!("No Win32 handle for overlay window, skipping style setup");
        return;
    };
    unsafe {
        make_overlay(hwnd);
    }
    log::info!("Win32 overlay setup complete");
}

/// Global cursor position in screen pixels.
pub fn cursor_position() -> IVec2 {
    let mut point = POINT::default();
    unsafe {
        let _ = GetCursorPos(&mut point);
    }
    IVec2::new(point.x, point.y)
}

/// Left mouse button held, wherever the cursor is.
pub fn is_left_button_down() -> bool {
    unsafe { GetAsyncKeyState(VK_LBUTTON) & KEY_HELD != 0 }
}
