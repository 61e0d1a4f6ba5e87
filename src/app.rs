use std::sync::Arc;

use glam::IVec2;
use instant::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowAttributes, WindowId, WindowLevel};

use crate::error::DeskfoxError;
use crate::fox::Fox;
use crate::platform;
use crate::render::GpuState;
use crate::session::{Host, Session, TICKS_PER_SECOND};
use crate::sprite::SpriteSheet;

/// Seconds per simulation tick.
const TICK_RATE: f64 = 1.0 / TICKS_PER_SECOND as f64;
/// Max accumulated time before we clamp (prevents spiral of death).
const MAX_ACCUMULATOR: f64 = 0.25;
/// How often to log FPS (seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;
/// Edge of the logical canvas, one sprite cell.
const CANVAS_SIZE: i32 = 32;
/// Physical pixels per logical canvas pixel.
const WINDOW_SCALE: i32 = 4;
const WINDOW_TITLE: &str = "Deskfox";

// ---------------------------------------------------------------------------
// Frame timing
// ---------------------------------------------------------------------------

struct FrameStats {
    last_log_time: Instant,
    frames: u32,
    worst: f64,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            last_log_time: Instant::now(),
            frames: 0,
            worst: 0.0,
        }
    }

    fn record_frame(&mut self, dt: f64, session: Option<&Session>) {
        self.frames += 1;
        self.worst = self.worst.max(dt);

        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        if elapsed >= FPS_LOG_INTERVAL {
            log::info!(
                "FPS: {:.0} | worst frame: {:.2}ms",
                self.frames as f64 / elapsed,
                self.worst * 1000.0,
            );
            if let Some(s) = session {
                log::debug!(
                    "fox {} for {}s at {:?} | tick {}",
                    s.fox.state().label(),
                    s.dwell(),
                    s.fox.position,
                    s.tick_count(),
                );
            }
            self.last_log_time = Instant::now();
            self.frames = 0;
            self.worst = 0.0;
        }
    }
}

// ---------------------------------------------------------------------------
// Desk: the Host the session talks to
// ---------------------------------------------------------------------------

/// Pointer state tracked from window events.
#[derive(Debug, Default)]
struct PointerState {
    /// Physical pixels from the window's top-left, while inside it.
    #[cfg(not(windows))]
    cursor: Option<IVec2>,
    left_down: bool,
}

/// The overlay window and the screen it lives on.
struct Desk {
    window: Arc<Window>,
    /// Last position handed to the window system.
    placed: IVec2,
    screen: IVec2,
    pointer: PointerState,
}

impl Host for Desk {
    fn pointer(&self) -> Option<IVec2> {
        // Windows lets us see the cursor outside the overlay too.
        #[cfg(windows)]
        let offset = Some(platform::win32::cursor_position() - self.placed);
        #[cfg(not(windows))]
        let offset = self.pointer.cursor;

        offset.map(|o| platform::to_canvas(o, WINDOW_SCALE))
    }

    fn left_button_down(&self) -> bool {
        #[cfg(windows)]
        let global = platform::win32::is_left_button_down();
        #[cfg(not(windows))]
        let global = false;

        self.pointer.left_down || global
    }

    fn window_position(&self) -> IVec2 {
        self.placed
    }

    fn set_window_position(&mut self, pos: IVec2) {
        if pos != self.placed {
            self.window
                .set_outer_position(PhysicalPosition::new(pos.x, pos.y));
            self.placed = pos;
        }
    }

    fn screen_width(&self) -> i32 {
        self.screen.x
    }

    fn window_width(&self) -> i32 {
        self.window.outer_size().width as i32
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Top-level application state.
struct App {
    desk: Option<Desk>,
    gpu: Option<GpuState>,
    session: Option<Session>,

    rng: fastrand::Rng,

    // Fixed timestep
    last_frame_time: Option<Instant>,
    accumulator: f64,

    frame_stats: FrameStats,

    /// Startup error raised inside the event loop, returned from `run`.
    failure: Option<DeskfoxError>,
}

impl App {
    fn new() -> Self {
        Self {
            desk: None,
            gpu: None,
            session: None,
            rng: fastrand::Rng::new(),
            last_frame_time: None,
            accumulator: 0.0,
            frame_stats: FrameStats::new(),
            failure: None,
        }
    }

    /// Decode the sheet, place the fox, open the overlay window.
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), DeskfoxError> {
        let sheet = SpriteSheet::embedded()?;
        log::info!("Sprite sheet decoded: {}x{}", sheet.width, sheet.height);

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
            .ok_or(DeskfoxError::NoMonitor)?;
        let screen_size = monitor.size();
        let screen = IVec2::new(screen_size.width as i32, screen_size.height as i32);

        let overlay = IVec2::splat(CANVAS_SIZE * WINDOW_SCALE);
        let spawn = Fox::spawn_position(screen, overlay);
        let session = Session::new(spawn)?;

        // On Windows transparency comes from DirectComposition, and
        // with_transparent would add WS_EX_LAYERED on top of it.
        let attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_decorations(false)
            .with_resizable(false)
            .with_transparent(cfg!(not(windows)))
            .with_visible(false)
            .with_window_level(WindowLevel::AlwaysOnTop)
            .with_inner_size(PhysicalSize::new(overlay.x as u32, overlay.y as u32))
            .with_position(PhysicalPosition::new(spawn.x, spawn.y));

        let window = Arc::new(event_loop.create_window(attrs)?);

        #[cfg(windows)]
        platform::win32::setup_overlay(&window);

        log::info!(
            "Overlay window created at {:?} on {:?} ({}x{})",
            spawn,
            monitor.name().unwrap_or_default(),
            screen.x,
            screen.y,
        );

        let gpu = GpuState::new(window.clone(), &sheet)?;
        log::info!("wgpu + sprite pipeline initialized");

        event_loop.set_control_flow(ControlFlow::Poll);
        window.set_visible(true);

        self.desk = Some(Desk {
            window,
            placed: spawn,
            screen,
            pointer: PointerState::default(),
        });
        self.gpu = Some(gpu);
        self.session = Some(session);
        Ok(())
    }

    /// Run fixed-timestep simulation ticks.
    fn run_fixed_update(&mut self, dt: f64) {
        let (Some(session), Some(desk)) = (self.session.as_mut(), self.desk.as_mut()) else {
            return;
        };

        self.accumulator = (self.accumulator + dt).min(MAX_ACCUMULATOR);

        while self.accumulator >= TICK_RATE {
            session.tick(desk, &mut self.rng);
            self.accumulator -= TICK_RATE;
        }
    }

    fn render(&mut self) {
        if let (Some(gpu), Some(session)) = (self.gpu.as_mut(), self.session.as_ref()) {
            gpu.render_frame(session.fox.current_frame(), session.fox.faces_left());
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.desk.is_some() {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            self.failure = Some(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(desk) = &self.desk {
            desk.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if is_exit_key(&event.logical_key, event.state.is_pressed()) {
                    log::info!("ESC pressed, exiting");
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            #[cfg(not(windows))]
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(desk) = &mut self.desk {
                    desk.pointer.cursor =
                        Some(IVec2::new(position.x.floor() as i32, position.y.floor() as i32));
                }
            }
            #[cfg(not(windows))]
            WindowEvent::CursorLeft { .. } => {
                if let Some(desk) = &mut self.desk {
                    desk.pointer.cursor = None;
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(desk) = &mut self.desk {
                    desk.pointer.left_down = state.is_pressed();
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                if let Some(last) = self.last_frame_time {
                    let dt = now.duration_since(last).as_secs_f64();
                    self.frame_stats.record_frame(dt, self.session.as_ref());
                    self.run_fixed_update(dt);
                }
                self.last_frame_time = Some(now);

                self.render();
            }
            _ => {}
        }
    }
}

/// Escape quits, but only while the overlay has keyboard focus.
fn is_exit_key(key: &Key, pressed: bool) -> bool {
    pressed && *key == Key::Named(NamedKey::Escape)
}

/// Entry point: create the event loop and run until the fox is closed.
pub fn run() -> Result<(), DeskfoxError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    match app.failure.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
