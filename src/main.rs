mod app;
mod error;
mod fox;
mod platform;
mod render;
mod session;
mod sprite;
mod systems;

fn main() {
    env_logger::init();
    log::info!("Deskfox starting up");

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
