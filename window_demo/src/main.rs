//! Window demo
//!
//! Opens one window and runs the polling loop until it is closed. Escape quits
//! every window at once. On platforms without a native host the demo runs
//! against the headless host and replays a short scripted session instead.
//!
//! Usage: `window_demo [config.toml|config.ron]`

use std::time::Duration;
use zketch::message::{codes, make_param};
use zketch::prelude::*;
use zketch::{HeadlessHost, HostError, NativeMessage, WindowError};

const DEFAULT_CONFIG: &str = "window_demo.toml";
const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("configuration: {0}")]
    Config(#[from] zketch::ConfigError),

    #[error("host: {0}")]
    Host(#[from] HostError),

    #[error("window: {0}")]
    Window(#[from] WindowError),
}

fn main() {
    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), DemoError> {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = AppConfig::load_or_default(&path)?;
    zketch::logging::init_with_level(&config.log_level);

    let (app, script) = match Application::native(&config) {
        Ok(app) => (app, None),
        Err(HostError::Unsupported) => {
            log::warn!("No native window host on this platform, running headless");
            let (app, host) = Application::headless(&config);
            (app, Some(host))
        }
        Err(e) => return Err(e.into()),
    };

    app.register_window_class()?;

    let mut window = Window::new(&app, &config.window)?;
    // A window that cannot be refreshed is still usable.
    if let Err(e) = window.set_show_mode(ShowMode::Show) {
        log::error!("{e}");
    }

    if let Some(host) = &script {
        play_script(host, window.handle(), config.window.size);
    }

    while app.is_running() {
        while let Some(event) = app.poll_event() {
            handle_event(&app, &mut window, &event);
        }
        if script.is_some() && app.is_running() {
            // Headless sessions end once the script is exhausted.
            break;
        }
        std::thread::sleep(FRAME);
    }

    log::info!("Window demo finished");
    Ok(())
}

fn handle_event(app: &Application, window: &mut Window, event: &Event) {
    match event.kind() {
        EventKind::Window => {
            let Some(data) = event.window_data() else { return };
            match data.kind() {
                WindowEventKind::Close => window.close(),
                WindowEventKind::Resize => {
                    log::info!("Resized to {}x{}", data.size().width, data.size().height);
                }
                _ => {}
            }
        }
        EventKind::Mouse => {
            let Some(data) = event.mouse_data() else { return };
            match data.kind() {
                MouseEventKind::Wheel => log::debug!("Wheel {}", data.wheel_delta()),
                MouseEventKind::Move => {}
                kind => log::debug!("{kind:?} {:?} at {:?}", data.button(), data.position()),
            }
        }
        EventKind::Key => {
            let Some(data) = event.key_data() else { return };
            if data.kind() == KeyEventKind::Down && data.code() == KeyCode::Escape {
                app.quit_program();
            } else {
                log::trace!("{:?} {:?}", data.kind(), data.code());
            }
        }
        EventKind::None => {}
    }
}

fn play_script(host: &HeadlessHost, handle: WindowHandle, size: Size) {
    let center = make_param(size.width / 2, size.height / 2);
    host.post_message(NativeMessage::new(handle, codes::WM_MOUSEMOVE, 0, center));
    host.post_message(NativeMessage::new(handle, codes::WM_LBUTTONDOWN, 0, center));
    host.post_message(NativeMessage::new(handle, codes::WM_LBUTTONUP, 0, center));
    let space = usize::from(KeyCode::Space.virtual_key());
    host.post_message(NativeMessage::new(handle, codes::WM_KEYDOWN, space, 0));
    host.post_message(NativeMessage::new(handle, codes::WM_CLOSE, 0, 0));
}
