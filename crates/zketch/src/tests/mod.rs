//! End-to-end tests over the headless host

mod polling;

use crate::config::AppConfig;
use crate::geometry::Size;
use crate::host::headless::HeadlessHost;
use crate::window::Window;
use crate::Application;

fn setup() -> (Application, HeadlessHost) {
    let (app, host) = Application::headless(&AppConfig::default());
    app.register_window_class().expect("class registration");
    (app, host)
}

fn open(app: &Application, title: &str) -> Window {
    Window::with_size(app, title, Size::new(600, 400)).expect("window")
}
