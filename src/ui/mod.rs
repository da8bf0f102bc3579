pub mod dialogs;
pub mod main_window;
pub mod strings;
pub mod template_list;

use crate::app::AppState;
use crate::utils::RUNTIME;
use adw::Application;
use gtk4::glib;

pub fn build_ui(app: &Application, state: AppState) {
    main_window::show_main_window(app, state);
}

/// Run `fut` on the shared Tokio runtime and hand its output to `on_done`
/// on the GTK main loop.
pub fn run_async_to_main<T, Fut, F>(fut: Fut, on_done: F)
where
    T: Send + 'static,
    Fut: std::future::Future<Output = T> + Send + 'static,
    F: FnOnce(T) + 'static,
{
    let handle = RUNTIME.spawn(fut);
    glib::spawn_future_local(async move {
        match handle.await {
            Ok(value) => on_done(value),
            Err(e) => log::warn!("background task did not finish: {e}"),
        }
    });
}
