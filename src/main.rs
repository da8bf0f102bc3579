use adw::prelude::*;
use adw::Application;

fn main() {
    let state = quicksms::app::AppState::load_or_init();
    quicksms::logging::init_logging(&state.log_level);

    let app = Application::builder()
        .application_id("com.example.QuickSms")
        .build();
    app.connect_activate(move |app| {
        quicksms::ui::build_ui(app, state.clone());
    });
    app.run();
}
