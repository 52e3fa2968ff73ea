mod app;
mod components;
mod inventory;
mod items;

use obs_admin_core::AdminConfig;

fn init_logging() {
    // Default to info level, but allow override via RUST_LOG
    // Example: RUST_LOG=obs_admin_core::api=debug,obs_admin_gui=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "obs_admin_core=info,obs_admin_gui=info".into()),
        )
        .init();
}

fn main() -> iced::Result {
    init_logging();

    let config = AdminConfig::from_env();
    log::info!("Using backend at {}", config.base_url);
    obs_admin_core::initialize(config);

    iced::application("OBS Back Office", app::update, app::view)
        .window_size(iced::Size::new(1280.0, 860.0))
        .run_with(app::initialize)
}
