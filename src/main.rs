mod app;
mod cli;
mod color;
mod state;
mod ui;

use app::PlaylistInsightsApp;
use clap::Parser;
use cli::Cli;
use eframe::egui;
use playlist_insights::config::DashboardConfig;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let (config, config_error) = match cli.dashboard_config() {
        Ok(config) => (config, None),
        Err(e) => {
            log::error!("Invalid config, using defaults: {e:#}");
            (DashboardConfig::default(), Some(format!("Config error: {e:#}")))
        }
    };

    let mut state = AppState::new(config);
    if let Some(dir) = &cli.data_dir {
        state.load_dir(dir);
    }
    if let Some(msg) = config_error {
        state.push_status(msg);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Playlist Insights – Spotify Playlist Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(PlaylistInsightsApp::new(state)))),
    )
}
