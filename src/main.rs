mod api;
mod app;
mod application;
mod config;
mod domain;
mod ui;
mod utils;

use std::path::Path;

use iced::window;
use tracing::{info, warn};

use crate::config::PresenterConfig;

fn main() -> iced::Result {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aces_download=info".into()),
        )
        .init();

    let config = PresenterConfig::from_env().unwrap_or_else(|e| {
        warn!(error = %e, "falling back to default configuration");
        PresenterConfig::default()
    });
    info!(asset = %config.asset_location, file = %config.file_name, "starting ACES download page");

    let icon = load_icon(&config.icon_path);

    iced::application(
        move || app::DownloadApp::new(config.clone()),
        app::update,
        app::view,
    )
    .subscription(app::subscription)
    .title("ACES Mobile App")
    .window(window::Settings {
        icon,
        ..Default::default()
    })
    .run()
}

fn load_icon(path: &Path) -> Option<window::Icon> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "window icon not loaded");
            return None;
        }
    };

    match image::load_from_memory(&bytes) {
        Ok(img) => {
            let rgba = img.to_rgba8();
            let (width, height) = rgba.dimensions();
            window::icon::from_rgba(rgba.into_raw(), width, height).ok()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "window icon is not a valid image");
            None
        }
    }
}
