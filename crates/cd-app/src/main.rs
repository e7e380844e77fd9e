//! Main application entry point

use std::path::Path;

use anyhow::Result;
use eframe::egui;
use tracing::{error, info};

mod app;
mod config;

use app::{DashboardApp, Resources};
use config::{AppConfig, CONFIG_FILE};

fn main() -> Result<()> {
    let config = AppConfig::load(Path::new(CONFIG_FILE))?;
    
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();
    
    info!("Starting {}", config.window.title);
    
    // Nothing renders unless every dataset and the stylesheet are readable
    let resources = match Resources::load(&config) {
        Ok(resources) => resources,
        Err(e) => {
            error!("{:#}", e);
            return Err(e);
        }
    };
    
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window.title.clone())
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([900.0, 600.0]),
        default_theme: eframe::Theme::Light,
        ..Default::default()
    };
    
    let title = config.window.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            Box::new(DashboardApp::new(cc, resources, &config))
        }),
    ).map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;
    
    Ok(())
}
