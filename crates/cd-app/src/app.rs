//! The dashboard application: startup resources, page registration and the frame loop

use anyhow::{Context as _, Result};
use cd_core::{AppState, Page, Router};
use cd_data::{DatasetLoader, Datasets};
use cd_ui::{apply_theme, Sidebar, SidebarStyle, Stylesheet, Theme};
use cd_views::{homepage, CallsBySubtype, CallsInADay};
use eframe::egui::{CentralPanel, Context, Ui};

use crate::config::AppConfig;

/// Everything read from disk before the window opens
pub struct Resources {
    /// Kept for the life of the process so no dataset is ever read twice
    pub loader: DatasetLoader,
    pub datasets: Datasets,
    pub stylesheet: Stylesheet,
}

impl Resources {
    /// Load the datasets and the stylesheet. Any failure aborts startup.
    pub fn load(config: &AppConfig) -> Result<Self> {
        let loader = DatasetLoader::new(config.data.clone());
        let datasets = loader
            .load_all()
            .context("Failed to load the dashboard datasets")?;
        let stylesheet = Stylesheet::load(&config.assets.stylesheet)
            .context("Failed to load the dashboard stylesheet")?;
        
        Ok(Self {
            loader,
            datasets,
            stylesheet,
        })
    }
}

/// Bind every page to its view; the dashboards keep the tables they draw from
pub fn build_router(datasets: &Datasets) -> Router<Ui> {
    let mut router = Router::new();
    
    router.register(Page::Home, |ui: &mut Ui| homepage::show(ui));
    
    let mut calls_in_a_day = CallsInADay::new(datasets.calls.clone(), datasets.neighborhoods.clone());
    router.register(Page::CallsInADay, move |ui: &mut Ui| calls_in_a_day.ui(ui));
    
    let mut calls_by_subtype = CallsBySubtype::new(datasets.calls.clone(), datasets.events.clone());
    router.register(Page::CallsBySubtype, move |ui: &mut Ui| calls_by_subtype.ui(ui));
    
    router
}

/// Main application state
pub struct DashboardApp {
    state: AppState,
    router: Router<Ui>,
    sidebar: Sidebar,
    
    // Owns the cached tables for the life of the window
    _loader: DatasetLoader,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, resources: Resources, config: &AppConfig) -> Self {
        let theme = Theme::from_stylesheet(&resources.stylesheet);
        apply_theme(&cc.egui_ctx, &theme);
        egui_extras::install_image_loaders(&cc.egui_ctx);
        
        Self::with_resources(resources, config, theme)
    }
    
    fn with_resources(resources: Resources, config: &AppConfig, theme: Theme) -> Self {
        let sidebar = Sidebar::new(
            config.logo_uri(),
            config.assets.support_url.clone(),
            SidebarStyle::from_stylesheet(&resources.stylesheet),
            theme,
        );
        
        Self {
            state: AppState::new(),
            router: build_router(&resources.datasets),
            sidebar,
            _loader: resources.loader,
        }
    }
    
    /// One render cycle: sidebar first, then the current page
    fn frame(&mut self, ctx: &Context) -> Option<Page> {
        if self.sidebar.show(ctx, &mut self.state).is_some() {
            ctx.request_repaint();
        }
        
        CentralPanel::default()
            .show(ctx, |ui| self.router.render(&self.state, ui))
            .inner
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.frame(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cd_data::{fixtures, DataConfig, DataError};
    use eframe::egui;
    use std::sync::Arc;
    
    const STYLESHEET: &str = ".highlighted { color: #006ab2; }\n.sidebar_logo { width: 150px; }\n";
    
    fn config_in(dir: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.data = DataConfig::with_data_dir(dir);
        config.assets.stylesheet = dir.join("styles.css");
        config.assets.logo = dir.join("logo-1746.png");
        config
    }
    
    fn ready_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_all(dir.path()).unwrap();
        std::fs::write(dir.path().join("styles.css"), STYLESHEET).unwrap();
        dir
    }
    
    #[test]
    fn test_startup_loads_everything() {
        let dir = ready_dir();
        
        let resources = Resources::load(&config_in(dir.path())).unwrap();
        
        assert_eq!(resources.datasets.calls.len(), fixtures::CALL_ROWS);
        assert_eq!(resources.datasets.neighborhoods.len(), fixtures::NEIGHBORHOOD_ROWS);
        assert_eq!(resources.datasets.events.len(), fixtures::EVENT_ROWS);
        assert_eq!(resources.stylesheet.source(), STYLESHEET);
    }
    
    #[test]
    fn test_missing_dataset_aborts_startup() {
        let dir = ready_dir();
        std::fs::remove_file(dir.path().join("chamado_1746.parquet")).unwrap();
        
        let err = Resources::load(&config_in(dir.path())).err().unwrap();
        
        let data_err = err.downcast_ref::<DataError>().unwrap();
        assert!(data_err.is_file_access());
        assert!(data_err.is_missing_file());
    }
    
    #[test]
    fn test_missing_stylesheet_aborts_startup() {
        let dir = ready_dir();
        std::fs::remove_file(dir.path().join("styles.css")).unwrap();
        
        assert!(Resources::load(&config_in(dir.path())).is_err());
    }
    
    /// Center of the text drawn for `label` in the last frame
    fn label_center(output: &egui::FullOutput, label: &str) -> egui::Pos2 {
        output
            .shapes
            .iter()
            .find_map(|clipped| match &clipped.shape {
                egui::Shape::Text(text) if text.galley.text() == label => {
                    Some(text.galley.rect.translate(text.pos.to_vec2()).center())
                }
                _ => None,
            })
            .unwrap_or_else(|| panic!("'{}' was not drawn", label))
    }
    
    fn pointer(pos: egui::Pos2, pressed: bool) -> egui::RawInput {
        egui::RawInput {
            events: vec![
                egui::Event::PointerMoved(pos),
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed,
                    modifiers: egui::Modifiers::default(),
                },
            ],
            ..Default::default()
        }
    }
    
    fn app_in(dir: &std::path::Path) -> DashboardApp {
        let config = config_in(dir);
        let resources = Resources::load(&config).unwrap();
        DashboardApp::with_resources(resources, &config, Theme::default())
    }
    
    #[test]
    fn test_dashboards_share_the_loaded_tables() {
        let dir = ready_dir();
        let resources = Resources::load(&config_in(dir.path())).unwrap();
        let datasets = &resources.datasets;
        let before = (
            Arc::strong_count(&datasets.calls),
            Arc::strong_count(&datasets.neighborhoods),
            Arc::strong_count(&datasets.events),
        );
        
        let router = build_router(datasets);
        
        // Calls go to both dashboards, neighborhoods to the first, events to the second
        assert_eq!(Arc::strong_count(&datasets.calls), before.0 + 2);
        assert_eq!(Arc::strong_count(&datasets.neighborhoods), before.1 + 1);
        assert_eq!(Arc::strong_count(&datasets.events), before.2 + 1);
        
        drop(router);
        assert_eq!(Arc::strong_count(&datasets.calls), before.0);
        assert_eq!(Arc::strong_count(&datasets.neighborhoods), before.1);
        assert_eq!(Arc::strong_count(&datasets.events), before.2);
    }
    
    #[test]
    fn test_startup_tables_stay_cached_in_the_loader() {
        let dir = ready_dir();
        let resources = Resources::load(&config_in(dir.path())).unwrap();
        let calls = resources.datasets.calls.clone();
        let app = DashboardApp::with_resources(resources, &config_in(dir.path()), Theme::default());
        
        for file in ["chamado_1746.parquet", "bairro.parquet", "rede_hoteleira_ocupacao_eventos.parquet"] {
            std::fs::remove_file(dir.path().join(file)).unwrap();
        }
        
        let datasets = app._loader.load_all().unwrap();
        assert!(Arc::ptr_eq(&datasets.calls, &calls));
        assert_eq!(datasets.events.len(), fixtures::EVENT_ROWS);
    }
    
    #[test]
    fn test_sidebar_click_switches_the_rendered_page() {
        let dir = ready_dir();
        let mut app = app_in(dir.path());
        let ctx = egui::Context::default();
        
        let mut rendered = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| rendered = app.frame(ctx));
        let output = ctx.run(egui::RawInput::default(), |ctx| rendered = app.frame(ctx));
        assert_eq!(rendered, Some(Page::Home));
        let target = label_center(&output, "🗓️ Chamados em um dia");
        
        let _ = ctx.run(pointer(target, true), |ctx| rendered = app.frame(ctx));
        assert_eq!(app.state.current_page(), Page::Home);
        
        let _ = ctx.run(pointer(target, false), |ctx| rendered = app.frame(ctx));
        assert_eq!(app.state.current_page(), Page::CallsInADay);
        assert_eq!(rendered, Some(Page::CallsInADay));
        
        let _ = ctx.run(egui::RawInput::default(), |ctx| rendered = app.frame(ctx));
        assert_eq!(rendered, Some(Page::CallsInADay));
    }
    
    #[test]
    fn test_each_frame_renders_the_current_page() {
        let dir = ready_dir();
        let mut app = app_in(dir.path());
        let ctx = egui::Context::default();
        
        // Fresh session shows the home page
        let mut rendered = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| rendered = app.frame(ctx));
        assert_eq!(rendered, Some(Page::Home));
        
        for page in [Page::CallsInADay, Page::CallsBySubtype, Page::Home] {
            app.state.navigate(page);
            let _ = ctx.run(egui::RawInput::default(), |ctx| rendered = app.frame(ctx));
            assert_eq!(rendered, Some(page));
        }
    }
}
