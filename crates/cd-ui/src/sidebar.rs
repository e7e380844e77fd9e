//! Sidebar navigation panel
//!
//! Logo, title and one button per page. A click moves the application state
//! to that page; the caller asks egui for a repaint so the new page renders.

use cd_core::{button_style, AppState, ButtonStyle, Page, SidebarEntry, SIDEBAR_ENTRIES};
use egui::{Button, Color32, Context, Image, RichText, Sense, SidePanel, Ui};

use crate::stylesheet::Stylesheet;
use crate::theme::Theme;

const TITLE: &str = "Análise de Chamados - ";
const TITLE_HIGHLIGHT: &str = "Dashboard";
const SUBTITLE: &str = "Análise de chamados abertos nos anos de 2022 e 2023";

/// Sizes and colors taken from the stylesheet
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarStyle {
    pub logo_width: f32,
    pub title_size: f32,
    pub title_color: Option<Color32>,
    pub highlight_color: Option<Color32>,
    pub subtitle_size: f32,
    pub subtitle_color: Option<Color32>,
}

impl Default for SidebarStyle {
    fn default() -> Self {
        Self {
            logo_width: 160.0,
            title_size: 22.0,
            title_color: None,
            highlight_color: None,
            subtitle_size: 13.0,
            subtitle_color: None,
        }
    }
}

impl SidebarStyle {
    /// Read the `.sidebar_*` and `.highlighted` rules, keeping defaults for anything unset
    pub fn from_stylesheet(sheet: &Stylesheet) -> Self {
        let defaults = Self::default();
        Self {
            logo_width: sheet.width(".sidebar_logo").unwrap_or(defaults.logo_width),
            title_size: sheet.font_size(".sidebar_title").unwrap_or(defaults.title_size),
            title_color: sheet.color(".sidebar_title"),
            highlight_color: sheet.color(".highlighted"),
            subtitle_size: sheet.font_size(".sidebar_subtitle").unwrap_or(defaults.subtitle_size),
            subtitle_color: sheet.color(".sidebar_subtitle"),
        }
    }
}

/// The navigation sidebar
pub struct Sidebar {
    logo_uri: String,
    support_url: String,
    style: SidebarStyle,
    theme: Theme,
}

impl Sidebar {
    pub fn new(logo_uri: impl Into<String>, support_url: impl Into<String>, style: SidebarStyle, theme: Theme) -> Self {
        Self {
            logo_uri: logo_uri.into(),
            support_url: support_url.into(),
            style,
            theme,
        }
    }
    
    /// Show the sidebar as a left panel. Returns the page whose button was clicked.
    pub fn show(&self, ctx: &Context, state: &mut AppState) -> Option<Page> {
        SidePanel::left("sidebar")
            .resizable(false)
            .default_width(self.style.logo_width.max(240.0) + 40.0)
            .show(ctx, |ui| self.ui(ui, state))
            .inner
    }
    
    /// Draw the sidebar contents into `ui`
    pub fn ui(&self, ui: &mut Ui, state: &mut AppState) -> Option<Page> {
        ui.add_space(12.0);
        self.header(ui);
        ui.add_space(12.0);
        ui.separator();
        
        let mut clicked = None;
        for entry in SIDEBAR_ENTRIES {
            match entry {
                SidebarEntry::Heading(text) => {
                    ui.add_space(8.0);
                    ui.label(RichText::new(text).strong().size(16.0));
                }
                SidebarEntry::Button { label, page } => {
                    if self.nav_button(ui, label, button_style(page, state)).clicked() {
                        clicked = Some(page);
                    }
                }
            }
        }
        
        if let Some(page) = clicked {
            if state.navigate(page) {
                tracing::info!("Switched to page {}", page);
            }
        }
        clicked
    }
    
    fn header(&self, ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            let logo = Image::new(self.logo_uri.as_str())
                .max_width(self.style.logo_width)
                .sense(Sense::click());
            let response = ui.add(logo).on_hover_text(self.support_url.as_str());
            if response.clicked() {
                ui.ctx().output_mut(|o| {
                    o.open_url = Some(egui::output::OpenUrl::new_tab(&self.support_url));
                });
            }
        });
        ui.add_space(8.0);
        
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            let mut title = RichText::new(TITLE).size(self.style.title_size).strong();
            if let Some(color) = self.style.title_color {
                title = title.color(color);
            }
            ui.label(title);
            ui.label(
                RichText::new(TITLE_HIGHLIGHT)
                    .size(self.style.title_size)
                    .strong()
                    .color(self.style.highlight_color.unwrap_or(self.theme.accent)),
            );
        });
        
        let mut subtitle = RichText::new(SUBTITLE).size(self.style.subtitle_size);
        if let Some(color) = self.style.subtitle_color {
            subtitle = subtitle.color(color);
        }
        ui.label(subtitle);
    }
    
    fn nav_button(&self, ui: &mut Ui, label: &str, style: ButtonStyle) -> egui::Response {
        let size = egui::vec2(ui.available_width(), 32.0);
        let button = match style {
            ButtonStyle::Primary => Button::new(RichText::new(label).color(self.theme.on_accent()))
                .fill(self.theme.accent),
            ButtonStyle::Secondary => Button::new(label),
        };
        ui.add(button.min_size(size))
    }
}
