use egui::{Color32, Context, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use std::collections::BTreeMap;

use crate::stylesheet::Stylesheet;

/// Accent used when the stylesheet does not set `.highlighted { color }`
const DEFAULT_ACCENT: Color32 = Color32::from_rgb(0, 106, 178);

/// Theme configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub dark_mode: bool,
    /// Fill of primary buttons, links and selections
    pub accent: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            dark_mode: false,
            accent: DEFAULT_ACCENT,
        }
    }
}

impl Theme {
    /// Light theme whose accent is the stylesheet's highlight color
    pub fn from_stylesheet(sheet: &Stylesheet) -> Self {
        Self {
            accent: sheet.color(".highlighted").unwrap_or(DEFAULT_ACCENT),
            ..Self::default()
        }
    }
    
    /// Text color readable on top of the accent
    pub fn on_accent(&self) -> Color32 {
        let [r, g, b, _] = self.accent.to_array();
        let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
        if luma > 150.0 {
            Color32::BLACK
        } else {
            Color32::WHITE
        }
    }
}

/// Apply the application theme
pub fn apply_theme(ctx: &Context, theme: &Theme) {
    let mut style = Style::default();
    let mut visuals = if theme.dark_mode { Visuals::dark() } else { Visuals::light() };
    
    let accent = theme.accent;
    let rounding = Rounding::same(6.0);
    
    // Widget styling
    visuals.widgets.noninteractive.rounding = rounding;
    visuals.widgets.inactive.rounding = rounding;
    visuals.widgets.hovered.rounding = rounding;
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, accent);
    visuals.widgets.active.rounding = rounding;
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent);
    
    // Selection and highlighting
    visuals.selection.bg_fill = accent.linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent);
    visuals.hyperlink_color = accent;
    
    // Apply spacing
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    
    // Font sizes
    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(11.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(14.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(14.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Heading, FontId::new(22.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace));
    style.text_styles = font_sizes;
    
    style.visuals = visuals;
    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_accent_comes_from_highlight_rule() {
        let sheet = Stylesheet::parse(".highlighted { color: #ff8800; }");
        assert_eq!(Theme::from_stylesheet(&sheet).accent, Color32::from_rgb(0xff, 0x88, 0x00));
        assert_eq!(Theme::from_stylesheet(&Stylesheet::default()).accent, DEFAULT_ACCENT);
    }
    
    #[test]
    fn test_on_accent_contrast() {
        let dark = Theme { accent: Color32::from_rgb(0, 40, 90), ..Theme::default() };
        let light = Theme { accent: Color32::from_rgb(250, 230, 120), ..Theme::default() };
        assert_eq!(dark.on_accent(), Color32::WHITE);
        assert_eq!(light.on_accent(), Color32::BLACK);
    }
}
