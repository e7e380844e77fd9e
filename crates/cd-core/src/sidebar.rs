//! Sidebar model: the fixed navigation entries and how each button is emphasised

use crate::page::Page;
use crate::state::AppState;

/// Visual emphasis of a navigation button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Secondary,
}

/// One line of the sidebar navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEntry {
    /// Button that switches to `page`
    Button { label: &'static str, page: Page },
    
    /// Section heading between buttons
    Heading(&'static str),
}

/// Sidebar navigation, top to bottom
pub const SIDEBAR_ENTRIES: [SidebarEntry; 4] = [
    SidebarEntry::Button { label: "🏠 Página Inicial", page: Page::Home },
    SidebarEntry::Heading("📊 Dashboards"),
    SidebarEntry::Button { label: "🗓️ Chamados em um dia", page: Page::CallsInADay },
    SidebarEntry::Button { label: "🔊 Chamados por subtipo", page: Page::CallsBySubtype },
];

/// Style of the button for `page` given the current state
pub fn button_style(page: Page, state: &AppState) -> ButtonStyle {
    if state.current_page() == page {
        ButtonStyle::Primary
    } else {
        ButtonStyle::Secondary
    }
}
