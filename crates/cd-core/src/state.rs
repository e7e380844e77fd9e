//! Application state management

use crate::page::Page;

/// Application-wide state
///
/// Owned by the application and handed to the sidebar and the router by
/// reference. The current page is the only value that changes after startup.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    current_page: Page,
}

impl AppState {
    /// Create a fresh session state, starting on the home page
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Page shown on the next render
    pub fn current_page(&self) -> Page {
        self.current_page
    }
    
    /// Switch to `page`. Returns `true` when the page actually changed.
    pub fn navigate(&mut self, page: Page) -> bool {
        if self.current_page == page {
            return false;
        }
        
        tracing::debug!("Navigating from {} to {}", self.current_page, page);
        self.current_page = page;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_fresh_session_starts_home() {
        assert_eq!(AppState::new().current_page(), Page::Home);
    }
    
    #[test]
    fn test_any_page_reaches_any_page() {
        for from in Page::ALL {
            for to in Page::ALL {
                let mut state = AppState::new();
                state.navigate(from);
                let changed = state.navigate(to);
                assert_eq!(changed, from != to);
                assert_eq!(state.current_page(), to);
            }
        }
    }
}
