//! Page identifiers

use std::fmt;

/// One of the three pages the dashboard can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    /// Landing page
    #[default]
    Home,
    
    /// "Chamados em um dia": calls opened on a single day
    CallsInADay,
    
    /// "Chamados por subtipo": calls of one subtype against city events
    CallsBySubtype,
}

impl Page {
    /// Every page, in sidebar order
    pub const ALL: [Page; 3] = [Page::Home, Page::CallsInADay, Page::CallsBySubtype];
    
    /// Stable identifier of the page
    pub fn id(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::CallsInADay => "dashboard_1",
            Page::CallsBySubtype => "dashboard_2",
        }
    }
    
    /// Look up a page by its identifier
    pub fn from_id(id: &str) -> Option<Page> {
        Self::ALL.into_iter().find(|page| page.id() == id)
    }
    
    /// Look up a page by identifier, falling back to [`Page::Home`] for anything unknown
    pub fn resolve(id: &str) -> Page {
        match Self::from_id(id) {
            Some(page) => page,
            None => {
                tracing::warn!("Unknown page identifier '{}', showing home page", id);
                Page::Home
            }
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_ids_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_id(page.id()), Some(page));
        }
    }
    
    #[test]
    fn test_unknown_id_resolves_to_home() {
        assert_eq!(Page::from_id("dashboard_3"), None);
        assert_eq!(Page::resolve("dashboard_3"), Page::Home);
        assert_eq!(Page::resolve(""), Page::Home);
        assert_eq!(Page::resolve("dashboard_2"), Page::CallsBySubtype);
    }
    
    #[test]
    fn test_default_is_home() {
        assert_eq!(Page::default(), Page::Home);
    }
}
