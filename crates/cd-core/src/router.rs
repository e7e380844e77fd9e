//! Page router
//!
//! Maps every [`Page`] to a render action and, on each frame, runs the one
//! bound to the current page. The render target is generic so the same router
//! drives an `egui::Ui` in the application and a plain recorder in tests.

use ahash::AHashMap;

use crate::page::Page;
use crate::state::AppState;

/// Render action bound to a page
pub type RenderAction<C> = Box<dyn FnMut(&mut C)>;

/// Dispatches rendering to the action registered for the current page
pub struct Router<C: ?Sized> {
    actions: AHashMap<Page, RenderAction<C>>,
}

impl<C: ?Sized> Default for Router<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized> Router<C> {
    /// Create an empty router
    pub fn new() -> Self {
        Self {
            actions: AHashMap::new(),
        }
    }
    
    /// Bind `action` to `page`, replacing any previous binding
    pub fn register(&mut self, page: Page, action: impl FnMut(&mut C) + 'static) -> &mut Self {
        if self.actions.insert(page, Box::new(action)).is_some() {
            tracing::debug!("Replaced render action for {}", page);
        }
        self
    }
    
    /// Whether an action is bound to `page`
    pub fn is_registered(&self, page: Page) -> bool {
        self.actions.contains_key(&page)
    }
    
    /// Render the current page of `state` into `target`.
    ///
    /// Exactly one action runs. Returns the page that was rendered, or `None`
    /// when neither the current page nor the home page has an action.
    pub fn render(&mut self, state: &AppState, target: &mut C) -> Option<Page> {
        self.dispatch(state.current_page(), target)
    }
    
    /// Render the page named by a raw identifier. Unknown identifiers show the home page.
    pub fn render_id(&mut self, id: &str, target: &mut C) -> Option<Page> {
        self.dispatch(Page::resolve(id), target)
    }
    
    fn dispatch(&mut self, page: Page, target: &mut C) -> Option<Page> {
        let page = if self.actions.contains_key(&page) {
            page
        } else {
            tracing::warn!("No render action for {}, showing home page", page);
            Page::Home
        };
        
        let action = match self.actions.get_mut(&page) {
            Some(action) => action,
            None => {
                tracing::error!("Home page has no render action");
                return None;
            }
        };
        
        action(target);
        Some(page)
    }
}
