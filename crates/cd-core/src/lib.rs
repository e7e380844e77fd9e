//! Core functionality for the 1746 call dashboard
//! 
//! This crate provides the page identifiers, the explicit application state
//! and the router that decides which view renders on each frame.

pub mod page;
pub mod router;
pub mod sidebar;
pub mod state;

// Re-export commonly used types
pub use page::Page;
pub use router::{RenderAction, Router};
pub use sidebar::{button_style, ButtonStyle, SidebarEntry, SIDEBAR_ENTRIES};
pub use state::AppState;
