//! User interface components for the 1746 call dashboard
//! 
//! This crate provides the egui theme, the stylesheet the sidebar is styled
//! from and the sidebar navigation panel.

pub mod sidebar;
pub mod stylesheet;
pub mod theme;

use std::path::PathBuf;
use thiserror::Error;

/// Re-export commonly used types
pub use sidebar::{Sidebar, SidebarStyle};
pub use stylesheet::Stylesheet;
pub use theme::{apply_theme, Theme};

/// Errors raised while reading UI assets
#[derive(Error, Debug)]
pub enum StyleError {
    #[error("cannot read stylesheet {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
