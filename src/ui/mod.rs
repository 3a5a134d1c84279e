//! UI components module
//!
//! Reusable UI components: panels, separators, filter menu, help overlay
//! and status bar.

pub mod borders;
pub mod filter_menu;
pub mod help_overlay;
pub mod panels;
pub mod status_bar;

pub use borders::Separators;
pub use filter_menu::{FilterMenu, FilterMenuResult};
pub use help_overlay::HelpOverlay;
pub use panels::{Card, Panel, PanelStyle};
pub use status_bar::StatusBar;
