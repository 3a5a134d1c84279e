//! View modules for dashboard screens

use anyhow::Result;
use ratatui::prelude::*;

pub mod dashboard;

/// Action returned by a view's key handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    /// Key handled, stay in current view
    Continue,
    /// Request to exit the application
    Quit,
}

/// Trait for views that can be rendered
pub trait ViewTrait {
    /// Render the view
    fn render(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;

    /// Handle key input
    fn handle_key(&mut self, _key: crossterm::event::KeyCode) -> Result<ViewAction> {
        Ok(ViewAction::Continue)
    }

    /// Whether the view is consuming raw text input (search box, filter editor)
    fn captures_input(&self) -> bool {
        false
    }
}
