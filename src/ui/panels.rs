//! Reusable panel components
//!
//! Styled panels/cards with consistent theming.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding};

use crate::themes::Theme;

/// Panel style variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelStyle {
    #[default]
    Default,
    /// Popups drawn over the dashboard
    Elevated,
}

/// A styled panel component
#[derive(Clone)]
pub struct Panel<'a> {
    title: Option<&'a str>,
    style: PanelStyle,
    theme: &'a Theme,
    padding: Padding,
}

impl<'a> Panel<'a> {
    /// Create a new panel with the given theme
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            title: None,
            style: PanelStyle::Default,
            theme,
            padding: Padding::horizontal(1),
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn style(mut self, style: PanelStyle) -> Self {
        self.style = style;
        self
    }

    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Build the Block widget
    pub fn block(&self) -> Block<'a> {
        let (border_color, title_color, background) = match self.style {
            PanelStyle::Default => (
                self.theme.border,
                self.theme.text_secondary,
                self.theme.background,
            ),
            PanelStyle::Elevated => (
                self.theme.border_focused,
                self.theme.accent,
                self.theme.surface_elevated,
            ),
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(background))
            .padding(self.padding);

        if let Some(title) = self.title {
            block = block
                .title(format!(" {} ", title))
                .title_style(Style::default().fg(title_color).bold());
        }

        block
    }

    /// Get the inner area after accounting for borders and padding
    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }
}

/// A borderless-looking card on the base background
pub struct Card<'a> {
    panel: Panel<'a>,
}

impl<'a> Card<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            panel: Panel::new(theme).padding(Padding::new(2, 2, 0, 0)),
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.panel = self.panel.title(title);
        self
    }

    pub fn block(&self) -> Block<'a> {
        self.panel.block()
    }

    pub fn inner(&self, area: Rect) -> Rect {
        self.panel.inner(area)
    }
}
