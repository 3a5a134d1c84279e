//! Status bar component
//!
//! Bottom status bar showing row counts, table state and help hints.

use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget};

use crate::themes::Theme;
use crate::ui::borders::Separators;

/// Status bar widget
pub struct StatusBar<'a> {
    theme: &'a Theme,
    title: &'a str,
    key_metrics: Vec<(String, String)>,
    show_help_hint: bool,
}

impl<'a> StatusBar<'a> {
    pub fn new(theme: &'a Theme, title: &'a str) -> Self {
        Self {
            theme,
            title,
            key_metrics: Vec::new(),
            show_help_hint: true,
        }
    }

    /// Add a key metric
    pub fn metric(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.key_metrics.push((label.into(), value.into()));
        self
    }

    pub fn hide_help_hint(mut self) -> Self {
        self.show_help_hint = false;
        self
    }

    fn separator(&self) -> Span<'a> {
        Span::styled(
            format!(" {} ", Separators::VERTICAL),
            Style::default().fg(self.theme.text_muted),
        )
    }

    /// Build the status bar content as a Line
    fn build_content(&self) -> Line<'a> {
        let mut spans = vec![Span::styled(
            format!("{} {}", Separators::DIAMOND, self.title),
            Style::default().fg(self.theme.accent).bold(),
        )];

        for (label, value) in &self.key_metrics {
            spans.push(self.separator());
            spans.push(Span::styled(
                format!("{}: ", label),
                Style::default().fg(self.theme.text_secondary),
            ));
            spans.push(Span::styled(
                value.clone(),
                Style::default().fg(self.theme.text_primary),
            ));
        }

        spans.push(self.separator());
        spans.push(Span::styled(
            Local::now().format("%H:%M:%S").to_string(),
            Style::default().fg(self.theme.text_muted),
        ));

        if self.show_help_hint {
            spans.push(self.separator());
            spans.push(Span::styled(
                "[?] 帮助",
                Style::default().fg(self.theme.text_muted),
            ));
        }

        Line::from(spans)
    }
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.theme.surface));
        Paragraph::new(self.build_content()).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_renders_metrics() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(&theme, "Funds")
            .metric("Rows", "8/8")
            .hide_help_hint()
            .render(area, &mut buf);
        let text = row_text(&buf, 0);
        assert!(text.contains("Funds"));
        assert!(text.contains("Rows: 8/8"));
        assert!(!text.contains("[?]"));
    }
}
