//! Table toolbar (search box, data-date tag, status badge) and filter alert banner

use chrono::NaiveDate;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget};

use crate::format::format_date;
use crate::table::Density;
use crate::themes::Theme;
use crate::ui::borders::Separators;

pub const SEARCH_PLACEHOLDER: &str = "搜索基金名称 / 代码 / 经理";
pub const FILTER_ALERT: &str = "存在筛选条件，当前显示的是过滤后的指标";

/// Top toolbar above the table
pub struct Toolbar<'a> {
    theme: &'a Theme,
    query: &'a str,
    searching: bool,
    show_search: bool,
    as_of: NaiveDate,
    density: Density,
}

impl<'a> Toolbar<'a> {
    pub fn new(theme: &'a Theme, query: &'a str, as_of: NaiveDate) -> Self {
        Self {
            theme,
            query,
            searching: false,
            show_search: true,
            as_of,
            density: Density::default(),
        }
    }

    /// Search input has keyboard focus
    pub fn searching(mut self, searching: bool) -> Self {
        self.searching = searching;
        self
    }

    pub fn show_search(mut self, show: bool) -> Self {
        self.show_search = show;
        self
    }

    pub fn density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    fn search_spans(&self) -> Vec<Span<'a>> {
        if !self.show_search {
            return Vec::new();
        }
        let border = if self.searching {
            self.theme.border_focused
        } else {
            self.theme.text_muted
        };
        let mut spans = vec![Span::styled("[ ", Style::default().fg(border))];
        if self.query.is_empty() && !self.searching {
            spans.push(Span::styled(
                SEARCH_PLACEHOLDER,
                Style::default().fg(self.theme.text_muted),
            ));
        } else {
            spans.push(Span::styled(
                self.query,
                Style::default().fg(self.theme.text_primary),
            ));
            if self.searching {
                spans.push(Span::styled("_", Style::default().fg(self.theme.accent)));
            }
        }
        spans.push(Span::styled(" ]", Style::default().fg(border)));
        spans
    }

    fn status_spans(&self) -> Vec<Span<'a>> {
        vec![
            Span::styled(
                format!(" 数据截至 {} ", format_date(self.as_of)),
                Style::default().fg(self.theme.accent).bg(self.theme.accent_muted),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{} 实时监控", Separators::CIRCLE_FILLED),
                Style::default().fg(self.theme.success),
            ),
            Span::raw("  "),
            Span::styled(
                format!("密度: {}", self.density.label()),
                Style::default().fg(self.theme.text_muted),
            ),
        ]
    }
}

impl Widget for Toolbar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let status = Line::from(self.status_spans());
        let status_width = (status.width() as u16).min(area.width);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(status_width)])
            .split(area);

        Paragraph::new(Line::from(self.search_spans())).render(chunks[0], buf);
        Paragraph::new(status)
            .alignment(Alignment::Right)
            .render(chunks[1], buf);
    }
}

/// Banner under the table shown while filters are active
pub struct FilterAlert<'a> {
    theme: &'a Theme,
    shown: usize,
    total: usize,
}

impl<'a> FilterAlert<'a> {
    pub fn new(theme: &'a Theme, shown: usize, total: usize) -> Self {
        Self { theme, shown, total }
    }
}

impl Widget for FilterAlert<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.theme.accent_muted));
        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", FILTER_ALERT),
                Style::default().fg(self.theme.info),
            ),
            Span::styled(
                format!("({}/{})", self.shown, self.total),
                Style::default().fg(self.theme.text_secondary),
            ),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(buf: &Buffer) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_toolbar_shows_date_and_query() {
        let theme = Theme::default();
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let area = Rect::new(0, 0, 100, 1);
        let mut buf = Buffer::empty(area);
        Toolbar::new(&theme, "QH01", date)
            .searching(true)
            .render(area, &mut buf);
        let row = text(&buf);
        assert!(row.contains("2026-10-18"));
        assert!(row.contains("QH01_"));
    }

    #[test]
    fn test_alert_counts() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 100, 1);
        let mut buf = Buffer::empty(area);
        FilterAlert::new(&theme, 2, 8).render(area, &mut buf);
        assert!(text(&buf).contains("(2/8)"));
    }
}
