//! Summary cards - total AUM, average Sharpe, best YTD fund

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget};

use crate::data::FundSummary;
use crate::format::{format_currency, format_percent, to_fixed};
use crate::themes::Theme;
use crate::ui::panels::Card;

const PLACEHOLDER: &str = "—";

/// Pre-formatted card values
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub total_aum: String,
    pub product_count: usize,
    pub average_sharpe: String,
    pub best_fund_name: String,
    pub best_fund_return: String,
}

impl MetricsSummary {
    pub fn from_summary(summary: &FundSummary) -> Self {
        Self {
            total_aum: format_currency(summary.total_aum),
            product_count: summary.product_count,
            average_sharpe: summary
                .average_sharpe
                .map(|s| to_fixed(s, 2))
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            best_fund_name: summary
                .best_fund_name
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            best_fund_return: summary
                .best_fund_ytd
                .map(format_percent)
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        }
    }

    fn render_card(
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        title: &str,
        value: &str,
        caption: Line<'_>,
    ) {
        let card = Card::new(theme).title(title);
        let inner = card.inner(area);
        card.block().render(area, buf);

        let lines = vec![
            Line::from(Span::styled(
                value.to_string(),
                Style::default().fg(theme.text_primary).bold(),
            )),
            caption,
        ];
        Paragraph::new(lines).render(inner, buf);
    }

    /// Render three cards side by side
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        let muted = Style::default().fg(theme.text_muted);

        Self::render_card(
            chunks[0],
            buf,
            theme,
            "管理规模（AUM）",
            &self.total_aum,
            Line::from(Span::styled(
                format!("覆盖 {} 只存续产品", self.product_count),
                muted,
            )),
        );
        Self::render_card(
            chunks[1],
            buf,
            theme,
            "平均夏普比率",
            &self.average_sharpe,
            Line::from(Span::styled("维持稳健风险收益水平", muted)),
        );
        Self::render_card(
            chunks[2],
            buf,
            theme,
            "年度表现最佳",
            &self.best_fund_name,
            Line::from(Span::styled(
                format!("今年以来 {}", self.best_fund_return),
                Style::default().fg(theme.success),
            )),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::mock_funds::mock_funds;

    #[test]
    fn test_formats_mock_summary() {
        let summary = FundSummary::from_funds(&mock_funds());
        let metrics = MetricsSummary::from_summary(&summary);
        assert_eq!(metrics.total_aum, "¥8,920,000,000");
        assert_eq!(metrics.product_count, 8);
        assert_eq!(metrics.average_sharpe, "1.54");
        assert_eq!(metrics.best_fund_return, "13.26%");
    }

    #[test]
    fn test_empty_placeholders() {
        let metrics = MetricsSummary::from_summary(&FundSummary::from_funds(&[]));
        assert_eq!(metrics.total_aum, "¥0");
        assert_eq!(metrics.average_sharpe, PLACEHOLDER);
        assert_eq!(metrics.best_fund_name, PLACEHOLDER);
    }

    #[test]
    fn test_render_shows_total() {
        let theme = Theme::default();
        let metrics = MetricsSummary::from_summary(&FundSummary::from_funds(&mock_funds()));
        let area = Rect::new(0, 0, 120, 4);
        let mut buf = Buffer::empty(area);
        metrics.render(area, &mut buf, &theme);

        let row: String = (0..area.width)
            .map(|x| buf[(x, 1)].symbol().to_string())
            .collect();
        assert!(row.contains("¥8,920,000,000"));
        assert!(row.contains("1.54"));
    }
}
