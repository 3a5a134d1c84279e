//! Fund table widget - column definitions and themed rendering

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use crate::data::FundProduct;
use crate::format::{format_currency, format_exposure, format_percent, to_fixed};
use crate::settings::TableSettings;
use crate::table::{
    CellValue, ColumnDef, ColumnGroup, FilterVariant, Pagination, SortingFn, Table, TableOptions,
    TableRow, TableState,
};
use crate::themes::Theme;
use crate::ui::borders::{horizontal_rule, Separators};

fn number(value: &CellValue) -> f64 {
    match value {
        CellValue::Number(n) => *n,
        _ => f64::NAN,
    }
}

fn nav_cell(value: &CellValue) -> String {
    to_fixed(number(value), 3)
}

fn percent_cell(value: &CellValue) -> String {
    format_percent(number(value))
}

fn ratio_cell(value: &CellValue) -> String {
    to_fixed(number(value), 2)
}

fn exposure_cell(value: &CellValue) -> String {
    format_exposure(number(value))
}

fn currency_cell(value: &CellValue) -> String {
    format_currency(number(value))
}

/// Column layout: fund info, NAV performance, allocation, size
pub fn fund_columns() -> Vec<ColumnGroup<FundProduct>> {
    vec![
        ColumnGroup::new(
            "fundInfo",
            "基金",
            vec![
                ColumnDef::new("fundName", "基金名称", |f: &FundProduct| {
                    CellValue::Text(f.fund_name.clone())
                })
                .sorting_fn(SortingFn::Alphanumeric)
                .size(20),
                ColumnDef::new("ticker", "产品代码", |f: &FundProduct| {
                    CellValue::Text(f.ticker.clone())
                })
                .enable_column_filter(true)
                .size(10),
                ColumnDef::new("manager", "基金经理", |f: &FundProduct| {
                    CellValue::Text(f.manager.clone())
                })
                .size(10),
                ColumnDef::new("strategy", "策略类型", |f: &FundProduct| {
                    CellValue::Text(f.strategy.label().to_string())
                })
                .filter_variant(FilterVariant::MultiSelect)
                .enable_grouping(true)
                .size(10),
                ColumnDef::new("inceptionDate", "成立日期", |f: &FundProduct| {
                    CellValue::Date(f.inception_date)
                })
                .enable_column_filter(false)
                .sorting_fn(SortingFn::Datetime)
                .size(12),
            ],
        ),
        ColumnGroup::new(
            "performance",
            "净值表现",
            vec![
                ColumnDef::new("navStart", "期初净值", |f: &FundProduct| {
                    CellValue::Number(f.nav_start)
                })
                .cell(nav_cell)
                .size(10),
                ColumnDef::new("navEnd", "期末净值", |f: &FundProduct| {
                    CellValue::Number(f.nav_end)
                })
                .cell(nav_cell)
                .size(10),
                ColumnDef::new("navReturn", "本期收益率", |f: &FundProduct| {
                    CellValue::Number(f.period_return())
                })
                .cell(percent_cell)
                .sorting_fn(SortingFn::Basic)
                .size(12),
                ColumnDef::new("ytdReturn", "今年以来", |f: &FundProduct| {
                    CellValue::Number(f.ytd_return)
                })
                .cell(percent_cell)
                .sorting_fn(SortingFn::Basic)
                .size(10),
                ColumnDef::new("sharpe", "夏普比率", |f: &FundProduct| {
                    CellValue::Number(f.sharpe)
                })
                .cell(ratio_cell)
                .size(10),
            ],
        ),
        ColumnGroup::new(
            "allocation",
            "资产配置 (%)",
            vec![
                ColumnDef::new("stockExposureStart", "期初股票", |f: &FundProduct| {
                    CellValue::Number(f.stock_exposure_start)
                })
                .cell(exposure_cell)
                .size(10),
                ColumnDef::new("stockExposureEnd", "期末股票", |f: &FundProduct| {
                    CellValue::Number(f.stock_exposure_end)
                })
                .cell(exposure_cell)
                .size(10),
                ColumnDef::new("futuresExposureStart", "期初期货", |f: &FundProduct| {
                    CellValue::Number(f.futures_exposure_start)
                })
                .cell(exposure_cell)
                .size(10),
                ColumnDef::new("futuresExposureEnd", "期末期货", |f: &FundProduct| {
                    CellValue::Number(f.futures_exposure_end)
                })
                .cell(exposure_cell)
                .size(10),
            ],
        ),
        ColumnGroup::new(
            "riskSize",
            "规模与风险",
            vec![ColumnDef::new("aum", "基金规模", |f: &FundProduct| {
                CellValue::Number(f.aum)
            })
            .cell(currency_cell)
            .sorting_fn(SortingFn::Basic)
            .size(16)],
        ),
    ]
}

/// Table over the dataset with the dashboard's feature set and initial state
pub fn fund_table(funds: Vec<FundProduct>, settings: &TableSettings) -> Table<FundProduct> {
    let state = TableState {
        pagination: Pagination {
            page_index: 0,
            page_size: settings.page_size.max(1),
        },
        density: settings.density,
        show_global_filter: true,
        ..TableState::default()
    };
    Table::new(fund_columns(), funds, TableOptions::default(), state)
}

/// Columns that fit in `width`: pinned first, then a window of unpinned
/// columns scrolled just far enough to show `focused`.
pub fn visible_columns(
    widths: &[u16],
    pinned_count: usize,
    focused: usize,
    width: u16,
    spacing: u16,
) -> Vec<usize> {
    let span = |indices: &[usize]| -> u32 {
        indices.iter().map(|&i| widths[i] as u32 + spacing as u32).sum()
    };
    let pinned_count = pinned_count.min(widths.len());
    let pinned: Vec<usize> = (0..pinned_count).collect();
    let available = width as u32;

    let mut start = pinned_count;
    if focused >= pinned_count && focused < widths.len() {
        loop {
            let mut window = pinned.clone();
            window.extend(start..=focused);
            if span(&window) <= available || start >= focused {
                break;
            }
            start += 1;
        }
    }

    let mut visible = Vec::new();
    for i in pinned.into_iter().chain(start..widths.len()) {
        visible.push(i);
        if span(&visible) > available {
            visible.pop();
            if visible.is_empty() {
                visible.push(i);
            }
            break;
        }
    }
    visible
}

/// Themed table renderer
pub struct FundTableView<'a> {
    table: &'a Table<FundProduct>,
    theme: &'a Theme,
    /// Index into `Table::ordered_columns`
    focused_column: usize,
    /// Row index on the current page
    selected_row: usize,
}

impl<'a> FundTableView<'a> {
    pub fn new(table: &'a Table<FundProduct>, theme: &'a Theme) -> Self {
        Self {
            table,
            theme,
            focused_column: 0,
            selected_row: 0,
        }
    }

    pub fn focused_column(mut self, index: usize) -> Self {
        self.focused_column = index;
        self
    }

    pub fn selected_row(mut self, index: usize) -> Self {
        self.selected_row = index;
        self
    }

    fn value_style(&self, column_id: &str, value: &CellValue) -> Style {
        match (column_id, value) {
            ("navReturn" | "ytdReturn", CellValue::Number(n)) => {
                Style::default().fg(self.theme.signed_color(*n))
            }
            (_, CellValue::Number(_)) => Style::default().fg(self.theme.text_secondary),
            _ => Style::default().fg(self.theme.text_primary),
        }
    }

    /// Write `text` into a cell of `width`, right-aligned if requested
    fn put(buf: &mut Buffer, x: u16, y: u16, width: u16, text: &str, right: bool, style: Style) {
        let text_width = Line::from(text).width() as u16;
        let offset = if right { width.saturating_sub(text_width) } else { 0 };
        buf.set_stringn(x + offset, y, text, width.saturating_sub(offset) as usize, style);
    }

    fn header_label(&self, id: &str, header: &str) -> String {
        let mut label = header.to_string();
        if let Some((desc, position)) = self.table.sort_of(id) {
            label.push_str(if desc { Separators::ARROW_DOWN } else { Separators::ARROW_UP });
            if self.table.state().sorting.len() > 1 {
                label.push_str(&(position + 1).to_string());
            }
        }
        if self.table.column_filter(id).is_some() {
            label.push_str(Separators::FILTER);
        }
        if self.table.is_pinned(id) {
            label.push_str(Separators::PIN);
        }
        label
    }
}

impl Widget for FundTableView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        buf.set_style(area, Style::default().bg(theme.background));
        if area.height < 4 || area.width < 4 {
            return;
        }

        let density = self.table.state().density;
        let spacing = density.column_spacing();
        let columns = self.table.ordered_columns();
        let widths: Vec<u16> = columns.iter().map(|c| self.table.column_size(c.id)).collect();
        let visible = visible_columns(
            &widths,
            self.table.state().pinned.len(),
            self.focused_column,
            area.width,
            spacing,
        );

        // Column x positions
        let mut positions = Vec::with_capacity(visible.len());
        let mut x = area.x;
        for &i in &visible {
            positions.push((i, x));
            x = x.saturating_add(widths[i] + spacing);
        }
        let used_width = x.saturating_sub(area.x).min(area.width);

        // Group header row: merge runs of columns from the same group
        let group_style = Style::default().fg(theme.text_secondary).bold();
        let mut current_group: Option<&str> = None;
        for (n, &(i, col_x)) in positions.iter().enumerate() {
            let header = self.table.group_header_of(columns[i].id).unwrap_or("");
            if current_group != Some(header) {
                current_group = Some(header);
                let run_width: u16 = positions[n..]
                    .iter()
                    .take_while(|(j, _)| self.table.group_header_of(columns[*j].id) == Some(header))
                    .map(|(j, _)| widths[*j] + spacing)
                    .sum();
                let run_width = run_width.min(area.right().saturating_sub(col_x));
                let label_width = Line::from(header).width() as u16;
                let offset = run_width.saturating_sub(label_width) / 2;
                buf.set_stringn(col_x + offset, area.y, header, run_width as usize, group_style);
            }
        }

        // Column header row
        let header_y = area.y + 1;
        buf.set_style(
            Rect::new(area.x, header_y, used_width, 1),
            Style::default().bg(theme.surface),
        );
        for &(i, col_x) in &positions {
            let col = columns[i];
            let focused = i == self.focused_column;
            let style = if focused {
                Style::default().fg(theme.accent).bg(theme.accent_muted).bold()
            } else {
                Style::default().fg(theme.text_primary).bold()
            };
            let label = self.header_label(col.id, col.header);
            Self::put(buf, col_x, header_y, widths[i], &label, false, style);
        }

        // Separator
        buf.set_string(
            area.x,
            area.y + 2,
            horizontal_rule(used_width as usize),
            Style::default().fg(theme.border),
        );

        // Data rows
        let model = self.table.row_model();
        let page_rows = model.page_rows();
        let line_height = 1 + density.row_margin();
        let data_top = area.y + 3;

        if page_rows.is_empty() {
            let text = "暂无数据";
            let text_width = Line::from(text).width() as u16;
            buf.set_string(
                area.x + used_width.saturating_sub(text_width) / 2,
                data_top,
                text,
                Style::default().fg(theme.text_muted),
            );
            return;
        }

        for (n, row) in page_rows.iter().enumerate() {
            let y = data_top + n as u16 * line_height;
            if y >= area.bottom() {
                break;
            }

            let selected = n == self.selected_row;
            if selected {
                buf.set_style(
                    Rect::new(area.x, y, used_width, 1),
                    Style::default().bg(theme.accent_muted),
                );
            }

            let indent = "  ".repeat(row.depth());
            match row {
                TableRow::Group(group) => {
                    let marker = if group.expanded {
                        Separators::TRIANGLE_DOWN
                    } else {
                        Separators::TRIANGLE_RIGHT
                    };
                    let text = format!(
                        "{}{} {}: {} ({})",
                        indent, marker, group.header, group.value, group.leaf_count
                    );
                    buf.set_stringn(
                        area.x,
                        y,
                        &text,
                        used_width as usize,
                        Style::default().fg(theme.accent).bold(),
                    );
                }
                TableRow::Leaf(leaf) => {
                    for (k, &(i, col_x)) in positions.iter().enumerate() {
                        let col = columns[i];
                        let value = col.value(leaf.record);
                        let mut text = col.render(leaf.record);
                        if k == 0 {
                            text = format!("{}{}", indent, text);
                        }
                        let right = matches!(value, CellValue::Number(_));
                        let style = self.value_style(col.id, &value);
                        Self::put(buf, col_x, y, widths[i], &text, right, style);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::mock_funds::mock_funds;

    fn table() -> Table<FundProduct> {
        fund_table(mock_funds(), &TableSettings::default())
    }

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_column_layout() {
        let t = table();
        let headers: Vec<&str> = t.column_groups().iter().map(|g| g.header).collect();
        assert_eq!(headers, vec!["基金", "净值表现", "资产配置 (%)", "规模与风险"]);
        assert_eq!(t.columns().count(), 15);
        assert!(!t.can_filter("inceptionDate"));
        assert!(t.can_filter("ticker"));
        assert_eq!(
            t.column("strategy").map(|c| c.filter_variant),
            Some(FilterVariant::MultiSelect)
        );
    }

    #[test]
    fn test_cell_formats() {
        let t = table();
        let fund = &t.data()[3];
        let render = |id: &str| t.column(id).unwrap().render(fund);
        assert_eq!(render("navStart"), "0.986");
        assert_eq!(render("navReturn"), "10.95%");
        assert_eq!(render("ytdReturn"), "13.26%");
        assert_eq!(render("sharpe"), "0.93");
        assert_eq!(render("stockExposureEnd"), "95%");
        assert_eq!(render("aum"), "¥1,560,000,000");
        assert_eq!(render("inceptionDate"), "2020-01-08");
    }

    #[test]
    fn test_period_return_every_row() {
        let t = table();
        let col = t.column("navReturn").unwrap();
        for fund in t.data() {
            assert_eq!(col.render(fund), format_percent(fund.nav_end / fund.nav_start - 1.0));
        }
    }

    #[test]
    fn test_initial_state_single_page() {
        let t = table();
        let model = t.row_model();
        assert_eq!(model.page_size, 8);
        assert_eq!(model.page_count, 1);
        assert_eq!(model.page_rows().len(), 8);
    }

    #[test]
    fn test_search_by_manager_and_ticker() {
        let mut t = table();
        t.set_global_filter("李明哲");
        let model = t.row_model();
        assert_eq!(model.filtered_count, 1);

        t.set_global_filter("IE");
        let tickers: Vec<String> = t
            .row_model()
            .rows
            .iter()
            .filter_map(|r| match r {
                TableRow::Leaf(l) => Some(l.record.ticker.clone()),
                _ => None,
            })
            .collect();
        assert!(tickers.contains(&"IE3000".to_string()));
        assert!(tickers.contains(&"IE5000".to_string()));
    }

    #[test]
    fn test_sort_by_ytd_descending_first() {
        let mut t = table();
        t.toggle_sort("ytdReturn", false);
        let model = t.row_model();
        match &model.rows[0] {
            TableRow::Leaf(l) => assert_eq!(l.record.id, "FND-004"),
            _ => panic!("expected leaf"),
        }
    }

    #[test]
    fn test_inception_date_sorts_oldest_first() {
        let mut t = table();
        t.toggle_sort("inceptionDate", false);
        assert_eq!(t.sort_of("inceptionDate"), Some((false, 0)));
        match &t.row_model().rows[0] {
            TableRow::Leaf(l) => assert_eq!(l.record.id, "FND-003"),
            _ => panic!("expected leaf"),
        }
        t.toggle_sort("inceptionDate", false);
        match &t.row_model().rows[0] {
            TableRow::Leaf(l) => assert_eq!(l.record.id, "FND-008"),
            _ => panic!("expected leaf"),
        }
    }

    #[test]
    fn test_group_by_strategy() {
        let mut t = table();
        assert!(t.toggle_grouping("strategy"));
        let groups: Vec<String> = t
            .row_model()
            .rows
            .iter()
            .filter_map(|r| match r {
                TableRow::Group(g) => Some(g.value.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(groups, vec!["多资产", "量化对冲", "固收+", "指数增强"]);
        // 4 group rows + 8 leaves at page size 8
        assert_eq!(t.row_model().page_count, 2);
    }

    #[test]
    fn test_visible_columns_scrolls_to_focus() {
        let widths = [10u16, 10, 10, 10, 10];
        // 3 columns fit in 33 cells with spacing 1
        assert_eq!(visible_columns(&widths, 0, 0, 33, 1), vec![0, 1, 2]);
        assert_eq!(visible_columns(&widths, 0, 4, 33, 1), vec![2, 3, 4]);
        // Pinned column stays while scrolling
        assert_eq!(visible_columns(&widths, 1, 4, 33, 1), vec![0, 3, 4]);
        // Narrow area still shows one column
        assert_eq!(visible_columns(&widths, 0, 0, 5, 1), vec![0]);
    }

    #[test]
    fn test_render_rows() {
        let theme = Theme::default();
        let t = table();
        let area = Rect::new(0, 0, 200, 14);
        let mut buf = Buffer::empty(area);
        FundTableView::new(&t, &theme).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("SF0001"));
        assert!(text.contains("FI2088"));
        assert!(text.contains("1.563"));
        assert!(text.contains("¥1,280,000,000"));
    }

    #[test]
    fn test_render_empty_result() {
        let theme = Theme::default();
        let mut t = table();
        t.set_global_filter("zzzzzz");
        let area = Rect::new(0, 0, 80, 8);
        let mut buf = Buffer::empty(area);
        FundTableView::new(&t, &theme).render(area, &mut buf);
        assert!(!buffer_text(&buf).contains("SF0001"));
    }
}
