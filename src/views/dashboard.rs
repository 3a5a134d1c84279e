//! Dashboard view - header, summary cards and the fund table

use anyhow::Result;
use chrono::Local;
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::*;
use tracing::debug;

use crate::data::{FundProduct, FundSummary};
use crate::settings::DashboardSettings;
use crate::table::{FilterVariant, Table, TableRow};
use crate::themes::Theme;
use crate::ui::{FilterMenu, FilterMenuResult, Separators};
use crate::widgets::{fund_table, FilterAlert, FundTableView, MetricsSummary, Toolbar};

pub const TITLE: &str = "基金产品收益资产看板";
pub const DESCRIPTION: &str = "汇总期初、期末及股票期货敞口，支持快速筛选、排序与分组";

/// Column width step for `+` / `-`
const RESIZE_STEP: i32 = 2;

/// Root dashboard view
pub struct DashboardView {
    theme: Theme,
    table: Table<FundProduct>,
    metrics: MetricsSummary,
    /// Index into `Table::ordered_columns`
    focused_column: usize,
    /// Row on the current page
    selected_row: usize,
    searching: bool,
    filter_menu: Option<FilterMenu>,
}

impl DashboardView {
    pub fn new(funds: Vec<FundProduct>, settings: &DashboardSettings, theme: Theme) -> Self {
        let metrics = MetricsSummary::from_summary(&FundSummary::from_funds(&funds));
        Self {
            theme,
            table: fund_table(funds, &settings.table),
            metrics,
            focused_column: 0,
            selected_row: 0,
            searching: false,
            filter_menu: None,
        }
    }

    pub fn table(&self) -> &Table<FundProduct> {
        &self.table
    }

    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    /// Id of the column under the cursor
    pub fn focused_column_id(&self) -> Option<&'static str> {
        self.table
            .ordered_columns()
            .get(self.focused_column)
            .map(|c| c.id)
    }

    fn column_count(&self) -> usize {
        self.table.ordered_columns().len()
    }

    /// Keep the cursor on a row that exists
    fn clamp_selection(&mut self) {
        let rows = self.table.row_model().page_rows().len();
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
    }

    /// Toggle expansion when a group row is selected
    fn activate_selected(&mut self) {
        let key = match self.table.row_model().page_rows().get(self.selected_row) {
            Some(TableRow::Group(group)) => group.key.clone(),
            _ => return,
        };
        self.table.toggle_expanded(&key);
    }

    fn open_filter_menu(&mut self) {
        let Some(id) = self.focused_column_id() else {
            return;
        };
        if !self.table.can_filter(id) {
            debug!("Column {} is not filterable", id);
            return;
        }
        let Some(col) = self.table.column(id) else {
            return;
        };
        let current = self.table.column_filter(id);
        let menu = match col.filter_variant {
            FilterVariant::Text => FilterMenu::text(id, col.header, current),
            FilterVariant::MultiSelect => {
                FilterMenu::multi_select(id, col.header, self.table.facet_values(id), current)
            }
        };
        self.filter_menu = Some(menu);
    }

    fn toggle_pin_focused(&mut self) {
        let Some(id) = self.focused_column_id() else {
            return;
        };
        self.table.toggle_pin(id);
        // Keep the cursor on the same column after reordering
        if let Some(i) = self.table.ordered_columns().iter().position(|c| c.id == id) {
            self.focused_column = i;
        }
    }

    fn handle_search_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => self.searching = false,
            KeyCode::Esc => {
                self.searching = false;
                self.table.set_global_filter("");
            }
            KeyCode::Backspace => self.table.pop_global_filter(),
            KeyCode::Char(c) => self.table.push_global_filter(c),
            _ => {}
        }
    }

    fn handle_menu_key(&mut self, key: KeyCode) {
        let Some(menu) = self.filter_menu.as_mut() else {
            return;
        };
        match menu.handle_key(key) {
            FilterMenuResult::Pending => {}
            FilterMenuResult::Cancelled => self.filter_menu = None,
            FilterMenuResult::Apply(value) => {
                let id = menu.column_id();
                self.table.set_column_filter(id, value);
                self.filter_menu = None;
            }
        }
    }

    fn handle_table_key(&mut self, key: KeyCode) {
        let focused = self.focused_column_id();
        match key {
            KeyCode::Char('/') => {
                if self.table.options().enable_global_filter {
                    self.searching = true;
                    if !self.table.state().show_global_filter {
                        self.table.toggle_global_filter_visible();
                    }
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.focused_column = self.focused_column.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.focused_column + 1 < self.column_count() {
                    self.focused_column += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_row += 1;
            }
            KeyCode::Char('s') => {
                if let Some(id) = focused {
                    self.table.toggle_sort(id, false);
                }
            }
            KeyCode::Char('S') => {
                if let Some(id) = focused {
                    self.table.toggle_sort(id, true);
                }
            }
            KeyCode::Char('f') => self.open_filter_menu(),
            KeyCode::Char('F') => self.table.clear_filters(),
            KeyCode::Char('g') => {
                if let Some(id) = focused {
                    self.table.toggle_grouping(id);
                }
            }
            KeyCode::Char('G') => self.table.clear_grouping(),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_selected(),
            KeyCode::Char('e') => {
                let expand = !self.table.all_expanded();
                self.table.set_all_expanded(expand);
            }
            KeyCode::Char('n') | KeyCode::PageDown => self.table.next_page(),
            KeyCode::Char('p') | KeyCode::PageUp => self.table.prev_page(),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                if let Some(id) = focused {
                    self.table.resize_column(id, RESIZE_STEP);
                }
            }
            KeyCode::Char('-') => {
                if let Some(id) = focused {
                    self.table.resize_column(id, -RESIZE_STEP);
                }
            }
            KeyCode::Char('P') => self.toggle_pin_focused(),
            KeyCode::Char('d') => {
                self.table.cycle_density();
            }
            _ => {}
        }
    }

    /// Status bar segments: visible rows, sorting, grouping, page
    pub fn status_metrics(&self) -> Vec<(String, String)> {
        let model = self.table.row_model();
        let state = self.table.state();
        let header = |id: &str| self.table.column(id).map_or(id, |c| c.header).to_string();

        let sorting = if state.sorting.is_empty() {
            "无".to_string()
        } else {
            state
                .sorting
                .iter()
                .map(|s| {
                    let arrow = if s.desc { Separators::ARROW_DOWN } else { Separators::ARROW_UP };
                    format!("{}{}", header(s.id), arrow)
                })
                .collect::<Vec<_>>()
                .join(", ")
        };
        let grouping = if state.grouping.is_empty() {
            "无".to_string()
        } else {
            state.grouping.iter().map(|id| header(*id)).collect::<Vec<_>>().join(" > ")
        };

        let mut metrics = vec![
            (
                "显示".to_string(),
                format!("{}/{}", model.filtered_count, model.total_count),
            ),
            ("排序".to_string(), sorting),
            ("分组".to_string(), grouping),
        ];
        for filter in &state.column_filters {
            metrics.push((header(filter.id), filter.value.summary()));
        }
        metrics
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{} ", Separators::DIAMOND),
                    Style::default().fg(self.theme.accent),
                ),
                Span::styled(TITLE, Style::default().fg(self.theme.text_primary).bold()),
            ]),
            Line::from(Span::styled(
                DESCRIPTION,
                Style::default().fg(self.theme.text_secondary),
            )),
        ];
        Paragraph::new(lines).render(area, buf);
    }

    fn render_pagination(&self, area: Rect, buf: &mut Buffer) {
        let model = self.table.row_model();
        let text = format!(
            "第 {}/{} 页 {} 共 {} 条 {} 每页 {} 行",
            model.page_index + 1,
            model.page_count,
            Separators::VERTICAL,
            model.filtered_count,
            Separators::VERTICAL,
            model.page_size,
        );
        Paragraph::new(text)
            .style(Style::default().fg(self.theme.text_muted))
            .alignment(Alignment::Right)
            .render(area, buf);
    }
}

impl super::ViewTrait for DashboardView {
    fn render(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        // Clear background
        let bg = Block::default().style(Style::default().bg(self.theme.background));
        frame.render_widget(bg, area);

        let alert_height = if self.table.has_active_filters() { 1 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),            // Header
                Constraint::Length(4),            // Summary cards
                Constraint::Length(1),            // Toolbar
                Constraint::Min(5),               // Table
                Constraint::Length(alert_height), // Filter alert
                Constraint::Length(1),            // Pagination
            ])
            .horizontal_margin(1)
            .split(area);

        self.render_header(chunks[0], frame.buffer_mut());
        self.metrics.render(chunks[1], frame.buffer_mut(), &self.theme);

        let toolbar = Toolbar::new(
            &self.theme,
            &self.table.state().global_filter,
            Local::now().date_naive(),
        )
        .searching(self.searching)
        .show_search(self.table.state().show_global_filter)
        .density(self.table.state().density);
        frame.render_widget(toolbar, chunks[2]);

        let table_view = FundTableView::new(&self.table, &self.theme)
            .focused_column(self.focused_column)
            .selected_row(self.selected_row);
        frame.render_widget(table_view, chunks[3]);

        if alert_height > 0 {
            let model = self.table.row_model();
            frame.render_widget(
                FilterAlert::new(&self.theme, model.filtered_count, model.total_count),
                chunks[4],
            );
        }

        self.render_pagination(chunks[5], frame.buffer_mut());

        if let Some(menu) = self.filter_menu.as_mut() {
            menu.render(area, frame.buffer_mut(), &self.theme);
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) -> Result<super::ViewAction> {
        if self.filter_menu.is_some() {
            self.handle_menu_key(key);
        } else if self.searching {
            self.handle_search_key(key);
        } else {
            self.handle_table_key(key);
        }
        self.clamp_selection();
        Ok(super::ViewAction::Continue)
    }

    fn captures_input(&self) -> bool {
        self.searching || self.filter_menu.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::mock_funds::mock_funds;
    use crate::views::ViewTrait;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn view() -> DashboardView {
        DashboardView::new(mock_funds(), &DashboardSettings::default(), Theme::default())
    }

    fn press(view: &mut DashboardView, keys: &[KeyCode]) {
        for key in keys {
            view.handle_key(*key).unwrap();
        }
    }

    #[test]
    fn test_search_mode_captures_text() {
        let mut v = view();
        press(&mut v, &[KeyCode::Char('/')]);
        assert!(v.captures_input());
        press(&mut v, &[KeyCode::Char('I'), KeyCode::Char('E')]);
        assert_eq!(v.table().state().global_filter, "IE");
        press(&mut v, &[KeyCode::Enter]);
        assert!(!v.captures_input());
        assert_eq!(v.table().row_model().filtered_count, 2);

        press(&mut v, &[KeyCode::Char('/'), KeyCode::Esc]);
        assert!(v.table().state().global_filter.is_empty());
    }

    #[test]
    fn test_sort_focused_column() {
        let mut v = view();
        assert_eq!(v.focused_column_id(), Some("fundName"));
        press(&mut v, &[KeyCode::Right, KeyCode::Char('s')]);
        assert_eq!(v.table().sort_of("ticker"), Some((false, 0)));
    }

    #[test]
    fn test_strategy_filter_through_menu() {
        let mut v = view();
        press(&mut v, &[KeyCode::Right, KeyCode::Right, KeyCode::Right]);
        assert_eq!(v.focused_column_id(), Some("strategy"));
        press(&mut v, &[KeyCode::Char('f')]);
        assert!(v.captures_input());
        // Second option is 量化对冲
        press(&mut v, &[KeyCode::Down, KeyCode::Char(' '), KeyCode::Enter]);
        assert!(!v.captures_input());
        assert_eq!(v.table().row_model().filtered_count, 2);
        assert!(v.table().has_active_filters());

        press(&mut v, &[KeyCode::Char('F')]);
        assert!(!v.table().has_active_filters());
    }

    #[test]
    fn test_inception_date_not_filterable() {
        let mut v = view();
        press(&mut v, &[KeyCode::Right; 4]);
        assert_eq!(v.focused_column_id(), Some("inceptionDate"));
        press(&mut v, &[KeyCode::Char('f')]);
        assert!(!v.captures_input());
    }

    #[test]
    fn test_group_collapse_with_enter() {
        let mut v = view();
        press(&mut v, &[KeyCode::Right, KeyCode::Right, KeyCode::Right, KeyCode::Char('g')]);
        assert!(v.table().is_grouped("strategy"));
        let before = v.table().row_model().rows.len();
        press(&mut v, &[KeyCode::Enter]);
        let after = v.table().row_model().rows.len();
        assert_eq!(before - after, 2);
    }

    #[test]
    fn test_selection_clamped_to_page() {
        let mut v = view();
        press(&mut v, &[KeyCode::Down; 20]);
        assert_eq!(v.selected_row(), 7);
        press(&mut v, &[KeyCode::Char('/'), KeyCode::Char('李'), KeyCode::Char('明')]);
        assert_eq!(v.selected_row(), 0);
    }

    #[test]
    fn test_pin_keeps_focus_on_column() {
        let mut v = view();
        press(&mut v, &[KeyCode::Right; 14]);
        assert_eq!(v.focused_column_id(), Some("aum"));
        press(&mut v, &[KeyCode::Char('P')]);
        assert_eq!(v.focused_column_id(), Some("aum"));
        assert!(v.table().is_pinned("aum"));
    }

    #[test]
    fn test_status_metrics() {
        let mut v = view();
        press(&mut v, &[KeyCode::Char('s')]);
        let metrics = v.status_metrics();
        assert_eq!(metrics[0], ("显示".to_string(), "8/8".to_string()));
        assert!(metrics[1].1.starts_with("基金名称"));
        assert_eq!(metrics[2].1, "无");
    }

    #[test]
    fn test_render_full_view() {
        let mut v = view();
        let backend = TestBackend::new(220, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                v.render(f, area).unwrap();
            })
            .unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf[(x, y)].symbol());
            }
        }
        assert!(text.contains("¥8,920,000,000"));
        assert!(text.contains("SF0001"));
    }
}
