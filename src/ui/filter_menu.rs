//! Column filter popup
//!
//! Free-text input for text columns, checkbox list for multi-select columns.

use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Clear, List, ListItem, ListState, Paragraph, Widget};

use crate::table::{FilterValue, FilterVariant};
use crate::themes::Theme;
use crate::ui::borders::Separators;
use crate::ui::panels::{Panel, PanelStyle};

/// Outcome of a key press in the menu
#[derive(Debug, Clone, PartialEq)]
pub enum FilterMenuResult {
    /// Still editing
    Pending,
    /// Apply this filter value (empty clears)
    Apply(FilterValue),
    /// Close without changes
    Cancelled,
}

/// Filter editor for one column
pub struct FilterMenu {
    column_id: &'static str,
    header: &'static str,
    variant: FilterVariant,
    /// Text query (text variant)
    query: String,
    /// Options and checked state (multi-select variant)
    options: Vec<(String, bool)>,
    selected: usize,
    list_state: ListState,
}

impl FilterMenu {
    /// Text filter seeded with the current value
    pub fn text(column_id: &'static str, header: &'static str, current: Option<&FilterValue>) -> Self {
        let query = match current {
            Some(FilterValue::Text(q)) => q.clone(),
            _ => String::new(),
        };
        Self {
            column_id,
            header,
            variant: FilterVariant::Text,
            query,
            options: Vec::new(),
            selected: 0,
            list_state: ListState::default(),
        }
    }

    /// Multi-select over `values`, pre-checking the current selection
    pub fn multi_select(
        column_id: &'static str,
        header: &'static str,
        values: Vec<String>,
        current: Option<&FilterValue>,
    ) -> Self {
        let checked: &[String] = match current {
            Some(FilterValue::Selection(v)) => v.as_slice(),
            _ => &[],
        };
        let options = values
            .into_iter()
            .map(|v| {
                let on = checked.contains(&v);
                (v, on)
            })
            .collect::<Vec<_>>();
        let mut list_state = ListState::default();
        list_state.select(if options.is_empty() { None } else { Some(0) });
        Self {
            column_id,
            header,
            variant: FilterVariant::MultiSelect,
            query: String::new(),
            options,
            selected: 0,
            list_state,
        }
    }

    pub fn column_id(&self) -> &'static str {
        self.column_id
    }

    /// Value the menu would apply right now
    pub fn value(&self) -> FilterValue {
        match self.variant {
            FilterVariant::Text => FilterValue::Text(self.query.trim().to_string()),
            FilterVariant::MultiSelect => FilterValue::Selection(
                self.options
                    .iter()
                    .filter(|(_, on)| *on)
                    .map(|(v, _)| v.clone())
                    .collect(),
            ),
        }
    }

    fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.list_state.select(Some(self.selected));
        }
    }

    fn down(&mut self) {
        if self.selected < self.options.len().saturating_sub(1) {
            self.selected += 1;
            self.list_state.select(Some(self.selected));
        }
    }

    fn toggle_selected(&mut self) {
        if let Some((_, on)) = self.options.get_mut(self.selected) {
            *on = !*on;
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> FilterMenuResult {
        match key {
            KeyCode::Esc => return FilterMenuResult::Cancelled,
            KeyCode::Enter => return FilterMenuResult::Apply(self.value()),
            _ => {}
        }

        match self.variant {
            FilterVariant::Text => match key {
                KeyCode::Backspace => {
                    self.query.pop();
                }
                KeyCode::Char(c) => self.query.push(c),
                _ => {}
            },
            FilterVariant::MultiSelect => match key {
                KeyCode::Up | KeyCode::Char('k') => self.up(),
                KeyCode::Down | KeyCode::Char('j') => self.down(),
                KeyCode::Char(' ') => self.toggle_selected(),
                KeyCode::Char('a') => {
                    let all_on = self.options.iter().all(|(_, on)| *on);
                    for (_, on) in &mut self.options {
                        *on = !all_on;
                    }
                }
                _ => {}
            },
        }
        FilterMenuResult::Pending
    }

    /// Render the menu centered in `area`
    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let list_height = match self.variant {
            FilterVariant::Text => 1,
            FilterVariant::MultiSelect => self.options.len().max(1) as u16,
        };
        let width = 40u16.min(area.width);
        let height = (list_height + 4).min(area.height);
        let x = area.x + (area.width - width) / 2;
        let y = area.y + (area.height - height) / 3;
        let menu_area = Rect { x, y, width, height };

        Clear.render(menu_area, buf);

        let title = format!("筛选: {}", self.header);
        let block = Panel::new(theme)
            .title(&title)
            .style(PanelStyle::Elevated)
            .block();

        let inner = block.inner(menu_area);
        block.render(menu_area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        match self.variant {
            FilterVariant::Text => {
                Paragraph::new(format!("> {}_", self.query))
                    .style(Style::default().fg(theme.text_primary))
                    .render(chunks[0], buf);
            }
            FilterVariant::MultiSelect => {
                let items: Vec<ListItem> = self
                    .options
                    .iter()
                    .map(|(value, on)| {
                        let mark = if *on {
                            Separators::CHECKED
                        } else {
                            Separators::UNCHECKED
                        };
                        ListItem::new(format!("{} {}", mark, value))
                    })
                    .collect();
                let list = List::new(items)
                    .style(Style::default().fg(theme.text_primary))
                    .highlight_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
                    .highlight_symbol("› ");
                ratatui::widgets::StatefulWidget::render(list, chunks[0], buf, &mut self.list_state);
            }
        }

        let hint = match self.variant {
            FilterVariant::Text => "[Enter] 应用  [Esc] 取消",
            FilterVariant::MultiSelect => "[Space] 勾选  [a] 全选  [Enter] 应用",
        };
        Paragraph::new(hint)
            .style(Style::default().fg(theme.text_muted))
            .render(chunks[1], buf);
    }
}
