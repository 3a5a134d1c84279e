//! Help overlay
//!
//! Keyboard shortcuts reference overlay.

use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph, Widget};

use crate::themes::Theme;
use crate::ui::panels::{Panel, PanelStyle};

/// A keyboard shortcut entry
struct ShortcutEntry {
    key: &'static str,
    description: &'static str,
}

/// Help overlay showing keyboard shortcuts
pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    fn navigation_shortcuts() -> Vec<ShortcutEntry> {
        vec![
            ShortcutEntry { key: "j/k ↑/↓", description: "选择行" },
            ShortcutEntry { key: "h/l ←/→", description: "选择列" },
            ShortcutEntry { key: "n/p", description: "下一页 / 上一页" },
            ShortcutEntry { key: "Enter", description: "展开 / 折叠分组" },
            ShortcutEntry { key: "e", description: "全部展开 / 折叠" },
        ]
    }

    fn general_shortcuts() -> Vec<ShortcutEntry> {
        vec![
            ShortcutEntry { key: "/", description: "搜索" },
            ShortcutEntry { key: "Esc", description: "退出搜索 / 清空" },
            ShortcutEntry { key: "?", description: "帮助" },
            ShortcutEntry { key: "q", description: "退出" },
        ]
    }

    fn column_shortcuts() -> Vec<ShortcutEntry> {
        vec![
            ShortcutEntry { key: "s", description: "排序" },
            ShortcutEntry { key: "S", description: "追加排序" },
            ShortcutEntry { key: "f", description: "列筛选" },
            ShortcutEntry { key: "F", description: "清除全部筛选" },
            ShortcutEntry { key: "g", description: "按列分组" },
            ShortcutEntry { key: "G", description: "取消分组" },
        ]
    }

    fn layout_shortcuts() -> Vec<ShortcutEntry> {
        vec![
            ShortcutEntry { key: "+/-", description: "调整列宽" },
            ShortcutEntry { key: "P", description: "固定 / 取消固定列" },
            ShortcutEntry { key: "d", description: "切换行密度" },
        ]
    }

    /// Render a section of shortcuts
    fn render_section(
        &self,
        title: &str,
        shortcuts: &[ShortcutEntry],
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
    ) {
        Paragraph::new(title)
            .style(Style::default().fg(theme.text_secondary).underlined())
            .render(Rect { height: 1, ..area }, buf);

        for (i, entry) in shortcuts.iter().enumerate() {
            if i as u16 + 1 >= area.height {
                break;
            }
            let y = area.y + i as u16 + 1;

            Paragraph::new(format!("{:>10}", entry.key))
                .style(Style::default().fg(theme.accent).bold())
                .render(Rect::new(area.x, y, 10.min(area.width), 1), buf);

            Paragraph::new(format!("  {}", entry.description))
                .style(Style::default().fg(theme.text_primary))
                .render(
                    Rect::new(area.x + 10, y, area.width.saturating_sub(10), 1),
                    buf,
                );
        }
    }

    /// Render the help overlay
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if !self.visible {
            return;
        }

        let width = ((area.width as f32 * 0.7) as u16).min(area.width.saturating_sub(4));
        let height = 16u16.min(area.height.saturating_sub(2));
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        let overlay_area = Rect { x, y, width, height };

        Clear.render(overlay_area, buf);

        let block = Panel::new(theme)
            .title("快捷键")
            .style(PanelStyle::Elevated)
            .block();

        let inner = block.inner(overlay_area);
        block.render(overlay_area, buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6), // Navigation
                Constraint::Length(1),
                Constraint::Min(0),    // General
            ])
            .split(columns[0]);

        self.render_section("导航", &Self::navigation_shortcuts(), left[0], buf, theme);
        self.render_section("通用", &Self::general_shortcuts(), left[2], buf, theme);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7), // Columns
                Constraint::Length(1),
                Constraint::Min(0),    // Layout
            ])
            .split(columns[1]);

        self.render_section("列操作", &Self::column_shortcuts(), right[0], buf, theme);
        self.render_section("布局", &Self::layout_shortcuts(), right[2], buf, theme);

        let footer_area = Rect {
            x: inner.x,
            y: inner.y + inner.height.saturating_sub(1),
            width: inner.width,
            height: 1,
        };
        Paragraph::new("[按任意键关闭]")
            .style(Style::default().fg(theme.text_muted))
            .alignment(Alignment::Center)
            .render(footer_area, buf);
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}
