//! Row model: filter -> sort -> group -> expand -> paginate

use std::collections::HashSet;

use super::column::{CellValue, ColumnDef};
use super::filter::{best_score, matches_filter};
use super::Table;

/// Group header row
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRow {
    /// Unique path of group values from the outermost group
    pub key: String,
    pub column_id: &'static str,
    pub header: &'static str,
    pub value: String,
    pub depth: usize,
    pub leaf_count: usize,
    pub expanded: bool,
}

/// Data row
#[derive(Debug)]
pub struct LeafRow<'a, T> {
    /// Position in the table's dataset
    pub index: usize,
    pub depth: usize,
    pub record: &'a T,
}

#[derive(Debug)]
pub enum TableRow<'a, T> {
    Group(GroupRow),
    Leaf(LeafRow<'a, T>),
}

impl<T> TableRow<'_, T> {
    pub fn depth(&self) -> usize {
        match self {
            TableRow::Group(g) => g.depth,
            TableRow::Leaf(l) => l.depth,
        }
    }
}

/// Rows ready for display
#[derive(Debug)]
pub struct RowModel<'a, T> {
    /// All visible rows across pages
    pub rows: Vec<TableRow<'a, T>>,
    /// Data rows left after filtering
    pub filtered_count: usize,
    pub total_count: usize,
    pub page_index: usize,
    pub page_count: usize,
    pub page_size: usize,
}

impl<'a, T> RowModel<'a, T> {
    /// Rows on the current page
    pub fn page_rows(&self) -> &[TableRow<'a, T>] {
        let start = (self.page_index * self.page_size).min(self.rows.len());
        let end = (start + self.page_size).min(self.rows.len());
        &self.rows[start..end]
    }
}

/// Page count for `len` rows, never below one
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

impl<T> Table<T> {
    /// Indices of rows passing all filters, with their search score
    fn filtered_rows(&self) -> Vec<(usize, i64)> {
        let state = self.state();
        let global_columns: Vec<&ColumnDef<T>> = self
            .columns()
            .filter(|c| c.enable_global_filter)
            .collect();
        let column_filters: Vec<_> = state
            .column_filters
            .iter()
            .filter_map(|f| self.column(f.id).map(|c| (c, &f.value)))
            .collect();

        self.data()
            .iter()
            .enumerate()
            .filter_map(|(i, row)| {
                let score = if self.options().enable_global_filter {
                    let texts: Vec<String> = global_columns.iter().map(|c| c.render(row)).collect();
                    best_score(
                        &self.matcher,
                        texts.iter().map(String::as_str),
                        &state.global_filter,
                    )?
                } else {
                    0
                };

                let passes = column_filters
                    .iter()
                    .all(|(col, value)| matches_filter(&self.matcher, &col.render(row), value));

                passes.then_some((i, score))
            })
            .collect()
    }

    /// Apply sorting, or rank by search score when only searching
    fn sort_rows(&self, rows: &mut [(usize, i64)]) {
        let state = self.state();
        let data = self.data();
        let keys: Vec<(&ColumnDef<T>, bool)> = state
            .sorting
            .iter()
            .filter_map(|s| self.column(s.id).map(|c| (c, s.desc)))
            .collect();

        if !keys.is_empty() {
            rows.sort_by(|(a, _), (b, _)| {
                for (col, desc) in &keys {
                    let ord = col
                        .sorting_fn
                        .compare(&col.value(&data[*a]), &col.value(&data[*b]));
                    let ord = if *desc { ord.reverse() } else { ord };
                    if ord != std::cmp::Ordering::Equal {
                        return ord;
                    }
                }
                std::cmp::Ordering::Equal
            });
        } else if !state.global_filter.trim().is_empty() {
            rows.sort_by(|(_, a), (_, b)| b.cmp(a));
        }
    }

    /// Recursively emit group and leaf rows
    fn build_groups<'a>(
        &'a self,
        rows: &[usize],
        level: usize,
        parent_key: &str,
        collapsed: &HashSet<String>,
        out: &mut Vec<TableRow<'a, T>>,
    ) {
        let data = self.data();
        let grouping = &self.state().grouping;

        let column = match grouping.get(level).and_then(|id| self.column(id)) {
            Some(col) => col,
            None => {
                out.extend(rows.iter().map(|&index| {
                    TableRow::Leaf(LeafRow {
                        index,
                        depth: level,
                        record: &data[index],
                    })
                }));
                return;
            }
        };

        // First-appearance order
        let mut groups: Vec<(String, CellValue, Vec<usize>)> = Vec::new();
        for &index in rows {
            let row = &data[index];
            let text = column.render(row);
            match groups.iter_mut().find(|(value, _, _)| *value == text) {
                Some((_, _, members)) => members.push(index),
                None => groups.push((text, column.value(row), vec![index])),
            }
        }

        if let Some(entry) = self.state().sorting.iter().find(|s| s.id == column.id) {
            groups.sort_by(|(_, a, _), (_, b, _)| {
                let ord = column.sorting_fn.compare(a, b);
                if entry.desc {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }

        for (value, _, members) in groups {
            let key = format!("{}/{}={}", parent_key, column.id, value);
            let expanded = !collapsed.contains(&key);
            out.push(TableRow::Group(GroupRow {
                key: key.clone(),
                column_id: column.id,
                header: column.header,
                value,
                depth: level,
                leaf_count: members.len(),
                expanded,
            }));
            if expanded {
                self.build_groups(&members, level + 1, &key, collapsed, out);
            }
        }
    }

    /// Filtered, sorted, grouped rows with `collapsed` applied
    fn visible_rows(&self, collapsed: &HashSet<String>) -> (Vec<TableRow<'_, T>>, usize) {
        let mut filtered = self.filtered_rows();
        self.sort_rows(&mut filtered);
        let indices: Vec<usize> = filtered.into_iter().map(|(i, _)| i).collect();

        let mut rows = Vec::with_capacity(indices.len());
        self.build_groups(&indices, 0, "", collapsed, &mut rows);
        (rows, indices.len())
    }

    /// Keys of every group in the current grouping, ignoring collapse state
    pub fn group_keys(&self) -> Vec<String> {
        let (rows, _) = self.visible_rows(&HashSet::new());
        rows.into_iter()
            .filter_map(|row| match row {
                TableRow::Group(g) => Some(g.key),
                TableRow::Leaf(_) => None,
            })
            .collect()
    }

    /// Build the display rows for the current state
    pub fn row_model(&self) -> RowModel<'_, T> {
        let state = self.state();
        let (rows, filtered_count) = self.visible_rows(&state.collapsed);
        let page_size = state.pagination.page_size.max(1);
        let page_count = page_count(rows.len(), page_size);

        RowModel {
            page_index: state.pagination.page_index.min(page_count - 1),
            page_count,
            page_size,
            filtered_count,
            total_count: self.data().len(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 8), 1);
        assert_eq!(page_count(8, 8), 1);
        assert_eq!(page_count(9, 8), 2);
        assert_eq!(page_count(5, 0), 1);
    }
}
