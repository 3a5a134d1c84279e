//! Table engine
//!
//! Holds column definitions, the dataset and the interaction state, and
//! turns them into display rows. Search, column filters, multi-sort,
//! nested grouping, pagination, resizing, pinning and density all live here
//! so the widgets only render what the row model hands them.

use fuzzy_matcher::skim::SkimMatcherV2;
use tracing::debug;

pub mod column;
pub mod filter;
pub mod model;
pub mod state;

pub use column::{CellValue, ColumnDef, ColumnGroup, FilterVariant, SortingFn};
pub use model::{GroupRow, LeafRow, RowModel, TableRow};
pub use state::{ColumnFilter, Density, FilterValue, Pagination, SortEntry, TableState};

use column::{MAX_COLUMN_WIDTH, MIN_COLUMN_WIDTH};

/// Table-level feature switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    pub enable_column_filters: bool,
    pub enable_column_resizing: bool,
    pub enable_grouping: bool,
    pub enable_pinning: bool,
    pub enable_global_filter: bool,
    pub enable_density_toggle: bool,
    pub enable_sorting: bool,
    pub enable_multi_sort: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            enable_column_filters: true,
            enable_column_resizing: true,
            enable_grouping: true,
            enable_pinning: true,
            enable_global_filter: true,
            enable_density_toggle: true,
            enable_sorting: true,
            enable_multi_sort: true,
        }
    }
}

/// Interactive table over rows of `T`
pub struct Table<T> {
    groups: Vec<ColumnGroup<T>>,
    data: Vec<T>,
    options: TableOptions,
    state: TableState,
    matcher: SkimMatcherV2,
}

impl<T> Table<T> {
    pub fn new(
        groups: Vec<ColumnGroup<T>>,
        data: Vec<T>,
        options: TableOptions,
        initial_state: TableState,
    ) -> Self {
        Self {
            groups,
            data,
            options,
            state: initial_state,
            matcher: SkimMatcherV2::default(),
        }
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn column_groups(&self) -> &[ColumnGroup<T>] {
        &self.groups
    }

    /// Leaf columns in definition order
    pub fn columns(&self) -> impl Iterator<Item = &ColumnDef<T>> {
        self.groups.iter().flat_map(|g| g.columns.iter())
    }

    pub fn column(&self, id: &str) -> Option<&ColumnDef<T>> {
        self.columns().find(|c| c.id == id)
    }

    /// Header of the group owning a column
    pub fn group_header_of(&self, id: &str) -> Option<&'static str> {
        self.groups
            .iter()
            .find(|g| g.columns.iter().any(|c| c.id == id))
            .map(|g| g.header)
    }

    /// Display order: pinned columns first (pin order), then the rest
    pub fn ordered_columns(&self) -> Vec<&ColumnDef<T>> {
        let mut ordered: Vec<&ColumnDef<T>> = self
            .state
            .pinned
            .iter()
            .filter_map(|id| self.column(id))
            .collect();
        ordered.extend(self.columns().filter(|c| !self.state.pinned.contains(&c.id)));
        ordered
    }

    /// Current width of a column in cells
    pub fn column_size(&self, id: &str) -> u16 {
        self.state
            .column_sizes
            .get(id)
            .copied()
            .or_else(|| self.column(id).map(|c| c.size))
            .unwrap_or(column::DEFAULT_COLUMN_WIDTH)
    }

    fn reset_page(&mut self) {
        self.state.pagination.page_index = 0;
    }

    // ── Search ──────────────────────────────────────────────────────────────

    pub fn set_global_filter(&mut self, query: impl Into<String>) {
        if !self.options.enable_global_filter {
            return;
        }
        self.state.global_filter = query.into();
        self.reset_page();
    }

    pub fn push_global_filter(&mut self, c: char) {
        let mut query = self.state.global_filter.clone();
        query.push(c);
        self.set_global_filter(query);
    }

    pub fn pop_global_filter(&mut self) {
        let mut query = self.state.global_filter.clone();
        query.pop();
        self.set_global_filter(query);
    }

    pub fn toggle_global_filter_visible(&mut self) {
        self.state.show_global_filter = !self.state.show_global_filter;
    }

    // ── Column filters ──────────────────────────────────────────────────────

    /// Whether a column accepts a filter
    pub fn can_filter(&self, id: &str) -> bool {
        self.options.enable_column_filters
            && self.column(id).map_or(false, |c| c.enable_column_filter)
    }

    /// Set or clear (empty value) a column filter. Returns false if the column cannot be filtered.
    pub fn set_column_filter(&mut self, id: &str, value: FilterValue) -> bool {
        let column_id = match self.column(id) {
            Some(col) if self.can_filter(id) => col.id,
            _ => return false,
        };

        self.state.column_filters.retain(|f| f.id != column_id);
        if !value.is_empty() {
            debug!("Column filter {} = {:?}", column_id, value);
            self.state.column_filters.push(ColumnFilter {
                id: column_id,
                value,
            });
        }
        self.reset_page();
        true
    }

    pub fn column_filter(&self, id: &str) -> Option<&FilterValue> {
        self.state
            .column_filters
            .iter()
            .find(|f| f.id == id)
            .map(|f| &f.value)
    }

    /// Drop the search and every column filter
    pub fn clear_filters(&mut self) {
        self.state.global_filter.clear();
        self.state.column_filters.clear();
        self.reset_page();
    }

    pub fn has_active_filters(&self) -> bool {
        self.state.has_filters()
    }

    /// Distinct display values of a column, in data order
    pub fn facet_values(&self, id: &str) -> Vec<String> {
        let Some(col) = self.column(id) else {
            return Vec::new();
        };
        let mut values: Vec<String> = Vec::new();
        for row in &self.data {
            let text = col.render(row);
            if !values.contains(&text) {
                values.push(text);
            }
        }
        values
    }

    // ── Sorting ─────────────────────────────────────────────────────────────

    /// Cycle a column's sort: first direction -> reversed -> off.
    /// With `multi` the column is added to the existing sort keys instead of replacing them.
    pub fn toggle_sort(&mut self, id: &str, multi: bool) {
        if !self.options.enable_sorting {
            return;
        }
        let Some(col) = self.column(id).filter(|c| c.enable_sorting) else {
            return;
        };
        let column_id = col.id;
        let desc_first = self
            .data
            .first()
            .map_or(false, |row| !col.value(row).sorts_ascending_first());

        let existing = self.state.sorting.iter().position(|s| s.id == column_id);
        let next = match existing.map(|i| self.state.sorting[i]) {
            None => Some(desc_first),
            Some(entry) if entry.desc == desc_first => Some(!desc_first),
            Some(_) => None,
        };

        if multi && self.options.enable_multi_sort {
            match (existing, next) {
                (Some(i), Some(desc)) => self.state.sorting[i].desc = desc,
                (Some(i), None) => {
                    self.state.sorting.remove(i);
                }
                (None, Some(desc)) => self.state.sorting.push(SortEntry { id: column_id, desc }),
                (None, None) => {}
            }
        } else {
            self.state.sorting = next
                .map(|desc| SortEntry { id: column_id, desc })
                .into_iter()
                .collect();
        }
        debug!("Sorting now {:?}", self.state.sorting);
        self.reset_page();
    }

    /// Sort direction (`true` = descending) and key position for a column
    pub fn sort_of(&self, id: &str) -> Option<(bool, usize)> {
        self.state
            .sorting
            .iter()
            .position(|s| s.id == id)
            .map(|i| (self.state.sorting[i].desc, i))
    }

    // ── Grouping ────────────────────────────────────────────────────────────

    /// Add or remove a grouping column. Returns whether the column is now grouped.
    pub fn toggle_grouping(&mut self, id: &str) -> bool {
        let column_id = match self.column(id) {
            Some(col) if self.options.enable_grouping && col.enable_grouping => col.id,
            _ => return false,
        };

        let grouped = if let Some(i) = self.state.grouping.iter().position(|g| *g == column_id) {
            self.state.grouping.remove(i);
            false
        } else {
            self.state.grouping.push(column_id);
            true
        };
        self.state.collapsed.clear();
        self.reset_page();
        grouped
    }

    pub fn is_grouped(&self, id: &str) -> bool {
        self.state.grouping.iter().any(|g| *g == id)
    }

    pub fn clear_grouping(&mut self) {
        self.state.grouping.clear();
        self.state.collapsed.clear();
        self.reset_page();
    }

    pub fn toggle_expanded(&mut self, key: &str) {
        if !self.state.collapsed.remove(key) {
            self.state.collapsed.insert(key.to_string());
        }
    }

    /// Expand or collapse every group
    pub fn set_all_expanded(&mut self, expanded: bool) {
        if expanded {
            self.state.collapsed.clear();
        } else {
            self.state.collapsed = self.group_keys().into_iter().collect();
        }
        self.reset_page();
    }

    pub fn all_expanded(&self) -> bool {
        self.state.collapsed.is_empty()
    }

    // ── Pagination ──────────────────────────────────────────────────────────

    pub fn set_page_index(&mut self, index: usize) {
        let page_count = self.row_model().page_count;
        self.state.pagination.page_index = index.min(page_count - 1);
    }

    pub fn next_page(&mut self) {
        let current = self.row_model().page_index;
        self.set_page_index(current + 1);
    }

    pub fn prev_page(&mut self) {
        let current = self.row_model().page_index;
        self.set_page_index(current.saturating_sub(1));
    }

    // ── Column sizing / pinning / density ──────────────────────────────────

    /// Grow or shrink a column, clamped. Returns the new width.
    pub fn resize_column(&mut self, id: &str, delta: i32) -> u16 {
        let current = self.column_size(id);
        let column_id = match self.column(id) {
            Some(col) if self.options.enable_column_resizing => col.id,
            _ => return current,
        };
        let size = (current as i32 + delta)
            .clamp(MIN_COLUMN_WIDTH as i32, MAX_COLUMN_WIDTH as i32) as u16;
        self.state.column_sizes.insert(column_id, size);
        size
    }

    /// Pin or unpin a column on the left. Returns whether it is now pinned.
    pub fn toggle_pin(&mut self, id: &str) -> bool {
        let column_id = match self.column(id) {
            Some(col) if self.options.enable_pinning => col.id,
            _ => return false,
        };
        if let Some(i) = self.state.pinned.iter().position(|p| *p == column_id) {
            self.state.pinned.remove(i);
            false
        } else {
            self.state.pinned.push(column_id);
            true
        }
    }

    pub fn is_pinned(&self, id: &str) -> bool {
        self.state.pinned.iter().any(|p| *p == id)
    }

    pub fn cycle_density(&mut self) -> Density {
        if self.options.enable_density_toggle {
            self.state.density = self.state.density.next();
        }
        self.state.density
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Row {
        name: &'static str,
        kind: &'static str,
        value: f64,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "alpha", kind: "A", value: 3.0 },
            Row { name: "beta", kind: "B", value: 1.0 },
            Row { name: "gamma", kind: "A", value: 2.0 },
            Row { name: "delta", kind: "C", value: 5.0 },
            Row { name: "epsilon", kind: "B", value: 4.0 },
        ]
    }

    fn table() -> Table<Row> {
        let groups = vec![
            ColumnGroup::new(
                "info",
                "Info",
                vec![
                    ColumnDef::new("name", "Name", |r: &Row| CellValue::Text(r.name.to_string())),
                    ColumnDef::new("kind", "Kind", |r: &Row| CellValue::Text(r.kind.to_string()))
                        .filter_variant(FilterVariant::MultiSelect),
                ],
            ),
            ColumnGroup::new(
                "num",
                "Numbers",
                vec![ColumnDef::new("value", "Value", |r: &Row| CellValue::Number(r.value))
                    .enable_column_filter(false)
                    .enable_grouping(false)],
            ),
        ];
        let state = TableState {
            pagination: Pagination { page_index: 0, page_size: 2 },
            ..TableState::default()
        };
        Table::new(groups, rows(), TableOptions::default(), state)
    }

    fn leaf_names(table: &Table<Row>) -> Vec<&'static str> {
        table
            .row_model()
            .rows
            .iter()
            .filter_map(|r| match r {
                TableRow::Leaf(l) => Some(l.record.name),
                TableRow::Group(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_unfiltered_keeps_data_order() {
        let t = table();
        assert_eq!(leaf_names(&t), vec!["alpha", "beta", "gamma", "delta", "epsilon"]);
    }

    #[test]
    fn test_global_filter() {
        let mut t = table();
        t.set_global_filter("eps");
        assert_eq!(leaf_names(&t), vec!["epsilon"]);
        assert!(t.has_active_filters());
        t.clear_filters();
        assert_eq!(t.row_model().filtered_count, 5);
    }

    #[test]
    fn test_multi_select_filter() {
        let mut t = table();
        assert!(t.set_column_filter("kind", FilterValue::Selection(vec!["A".into(), "C".into()])));
        assert_eq!(leaf_names(&t), vec!["alpha", "gamma", "delta"]);

        assert!(t.set_column_filter("kind", FilterValue::Selection(vec![])));
        assert!(t.column_filter("kind").is_none());
        assert_eq!(leaf_names(&t).len(), 5);
    }

    #[test]
    fn test_disabled_column_filter_rejected() {
        let mut t = table();
        assert!(!t.set_column_filter("value", FilterValue::Text("3".into())));
        assert!(!t.has_active_filters());
    }

    #[test]
    fn test_sort_cycle_text_starts_ascending() {
        let mut t = table();
        t.toggle_sort("name", false);
        assert_eq!(t.sort_of("name"), Some((false, 0)));
        assert_eq!(leaf_names(&t)[0], "alpha");
        t.toggle_sort("name", false);
        assert_eq!(t.sort_of("name"), Some((true, 0)));
        assert_eq!(leaf_names(&t)[0], "gamma");
        t.toggle_sort("name", false);
        assert_eq!(t.sort_of("name"), None);
    }

    #[test]
    fn test_sort_number_starts_descending() {
        let mut t = table();
        t.toggle_sort("value", false);
        assert_eq!(leaf_names(&t), vec!["delta", "epsilon", "alpha", "gamma", "beta"]);
    }

    #[test]
    fn test_multi_sort() {
        let mut t = table();
        t.toggle_sort("kind", false);
        t.toggle_sort("value", true);
        assert_eq!(t.state().sorting.len(), 2);
        // A: alpha(3) gamma(2), B: epsilon(4) beta(1), C: delta
        assert_eq!(leaf_names(&t), vec!["alpha", "gamma", "epsilon", "beta", "delta"]);

        // Single toggle replaces the multi-sort
        t.toggle_sort("name", false);
        assert_eq!(t.state().sorting.len(), 1);
    }

    #[test]
    fn test_grouping_first_appearance() {
        let mut t = table();
        assert!(t.toggle_grouping("kind"));
        let model = t.row_model();
        let groups: Vec<(String, usize)> = model
            .rows
            .iter()
            .filter_map(|r| match r {
                TableRow::Group(g) => Some((g.value.clone(), g.leaf_count)),
                _ => None,
            })
            .collect();
        assert_eq!(
            groups,
            vec![("A".to_string(), 2), ("B".to_string(), 2), ("C".to_string(), 1)]
        );
        assert_eq!(model.rows.len(), 8);
        assert_eq!(model.rows[1].depth(), 1);
    }

    #[test]
    fn test_grouping_disabled_column() {
        let mut t = table();
        assert!(!t.toggle_grouping("value"));
        assert!(t.state().grouping.is_empty());
    }

    #[test]
    fn test_collapse_group() {
        let mut t = table();
        t.toggle_grouping("kind");
        let key = t.group_keys()[0].clone();
        t.toggle_expanded(&key);
        // Group A collapsed: 3 headers + 3 leaves
        assert_eq!(t.row_model().rows.len(), 6);
        t.set_all_expanded(false);
        assert_eq!(t.row_model().rows.len(), 3);
        t.set_all_expanded(true);
        assert_eq!(t.row_model().rows.len(), 8);
    }

    #[test]
    fn test_grouped_sorted_groups() {
        let mut t = table();
        t.toggle_grouping("kind");
        t.toggle_sort("kind", false);
        t.toggle_sort("kind", false);
        let first_group = t.row_model().rows.iter().find_map(|r| match r {
            TableRow::Group(g) => Some(g.value.clone()),
            _ => None,
        });
        assert_eq!(first_group.as_deref(), Some("C"));
    }

    #[test]
    fn test_pagination_and_reset() {
        let mut t = table();
        let model = t.row_model();
        assert_eq!(model.page_count, 3);
        assert_eq!(model.page_rows().len(), 2);

        t.next_page();
        t.next_page();
        t.next_page();
        assert_eq!(t.state().pagination.page_index, 2);
        assert_eq!(t.row_model().page_rows().len(), 1);

        t.set_global_filter("a");
        assert_eq!(t.state().pagination.page_index, 0);
        t.prev_page();
        assert_eq!(t.state().pagination.page_index, 0);
    }

    #[test]
    fn test_resize_clamps() {
        let mut t = table();
        assert_eq!(t.resize_column("name", 1000), MAX_COLUMN_WIDTH);
        assert_eq!(t.resize_column("name", -1000), MIN_COLUMN_WIDTH);
        assert_eq!(t.column_size("name"), MIN_COLUMN_WIDTH);
    }

    #[test]
    fn test_pinning_order() {
        let mut t = table();
        assert!(t.toggle_pin("value"));
        let order: Vec<&str> = t.ordered_columns().iter().map(|c| c.id).collect();
        assert_eq!(order, vec!["value", "name", "kind"]);
        assert!(!t.toggle_pin("value"));
        assert!(!t.is_pinned("value"));
    }

    #[test]
    fn test_facet_values() {
        let t = table();
        assert_eq!(t.facet_values("kind"), vec!["A", "B", "C"]);
        assert!(t.facet_values("missing").is_empty());
    }

    #[test]
    fn test_group_header_lookup() {
        let t = table();
        assert_eq!(t.group_header_of("value"), Some("Numbers"));
        assert_eq!(t.group_header_of("nope"), None);
    }
}
