//! Column definitions - field accessors, cell formatters and feature flags

use chrono::NaiveDate;
use std::cmp::Ordering;

use crate::format::format_date;

/// Default column width in terminal cells
pub const DEFAULT_COLUMN_WIDTH: u16 = 14;
/// Narrowest a column can be resized to
pub const MIN_COLUMN_WIDTH: u16 = 6;
/// Widest a column can be resized to
pub const MAX_COLUMN_WIDTH: u16 = 40;

/// Raw value extracted from a row
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl CellValue {
    /// Whether the first sort on this value should be ascending. Only numbers start descending.
    pub fn sorts_ascending_first(&self) -> bool {
        !matches!(self, CellValue::Number(_))
    }
}

/// Default cell text when a column has no custom formatter
pub fn display_value(value: &CellValue) -> String {
    match value {
        CellValue::Text(s) => s.clone(),
        CellValue::Number(n) => n.to_string(),
        CellValue::Date(d) => format_date(*d),
    }
}

/// Comparison used when sorting a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortingFn {
    /// Picked from the value type: text -> alphanumeric, number -> basic, date -> datetime
    #[default]
    Auto,
    /// Case-insensitive natural order, digit runs compared by value
    Alphanumeric,
    Datetime,
    Basic,
}

impl SortingFn {
    pub fn compare(self, a: &CellValue, b: &CellValue) -> Ordering {
        match self {
            SortingFn::Auto => match (a, b) {
                (CellValue::Text(x), CellValue::Text(y)) => compare_alphanumeric(x, y),
                (CellValue::Date(x), CellValue::Date(y)) => x.cmp(y),
                _ => compare_basic(a, b),
            },
            SortingFn::Alphanumeric => match (a, b) {
                (CellValue::Text(x), CellValue::Text(y)) => compare_alphanumeric(x, y),
                _ => compare_alphanumeric(&display_value(a), &display_value(b)),
            },
            SortingFn::Datetime => match (a, b) {
                (CellValue::Date(x), CellValue::Date(y)) => x.cmp(y),
                _ => compare_basic(a, b),
            },
            SortingFn::Basic => compare_basic(a, b),
        }
    }
}

fn compare_basic(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (CellValue::Text(x), CellValue::Text(y)) => x.cmp(y),
        (CellValue::Date(x), CellValue::Date(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Split into alternating digit / non-digit runs
fn chunks(s: &str) -> Vec<(bool, String)> {
    let mut out: Vec<(bool, String)> = Vec::new();
    for ch in s.chars() {
        let is_digit = ch.is_ascii_digit();
        match out.last_mut() {
            Some((digit, run)) if *digit == is_digit => run.push(ch),
            _ => out.push((is_digit, ch.to_string())),
        }
    }
    out
}

/// Natural-order string comparison
pub fn compare_alphanumeric(a: &str, b: &str) -> Ordering {
    let a = chunks(&a.to_lowercase());
    let b = chunks(&b.to_lowercase());

    for ((a_digit, a_run), (b_digit, b_run)) in a.iter().zip(b.iter()) {
        let ord = if *a_digit && *b_digit {
            let a_trim = a_run.trim_start_matches('0');
            let b_trim = b_run.trim_start_matches('0');
            a_trim
                .len()
                .cmp(&b_trim.len())
                .then_with(|| a_trim.cmp(b_trim))
        } else {
            a_run.cmp(b_run)
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

/// Column filter UI variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterVariant {
    /// Free text, fuzzy matched
    #[default]
    Text,
    /// Pick any of the column's distinct values
    MultiSelect,
}

/// A leaf column bound to one field (or computed value) of `T`
pub struct ColumnDef<T> {
    pub id: &'static str,
    pub header: &'static str,
    pub accessor: fn(&T) -> CellValue,
    pub cell: fn(&CellValue) -> String,
    pub size: u16,
    pub sorting_fn: SortingFn,
    pub filter_variant: FilterVariant,
    pub enable_column_filter: bool,
    pub enable_grouping: bool,
    pub enable_sorting: bool,
    pub enable_global_filter: bool,
}

impl<T> ColumnDef<T> {
    pub fn new(id: &'static str, header: &'static str, accessor: fn(&T) -> CellValue) -> Self {
        Self {
            id,
            header,
            accessor,
            cell: display_value,
            size: DEFAULT_COLUMN_WIDTH,
            sorting_fn: SortingFn::Auto,
            filter_variant: FilterVariant::Text,
            enable_column_filter: true,
            enable_grouping: true,
            enable_sorting: true,
            enable_global_filter: true,
        }
    }

    pub fn cell(mut self, cell: fn(&CellValue) -> String) -> Self {
        self.cell = cell;
        self
    }

    pub fn size(mut self, size: u16) -> Self {
        self.size = size.clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
        self
    }

    pub fn sorting_fn(mut self, sorting_fn: SortingFn) -> Self {
        self.sorting_fn = sorting_fn;
        self
    }

    pub fn filter_variant(mut self, variant: FilterVariant) -> Self {
        self.filter_variant = variant;
        self
    }

    pub fn enable_column_filter(mut self, enabled: bool) -> Self {
        self.enable_column_filter = enabled;
        self
    }

    pub fn enable_grouping(mut self, enabled: bool) -> Self {
        self.enable_grouping = enabled;
        self
    }

    pub fn enable_sorting(mut self, enabled: bool) -> Self {
        self.enable_sorting = enabled;
        self
    }

    pub fn enable_global_filter(mut self, enabled: bool) -> Self {
        self.enable_global_filter = enabled;
        self
    }

    /// Raw value for a row
    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    /// Display text for a row
    pub fn render(&self, row: &T) -> String {
        (self.cell)(&self.value(row))
    }
}

/// Header spanning several leaf columns
pub struct ColumnGroup<T> {
    pub id: &'static str,
    pub header: &'static str,
    pub columns: Vec<ColumnDef<T>>,
}

impl<T> ColumnGroup<T> {
    pub fn new(id: &'static str, header: &'static str, columns: Vec<ColumnDef<T>>) -> Self {
        Self { id, header, columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphanumeric_orders_digit_runs_numerically() {
        assert_eq!(compare_alphanumeric("fund2", "fund10"), Ordering::Less);
        assert_eq!(compare_alphanumeric("Fund10", "fund9"), Ordering::Greater);
        assert_eq!(compare_alphanumeric("abc", "ABC"), Ordering::Equal);
        assert_eq!(compare_alphanumeric("沪深300", "中证500"), "沪".cmp("中"));
    }

    #[test]
    fn test_alphanumeric_prefix_shorter_first() {
        assert_eq!(compare_alphanumeric("SF", "SF0001"), Ordering::Less);
    }

    #[test]
    fn test_basic_numbers() {
        let a = CellValue::Number(1.5);
        let b = CellValue::Number(-2.0);
        assert_eq!(SortingFn::Basic.compare(&a, &b), Ordering::Greater);
        assert_eq!(SortingFn::Auto.compare(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_datetime() {
        let a = CellValue::Date(NaiveDate::from_ymd_opt(2019, 7, 1).unwrap());
        let b = CellValue::Date(NaiveDate::from_ymd_opt(2018, 3, 15).unwrap());
        assert_eq!(SortingFn::Datetime.compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_size_is_clamped() {
        let col: ColumnDef<()> = ColumnDef::new("x", "X", |_| CellValue::Number(0.0)).size(200);
        assert_eq!(col.size, MAX_COLUMN_WIDTH);
        let col: ColumnDef<()> = ColumnDef::new("x", "X", |_| CellValue::Number(0.0)).size(1);
        assert_eq!(col.size, MIN_COLUMN_WIDTH);
    }

    #[test]
    fn test_numbers_sort_descending_first() {
        assert!(CellValue::Text("a".into()).sorts_ascending_first());
        assert!(CellValue::Date(NaiveDate::from_ymd_opt(2020, 1, 8).unwrap()).sorts_ascending_first());
        assert!(!CellValue::Number(1.0).sorts_ascending_first());
    }
}
