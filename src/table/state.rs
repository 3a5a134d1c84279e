//! Table interaction state

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Row density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Compact,
    #[default]
    Comfortable,
    Spacious,
}

impl Density {
    /// Cycle to next density
    pub fn next(self) -> Self {
        match self {
            Self::Comfortable => Self::Compact,
            Self::Compact => Self::Spacious,
            Self::Spacious => Self::Comfortable,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Compact => "紧凑",
            Self::Comfortable => "标准",
            Self::Spacious => "宽松",
        }
    }

    /// Blank lines below each row
    pub fn row_margin(self) -> u16 {
        match self {
            Self::Spacious => 1,
            _ => 0,
        }
    }

    /// Gap between columns
    pub fn column_spacing(self) -> u16 {
        match self {
            Self::Compact => 1,
            Self::Comfortable => 2,
            Self::Spacious => 3,
        }
    }
}

/// Value of a single column filter
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Selection(Vec<String>),
}

impl FilterValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(s) => s.trim().is_empty(),
            FilterValue::Selection(values) => values.is_empty(),
        }
    }

    /// Short description for the status bar
    pub fn summary(&self) -> String {
        match self {
            FilterValue::Text(s) => format!("\"{}\"", s),
            FilterValue::Selection(values) => values.join("|"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFilter {
    pub id: &'static str,
    pub value: FilterValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortEntry {
    pub id: &'static str,
    pub desc: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Everything the user can change about the table
#[derive(Debug, Clone, Default)]
pub struct TableState {
    pub global_filter: String,
    pub column_filters: Vec<ColumnFilter>,
    /// Applied in order, first entry is the primary key
    pub sorting: Vec<SortEntry>,
    /// Column ids, outermost group first
    pub grouping: Vec<&'static str>,
    /// Group keys the user collapsed; everything else is expanded
    pub collapsed: HashSet<String>,
    pub pagination: Pagination,
    /// Resized widths, keyed by column id
    pub column_sizes: HashMap<&'static str, u16>,
    /// Left-pinned column ids in pin order
    pub pinned: Vec<&'static str>,
    pub density: Density,
    pub show_global_filter: bool,
}

impl TableState {
    /// Whether any search or column filter narrows the rows
    pub fn has_filters(&self) -> bool {
        !self.global_filter.trim().is_empty() || !self.column_filters.is_empty()
    }
}
