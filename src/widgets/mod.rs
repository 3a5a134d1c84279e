//! Widget modules for UI components

pub mod fund_table;
pub mod metrics_summary;
pub mod toolbar;

pub use fund_table::{fund_table, FundTableView};
pub use metrics_summary::MetricsSummary;
pub use toolbar::{FilterAlert, Toolbar};
