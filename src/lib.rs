//! Fund performance dashboard
//!
//! Summary cards and a searchable, filterable, sortable, groupable table
//! over a fixed set of fund products.

pub mod app;
pub mod config;
pub mod data;
pub mod format;
pub mod settings;
pub mod table;
pub mod themes;
pub mod ui;
pub mod views;
pub mod widgets;
