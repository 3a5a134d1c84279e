//! Theme system for color management
//!
//! Light and dark palettes, selected from the settings file.

pub mod theme;

pub use theme::Theme;
