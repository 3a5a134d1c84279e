//! Theme structure and application
//!
//! Semantic color system: colors are organized by purpose, not by color name.

use ratatui::style::Color;

use crate::settings::ThemeSettings;

/// Theme colors with semantic organization
#[derive(Clone, Debug)]
pub struct Theme {
    // ─────────────────────────────────────────────────────────────────────────
    // Surfaces - Background layers
    // ─────────────────────────────────────────────────────────────────────────
    /// Main background color
    pub background: Color,
    /// Card/panel background and table header
    pub surface: Color,
    /// Overlays (help, filter menu)
    pub surface_elevated: Color,

    // ─────────────────────────────────────────────────────────────────────────
    // Text - Foreground colors
    // ─────────────────────────────────────────────────────────────────────────
    /// Primary text - headers, values, active items
    pub text_primary: Color,
    /// Secondary text - labels, descriptions
    pub text_secondary: Color,
    /// Muted text - hints, placeholders
    pub text_muted: Color,

    // ─────────────────────────────────────────────────────────────────────────
    // Accents
    // ─────────────────────────────────────────────────────────────────────────
    /// Primary brand color
    pub accent: Color,
    /// Selected row / focused column background
    pub accent_muted: Color,

    // ─────────────────────────────────────────────────────────────────────────
    // Semantic - Status colors
    // ─────────────────────────────────────────────────────────────────────────
    pub success: Color,
    pub error: Color,
    pub info: Color,

    // ─────────────────────────────────────────────────────────────────────────
    // Borders
    // ─────────────────────────────────────────────────────────────────────────
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    /// Light theme - white surfaces, blue primary
    pub fn light() -> Self {
        Self {
            background: Color::Rgb(255, 255, 255),      // #ffffff
            surface: Color::Rgb(250, 250, 250),         // #fafafa - header cells
            surface_elevated: Color::Rgb(245, 245, 245),

            text_primary: Color::Rgb(31, 31, 31),       // #1f1f1f
            text_secondary: Color::Rgb(89, 89, 89),     // #595959
            text_muted: Color::Rgb(140, 140, 140),      // #8c8c8c

            accent: Color::Rgb(22, 119, 255),           // #1677ff
            accent_muted: Color::Rgb(230, 244, 255),    // #e6f4ff

            success: Color::Rgb(82, 196, 26),           // #52c41a
            error: Color::Rgb(255, 77, 79),             // #ff4d4f
            info: Color::Rgb(22, 119, 255),

            border: Color::Rgb(240, 240, 240),          // #f0f0f0
            border_focused: Color::Rgb(22, 119, 255),
        }
    }

    /// Dark theme - slate surfaces
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(31, 36, 43),         // #1f242b - Dark slate
            surface: Color::Rgb(42, 48, 56),            // Slightly lighter
            surface_elevated: Color::Rgb(58, 65, 75),   // #3a414b - Slate

            text_primary: Color::Rgb(245, 245, 247),    // #f5f5f7 - Off-white
            text_secondary: Color::Rgb(180, 180, 185),
            text_muted: Color::Rgb(136, 136, 136),      // #888888

            accent: Color::Rgb(137, 180, 250),          // #89b4fa - Soft blue
            accent_muted: Color::Rgb(52, 62, 82),

            success: Color::Rgb(139, 213, 162),         // #8bd5a2 - Soft green
            error: Color::Rgb(255, 107, 107),           // #ff6b6b - Soft red
            info: Color::Rgb(137, 180, 250),

            border: Color::Rgb(58, 65, 75),
            border_focused: Color::Rgb(137, 180, 250),
        }
    }

    /// Build from settings: mode picks the base palette, `accent` overrides the brand color
    pub fn from_settings(settings: &ThemeSettings) -> Self {
        let mut theme = match settings.mode.to_lowercase().as_str() {
            "dark" => Self::dark(),
            _ => Self::light(),
        };
        if let Some(accent) = settings.accent.as_deref().and_then(Self::hex_to_color) {
            theme.accent = accent;
            theme.info = accent;
            theme.border_focused = accent;
        }
        theme
    }

    /// Convert hex string to Color
    pub fn hex_to_color(hex: &str) -> Option<Color> {
        let hex = hex.trim_start_matches('#');
        // Byte slicing below needs ASCII
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Color::Rgb(r, g, b))
    }

    /// Positive values green, negative red
    pub fn signed_color(&self, value: f64) -> Color {
        if value >= 0.0 {
            self.success
        } else {
            self.error
        }
    }
}
