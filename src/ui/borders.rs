//! Separator glyphs for visual hierarchy

/// Separator characters
pub struct Separators;

impl Separators {
    /// Light horizontal line
    pub const LIGHT_HORIZONTAL: &'static str = "─";

    /// Vertical bar between status segments
    pub const VERTICAL: &'static str = "│";

    /// Diamond (for branding)
    pub const DIAMOND: &'static str = "◆";

    /// Filled circle (status indicator)
    pub const CIRCLE_FILLED: &'static str = "●";

    /// Check box states for multi-select
    pub const CHECKED: &'static str = "[x]";
    pub const UNCHECKED: &'static str = "[ ]";

    /// Triangle right (collapsed group)
    pub const TRIANGLE_RIGHT: &'static str = "▶";

    /// Triangle down (expanded group)
    pub const TRIANGLE_DOWN: &'static str = "▼";

    /// Sort direction markers
    pub const ARROW_UP: &'static str = "↑";
    pub const ARROW_DOWN: &'static str = "↓";

    /// Pinned column marker
    pub const PIN: &'static str = "⊢";

    /// Filtered column marker
    pub const FILTER: &'static str = "≡";
}

/// A horizontal rule `width` cells wide
pub fn horizontal_rule(width: usize) -> String {
    Separators::LIGHT_HORIZONTAL.repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(horizontal_rule(4), "────");
        assert_eq!(horizontal_rule(0), "");
    }
}
