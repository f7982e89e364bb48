//! Glyphs shared by the components

use ratatui::{style::Style, text::Span};

/// A named single-cell glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    /// Closed dropdown / opens downward
    ArrowDown,
    /// Dropdown opening upward
    ArrowUp,
    /// "Add option" affordance
    Add,
    /// Tooltip trigger
    Info,
    /// Checked box mark
    Check,
    /// Horizontal rule cell
    Divider,
}

impl Icon {
    /// The glyph
    pub const fn symbol(self) -> &'static str {
        match self {
            Icon::ArrowDown => "▾",
            Icon::ArrowUp => "▴",
            Icon::Add => "+",
            Icon::Info => "ⓘ",
            Icon::Check => "x",
            Icon::Divider => "─",
        }
    }

    /// The glyph as a styled span
    pub fn span(self, style: Style) -> Span<'static> {
        Span::styled(self.symbol(), style)
    }
}

/// A divider line `width` cells wide
pub fn divider(width: u16) -> String {
    Icon::Divider.symbol().repeat(width as usize)
}
