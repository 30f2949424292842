//! Colors for the editor and the status bar.

use crate::editor::TokenKind;
use crossterm::style::Color;

/// Color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Default text.
    pub fg: Color,
    /// Editor background.
    pub bg: Color,
    /// Line numbers.
    pub gutter_fg: Color,
    /// Gutter background.
    pub gutter_bg: Color,
    /// Background of the cursor's line.
    pub current_line_bg: Color,
    /// Background of selected text.
    pub selection_bg: Color,
    /// Primary keywords.
    pub keyword: Color,
    /// Secondary keywords.
    pub secondary_keyword: Color,
    /// String literals.
    pub string: Color,
    /// Comments.
    pub comment: Color,
    /// Status bar text.
    pub status_fg: Color,
    /// Status bar background.
    pub status_bg: Color,
    /// Mode label while locked.
    pub locked_fg: Color,
    /// Progress text when playback is nearly done.
    pub warning_fg: Color,
}

impl Palette {
    /// Palette for dark terminals.
    pub const fn dark() -> Self {
        Self {
            fg: Color::Rgb { r: 220, g: 220, b: 220 },
            bg: Color::Rgb { r: 30, g: 30, b: 30 },
            gutter_fg: Color::Rgb { r: 120, g: 120, b: 120 },
            gutter_bg: Color::Rgb { r: 40, g: 40, b: 40 },
            current_line_bg: Color::Rgb { r: 45, g: 50, b: 70 },
            selection_bg: Color::Rgb { r: 70, g: 80, b: 120 },
            keyword: Color::Cyan,
            secondary_keyword: Color::Magenta,
            string: Color::Magenta,
            comment: Color::Green,
            status_fg: Color::Rgb { r: 150, g: 150, b: 150 },
            status_bg: Color::Rgb { r: 40, g: 40, b: 40 },
            locked_fg: Color::Rgb { r: 100, g: 200, b: 100 },
            warning_fg: Color::Red,
        }
    }

    /// Palette for light terminals.
    pub const fn light() -> Self {
        Self {
            fg: Color::Black,
            bg: Color::White,
            gutter_fg: Color::Rgb { r: 120, g: 120, b: 120 },
            gutter_bg: Color::Rgb { r: 240, g: 240, b: 240 },
            current_line_bg: Color::Rgb { r: 220, g: 230, b: 255 },
            selection_bg: Color::Rgb { r: 180, g: 200, b: 240 },
            keyword: Color::Blue,
            secondary_keyword: Color::DarkMagenta,
            string: Color::Magenta,
            comment: Color::DarkGreen,
            status_fg: Color::Rgb { r: 60, g: 60, b: 60 },
            status_bg: Color::Rgb { r: 225, g: 225, b: 225 },
            locked_fg: Color::DarkGreen,
            warning_fg: Color::Red,
        }
    }

    /// Pick the dark or light palette.
    pub const fn for_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Foreground for a highlighted token.
    pub const fn token(&self, kind: TokenKind) -> Color {
        match kind {
            TokenKind::Plain => self.fg,
            TokenKind::Keyword => self.keyword,
            TokenKind::SecondaryKeyword => self.secondary_keyword,
            TokenKind::String => self.string,
            TokenKind::Comment => self.comment,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}
