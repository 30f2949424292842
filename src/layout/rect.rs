//! Rect: a rectangle primitive and the editor's screen split.

/// A rectangle defined by position and size.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate (column) of the top-left corner.
    pub x: u16,
    /// Y coordinate (row) of the top-left corner.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from a terminal size (full screen).
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Zero-sized rectangle.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Check if the rectangle is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Get the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Split horizontally at a given column offset.
    pub fn split_horizontal(&self, at: u16) -> (Self, Self) {
        let at = at.min(self.width);
        (
            Self::new(self.x, self.y, at, self.height),
            Self::new(self.x + at, self.y, self.width - at, self.height),
        )
    }

    /// Split vertically at a given row offset.
    pub fn split_vertical(&self, at: u16) -> (Self, Self) {
        let at = at.min(self.height);
        (
            Self::new(self.x, self.y, self.width, at),
            Self::new(self.x, self.y + at, self.width, self.height - at),
        )
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}

/// Editor area plus an optional one-row status bar at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Text area, including the gutter.
    pub editor: Rect,
    /// Status row; empty when the bar is hidden.
    pub status: Rect,
}

impl ScreenLayout {
    /// Compute the layout for a terminal of `width` x `height`.
    pub fn compute(width: u16, height: u16, status_bar: bool) -> Self {
        let screen = Rect::from_size(width, height);
        if !status_bar || height < 2 {
            return Self {
                editor: screen,
                status: Rect::ZERO,
            };
        }
        let (editor, status) = screen.split_vertical(height - 1);
        Self { editor, status }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(2, 3, 10, 5);
        assert_eq!(r.right(), 12);
        assert_eq!(r.bottom(), 8);
        assert!(r.contains(2, 3));
        assert!(!r.contains(12, 3));
        assert!(Rect::ZERO.is_empty());
    }

    #[test]
    fn test_split_clamps() {
        let r = Rect::from_size(10, 4);
        let (left, right) = r.split_horizontal(15);
        assert_eq!(left.width, 10);
        assert!(right.is_empty());
    }

    #[test]
    fn test_screen_layout() {
        let layout = ScreenLayout::compute(80, 24, true);
        assert_eq!(layout.editor, Rect::new(0, 0, 80, 23));
        assert_eq!(layout.status, Rect::new(0, 23, 80, 1));

        let bare = ScreenLayout::compute(80, 24, false);
        assert_eq!(bare.editor, Rect::from_size(80, 24));
        assert!(bare.status.is_empty());
    }
}
