//! `OutputBuffer`: single-syscall output buffer for terminal commands.

use crossterm::{
    cursor::{self, SetCursorStyle},
    queue,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;

/// Pre-allocated buffer for building a frame.
///
/// All commands are queued here with crossterm, then flushed in a single
/// `write()` so a repaint never shows half-drawn lines.
pub struct OutputBuffer {
    data: Vec<u8>,
}

// Writing into a Vec<u8> cannot fail, so the io::Result of `queue!` is
// discarded throughout.
impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical frame (16KB).
    pub fn new() -> Self {
        Self::with_capacity(16 * 1024)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a string at the current position.
    #[inline]
    pub fn print(&mut self, s: &str) {
        let _ = queue!(self.data, Print(s));
    }

    /// Write `count` spaces.
    pub fn pad(&mut self, count: usize) {
        self.data.extend(std::iter::repeat(b' ').take(count));
    }

    /// Move cursor to column `x`, row `y` (0-indexed).
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        let _ = queue!(self.data, cursor::MoveTo(x, y));
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) {
        let _ = queue!(self.data, cursor::Hide);
    }

    /// Show cursor.
    #[inline]
    pub fn cursor_show(&mut self) {
        let _ = queue!(self.data, cursor::Show);
    }

    /// Block cursor when `block`, bar cursor otherwise.
    pub fn cursor_style(&mut self, block: bool) {
        let style = if block {
            SetCursorStyle::SteadyBlock
        } else {
            SetCursorStyle::BlinkingBar
        };
        let _ = queue!(self.data, style);
    }

    /// Set foreground color.
    #[inline]
    pub fn set_fg(&mut self, color: Color) {
        let _ = queue!(self.data, SetForegroundColor(color));
    }

    /// Set background color.
    #[inline]
    pub fn set_bg(&mut self, color: Color) {
        let _ = queue!(self.data, SetBackgroundColor(color));
    }

    /// Turn on bold.
    #[inline]
    pub fn bold(&mut self) {
        let _ = queue!(self.data, SetAttribute(Attribute::Bold));
    }

    /// Turn on italics.
    #[inline]
    pub fn italic(&mut self) {
        let _ = queue!(self.data, SetAttribute(Attribute::Italic));
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        let _ = queue!(self.data, SetAttribute(Attribute::Reset));
    }

    /// Clear the entire screen.
    #[inline]
    pub fn clear_screen(&mut self) {
        let _ = queue!(self.data, Clear(ClearType::All));
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
