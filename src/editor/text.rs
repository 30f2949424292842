//! Text Surface: the visible, editable buffer behind the editor.
//!
//! A multi-line text buffer with a cursor and an optional selection
//! anchor. Offsets are byte offsets that always sit on a char boundary;
//! deletion works on grapheme clusters so combined characters go away
//! in one keystroke.

use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// The visible text of the editor with cursor and selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSurface {
    /// Current text content.
    text: String,
    /// Cursor position (byte offset).
    cursor: usize,
    /// Selection anchor; the selection spans anchor..cursor in either order.
    anchor: Option<usize>,
}

impl TextSurface {
    /// Create an empty surface.
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            anchor: None,
        }
    }

    /// Get the current text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position as a byte offset.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the surface is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the whole content, moving the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.cursor = self.text.len();
        self.anchor = None;
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.anchor = None;
    }

    /// Append text at the end and move the cursor there.
    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
        self.cursor = self.text.len();
        self.anchor = None;
    }

    /// Place the cursor, clamped to the text and snapped back to a char boundary.
    pub fn set_cursor(&mut self, pos: usize) {
        let mut pos = pos.min(self.text.len());
        while !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        self.cursor = pos;
        self.anchor = None;
    }

    /// The selected byte range, if any and non-empty.
    pub fn selection(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some(anchor.min(self.cursor)..anchor.max(self.cursor))
    }

    /// Check whether a non-empty selection exists.
    pub fn has_selection(&self) -> bool {
        self.selection().is_some()
    }

    /// Select `range`, leaving the cursor at its end.
    pub fn select(&mut self, range: Range<usize>) {
        let end = range.end.min(self.text.len());
        let start = range.start.min(end);
        self.anchor = Some(start);
        self.cursor = end;
    }

    /// Drop the selection without touching the text.
    pub const fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// The selected text, if any.
    pub fn selected_text(&self) -> Option<&str> {
        self.selection().map(|r| &self.text[r])
    }

    /// Delete the selection. Returns `true` if anything was removed.
    pub fn delete_selection(&mut self) -> bool {
        match self.selection() {
            Some(range) => {
                self.cursor = range.start;
                self.text.replace_range(range, "");
                self.anchor = None;
                true
            }
            None => {
                self.anchor = None;
                false
            }
        }
    }

    /// Insert a string at the cursor, replacing the selection.
    pub fn insert_str(&mut self, s: &str) {
        self.delete_selection();
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Insert a character at the cursor, replacing the selection.
    pub fn insert_char(&mut self, c: char) {
        self.delete_selection();
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the selection, or the grapheme before the cursor.
    pub fn backspace(&mut self) {
        if self.delete_selection() || self.cursor == 0 {
            return;
        }
        let prev = self.prev_boundary(self.cursor);
        self.text.replace_range(prev..self.cursor, "");
        self.cursor = prev;
    }

    /// Delete the selection, or the grapheme at the cursor.
    pub fn delete(&mut self) {
        if self.delete_selection() || self.cursor >= self.text.len() {
            return;
        }
        let next = self.next_boundary(self.cursor);
        self.text.replace_range(self.cursor..next, "");
    }

    /// Remove `len` bytes immediately before the cursor.
    ///
    /// The range is clamped to the start of the text and to a char boundary.
    pub fn delete_before(&mut self, len: usize) {
        self.anchor = None;
        let mut start = self.cursor.saturating_sub(len);
        while !self.text.is_char_boundary(start) {
            start -= 1;
        }
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    /// Prefix every line touched by the selection with `unit`.
    ///
    /// The selection grows to keep covering the same text. Returns the
    /// number of lines indented.
    pub fn indent_selected_lines(&mut self, unit: &str) -> usize {
        let Some(range) = self.selection() else {
            return 0;
        };
        let cursor_at_end = self.cursor == range.end;

        let mut starts = vec![self.line_start(range.start)];
        starts.extend(
            self.text[range.start..range.end]
                .match_indices('\n')
                .map(|(i, _)| range.start + i + 1)
                .filter(|&s| s < range.end),
        );

        // Insert back to front so earlier offsets stay valid.
        for &start in starts.iter().rev() {
            self.text.insert_str(start, unit);
        }

        let lines = starts.len();
        let new_start = range.start + unit.len();
        let new_end = range.end + unit.len() * lines;
        if cursor_at_end {
            self.anchor = Some(new_start);
            self.cursor = new_end;
        } else {
            self.anchor = Some(new_end);
            self.cursor = new_start;
        }
        lines
    }

    /// Byte offset of the start of the line containing `pos`.
    pub fn line_start(&self, pos: usize) -> usize {
        self.text[..pos].rfind('\n').map_or(0, |i| i + 1)
    }

    /// Byte offset of the end of the line containing `pos` (before `\n`).
    pub fn line_end(&self, pos: usize) -> usize {
        self.text[pos..].find('\n').map_or(self.text.len(), |i| pos + i)
    }

    /// The whole line the cursor is on, without its newline.
    pub fn current_line(&self) -> &str {
        &self.text[self.line_start(self.cursor)..self.line_end(self.cursor)]
    }

    /// Text between the start of the cursor's line and the cursor.
    pub fn text_before_cursor(&self) -> &str {
        &self.text[self.line_start(self.cursor)..self.cursor]
    }

    /// Check if the cursor sits at the end of its line.
    pub fn cursor_at_line_end(&self) -> bool {
        self.line_end(self.cursor) == self.cursor
    }

    /// Zero-based line index of the cursor.
    pub fn cursor_line(&self) -> usize {
        self.text[..self.cursor].matches('\n').count()
    }

    /// Number of lines (an empty text has one line).
    pub fn line_count(&self) -> usize {
        self.text.matches('\n').count() + 1
    }

    /// Move cursor left by one grapheme.
    pub fn move_left(&mut self, extend: bool) {
        self.begin_motion(extend);
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    /// Move cursor right by one grapheme.
    pub fn move_right(&mut self, extend: bool) {
        self.begin_motion(extend);
        if self.cursor < self.text.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    /// Move cursor to the start of its line.
    pub fn move_home(&mut self, extend: bool) {
        self.begin_motion(extend);
        self.cursor = self.line_start(self.cursor);
    }

    /// Move cursor to the end of its line.
    pub fn move_end(&mut self, extend: bool) {
        self.begin_motion(extend);
        self.cursor = self.line_end(self.cursor);
    }

    /// Move cursor one line up, keeping the character column when possible.
    pub fn move_up(&mut self, extend: bool) {
        self.begin_motion(extend);
        let start = self.line_start(self.cursor);
        if start == 0 {
            self.cursor = 0;
            return;
        }
        let column = self.text[start..self.cursor].chars().count();
        let prev_start = self.line_start(start - 1);
        self.cursor = self.offset_in_line(prev_start, start - 1, column);
    }

    /// Move cursor one line down, keeping the character column when possible.
    pub fn move_down(&mut self, extend: bool) {
        self.begin_motion(extend);
        let start = self.line_start(self.cursor);
        let end = self.line_end(self.cursor);
        if end == self.text.len() {
            self.cursor = end;
            return;
        }
        let column = self.text[start..self.cursor].chars().count();
        let next_start = end + 1;
        let next_end = self.line_end(next_start);
        self.cursor = self.offset_in_line(next_start, next_end, column);
    }

    fn begin_motion(&mut self, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
        } else {
            self.anchor = None;
        }
    }

    fn offset_in_line(&self, start: usize, end: usize, column: usize) -> usize {
        self.text[start..end]
            .char_indices()
            .nth(column)
            .map_or(end, |(i, _)| start + i)
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        self.text[..pos]
            .grapheme_indices(true)
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self, pos: usize) -> usize {
        self.text[pos..]
            .graphemes(true)
            .next()
            .map_or(self.text.len(), |g| pos + g.len())
    }
}
