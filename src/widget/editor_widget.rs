//! Editor Widget: terminal view of a [`MagicEditor`].
//!
//! Draws a right-aligned line-number gutter, highlights the cursor's
//! line, colors tokens with the [`Highlighter`], and keeps the cursor in
//! view by scrolling. In `Locked` mode the cursor is drawn as a block.

use super::measure::{clamp_u16, display_width};
use super::palette::Palette;
use super::traits::Widget;
use crate::actor::{InputEvent, KeyCode, KeyModifiers};
use crate::editor::{Highlighter, KeyOutcome, Language, MagicEditor, Mode};
use crate::layout::Rect;
use crate::terminal::OutputBuffer;
use crossterm::style::Color;
use std::time::Duration;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Presentation options for the editor view.
#[derive(Debug, Clone)]
pub struct EditorViewConfig {
    /// Show the line-number gutter.
    pub line_numbers: bool,
    /// Dark palette.
    pub dark: bool,
}

impl Default for EditorViewConfig {
    fn default() -> Self {
        Self {
            line_numbers: true,
            dark: true,
        }
    }
}

/// Editor view with scrolling and syntax colors.
pub struct EditorWidget {
    /// The editor being displayed.
    editor: MagicEditor,
    /// Token classifier.
    highlighter: Highlighter,
    /// Colors.
    palette: Palette,
    /// Whether the gutter is drawn.
    line_numbers: bool,
    /// Widget bounds.
    bounds: Rect,
    /// First visible line.
    top_line: usize,
    /// First visible display column.
    left_col: usize,
    /// Reveal delay requested by the last handled key.
    pending_reveal: Option<Duration>,
    /// Needs redraw flag.
    dirty: bool,
}

impl std::fmt::Debug for EditorWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorWidget")
            .field("editor", &self.editor)
            .field("bounds", &self.bounds)
            .field("top_line", &self.top_line)
            .field("left_col", &self.left_col)
            .finish_non_exhaustive()
    }
}

impl EditorWidget {
    /// Wrap `editor` in a view occupying `bounds`.
    pub fn new(editor: MagicEditor, bounds: Rect, config: &EditorViewConfig) -> Self {
        let mut highlighter = Highlighter::new(editor.language());
        highlighter.set_dark_mode(config.dark);
        Self {
            editor,
            highlighter,
            palette: Palette::for_mode(config.dark),
            line_numbers: config.line_numbers,
            bounds,
            top_line: 0,
            left_col: 0,
            pending_reveal: None,
            dirty: true,
        }
    }

    /// The wrapped editor.
    pub const fn editor(&self) -> &MagicEditor {
        &self.editor
    }

    /// Mutable access to the wrapped editor; marks the view dirty.
    pub fn editor_mut(&mut self) -> &mut MagicEditor {
        self.dirty = true;
        &mut self.editor
    }

    /// Load a program and scroll back to the top.
    pub fn load_program(&mut self, source: &str) {
        self.editor.load_program(source);
        self.top_line = 0;
        self.left_col = 0;
        self.pending_reveal = None;
        self.dirty = true;
    }

    /// Switch language for completion, indentation and colors.
    pub fn set_language(&mut self, language: Language) {
        self.editor.set_language(language);
        let dark = self.highlighter.is_dark();
        self.highlighter = Highlighter::new(language);
        self.highlighter.set_dark_mode(dark);
        self.dirty = true;
    }

    /// Colors in use.
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// First visible line.
    pub const fn top_line(&self) -> usize {
        self.top_line
    }

    /// Forward a key to the editor.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> KeyOutcome {
        let outcome = self.editor.handle_key(code, modifiers);
        self.after_edit(outcome);
        outcome
    }

    /// Run a scheduled reveal step; returns the delay before the next one.
    pub fn on_reveal_tick(&mut self) -> Option<Duration> {
        let next = self.editor.on_reveal_tick();
        self.dirty = true;
        self.scroll_to_cursor();
        next
    }

    /// Take the reveal delay requested by the last key, if any.
    pub fn take_scheduled_reveal(&mut self) -> Option<Duration> {
        self.pending_reveal.take()
    }

    /// Screen position of the cursor, if it is inside the text area.
    pub fn cursor_position(&self) -> Option<(u16, u16)> {
        let area = self.text_area();
        if area.is_empty() {
            return None;
        }
        let row = self.editor.surface().cursor_line().checked_sub(self.top_line)?;
        let col = self.cursor_column().checked_sub(self.left_col)?;
        if row >= usize::from(area.height) || col >= usize::from(area.width) {
            return None;
        }
        Some((area.x + clamp_u16(col), area.y + clamp_u16(row)))
    }

    /// Place and shape the terminal cursor.
    pub fn render_cursor(&self, out: &mut OutputBuffer) {
        match self.cursor_position() {
            Some((x, y)) => {
                out.cursor_style(self.editor.mode() == Mode::Locked);
                out.cursor_move(x, y);
                out.cursor_show();
            }
            None => out.cursor_hide(),
        }
    }

    fn after_edit(&mut self, outcome: KeyOutcome) {
        if let KeyOutcome::ScheduleReveal(delay) = outcome {
            self.pending_reveal = Some(delay);
        }
        if outcome != KeyOutcome::Ignored {
            self.dirty = true;
            self.scroll_to_cursor();
        }
    }

    /// Digits in the gutter, at least two.
    fn gutter_digits(&self) -> usize {
        self.editor.surface().line_count().to_string().len().max(2)
    }

    fn gutter_width(&self) -> u16 {
        if self.line_numbers {
            clamp_u16(self.gutter_digits() + 1)
        } else {
            0
        }
    }

    fn text_area(&self) -> Rect {
        self.bounds.split_horizontal(self.gutter_width()).1
    }

    fn cursor_column(&self) -> usize {
        display_width(self.editor.surface().text_before_cursor())
    }

    fn scroll_to_cursor(&mut self) {
        let area = self.text_area();
        let height = usize::from(area.height).max(1);
        let width = usize::from(area.width).max(1);

        let line = self.editor.surface().cursor_line();
        if line < self.top_line {
            self.top_line = line;
        } else if line >= self.top_line + height {
            self.top_line = line + 1 - height;
        }

        let col = self.cursor_column();
        if col < self.left_col {
            self.left_col = col;
        } else if col >= self.left_col + width {
            self.left_col = col + 1 - width;
        }
    }

    /// Draw one text line, clipped to the horizontal scroll window.
    ///
    /// `line_offset` is the byte offset of the line within the text.
    fn render_line(
        &self,
        out: &mut OutputBuffer,
        line: &str,
        line_offset: usize,
        current: bool,
        width: usize,
    ) {
        let selection = self.editor.surface().selection();
        let line_bg = if current {
            self.palette.current_line_bg
        } else {
            self.palette.bg
        };

        let mut col = 0;
        let mut drawn = 0;
        let mut style: Option<(Color, Color)> = None;

        'spans: for span in self.highlighter.spans(line) {
            let fg = self.palette.token(span.kind);
            for (i, grapheme) in line[span.range.clone()].grapheme_indices(true) {
                let w = UnicodeWidthStr::width(grapheme);
                if col < self.left_col {
                    col += w;
                    continue;
                }
                if drawn + w > width {
                    break 'spans;
                }
                let pos = line_offset + span.range.start + i;
                let bg = if selection.as_ref().is_some_and(|r| r.contains(&pos)) {
                    self.palette.selection_bg
                } else {
                    line_bg
                };
                if style != Some((fg, bg)) {
                    out.set_fg(fg);
                    out.set_bg(bg);
                    style = Some((fg, bg));
                }
                out.print(grapheme);
                col += w;
                drawn += w;
            }
        }

        out.set_bg(line_bg);
        out.pad(width.saturating_sub(drawn));
    }
}

impl Widget for EditorWidget {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.scroll_to_cursor();
        self.dirty = true;
    }

    fn render(&self, out: &mut OutputBuffer) {
        let area = self.text_area();
        let digits = self.gutter_digits();
        let cursor_line = self.editor.surface().cursor_line();

        let mut offset = 0;
        let lines: Vec<(usize, &str)> = self
            .editor
            .surface()
            .text()
            .split('\n')
            .map(|line| {
                let start = offset;
                offset += line.len() + 1;
                (start, line)
            })
            .collect();

        for row in 0..self.bounds.height {
            out.cursor_move(self.bounds.x, self.bounds.y + row);
            let index = self.top_line + usize::from(row);
            if let Some(&(start, line)) = lines.get(index) {
                if self.line_numbers {
                    out.set_fg(self.palette.gutter_fg);
                    out.set_bg(self.palette.gutter_bg);
                    out.print(&format!("{:>digits$} ", index + 1));
                }
                self.render_line(out, line, start, index == cursor_line, usize::from(area.width));
            } else {
                out.set_bg(self.palette.bg);
                out.pad(usize::from(self.bounds.width));
            }
        }
        out.reset_attrs();
    }

    fn handle_input(&mut self, event: &InputEvent) -> bool {
        let outcome = match event {
            InputEvent::Key { code, modifiers } => self.handle_key(*code, *modifiers),
            InputEvent::Paste(text) => {
                let outcome = self.editor.paste(text);
                self.after_edit(outcome);
                outcome
            }
            _ => KeyOutcome::Ignored,
        };
        outcome != KeyOutcome::Ignored
    }

    fn needs_redraw(&self) -> bool {
        self.dirty
    }

    fn clear_redraw(&mut self) {
        self.dirty = false;
    }
}
