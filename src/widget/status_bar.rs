//! Status Bar Widget: mode, playback progress, remaining count.
//!
//! A one-row bar with three sections. The left shows the editor mode,
//! the center a message (progress messages expire after the timeout
//! carried by the event), the right how many characters are still hidden.

use super::measure::{display_width, truncate_to_width};
use super::palette::Palette;
use super::traits::Widget;
use crate::actor::InputEvent;
use crate::editor::{EditorEvent, Mode};
use crate::layout::Rect;
use crate::terminal::OutputBuffer;
use std::time::{Duration, Instant};

/// Progress below this many remaining characters is shown as a warning.
pub const WARNING_THRESHOLD: usize = 10;

/// How long notices such as "run requested" stay visible.
pub const NOTICE_TIMEOUT: Duration = Duration::from_secs(2);

/// Center-section message.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StatusMessage {
    /// Text to show.
    text: String,
    /// Drawn in the warning color.
    warning: bool,
    /// When the message disappears; `None` keeps it until replaced.
    expires_at: Option<Instant>,
}

/// A three-section status bar (mode, message, remaining).
#[derive(Debug)]
pub struct StatusBar {
    /// Current editor mode.
    mode: Mode,
    /// Characters of the program not yet revealed.
    remaining: usize,
    /// Center message, if any.
    message: Option<StatusMessage>,
    /// Widget bounds.
    bounds: Rect,
    /// Colors.
    palette: Palette,
    /// Needs redraw flag.
    dirty: bool,
}

impl StatusBar {
    /// Create a new status bar with the given bounds.
    pub const fn new(bounds: Rect, palette: Palette) -> Self {
        Self {
            mode: Mode::Free,
            remaining: 0,
            message: None,
            bounds,
            palette,
            dirty: true,
        }
    }

    /// Update the mode label.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.dirty = true;
        }
    }

    /// Update the remaining count.
    pub fn set_remaining(&mut self, remaining: usize) {
        if self.remaining != remaining {
            self.remaining = remaining;
            self.dirty = true;
        }
    }

    /// Show a message; a zero `timeout` keeps it until replaced.
    pub fn show_message(&mut self, text: impl Into<String>, timeout: Duration, now: Instant) {
        self.set_message(text.into(), false, timeout, now);
    }

    /// Show playback progress: the remaining count and the upcoming text.
    pub fn show_progress(
        &mut self,
        next_line: &str,
        remaining: usize,
        timeout: Duration,
        now: Instant,
    ) {
        let text = format!("{remaining:5} | {next_line}");
        self.set_message(text, remaining < WARNING_THRESHOLD, timeout, now);
    }

    /// Reflect an editor event.
    pub fn apply_event(&mut self, event: &EditorEvent, now: Instant) {
        match event {
            EditorEvent::Progress {
                next_line,
                remaining,
                timeout,
            } => self.show_progress(next_line, *remaining, *timeout, now),
            EditorEvent::ExecuteRequested => {
                self.show_message("Run requested", NOTICE_TIMEOUT, now);
            }
        }
    }

    /// Drop the message if it has expired. Returns `true` if it did.
    pub fn expire(&mut self, now: Instant) -> bool {
        let expired = self
            .message
            .as_ref()
            .and_then(|m| m.expires_at)
            .is_some_and(|at| now >= at);
        if expired {
            self.message = None;
            self.dirty = true;
        }
        expired
    }

    /// Time until the current message expires, if it does.
    pub fn time_until_expiry(&self, now: Instant) -> Option<Duration> {
        self.message
            .as_ref()
            .and_then(|m| m.expires_at)
            .map(|at| at.saturating_duration_since(now))
    }

    /// The center message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.text.as_str())
    }

    /// Whether the center message is a warning.
    pub fn is_warning(&self) -> bool {
        self.message.as_ref().is_some_and(|m| m.warning)
    }

    /// Left section text.
    pub const fn mode_label(&self) -> &'static str {
        match self.mode {
            Mode::Locked => "LOCKED",
            Mode::Free => "FREE",
        }
    }

    /// Right section text.
    pub fn remaining_label(&self) -> String {
        format!("{} left", self.remaining)
    }

    fn set_message(&mut self, text: String, warning: bool, timeout: Duration, now: Instant) {
        let expires_at = (!timeout.is_zero()).then(|| now + timeout);
        self.message = Some(StatusMessage {
            text,
            warning,
            expires_at,
        });
        self.dirty = true;
    }
}

impl Widget for StatusBar {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.dirty = true;
    }

    fn render(&self, out: &mut OutputBuffer) {
        if self.bounds.is_empty() {
            return;
        }
        let width = usize::from(self.bounds.width);
        let left = format!(" {} ", self.mode_label());
        let right = format!(" {} ", self.remaining_label());

        out.cursor_move(self.bounds.x, self.bounds.y);
        out.set_bg(self.palette.status_bg);

        // Left: mode
        let left = truncate_to_width(&left, width);
        out.bold();
        out.set_fg(if self.mode == Mode::Locked {
            self.palette.locked_fg
        } else {
            self.palette.status_fg
        });
        out.print(left);
        out.reset_attrs();
        out.set_bg(self.palette.status_bg);
        let mut used = display_width(left);

        // Right is dropped first when space runs out
        let right_width = display_width(&right);
        let show_right = used + right_width <= width;
        let center_width = width - used - if show_right { right_width } else { 0 };

        // Center: message
        let text = self.message().map_or("", |m| truncate_to_width(m, center_width));
        out.set_fg(if self.is_warning() {
            self.palette.warning_fg
        } else {
            self.palette.status_fg
        });
        out.print(text);
        used += display_width(text);
        out.pad(width - used - if show_right { right_width } else { 0 });

        if show_right {
            out.set_fg(self.palette.status_fg);
            out.print(&right);
        }
        out.reset_attrs();
    }

    fn handle_input(&mut self, _event: &InputEvent) -> bool {
        false
    }

    fn needs_redraw(&self) -> bool {
        self.dirty
    }

    fn clear_redraw(&mut self) {
        self.dirty = false;
    }
}
