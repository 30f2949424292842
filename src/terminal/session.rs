//! Terminal session: raw mode and alternate screen for the lifetime of
//! a value.

use crate::error::{Result, SpiceError};
use crossterm::{
    cursor::{self, SetCursorStyle},
    event::{
        DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;
use tracing::{debug, warn};

/// Options for [`TerminalSession`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Use the alternate screen buffer.
    pub alternate_screen: bool,
    /// Receive pastes as one event.
    pub bracketed_paste: bool,
    /// Ask the terminal to report Ctrl+Enter, Ctrl+Tab and friends as
    /// distinct keys, where the terminal supports it.
    pub keyboard_enhancement: bool,
}

/// Flags pushed when the terminal supports the keyboard protocol.
pub const KEYBOARD_FLAGS: KeyboardEnhancementFlags =
    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES;

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            bracketed_paste: true,
            keyboard_enhancement: true,
        }
    }
}

/// Owns the terminal while the editor runs.
///
/// Dropping the session restores the terminal, including on early
/// returns through `?`.
#[derive(Debug)]
pub struct TerminalSession {
    /// How the terminal was set up, so teardown mirrors it.
    config: SessionConfig,
    /// Keyboard enhancement flags were pushed and must be popped.
    keyboard_enhanced: bool,
    /// Terminal width.
    width: u16,
    /// Terminal height.
    height: u16,
}

impl TerminalSession {
    /// Enter raw mode (and the alternate screen when configured).
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be queried or set up.
    pub fn start(config: SessionConfig) -> Result<Self> {
        let (width, height) =
            terminal::size().map_err(|e| SpiceError::Terminal(format!("cannot query size: {e}")))?;

        terminal::enable_raw_mode()
            .map_err(|e| SpiceError::Terminal(format!("cannot enable raw mode: {e}")))?;

        // From here on Drop restores the terminal.
        let mut session = Self {
            config,
            keyboard_enhanced: false,
            width,
            height,
        };

        let mut stdout = io::stdout();
        if session.config.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        if session.config.bracketed_paste {
            execute!(stdout, EnableBracketedPaste)?;
        }
        if session.config.keyboard_enhancement
            && terminal::supports_keyboard_enhancement().unwrap_or(false)
        {
            session.keyboard_enhanced =
                execute!(stdout, PushKeyboardEnhancementFlags(KEYBOARD_FLAGS)).is_ok();
        }
        if !session.keyboard_enhanced {
            warn!("Keyboard protocol unavailable, Ctrl+Enter may arrive as Enter (use F5 to run)");
        }
        debug!(
            width,
            height,
            keyboard_enhanced = session.keyboard_enhanced,
            "Terminal session started"
        );
        Ok(session)
    }

    /// Whether modified keys are reported unambiguously.
    pub const fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }

    /// Terminal width.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Terminal height.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Record a new terminal size.
    pub const fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, SetCursorStyle::DefaultUserShape, cursor::Show);
        if self.keyboard_enhanced {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        if self.config.bracketed_paste {
            let _ = execute!(stdout, DisableBracketedPaste);
        }
        if self.config.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
        debug!("Terminal session restored");
    }
}
