//! Message types for actor communication.
//!
//! These types are the protocol between the input actor and the main
//! loop, and the key vocabulary the editor dispatches on.

use bitflags::bitflags;

/// Key codes for keyboard input.
///
/// A subset of crossterm's `KeyCode` covering what the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Function key (F1-F12).
    F(u8),
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Tab key.
    Tab,
    /// Delete key.
    Delete,
    /// Escape key.
    Esc,
}

bitflags! {
    /// Key modifiers held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        /// Shift key held.
        const SHIFT = 0b0001;
        /// Control key held.
        const CONTROL = 0b0010;
        /// Alt/Option key held.
        const ALT = 0b0100;
        /// Super/Command/Windows key held.
        const SUPER = 0b1000;
    }
}

impl KeyModifiers {
    /// Check if Shift is held.
    pub const fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    /// Check if Control is held.
    pub const fn control(self) -> bool {
        self.contains(Self::CONTROL)
    }

    /// Check if Alt is held.
    pub const fn alt(self) -> bool {
        self.contains(Self::ALT)
    }

    /// Control on Linux/Windows, Command on macOS.
    pub const fn command(self) -> bool {
        self.intersects(Self::CONTROL.union(Self::SUPER))
    }
}

/// Events from the input thread.
///
/// These are sent from the input actor to the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key {
        /// The key code.
        code: KeyCode,
        /// Modifiers held during keypress.
        modifiers: KeyModifiers,
    },

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Paste event (bracketed paste).
    Paste(String),

    /// Input thread encountered an error.
    Error(String),

    /// Input thread is shutting down.
    Shutdown,
}

impl InputEvent {
    /// Shorthand for a key event.
    pub const fn key(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self::Key { code, modifiers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_queries() {
        let mods = KeyModifiers::CONTROL | KeyModifiers::SHIFT;
        assert!(mods.control());
        assert!(mods.shift());
        assert!(!mods.alt());
        assert!(mods.command());
        assert!(KeyModifiers::SUPER.command());
        assert!(!KeyModifiers::empty().command());
    }
}
