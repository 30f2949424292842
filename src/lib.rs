//! # Spice
//!
//! A scripted playback code editor for live-coding lectures.
//!
//! A prepared program is loaded into a [`MagicEditor`] and revealed as
//! the lecturer presses keys, so the code appears to be typed live. At
//! any point the lecturer can switch to free editing with Tab
//! completion and auto-indent.
//!
//! ## Core Concepts
//!
//! - **Scripted playback**: every key press in `Locked` mode types the
//!   next character of the program; Tab reveals a line at human pace
//! - **Prefix completion**: Tab cycles through document words, keywords
//!   and extra words
//! - **Headless core**: [`editor`] has no terminal or thread dependency;
//!   the [`actor`], [`terminal`] and [`widget`] modules form the front end
//!
//! ## Example
//!
//! ```rust
//! use spice::{KeyCode, KeyModifiers, MagicEditor, Mode};
//!
//! let mut editor = MagicEditor::default();
//! editor.load_program("print('hi')\n");
//! assert_eq!(editor.mode(), Mode::Locked);
//!
//! editor.handle_key(KeyCode::Char('x'), KeyModifiers::empty());
//! assert_eq!(editor.visible_text(), "p");
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod config;
pub mod editor;
pub mod error;
pub mod layout;
pub mod terminal;
pub mod widget;

// Re-exports for convenience
pub use actor::{InputEvent, KeyCode, KeyModifiers, RevealPacer};
pub use config::SpiceConfig;
pub use editor::{
    CompletionState, EditorEvent, KeyOutcome, KeywordSource, Language, MagicEditor, Mode,
    RevealStep, ScriptedDocument, TextSurface,
};
pub use error::{Result, SpiceError};
pub use layout::{Rect, ScreenLayout};
