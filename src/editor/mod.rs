//! Editor core.
//!
//! Everything here is headless: no terminal, no threads. The front end
//! feeds key presses into [`MagicEditor::handle_key`] and renders
//! [`MagicEditor::surface`].

mod completion;
mod document;
mod events;
mod highlight;
mod indent;
mod keywords;
mod magic;
mod text;

pub use completion::{
    document_words, is_delimiter, trigger_token, CompletionEngine, CompletionOutcome,
    CompletionState,
};
pub use document::{RevealStep, ScriptedDocument};
pub use events::EditorEvent;
pub use highlight::{is_word_char, Highlighter, Span, TokenKind};
pub use indent::{leading_spaces, policy_for, IndentPolicy, PlainIndent, PythonIndent};
pub use keywords::{KeywordSource, Language, WordList};
pub use magic::{KeyOutcome, MagicEditor, Mode, EXECUTE_KEY};
pub use text::TextSurface;
