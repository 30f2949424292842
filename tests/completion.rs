//! Completion and auto-indent through key handling.

use spice::editor::WordList;
use spice::{KeyCode, KeyModifiers, Language, MagicEditor};
use std::sync::Arc;

const NONE: KeyModifiers = KeyModifiers::empty();

fn type_text(editor: &mut MagicEditor, text: &str) {
    for c in text.chars() {
        let code = if c == '\n' { KeyCode::Enter } else { KeyCode::Char(c) };
        editor.handle_key(code, NONE);
    }
}

#[test]
fn test_range_raise_scenario() {
    let mut editor = MagicEditor::default();
    editor.set_keywords(Arc::new(WordList(vec!["raise".into()])));
    type_text(&mut editor, "for i in range(x):\nra");
    assert_eq!(editor.visible_text(), "for i in range(x):\n    ra");

    editor.handle_key(KeyCode::Tab, NONE);
    assert_eq!(editor.visible_text(), "for i in range(x):\n    range");
    editor.handle_key(KeyCode::Tab, NONE);
    assert_eq!(editor.visible_text(), "for i in range(x):\n    raise");
    editor.handle_key(KeyCode::Tab, NONE);
    assert_eq!(editor.visible_text(), "for i in range(x):\n    ra");
}

#[test]
fn test_backspace_restarts_completion() {
    let mut editor = MagicEditor::new(Language::Plain);
    editor.set_autocomplete_words(["alpha", "alps"], true);
    type_text(&mut editor, "al");

    editor.handle_key(KeyCode::Tab, NONE);
    assert_eq!(editor.visible_text(), "alpha");
    editor.handle_key(KeyCode::Backspace, NONE);
    assert!(editor.completion_state().is_none());

    // A fresh rotation for "alph": the word, then the typed token
    editor.handle_key(KeyCode::Tab, NONE);
    assert_eq!(editor.visible_text(), "alpha");
    assert_eq!(editor.completion_state().map(|s| s.prefix()), Some("alph"));
    editor.handle_key(KeyCode::Tab, NONE);
    assert_eq!(editor.visible_text(), "alph");
}

#[test]
fn test_extra_words_replace_and_append() {
    let mut editor = MagicEditor::new(Language::Plain);
    editor.set_autocomplete_words(["turtle"], false);
    editor.set_autocomplete_words(["tkinter"], false);
    assert_eq!(editor.autocomplete_words(), ["turtle", "tkinter"]);
    editor.set_autocomplete_words(["time"], true);
    assert_eq!(editor.autocomplete_words(), ["time"]);
}

#[test]
fn test_tab_on_blank_line_indents() {
    let mut editor = MagicEditor::default();
    editor.handle_key(KeyCode::Tab, NONE);
    assert_eq!(editor.visible_text(), "    ");
}

#[test]
fn test_selection_tab_indents_lines() {
    let mut editor = MagicEditor::default();
    type_text(&mut editor, "a = 1\nb = 2");
    editor.handle_key(KeyCode::Up, KeyModifiers::SHIFT);
    editor.handle_key(KeyCode::Home, KeyModifiers::SHIFT);
    editor.handle_key(KeyCode::Tab, KeyModifiers::CONTROL);
    assert_eq!(editor.visible_text(), "    a = 1\n    b = 2");
}

#[test]
fn test_nested_blocks_indent() {
    let mut editor = MagicEditor::default();
    type_text(&mut editor, "def f(x):\nif x:\nreturn 1\n\nreturn 0");
    assert_eq!(
        editor.visible_text(),
        "def f(x):\n    if x:\n        return 1\n        \n    return 0"
    );
}

#[test]
fn test_return_mid_header_splits_plainly() {
    let mut editor = MagicEditor::default();
    type_text(&mut editor, "if x:");
    editor.handle_key(KeyCode::Left, NONE);
    editor.handle_key(KeyCode::Enter, NONE);
    assert_eq!(editor.visible_text(), "if x\n:");
}
