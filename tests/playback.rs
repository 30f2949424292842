//! Lecture flows driven through the public editor API.

use spice::editor::EXECUTE_KEY;
use spice::{EditorEvent, KeyCode, KeyModifiers, KeyOutcome, MagicEditor, Mode, RevealStep};
use std::time::Duration;

const NONE: KeyModifiers = KeyModifiers::empty();

/// Run a paced reveal to completion, returning the number of steps taken.
fn drain_playback(editor: &mut MagicEditor, first: Option<Duration>) -> usize {
    let mut steps = 0;
    let mut next = first;
    while next.is_some() {
        steps += 1;
        next = editor.on_reveal_tick();
    }
    steps
}

#[test]
fn test_reveal_line_scenario() {
    let mut editor = MagicEditor::default();
    editor.load_program("print(1)\nprint(2)\n");

    assert_eq!(editor.reveal_line(), RevealStep::LineBreak);
    assert_eq!(editor.visible_text(), "print(1)\n");

    assert_eq!(editor.reveal_line(), RevealStep::Done);
    assert_eq!(editor.visible_text(), "print(1)\nprint(2)\n");
    assert_eq!(editor.mode(), Mode::Locked);

    // The next key flips to free editing and is applied normally
    editor.handle_key(KeyCode::Char('#'), NONE);
    assert_eq!(editor.mode(), Mode::Free);
    assert_eq!(editor.visible_text(), "print(1)\nprint(2)\n#");
}

#[test]
fn test_exhausted_reveal_is_idempotent() {
    let mut editor = MagicEditor::default();
    editor.load_program("x");
    editor.reveal_all(true);
    editor.set_mode(Mode::Locked);

    let before = editor.visible_text().to_string();
    assert_eq!(editor.reveal_next_char(), RevealStep::Done);
    assert_eq!(editor.visible_text(), before);
    assert_eq!(editor.remaining_count(), 0);
}

#[test]
fn test_reveal_all_matches_source() {
    let mut editor = MagicEditor::default();
    editor.load_program("for i in range(3):\n    print(i)\n");
    editor.reveal_all(false);
    assert_eq!(editor.visible_text(), "for i in range(3):\n    print(i)\n");
    assert_eq!(editor.mode(), Mode::Free);
}

#[test]
fn test_paced_lecture() {
    let mut editor = MagicEditor::default();
    editor.set_reveal_delay_ms(1);
    editor.load_program("a = 1\n\nb = 2\nprint(a + b)\n");

    // Tab reveals the first line, running through the blank one
    let first = match editor.handle_key(KeyCode::Tab, NONE) {
        KeyOutcome::ScheduleReveal(delay) => Some(delay),
        other => panic!("expected a scheduled reveal, got {other:?}"),
    };
    drain_playback(&mut editor, first);
    assert_eq!(editor.visible_text(), "a = 1\n\n");

    // Typing keys reveals one character each
    for _ in 0..5 {
        editor.handle_key(KeyCode::Char('z'), NONE);
    }
    assert_eq!(editor.visible_text(), "a = 1\n\nb = 2");

    // Ctrl+Tab plays the rest and hands over to free editing
    let first = editor.start_autoplay();
    drain_playback(&mut editor, first);
    assert_eq!(editor.visible_text(), "a = 1\n\nb = 2\nprint(a + b)\n");
    assert_eq!(editor.mode(), Mode::Free);
}

#[test]
fn test_progress_events_describe_upcoming_text() {
    let mut editor = MagicEditor::default();
    editor.load_program("import os\nprint(os.name)\n");

    editor.handle_key(KeyCode::Char(' '), NONE);
    let Ok(EditorEvent::Progress {
        next_line,
        remaining,
        timeout,
    }) = editor.events().try_recv()
    else {
        panic!("expected a progress event");
    };
    assert_eq!(next_line, "import os");
    assert_eq!(remaining, 25);
    assert_eq!(timeout, Duration::from_millis(1000));

    editor.handle_key(KeyCode::Tab, NONE);
    let Ok(EditorEvent::Progress { next_line, .. }) = editor.events().try_recv() else {
        panic!("expected a progress event");
    };
    assert_eq!(next_line, "print(os.name)");
}

#[test]
fn test_escape_interrupts_playback() {
    let mut editor = MagicEditor::default();
    editor.load_program("a long line of code\n");
    let first = editor.start_line_playback();
    assert!(first.is_some());
    editor.on_reveal_tick();

    editor.handle_key(KeyCode::Esc, NONE);
    assert_eq!(editor.mode(), Mode::Free);
    assert_eq!(editor.on_reveal_tick(), None);
    assert_eq!(editor.visible_text(), "a ");

    // Resuming continues from the revealed prefix
    editor.handle_key(KeyCode::Esc, NONE);
    editor.handle_key(KeyCode::Char('x'), NONE);
    assert_eq!(editor.visible_text(), "a l");
}

#[test]
fn test_reload_mid_playback_cancels() {
    let mut editor = MagicEditor::default();
    editor.load_program("first program\n");
    assert!(editor.start_line_playback().is_some());

    editor.load_program("second\n");
    assert!(!editor.is_playing());
    assert_eq!(editor.on_reveal_tick(), None);
    assert_eq!(editor.visible_text(), "");
    assert_eq!(editor.remaining_count(), 7);
}

#[test]
fn test_clear_drops_program() {
    let mut editor = MagicEditor::default();
    editor.load_program("x = 1\n");
    editor.clear();
    assert_eq!(editor.mode(), Mode::Free);
    assert_eq!(editor.remaining_count(), 0);
    editor.handle_key(KeyCode::Esc, NONE);
    assert_eq!(editor.mode(), Mode::Free);
}

fn execute_requests(editor: &MagicEditor) -> usize {
    editor
        .events()
        .try_iter()
        .filter(|e| *e == EditorEvent::ExecuteRequested)
        .count()
}

#[test]
fn test_ctrl_return_mid_script_is_swallowed() {
    let mut editor = MagicEditor::default();
    editor.load_program("print(1)\nprint(2)\n");
    editor.reveal_line();

    assert_eq!(editor.handle_key(KeyCode::Enter, KeyModifiers::CONTROL), KeyOutcome::Handled);
    assert_eq!(editor.mode(), Mode::Locked);
    assert_eq!(editor.visible_text(), "print(1)\n");
    assert_eq!(execute_requests(&editor), 0);
}

#[test]
fn test_ctrl_return_after_script_runs_program() {
    let mut editor = MagicEditor::default();
    editor.load_program("print(1)\n");
    while editor.reveal_line() != RevealStep::Done {}
    assert_eq!(editor.mode(), Mode::Locked);

    editor.handle_key(KeyCode::Enter, KeyModifiers::CONTROL);
    assert_eq!(editor.mode(), Mode::Free);
    assert_eq!(editor.visible_text(), "print(1)\n");
    assert_eq!(execute_requests(&editor), 1);
}

#[test]
fn test_execute_key_works_in_both_modes() {
    let mut editor = MagicEditor::default();
    editor.load_program("x = 1\n");

    editor.handle_key(EXECUTE_KEY, NONE);
    assert_eq!(editor.mode(), Mode::Locked);
    assert_eq!(editor.visible_text(), "");
    assert_eq!(execute_requests(&editor), 1);

    editor.handle_key(KeyCode::Esc, NONE);
    editor.handle_key(EXECUTE_KEY, NONE);
    assert_eq!(editor.mode(), Mode::Free);
    assert_eq!(execute_requests(&editor), 1);
}
