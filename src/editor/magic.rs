//! Magic Editor: scripted playback on top of a normal text surface.
//!
//! The editor is in one of two modes. In `Locked` mode every key press
//! "types" the next character of a prepared program, Tab reveals the
//! rest of the line at a human-looking pace and Down reveals everything.
//! In `Free` mode it behaves like a small code editor with Tab
//! completion and auto-indent. All key handling goes through
//! [`MagicEditor::handle_key`].

use super::completion::{CompletionEngine, CompletionOutcome, CompletionState};
use super::document::{RevealStep, ScriptedDocument};
use super::events::EditorEvent;
use super::highlight::Highlighter;
use super::indent::{policy_for, IndentPolicy};
use super::keywords::{KeywordSource, Language};
use super::text::TextSurface;
use crate::actor::{KeyCode, KeyModifiers};
use crate::config::EditorConfig;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Plain-key alternative to Ctrl+Return for terminals that cannot
/// report modified Return.
pub const EXECUTE_KEY: KeyCode = KeyCode::F(5);

/// Editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Normal editing.
    #[default]
    Free,
    /// Scripted playback; the visible text is the revealed prefix.
    Locked,
}

/// Paced reveal currently running, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Playback {
    #[default]
    Idle,
    /// Reveal up to the next line boundary.
    Line,
    /// Reveal everything, then switch to `Free`.
    Autoplay,
}

/// What [`MagicEditor::handle_key`] did with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key was not used; the host may handle it.
    Ignored,
    /// The key was consumed.
    Handled,
    /// The key was consumed and a paced reveal step must run after the
    /// given delay (see [`MagicEditor::on_reveal_tick`]).
    ScheduleReveal(Duration),
}

/// The scripted playback editor.
pub struct MagicEditor {
    /// Visible buffer.
    surface: TextSurface,
    /// Loaded program, if any.
    script: Option<ScriptedDocument>,
    /// Current mode.
    mode: Mode,
    /// Paced reveal state.
    playback: Playback,
    /// Candidate sources.
    completion: CompletionEngine,
    /// Live Tab rotation.
    completion_state: Option<CompletionState>,
    /// Language for keywords and indentation.
    language: Language,
    /// Return handling.
    indent_policy: Box<dyn IndentPolicy + Send + Sync>,
    /// One indent unit.
    indent_unit: String,
    /// Base pacing delay.
    reveal_delay: Duration,
    /// Display time for per-key progress.
    progress_timeout: Duration,
    /// Event channel to the host.
    events_tx: Sender<EditorEvent>,
    events_rx: Receiver<EditorEvent>,
}

impl std::fmt::Debug for MagicEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MagicEditor")
            .field("mode", &self.mode)
            .field("playback", &self.playback)
            .field("language", &self.language)
            .field("visible_len", &self.surface.text().len())
            .field("remaining", &self.remaining_count())
            .finish_non_exhaustive()
    }
}

impl Default for MagicEditor {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl MagicEditor {
    /// Create an editor for `language` with default settings.
    pub fn new(language: Language) -> Self {
        Self::with_config(&EditorConfig {
            language,
            ..EditorConfig::default()
        })
    }

    /// Create an editor from configuration.
    pub fn with_config(config: &EditorConfig) -> Self {
        let (events_tx, events_rx) = unbounded();
        let width = config.indent_width.max(1);
        let mut completion = CompletionEngine::new(Arc::new(Highlighter::new(config.language)));
        completion.set_words(config.autocomplete_words.iter().cloned(), true);

        Self {
            surface: TextSurface::new(),
            script: None,
            mode: Mode::Free,
            playback: Playback::Idle,
            completion,
            completion_state: None,
            language: config.language,
            indent_policy: policy_for(config.language, width),
            indent_unit: " ".repeat(width),
            reveal_delay: Duration::from_millis(config.reveal_delay_ms),
            progress_timeout: Duration::from_millis(config.progress_timeout_ms),
            events_tx,
            events_rx,
        }
    }

    /// Load a program and start scripted playback from the beginning.
    ///
    /// An empty program leaves the editor empty and in `Free` mode.
    pub fn load_program(&mut self, source: &str) {
        self.playback = Playback::Idle;
        self.completion_state = None;
        self.surface.clear();
        self.script = ScriptedDocument::new(source);
        self.mode = if self.script.is_some() { Mode::Locked } else { Mode::Free };
        debug!(
            chars = self.remaining_count(),
            mode = ?self.mode,
            "Loaded program"
        );
    }

    /// Drop the program and the visible text.
    pub fn clear(&mut self) {
        self.script = None;
        self.playback = Playback::Idle;
        self.completion_state = None;
        self.surface.clear();
        self.mode = Mode::Free;
    }

    /// Append to, or replace, the extra completion words.
    pub fn set_autocomplete_words<I, S>(&mut self, words: I, replace: bool)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.completion.set_words(words, replace);
    }

    /// Extra completion words.
    pub fn autocomplete_words(&self) -> &[String] {
        self.completion.words()
    }

    /// Set the base pacing delay.
    pub const fn set_reveal_delay(&mut self, delay: Duration) {
        self.reveal_delay = delay;
    }

    /// Set the base pacing delay in milliseconds.
    pub const fn set_reveal_delay_ms(&mut self, ms: u64) {
        self.reveal_delay = Duration::from_millis(ms);
    }

    /// Base pacing delay.
    pub const fn reveal_delay(&self) -> Duration {
        self.reveal_delay
    }

    /// Replace the keyword source used for completion.
    pub fn set_keywords(&mut self, keywords: Arc<dyn KeywordSource + Send + Sync>) {
        self.completion.set_keywords(keywords);
        self.completion_state = None;
    }

    /// Switch language: keywords and Return handling.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.indent_policy = policy_for(language, self.indent_unit.len());
        self.set_keywords(Arc::new(Highlighter::new(language)));
    }

    /// Current language.
    pub const fn language(&self) -> Language {
        self.language
    }

    /// The text currently shown.
    pub fn visible_text(&self) -> &str {
        self.surface.text()
    }

    /// Characters of the program not yet revealed (0 without a program).
    pub fn remaining_count(&self) -> usize {
        self.script.as_ref().map_or(0, ScriptedDocument::remaining)
    }

    /// Current mode.
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// The loaded program.
    pub const fn script(&self) -> Option<&ScriptedDocument> {
        self.script.as_ref()
    }

    /// The visible buffer (cursor, selection, lines).
    pub const fn surface(&self) -> &TextSurface {
        &self.surface
    }

    /// Live Tab rotation, if any.
    pub const fn completion_state(&self) -> Option<&CompletionState> {
        self.completion_state.as_ref()
    }

    /// One indent unit.
    pub fn indent_unit(&self) -> &str {
        &self.indent_unit
    }

    /// Whether a paced reveal is running.
    pub fn is_playing(&self) -> bool {
        self.playback != Playback::Idle
    }

    /// Receiver for progress and execute events.
    pub const fn events(&self) -> &Receiver<EditorEvent> {
        &self.events_rx
    }

    /// Switch mode.
    ///
    /// Locking requires a program; it restores the visible text to the
    /// revealed prefix so playback resumes where it stopped.
    pub fn set_mode(&mut self, mode: Mode) {
        self.completion_state = None;
        match mode {
            Mode::Free => {
                self.playback = Playback::Idle;
                self.mode = Mode::Free;
            }
            Mode::Locked => {
                let Some(script) = &self.script else {
                    return;
                };
                self.surface.set_text(script.revealed_text());
                self.mode = Mode::Locked;
            }
        }
        debug!(mode = ?self.mode, "Mode changed");
    }

    /// Reveal one character of the program.
    ///
    /// Outside `Locked` mode, and once the program is exhausted, this is a
    /// no-op returning [`RevealStep::Done`].
    pub fn reveal_next_char(&mut self) -> RevealStep {
        if self.mode != Mode::Locked {
            return RevealStep::Done;
        }
        let Some(script) = self.script.as_mut() else {
            return RevealStep::Done;
        };
        let (revealed, step) = script.advance();
        if let Some(c) = revealed {
            let mut buf = [0u8; 4];
            self.surface.push_str(c.encode_utf8(&mut buf));
        }
        trace!(?step, remaining = script.remaining(), "Revealed char");
        step
    }

    /// Reveal up to the next line boundary whose following line has content.
    pub fn reveal_line(&mut self) -> RevealStep {
        if self.mode != Mode::Locked {
            return RevealStep::Done;
        }
        self.emit_next_line_progress();
        loop {
            match self.reveal_next_char() {
                RevealStep::Pending => continue,
                step => return step,
            }
        }
    }

    /// Reveal the whole program and switch to `Free`.
    ///
    /// With `line_by_line` the program is revealed one line at a time
    /// (emitting progress for each line) instead of in one step.
    pub fn reveal_all(&mut self, line_by_line: bool) {
        if self.script.is_none() {
            return;
        }
        if line_by_line && self.mode == Mode::Locked {
            while self.reveal_line().more_remaining() {}
        } else if let Some(script) = self.script.as_mut() {
            script.reveal_all();
            self.surface.set_text(script.full_text());
        }
        self.set_mode(Mode::Free);
    }

    /// Start a paced reveal of the current line.
    ///
    /// Returns the delay before the next step, or `None` when no further
    /// step is needed.
    pub fn start_line_playback(&mut self) -> Option<Duration> {
        self.start_playback(Playback::Line)
    }

    /// Start a paced reveal of the whole program.
    pub fn start_autoplay(&mut self) -> Option<Duration> {
        self.start_playback(Playback::Autoplay)
    }

    /// Run one scheduled reveal step.
    ///
    /// Exits immediately when playback was cancelled or the editor left
    /// `Locked` mode since the step was scheduled.
    pub fn on_reveal_tick(&mut self) -> Option<Duration> {
        if self.mode != Mode::Locked || self.playback == Playback::Idle {
            self.playback = Playback::Idle;
            return None;
        }
        self.step_playback()
    }

    /// Stop any paced reveal.
    pub fn stop_playback(&mut self) {
        self.playback = Playback::Idle;
    }

    fn start_playback(&mut self, kind: Playback) -> Option<Duration> {
        if self.mode != Mode::Locked || self.script.is_none() {
            return None;
        }
        let running = self.playback != Playback::Idle;
        self.playback = kind;
        if running {
            // The pending tick continues with the new kind
            return None;
        }
        self.emit_next_line_progress();
        self.step_playback()
    }

    fn step_playback(&mut self) -> Option<Duration> {
        let step = self.reveal_next_char();
        match (self.playback, step) {
            (Playback::Line, RevealStep::Pending)
            | (Playback::Autoplay, RevealStep::Pending | RevealStep::LineBreak) => {
                Some(self.pacing_delay())
            }
            (Playback::Autoplay, RevealStep::Done) => {
                self.set_mode(Mode::Free);
                None
            }
            _ => {
                self.playback = Playback::Idle;
                None
            }
        }
    }

    /// Base delay plus a jitter in `[0, base]` derived from the position,
    /// so the rhythm looks human but stays reproducible.
    fn pacing_delay(&self) -> Duration {
        let base = u64::try_from(self.reveal_delay.as_millis()).unwrap_or(u64::MAX);
        let position = self
            .script
            .as_ref()
            .map_or(0, |s| u64::try_from(s.revealed_len()).unwrap_or(0));
        let jitter = position.wrapping_mul(7919) % base.saturating_add(1);
        Duration::from_millis(base.saturating_add(jitter))
    }

    fn emit_next_line_progress(&self) {
        let Some(script) = &self.script else {
            return;
        };
        let next_line = script.next_line().unwrap_or_default().to_string();
        let _ = self.events_tx.send(EditorEvent::Progress {
            next_line,
            remaining: script.remaining(),
            timeout: self.progress_timeout,
        });
    }

    fn emit_rest_of_line_progress(&self) {
        let Some(script) = &self.script else {
            return;
        };
        let _ = self.events_tx.send(EditorEvent::Progress {
            next_line: script.rest_of_line().trim_end_matches('\n').to_string(),
            remaining: script.remaining(),
            timeout: self.progress_timeout,
        });
    }

    /// Insert pasted text at the cursor. Ignored in `Locked` mode.
    pub fn paste(&mut self, text: &str) -> KeyOutcome {
        if self.mode == Mode::Locked {
            return KeyOutcome::Ignored;
        }
        self.completion_state = None;
        self.surface.delete_selection();
        self.surface.insert_str(text);
        KeyOutcome::Handled
    }

    /// Handle one key press. This is the only place mode transitions
    /// triggered by keys are decided.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> KeyOutcome {
        if code == KeyCode::Esc {
            self.toggle_mode();
            return KeyOutcome::Handled;
        }
        if code == EXECUTE_KEY {
            self.request_execute();
            return KeyOutcome::Handled;
        }
        match self.mode {
            Mode::Locked => self.handle_locked(code, modifiers),
            Mode::Free => self.handle_free(code, modifiers),
        }
    }

    /// Escape: leave playback, or resume it when a program is loaded.
    fn toggle_mode(&mut self) {
        match self.mode {
            Mode::Locked => self.set_mode(Mode::Free),
            Mode::Free => self.set_mode(Mode::Locked),
        }
    }

    fn handle_locked(&mut self, code: KeyCode, modifiers: KeyModifiers) -> KeyOutcome {
        let exhausted = self.script.as_ref().map_or(true, ScriptedDocument::is_exhausted);

        match code {
            KeyCode::Down => {
                self.reveal_all(modifiers.control());
                KeyOutcome::Handled
            }
            KeyCode::End => {
                self.reveal_all(true);
                KeyOutcome::Handled
            }
            KeyCode::Tab => {
                let next = if modifiers.control() {
                    self.start_autoplay()
                } else {
                    self.start_line_playback()
                };
                next.map_or(KeyOutcome::Handled, KeyOutcome::ScheduleReveal)
            }
            KeyCode::Backspace => {
                self.set_mode(Mode::Free);
                KeyOutcome::Handled
            }
            KeyCode::Enter if modifiers.command() && !exhausted => KeyOutcome::Handled,
            _ if !exhausted => {
                self.emit_rest_of_line_progress();
                self.reveal_next_char();
                KeyOutcome::Handled
            }
            _ => {
                self.set_mode(Mode::Free);
                self.handle_free(code, modifiers)
            }
        }
    }

    fn handle_free(&mut self, code: KeyCode, modifiers: KeyModifiers) -> KeyOutcome {
        if code == KeyCode::Tab {
            return self.handle_tab(modifiers);
        }
        self.completion_state = None;

        let extend = modifiers.shift();
        match code {
            KeyCode::Enter => return self.handle_return(modifiers),
            KeyCode::Backspace => self.handle_backspace(),
            KeyCode::Delete => self.surface.delete(),
            KeyCode::Left => self.surface.move_left(extend),
            KeyCode::Right => self.surface.move_right(extend),
            KeyCode::Up => self.surface.move_up(extend),
            KeyCode::Down => self.surface.move_down(extend),
            KeyCode::Home => self.surface.move_home(extend),
            KeyCode::End => self.surface.move_end(extend),
            KeyCode::Char(c) if !modifiers.control() && !modifiers.alt() => {
                self.surface.insert_char(c);
            }
            _ => return KeyOutcome::Ignored,
        }
        KeyOutcome::Handled
    }

    /// Tab guards, in order: selection indent, Ctrl literal indent,
    /// word completion.
    fn handle_tab(&mut self, modifiers: KeyModifiers) -> KeyOutcome {
        if !self.surface.has_selection() && modifiers.control() {
            self.completion_state = None;
            self.surface.insert_str(&self.indent_unit);
            return KeyOutcome::Handled;
        }
        let outcome = self.completion.request(
            &mut self.surface,
            &mut self.completion_state,
            &self.indent_unit,
        );
        if let CompletionOutcome::Cycled(ref word) | CompletionOutcome::Completed(ref word) =
            outcome
        {
            trace!(word = %word, "Completed");
        }
        KeyOutcome::Handled
    }

    fn handle_return(&mut self, modifiers: KeyModifiers) -> KeyOutcome {
        if modifiers.command() {
            self.request_execute();
            return KeyOutcome::Handled;
        }

        self.surface.delete_selection();
        let line_start = self.surface.line_start(self.surface.cursor());
        let column = self.surface.cursor() - line_start;
        let inserted = self.indent_policy.on_return(self.surface.current_line(), column);
        match inserted {
            Some(text) => self.surface.insert_str(&text),
            None => self.surface.insert_char('\n'),
        }
        KeyOutcome::Handled
    }

    /// Ask the host to run the visible program.
    pub fn request_execute(&self) {
        debug!("Execute requested");
        let _ = self.events_tx.send(EditorEvent::ExecuteRequested);
    }

    fn handle_backspace(&mut self) {
        if !self.surface.has_selection()
            && self.surface.text_before_cursor().ends_with(self.indent_unit.as_str())
        {
            self.surface.delete_before(self.indent_unit.len());
        } else {
            self.surface.backspace();
        }
    }
}
