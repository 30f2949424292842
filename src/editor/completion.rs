//! Prefix Completion: Tab-driven cyclic word completion.
//!
//! Candidates come from three places: words already in the document,
//! the language keywords, and a host-supplied word list. The token being
//! completed is always moved to the end of the candidate list so that
//! cycling eventually lands back on what the user typed.

use super::highlight::is_word_char;
use super::keywords::{KeywordSource, Language};
use super::text::TextSurface;
use std::sync::Arc;
use tracing::trace;

/// Characters that end a completion token.
pub fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '+' | '-' | '*' | '/' | '=')
}

/// The token immediately before the cursor.
///
/// `before_cursor` is the text between the start of the line and the cursor.
pub fn trigger_token(before_cursor: &str) -> &str {
    before_cursor
        .rfind(is_delimiter)
        .map_or(before_cursor, |i| {
            let delim_len = before_cursor[i..].chars().next().map_or(1, char::len_utf8);
            &before_cursor[i + delim_len..]
        })
}

/// Word-like tokens of `text` in order of appearance (with repeats).
pub fn document_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_word_char(c)).filter(|w| !w.is_empty())
}

/// An in-progress cyclic completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionState {
    /// The token that was completed.
    prefix: String,
    /// Candidates in rotation order.
    candidates: Vec<String>,
    /// Index of the inserted candidate.
    current: usize,
}

impl CompletionState {
    /// The token the user originally typed.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// All candidates in rotation order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// The candidate currently in the text.
    pub fn current(&self) -> &str {
        &self.candidates[self.current]
    }

    /// Rotate to the next candidate and return it.
    fn advance(&mut self) -> &str {
        self.current = (self.current + 1) % self.candidates.len();
        &self.candidates[self.current]
    }
}

/// What a completion request did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Selected lines were indented.
    IndentedLines(usize),
    /// A literal indent unit was inserted.
    InsertedIndent,
    /// The token was replaced by its only candidate.
    Completed(String),
    /// The token was replaced by a candidate from a rotation.
    Cycled(String),
    /// Nothing matched; the text is unchanged.
    NoCandidates,
}

/// Candidate computation over the document and the word sources.
#[derive(Clone)]
pub struct CompletionEngine {
    /// Language keywords (read-only, owned by the highlighter).
    keywords: Arc<dyn KeywordSource + Send + Sync>,
    /// Host-supplied extra words.
    words: Vec<String>,
}

impl std::fmt::Debug for CompletionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionEngine")
            .field("keywords", &self.keywords.keywords().len())
            .field("words", &self.words)
            .finish()
    }
}

impl Default for CompletionEngine {
    fn default() -> Self {
        Self::new(Arc::new(Language::default()))
    }
}

impl CompletionEngine {
    /// Create an engine reading keywords from `keywords`.
    pub fn new(keywords: Arc<dyn KeywordSource + Send + Sync>) -> Self {
        Self {
            keywords,
            words: Vec::new(),
        }
    }

    /// Swap the keyword source.
    pub fn set_keywords(&mut self, keywords: Arc<dyn KeywordSource + Send + Sync>) {
        self.keywords = keywords;
    }

    /// Append to, or replace, the extra word list.
    pub fn set_words<I, S>(&mut self, words: I, replace: bool)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if replace {
            self.words.clear();
        }
        self.words.extend(words.into_iter().map(Into::into));
    }

    /// The extra word list.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Candidates for `token` in `document`.
    ///
    /// Document words come first in order of appearance, then keywords,
    /// then extra words; duplicates keep their first position. If `token`
    /// itself is a candidate it is moved to the end.
    pub fn candidates(&self, token: &str, document: &str) -> Vec<String> {
        let keywords = self.keywords.keywords();
        let mut found: Vec<&str> = Vec::new();
        let mut has_token = false;

        let pool = document_words(document)
            .chain(keywords.iter().copied())
            .chain(self.words.iter().map(String::as_str));
        for word in pool {
            if !word.starts_with(token) {
                continue;
            }
            if word == token {
                has_token = true;
            } else if !found.contains(&word) {
                found.push(word);
            }
        }

        let mut candidates: Vec<String> = found.into_iter().map(str::to_string).collect();
        if has_token {
            candidates.push(token.to_string());
        }
        candidates
    }

    /// Handle a completion request at the cursor of `surface`.
    ///
    /// `state` carries the rotation between consecutive requests; the
    /// caller clears it on any other keystroke. `indent` is the indent unit.
    pub fn request(
        &self,
        surface: &mut TextSurface,
        state: &mut Option<CompletionState>,
        indent: &str,
    ) -> CompletionOutcome {
        if surface.has_selection() {
            *state = None;
            return CompletionOutcome::IndentedLines(surface.indent_selected_lines(indent));
        }

        if let Some(live) = state.as_mut() {
            if surface.text_before_cursor().ends_with(live.current()) {
                surface.delete_before(live.current().len());
                let next = live.advance().to_string();
                surface.insert_str(&next);
                trace!(candidate = %next, "completion cycled");
                return CompletionOutcome::Cycled(next);
            }
            *state = None;
        }

        let before = surface.text_before_cursor();
        let token = trigger_token(before).to_string();
        if token.is_empty() {
            surface.insert_str(indent);
            return CompletionOutcome::InsertedIndent;
        }

        let mut candidates = self.candidates(&token, surface.text());
        trace!(token = %token, count = candidates.len(), "completion candidates");

        match candidates.len() {
            0 => CompletionOutcome::NoCandidates,
            1 => {
                let only = candidates.remove(0);
                surface.delete_before(token.len());
                surface.insert_str(&only);
                CompletionOutcome::Completed(only)
            }
            _ => {
                surface.delete_before(token.len());
                surface.insert_str(&candidates[0]);
                let first = candidates[0].clone();
                *state = Some(CompletionState {
                    prefix: token,
                    candidates,
                    current: 0,
                });
                CompletionOutcome::Cycled(first)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::keywords::WordList;

    fn engine(keywords: &[&str]) -> CompletionEngine {
        CompletionEngine::new(Arc::new(WordList(
            keywords.iter().map(|s| (*s).to_string()).collect(),
        )))
    }

    fn surface(text: &str) -> TextSurface {
        let mut s = TextSurface::new();
        s.set_text(text);
        s
    }

    #[test]
    fn test_trigger_token() {
        assert_eq!(trigger_token("    ra"), "ra");
        assert_eq!(trigger_token("x=pri"), "pri");
        assert_eq!(trigger_token("a + b"), "b");
        assert_eq!(trigger_token("print(ra"), "print(ra");
        assert_eq!(trigger_token("x = "), "");
        assert_eq!(trigger_token(""), "");
    }

    #[test]
    fn test_candidates_order_and_token_last() {
        let e = engine(&["raise", "range", "return"]);
        let c = e.candidates("ra", "for i in range(x):\n    ra");
        assert_eq!(c, vec!["range", "raise", "ra"]);
    }

    #[test]
    fn test_extra_words_participate() {
        let mut e = engine(&[]);
        e.set_words(["turtle", "tkinter"], false);
        assert_eq!(e.candidates("t", "t"), vec!["turtle", "tkinter", "t"]);

        e.set_words(["time"], true);
        assert_eq!(e.words(), ["time".to_string()]);
    }

    #[test]
    fn test_request_cycles() {
        let e = engine(&["raise"]);
        let mut s = surface("for i in range(x):\n    ra");
        let mut state = None;

        let mut tab = |s: &mut TextSurface| e.request(s, &mut state, "    ");

        assert_eq!(tab(&mut s), CompletionOutcome::Cycled("range".into()));
        assert!(s.text().ends_with("    range"));
        assert_eq!(tab(&mut s), CompletionOutcome::Cycled("raise".into()));
        assert!(s.text().ends_with("    raise"));
        assert_eq!(tab(&mut s), CompletionOutcome::Cycled("ra".into()));
        assert_eq!(tab(&mut s), CompletionOutcome::Cycled("range".into()));
        assert_eq!(state.as_ref().map(CompletionState::prefix), Some("ra"));
    }

    #[test]
    fn test_single_candidate_keeps_no_state() {
        let mut e = engine(&[]);
        e.set_words(["os.path"], false);
        let mut s = surface("import os\nos.pa");
        let mut state = None;
        assert_eq!(
            e.request(&mut s, &mut state, "    "),
            CompletionOutcome::Completed("os.path".into())
        );
        assert_eq!(s.text(), "import os\nos.path");
        assert!(state.is_none());
    }

    #[test]
    fn test_no_candidates_is_silent() {
        let e = engine(&["while"]);
        let mut s = surface("x.wh");
        let mut state = None;
        assert_eq!(e.request(&mut s, &mut state, "    "), CompletionOutcome::NoCandidates);
        assert_eq!(s.text(), "x.wh");
    }

    #[test]
    fn test_no_candidates_after_indent_leaves_text() {
        let e = engine(&["while"]);
        let mut s = surface("    zq");
        let mut state = None;
        assert_eq!(e.request(&mut s, &mut state, "    "), CompletionOutcome::NoCandidates);
        assert_eq!(s.text(), "    zq");
        assert!(state.is_none());
    }

    #[test]
    fn test_empty_token_inserts_indent() {
        let e = engine(&[]);
        let mut s = surface("if x:\n");
        let mut state = None;
        assert_eq!(e.request(&mut s, &mut state, "    "), CompletionOutcome::InsertedIndent);
        assert_eq!(s.text(), "if x:\n    ");
    }

    #[test]
    fn test_selection_indents_instead() {
        let e = engine(&["print"]);
        let mut s = surface("a\nb\n");
        s.select(0..3);
        let mut state = None;
        assert_eq!(e.request(&mut s, &mut state, "    "), CompletionOutcome::IndentedLines(2));
        assert_eq!(s.text(), "    a\n    b\n");
    }

    #[test]
    fn test_stale_state_is_discarded() {
        let e = engine(&["print", "pass"]);
        let mut s = surface("p");
        let mut state = None;
        e.request(&mut s, &mut state, "    ");
        assert!(state.is_some());

        // Cursor moved away from the inserted candidate
        s.insert_char(' ');
        s.insert_str("pa");
        let outcome = e.request(&mut s, &mut state, "    ");
        assert_eq!(outcome, CompletionOutcome::Cycled("pass".into()));
        assert_eq!(state.unwrap().prefix(), "pa");
    }
}
