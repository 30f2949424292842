//! Scripted Document: the prepared program the editor reveals.

/// Outcome of revealing one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    /// A character was revealed and more text remains.
    Pending,
    /// A newline was revealed and the following line has content.
    ///
    /// Playback pauses here so the lecturer can talk about the line.
    LineBreak,
    /// Nothing remains to reveal.
    Done,
}

impl RevealStep {
    /// Check whether text remains after this step.
    pub const fn more_remaining(self) -> bool {
        !matches!(self, Self::Done)
    }
}

/// The full target text plus how much of it is visible.
///
/// The revealed count is a byte offset that always sits on a char
/// boundary and never exceeds the text length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedDocument {
    /// Full text, normalized to end with a newline.
    full_text: String,
    /// Number of bytes already revealed.
    revealed: usize,
}

impl ScriptedDocument {
    /// Create a document, appending a trailing newline when missing.
    ///
    /// Returns `None` for an empty program.
    pub fn new(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        let mut full_text = text.to_string();
        if !full_text.ends_with('\n') {
            full_text.push('\n');
        }
        Some(Self {
            full_text,
            revealed: 0,
        })
    }

    /// The whole prepared text.
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// The already revealed prefix.
    pub fn revealed_text(&self) -> &str {
        &self.full_text[..self.revealed]
    }

    /// Revealed length in bytes.
    pub const fn revealed_len(&self) -> usize {
        self.revealed
    }

    /// Characters still hidden.
    pub fn remaining(&self) -> usize {
        self.full_text[self.revealed..].chars().count()
    }

    /// Check whether everything has been revealed.
    pub fn is_exhausted(&self) -> bool {
        self.revealed >= self.full_text.len()
    }

    /// Reveal the next character.
    ///
    /// Returns the character (so the caller can mirror it into the visible
    /// buffer) and the resulting step. Once exhausted this is a no-op that
    /// returns `(None, Done)`.
    pub fn advance(&mut self) -> (Option<char>, RevealStep) {
        let Some(c) = self.full_text[self.revealed..].chars().next() else {
            return (None, RevealStep::Done);
        };
        self.revealed += c.len_utf8();

        let step = if self.is_exhausted() {
            RevealStep::Done
        } else if c == '\n' && !self.upcoming_line().trim().is_empty() {
            RevealStep::LineBreak
        } else {
            RevealStep::Pending
        };
        (Some(c), step)
    }

    /// Reveal everything at once.
    pub fn reveal_all(&mut self) {
        self.revealed = self.full_text.len();
    }

    /// Rest of the line being typed: hidden text up to and including the
    /// next newline.
    pub fn rest_of_line(&self) -> &str {
        let rest = &self.full_text[self.revealed..];
        rest.find('\n').map_or(rest, |i| &rest[..=i])
    }

    /// The next non-blank line after the one being typed, if any.
    pub fn next_line(&self) -> Option<&str> {
        self.full_text[self.revealed..]
            .split('\n')
            .skip(1)
            .find(|line| !line.trim().is_empty())
    }

    /// Hidden line starting at the revealed position (without newline).
    fn upcoming_line(&self) -> &str {
        let rest = &self.full_text[self.revealed..];
        rest.find('\n').map_or(rest, |i| &rest[..i])
    }
}
