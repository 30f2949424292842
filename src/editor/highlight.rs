//! Highlighter: owns the keyword tables and classifies source lines.
//!
//! Classification is line-local: keywords on word boundaries, quoted
//! strings, and comments running to the end of the line (plus `{ … }`
//! comments in Pascal when they close on the same line).

use super::keywords::{KeywordSource, Language};
use std::ops::Range;

/// Kind of a highlighted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Ordinary text.
    Plain,
    /// Primary language keyword.
    Keyword,
    /// Secondary keyword (e.g. `self`).
    SecondaryKeyword,
    /// String literal.
    String,
    /// Comment.
    Comment,
}

/// A classified byte range of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte range within the line.
    pub range: Range<usize>,
    /// What the range contains.
    pub kind: TokenKind,
}

/// Keyword owner and line classifier for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Highlighter {
    language: Language,
    dark: bool,
}

impl Highlighter {
    /// Create a highlighter for `language`.
    pub const fn new(language: Language) -> Self {
        Self {
            language,
            dark: false,
        }
    }

    /// The highlighted language.
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Switch between light and dark palettes.
    pub const fn set_dark_mode(&mut self, dark: bool) {
        self.dark = dark;
    }

    /// Whether the dark palette is active.
    pub const fn is_dark(&self) -> bool {
        self.dark
    }

    /// Split `line` into consecutive spans covering all of it.
    pub fn spans(&self, line: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut plain_start = 0;
        let mut i = 0;
        let bytes = line.as_bytes();

        while i < line.len() {
            let rest = &line[i..];
            let special = if self.starts_comment(rest) {
                Some((line.len(), TokenKind::Comment))
            } else if self.language == Language::Pascal && rest.starts_with('{') {
                let end = rest.find('}').map_or(line.len(), |j| i + j + 1);
                Some((end, TokenKind::Comment))
            } else if bytes[i] == b'"' || bytes[i] == b'\'' {
                let quote = bytes[i] as char;
                let end = rest[1..].find(quote).map_or(line.len(), |j| i + j + 2);
                Some((end, TokenKind::String))
            } else if is_word_char(rest.chars().next().unwrap_or(' ')) {
                let len = rest
                    .char_indices()
                    .find(|&(_, c)| !is_word_char(c))
                    .map_or(rest.len(), |(j, _)| j);
                let kind = self.classify_word(&rest[..len]);
                if kind == TokenKind::Plain {
                    i += len;
                    continue;
                }
                Some((i + len, kind))
            } else {
                None
            };

            match special {
                Some((end, kind)) => {
                    if plain_start < i {
                        spans.push(Span {
                            range: plain_start..i,
                            kind: TokenKind::Plain,
                        });
                    }
                    spans.push(Span {
                        range: i..end,
                        kind,
                    });
                    i = end;
                    plain_start = end;
                }
                None => {
                    i += rest.chars().next().map_or(1, char::len_utf8);
                }
            }
        }

        if plain_start < line.len() {
            spans.push(Span {
                range: plain_start..line.len(),
                kind: TokenKind::Plain,
            });
        }
        spans
    }

    fn starts_comment(&self, rest: &str) -> bool {
        self.language
            .line_comment()
            .is_some_and(|marker| rest.starts_with(marker))
    }

    fn classify_word(&self, word: &str) -> TokenKind {
        let matches = |table: &[&str]| {
            if self.language.case_insensitive() {
                table.iter().any(|k| k.eq_ignore_ascii_case(word))
            } else {
                table.contains(&word)
            }
        };
        if matches(self.language.primary_keywords()) {
            TokenKind::Keyword
        } else if matches(self.language.secondary_keywords()) {
            TokenKind::SecondaryKeyword
        } else {
            TokenKind::Plain
        }
    }
}

impl KeywordSource for Highlighter {
    fn keywords(&self) -> Vec<&str> {
        self.language.keywords()
    }
}

/// Word characters for both highlighting and completion.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(h: &Highlighter, line: &str) -> Vec<(String, TokenKind)> {
        h.spans(line)
            .into_iter()
            .map(|s| (line[s.range].to_string(), s.kind))
            .collect()
    }

    #[test]
    fn test_python_line() {
        let h = Highlighter::new(Language::Python);
        let spans = kinds(&h, "for x in data: # loop");
        assert_eq!(
            spans,
            vec![
                ("for".to_string(), TokenKind::Keyword),
                (" x ".to_string(), TokenKind::Plain),
                ("in".to_string(), TokenKind::Keyword),
                (" data: ".to_string(), TokenKind::Plain),
                ("# loop".to_string(), TokenKind::Comment),
            ]
        );
    }

    #[test]
    fn test_strings_hide_comment_markers() {
        let h = Highlighter::new(Language::Python);
        let spans = kinds(&h, "s = \"#not\" + self.x");
        assert_eq!(spans[1], ("\"#not\"".to_string(), TokenKind::String));
        assert!(spans.contains(&("self".to_string(), TokenKind::SecondaryKeyword)));
    }

    #[test]
    fn test_keywords_need_word_boundaries() {
        let h = Highlighter::new(Language::Python);
        let spans = kinds(&h, "format");
        assert_eq!(spans, vec![("format".to_string(), TokenKind::Plain)]);
    }

    #[test]
    fn test_pascal_case_insensitive() {
        let h = Highlighter::new(Language::Pascal);
        let spans = kinds(&h, "Begin { hi } end");
        assert_eq!(spans[0], ("Begin".to_string(), TokenKind::Keyword));
        assert_eq!(spans[2], ("{ hi }".to_string(), TokenKind::Comment));
        assert_eq!(spans[4], ("end".to_string(), TokenKind::Keyword));
    }

    #[test]
    fn test_spans_cover_line() {
        let h = Highlighter::new(Language::Python);
        let line = "x = 'unterminated";
        let spans = h.spans(line);
        assert_eq!(spans.first().unwrap().range.start, 0);
        assert_eq!(spans.last().unwrap().range.end, line.len());
    }
}
