//! Keyword sources for completion and highlighting.

use serde::{Deserialize, Serialize};

/// Read-only capability exposing a language's keyword list.
///
/// Implemented by the highlighter that owns the keyword tables; the editor
/// only ever reads from it.
pub trait KeywordSource {
    /// All keywords, in a stable order.
    fn keywords(&self) -> Vec<&str>;
}

/// A fixed list of words, useful for hosts and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList(pub Vec<String>);

impl KeywordSource for WordList {
    fn keywords(&self) -> Vec<&str> {
        self.0.iter().map(String::as_str).collect()
    }
}

/// Languages the editor knows how to complete and indent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Indentation-significant; block openers end with `:`.
    #[default]
    Python,
    /// Pascal keywords, plain newline handling.
    Pascal,
    /// No keywords at all.
    Plain,
}

const PYTHON_KEYWORDS: &[&str] = &[
    "return", "nonlocal", "elif", "assert", "or", "yield", "finally", "from", "global", "del",
    "print", "None", "pass", "class", "as", "break", "while", "await", "async", "range", "is",
    "True", "lambda", "False", "in", "import", "except", "continue", "and", "raise", "with", "if",
    "try", "for", "else", "not", "def", "input", "int", "float", "str", "list", "dict", "open",
    "read", "write", "close", "split",
];

const PYTHON_SECONDARY: &[&str] = &["self"];

const PASCAL_KEYWORDS: &[&str] = &[
    "and", "array", "asm", "begin", "case", "const", "constructor", "destructor", "div", "do",
    "downto", "else", "end", "file", "for", "function", "goto", "if", "implementation", "in",
    "inherited", "inline", "interface", "label", "mod", "nil", "not", "object", "of", "or",
    "packed", "procedure", "program", "record", "repeat", "set", "shl", "shr", "string", "then",
    "to", "type", "unit", "until", "uses", "var", "while", "with", "xor",
];

const PASCAL_UPPER: &[&str] = &[
    "AND", "ARRAY", "ASM", "BEGIN", "CASE", "CONST", "CONSTRUCTOR", "DESTRUCTOR", "DIV", "DO",
    "DOWNTO", "ELSE", "END", "FILE", "FOR", "FUNCTION", "GOTO", "IF", "IMPLEMENTATION", "IN",
    "INHERITED", "INLINE", "INTERFACE", "LABEL", "MOD", "NIL", "NOT", "OBJECT", "OF", "OR",
    "PACKED", "PROCEDURE", "PROGRAM", "RECORD", "REPEAT", "SET", "SHL", "SHR", "STRING", "THEN",
    "TO", "TYPE", "UNIT", "UNTIL", "USES", "VAR", "WHILE", "WITH", "XOR",
];

impl Language {
    /// Primary keyword table.
    pub const fn primary_keywords(self) -> &'static [&'static str] {
        match self {
            Self::Python => PYTHON_KEYWORDS,
            Self::Pascal => PASCAL_KEYWORDS,
            Self::Plain => &[],
        }
    }

    /// Secondary keyword table (highlighted differently).
    pub const fn secondary_keywords(self) -> &'static [&'static str] {
        match self {
            Self::Python => PYTHON_SECONDARY,
            Self::Pascal | Self::Plain => &[],
        }
    }

    /// Upper-case spellings offered for completion.
    pub const fn upper_keywords(self) -> &'static [&'static str] {
        match self {
            Self::Pascal => PASCAL_UPPER,
            Self::Python | Self::Plain => &[],
        }
    }

    /// Whether keywords match regardless of case.
    pub const fn case_insensitive(self) -> bool {
        matches!(self, Self::Pascal)
    }

    /// Line comment marker, if the language has one.
    pub const fn line_comment(self) -> Option<&'static str> {
        match self {
            Self::Python => Some("#"),
            Self::Pascal => Some("//"),
            Self::Plain => None,
        }
    }

    /// Parse a language name as used in configuration files.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "python" | "py" => Some(Self::Python),
            "pascal" | "pas" => Some(Self::Pascal),
            "plain" | "text" | "txt" => Some(Self::Plain),
            _ => None,
        }
    }

    /// Guess the language from a file extension.
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_name)
    }
}

impl KeywordSource for Language {
    fn keywords(&self) -> Vec<&str> {
        let mut words: Vec<&str> = Vec::new();
        for &word in self.primary_keywords().iter().chain(self.secondary_keywords()) {
            if !words.contains(&word) {
                words.push(word);
            }
        }
        // Pascal sources use both spellings, so offer the upper-case ones too.
        words.extend(self.upper_keywords());
        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_keywords_deduplicated() {
        let words = Language::Python.keywords();
        assert_eq!(words.iter().filter(|w| **w == "print").count(), 1);
        assert!(words.contains(&"range"));
        assert!(words.contains(&"self"));
    }

    #[test]
    fn test_pascal_has_both_cases() {
        let words = Language::Pascal.keywords();
        assert!(words.contains(&"begin"));
        assert!(words.contains(&"BEGIN"));
        assert!(!words.contains(&""));
    }

    #[test]
    fn test_language_names() {
        assert_eq!(Language::from_name("Python"), Some(Language::Python));
        assert_eq!(Language::from_name("pas"), Some(Language::Pascal));
        assert_eq!(Language::from_name("cobol"), None);
        assert_eq!(
            Language::from_path(std::path::Path::new("lesson.py")),
            Some(Language::Python)
        );
    }
}
