//! Auto-indent on Return.
//!
//! Each language decides what a plain Return inserts. Returning `None`
//! means "insert a bare newline".

use super::keywords::Language;

/// Newline policy for one language.
pub trait IndentPolicy {
    /// Text to insert for Return, given the whole current line and the
    /// cursor's byte column within it. `None` defers to a bare newline.
    fn on_return(&self, line: &str, column: usize) -> Option<String>;
}

/// Number of leading spaces of `line`.
pub fn leading_spaces(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ').count()
}

/// Indentation-significant languages: blocks open with `:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PythonIndent {
    /// Width of one indent unit in spaces.
    pub width: usize,
}

impl Default for PythonIndent {
    fn default() -> Self {
        Self { width: 4 }
    }
}

impl IndentPolicy for PythonIndent {
    fn on_return(&self, line: &str, column: usize) -> Option<String> {
        let spaces = leading_spaces(line);

        if line.ends_with(':') {
            // Splitting a block header mid-line gets no special treatment
            return (column == line.len()).then(|| newline_with(spaces + self.width));
        }

        if line.starts_with(' ') {
            let indent = if line.trim().is_empty() {
                spaces.saturating_sub(self.width)
            } else {
                spaces
            };
            return Some(newline_with(indent));
        }

        None
    }
}

/// Languages without significant indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlainIndent;

impl IndentPolicy for PlainIndent {
    fn on_return(&self, _line: &str, _column: usize) -> Option<String> {
        None
    }
}

fn newline_with(spaces: usize) -> String {
    let mut s = String::with_capacity(spaces + 1);
    s.push('\n');
    s.extend(std::iter::repeat(' ').take(spaces));
    s
}

/// The newline policy for `language` with the given indent width.
pub fn policy_for(language: Language, width: usize) -> Box<dyn IndentPolicy + Send + Sync> {
    match language {
        Language::Python => Box::new(PythonIndent { width }),
        Language::Pascal | Language::Plain => Box::new(PlainIndent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_header_at_end() {
        let p = PythonIndent::default();
        assert_eq!(p.on_return("if x:", 5), Some("\n    ".to_string()));
        assert_eq!(p.on_return("    for i in y:", 15), Some("\n        ".to_string()));
    }

    #[test]
    fn test_block_header_mid_line() {
        let p = PythonIndent::default();
        assert_eq!(p.on_return("if x:", 2), None);
    }

    #[test]
    fn test_continuation_and_dedent() {
        let p = PythonIndent::default();
        assert_eq!(p.on_return("    x = 1", 9), Some("\n    ".to_string()));
        assert_eq!(p.on_return("        ", 8), Some("\n    ".to_string()));
        assert_eq!(p.on_return("  ", 2), Some("\n".to_string()));
    }

    #[test]
    fn test_unindented_line_defers() {
        let p = PythonIndent::default();
        assert_eq!(p.on_return("x = 1", 5), None);
        assert_eq!(PlainIndent.on_return("begin", 5), None);
    }

    #[test]
    fn test_leading_spaces() {
        assert_eq!(leading_spaces("   a "), 3);
        assert_eq!(leading_spaces(""), 0);
    }
}
