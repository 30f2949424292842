//! Configuration loaded from `spice.toml`.
//!
//! Every field has a default, so an empty or partial file is valid.

use crate::editor::Language;
use crate::error::{Result, SpiceError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "spice.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SpiceConfig {
    /// Editor behaviour.
    #[serde(default)]
    pub editor: EditorConfig,
    /// Terminal presentation.
    #[serde(default)]
    pub ui: UiConfig,
    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Editor behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EditorConfig {
    /// Language used for keywords and auto-indent.
    #[serde(default)]
    pub language: Language,
    /// Base delay between paced reveal steps, in milliseconds.
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,
    /// Spaces per indent unit.
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
    /// Extra words offered by Tab completion.
    #[serde(default)]
    pub autocomplete_words: Vec<String>,
    /// How long per-key progress messages stay visible, in milliseconds.
    #[serde(default = "default_progress_timeout_ms")]
    pub progress_timeout_ms: u64,
}

/// Terminal presentation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiConfig {
    /// Dark palette.
    #[serde(default = "default_true")]
    pub dark: bool,
    /// Show the line-number gutter.
    #[serde(default = "default_true")]
    pub line_numbers: bool,
    /// Show the status bar.
    #[serde(default = "default_true")]
    pub status_bar: bool,
    /// Reveal the whole program as soon as it is loaded.
    #[serde(default)]
    pub show_all_on_load: bool,
}

/// Log output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log file (the terminal belongs to the editor).
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

const fn default_reveal_delay_ms() -> u64 {
    10
}

const fn default_indent_width() -> usize {
    4
}

const fn default_progress_timeout_ms() -> u64 {
    1000
}

const fn default_true() -> bool {
    true
}

fn default_log_file() -> PathBuf {
    PathBuf::from("spice.log")
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            reveal_delay_ms: default_reveal_delay_ms(),
            indent_width: default_indent_width(),
            autocomplete_words: Vec::new(),
            progress_timeout_ms: default_progress_timeout_ms(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dark: true,
            line_numbers: true,
            status_bar: true,
            show_all_on_load: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            filter: default_log_filter(),
        }
    }
}

impl SpiceConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        // An indent unit of zero width would make Tab a no-op
        if config.editor.indent_width == 0 {
            config.editor.indent_width = default_indent_width();
        }
        Ok(config)
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `spice.toml` in the
    /// working directory is used when present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !path.exists() {
            if required {
                return Err(SpiceError::ConfigNotFound(path));
            }
            debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty() {
        let config = SpiceConfig::from_toml_str("").unwrap();
        assert_eq!(config, SpiceConfig::default());
        assert_eq!(config.editor.reveal_delay_ms, 10);
        assert_eq!(config.editor.indent_width, 4);
        assert!(config.ui.dark);
        assert!(!config.ui.show_all_on_load);
    }

    #[test]
    fn test_show_all_on_load() {
        let config = SpiceConfig::from_toml_str("[ui]\nshow_all_on_load = true\n").unwrap();
        assert!(config.ui.show_all_on_load);
        assert!(config.ui.line_numbers);
    }

    #[test]
    fn test_partial_file() {
        let config = SpiceConfig::from_toml_str(
            r#"
            [editor]
            language = "pascal"
            autocomplete_words = ["writeln", "readln"]

            [logging]
            filter = "spice=debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.editor.language, Language::Pascal);
        assert_eq!(config.editor.autocomplete_words, vec!["writeln", "readln"]);
        assert_eq!(config.editor.progress_timeout_ms, 1000);
        assert_eq!(config.logging.filter, "spice=debug");
        assert_eq!(config.logging.file, PathBuf::from("spice.log"));
    }

    #[test]
    fn test_zero_indent_width_falls_back() {
        let config = SpiceConfig::from_toml_str("[editor]\nindent_width = 0\n").unwrap();
        assert_eq!(config.editor.indent_width, 4);
    }

    #[test]
    fn test_invalid_toml() {
        let err = SpiceConfig::from_toml_str("[editor]\nlanguage = \"cobol\"\n").unwrap_err();
        assert!(matches!(err, SpiceError::ConfigParse(_)));
    }

    #[test]
    fn test_missing_explicit_path() {
        let err = SpiceConfig::load(Some(Path::new("/nonexistent/spice.toml"))).unwrap_err();
        assert!(matches!(err, SpiceError::ConfigNotFound(_)));
    }
}
