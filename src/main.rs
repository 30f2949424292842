//! `spice`: scripted playback editor for the terminal.
//!
//! ```text
//! spice [--config PATH] FILE
//! ```
//!
//! Loads FILE as a program in `Locked` mode. Ctrl+Q quits, Ctrl+O
//! reloads FILE from disk and Ctrl+S writes the visible text back to it.
//! F5 requests a run where the terminal cannot report Ctrl+Return.
//! Logs go to the file named in the configuration since the terminal
//! belongs to the editor.

use crossbeam_channel::{after, bounded, never, select, Receiver};
use spice::actor::{InputActor, InputEvent, KeyCode, RevealPacer};
use spice::config::{LoggingConfig, SpiceConfig};
use spice::editor::{EditorEvent, Language, MagicEditor};
use spice::layout::ScreenLayout;
use spice::terminal::{OutputBuffer, SessionConfig, TerminalSession};
use spice::widget::{EditorViewConfig, EditorWidget, Palette, StatusBar, Widget, NOTICE_TIMEOUT};
use spice::{Result, SpiceError};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "spice [--config PATH] FILE";

/// How often the input thread checks for shutdown.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Parsed command line.
#[derive(Debug, PartialEq, Eq)]
struct Args {
    /// Explicit configuration file.
    config: Option<PathBuf>,
    /// Program to play back.
    file: PathBuf,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut config = None;
    let mut file = None;
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| SpiceError::Usage(format!("--config needs a path\n  {USAGE}")))?;
                config = Some(PathBuf::from(path));
            }
            "-h" | "--help" => return Err(SpiceError::Usage(USAGE.to_string())),
            opt if opt.starts_with('-') => {
                return Err(SpiceError::Usage(format!("unknown option {opt}\n  {USAGE}")));
            }
            _ if file.is_none() => file = Some(PathBuf::from(arg)),
            _ => return Err(SpiceError::Usage(format!("unexpected argument {arg}\n  {USAGE}"))),
        }
    }

    let file = file.ok_or_else(|| SpiceError::Usage(USAGE.to_string()))?;
    Ok(Args { config, file })
}

fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Load `source` into `editor`, revealing it at once when `show_all` is set.
fn prepare_program(editor: &mut MagicEditor, source: &str, show_all: bool) {
    editor.load_program(source);
    if show_all {
        editor.reveal_all(false);
    }
}

/// Write the visible text back to the program file.
fn save_program(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text)?;
    info!(file = %path.display(), bytes = text.len(), "Saved program");
    Ok(())
}

/// Everything the main loop owns.
struct App {
    /// Program file, for reloads.
    file: PathBuf,
    /// Whether the status row is shown.
    status_bar: bool,
    /// Reveal programs fully when they are (re)loaded.
    show_all_on_load: bool,
    /// Editor view.
    editor: EditorWidget,
    /// Status row.
    status: StatusBar,
    /// Paced reveal deadline.
    pacer: RevealPacer,
    /// Terminal ownership and size.
    session: TerminalSession,
    /// Frame buffer.
    out: OutputBuffer,
    /// Cleared to leave the loop.
    running: bool,
}

impl App {
    fn new(
        file: PathBuf,
        config: &SpiceConfig,
        editor: MagicEditor,
        session: TerminalSession,
    ) -> Self {
        let layout = ScreenLayout::compute(session.width(), session.height(), config.ui.status_bar);
        let view = EditorViewConfig {
            line_numbers: config.ui.line_numbers,
            dark: config.ui.dark,
        };
        Self {
            file,
            status_bar: config.ui.status_bar,
            show_all_on_load: config.ui.show_all_on_load,
            editor: EditorWidget::new(editor, layout.editor, &view),
            status: StatusBar::new(layout.status, Palette::for_mode(config.ui.dark)),
            pacer: RevealPacer::new(),
            session,
            out: OutputBuffer::new(),
            running: true,
        }
    }

    fn run(&mut self, input_rx: &Receiver<InputEvent>) -> Result<()> {
        self.redraw(true)?;

        while self.running {
            let tick = self.pacer.receiver().clone();
            let expiry = self
                .status
                .time_until_expiry(Instant::now())
                .map_or_else(never, after);

            select! {
                recv(input_rx) -> event => match event {
                    Ok(event) => self.on_input(event),
                    Err(_) => {
                        warn!("Input channel closed");
                        self.running = false;
                    }
                },
                recv(tick) -> _ => {
                    self.pacer.fired();
                    if let Some(delay) = self.editor.on_reveal_tick() {
                        self.pacer.schedule(delay);
                    }
                },
                recv(expiry) -> _ => {
                    self.status.expire(Instant::now());
                },
            }

            self.drain_editor_events();
            self.redraw(false)?;
        }
        Ok(())
    }

    fn on_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key {
                code: KeyCode::Char('q'),
                modifiers,
            } if modifiers.control() => {
                info!("Quit requested");
                self.running = false;
            }
            InputEvent::Key {
                code: KeyCode::Char('o'),
                modifiers,
            } if modifiers.control() => self.reload(),
            InputEvent::Key {
                code: KeyCode::Char('s'),
                modifiers,
            } if modifiers.control() => self.save(),
            InputEvent::Resize { width, height } => self.resize(width, height),
            InputEvent::Error(message) => error!(%message, "Input error"),
            InputEvent::Shutdown => self.running = false,
            event => {
                if self.editor.handle_input(&event) {
                    if let Some(delay) = self.editor.take_scheduled_reveal() {
                        self.pacer.schedule(delay);
                    } else if !self.editor.editor().is_playing() {
                        self.pacer.cancel();
                    }
                }
            }
        }
    }

    fn reload(&mut self) {
        self.pacer.cancel();
        match std::fs::read_to_string(&self.file) {
            Ok(source) => {
                self.editor.load_program(&source);
                if self.show_all_on_load {
                    self.editor.editor_mut().reveal_all(false);
                }
                info!(file = %self.file.display(), "Reloaded program");
                self.status.show_message("Reloaded", NOTICE_TIMEOUT, Instant::now());
            }
            Err(e) => {
                warn!(file = %self.file.display(), error = %e, "Reload failed");
                self.status
                    .show_message(format!("Reload failed: {e}"), NOTICE_TIMEOUT, Instant::now());
            }
        }
    }

    fn save(&mut self) {
        let now = Instant::now();
        match save_program(&self.file, self.editor.editor().visible_text()) {
            Ok(()) => {
                let notice = format!("Saved in {}", self.file.display());
                self.status.show_message(notice, NOTICE_TIMEOUT, now);
            }
            Err(e) => {
                warn!(file = %self.file.display(), error = %e, "Save failed");
                self.status.show_message(format!("Save failed: {e}"), NOTICE_TIMEOUT, now);
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "Resize");
        self.session.resize(width, height);
        let layout = ScreenLayout::compute(width, height, self.status_bar);
        self.editor.set_bounds(layout.editor);
        self.status.set_bounds(layout.status);
        self.out.clear_screen();
    }

    fn drain_editor_events(&mut self) {
        let now = Instant::now();
        while let Ok(event) = self.editor.editor().events().try_recv() {
            if event == EditorEvent::ExecuteRequested {
                info!("Execution requested");
            }
            self.status.apply_event(&event, now);
        }
    }

    fn redraw(&mut self, force: bool) -> Result<()> {
        let editor = self.editor.editor();
        self.status.set_mode(editor.mode());
        self.status.set_remaining(editor.remaining_count());

        if !force && !self.editor.needs_redraw() && !self.status.needs_redraw() {
            return Ok(());
        }

        if force {
            self.out.clear_screen();
        }
        self.out.cursor_hide();
        self.editor.render(&mut self.out);
        if self.status_bar {
            self.status.render(&mut self.out);
        }
        self.editor.render_cursor(&mut self.out);

        self.out.flush_to(&mut io::stdout().lock())?;
        self.out.clear();
        self.editor.clear_redraw();
        self.status.clear_redraw();
        Ok(())
    }
}

fn run() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let config = SpiceConfig::load(args.config.as_deref())?;
    init_logging(&config.logging)?;

    let source = std::fs::read_to_string(&args.file)?;
    let mut editor_config = config.editor.clone();
    if let Some(language) = Language::from_path(&args.file) {
        editor_config.language = language;
    }
    let mut editor = MagicEditor::with_config(&editor_config);
    prepare_program(&mut editor, &source, config.ui.show_all_on_load);
    info!(
        file = %args.file.display(),
        language = ?editor_config.language,
        "Starting"
    );

    let session = TerminalSession::start(SessionConfig::default())?;
    let (input_tx, input_rx) = bounded(64);
    let input = InputActor::spawn(input_tx, INPUT_POLL)?;

    let mut app = App::new(args.file, &config, editor, session);
    let result = app.run(&input_rx);

    input.join();
    drop(app);
    result
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("spice: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spice::editor::Mode;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| (*s).to_string()))
    }

    #[test]
    fn test_parse_file_only() {
        let parsed = args(&["lesson.py"]).unwrap();
        assert_eq!(parsed.file, PathBuf::from("lesson.py"));
        assert_eq!(parsed.config, None);
    }

    #[test]
    fn test_parse_config() {
        let parsed = args(&["--config", "my.toml", "lesson.py"]).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("my.toml")));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(args(&[]), Err(SpiceError::Usage(_))));
        assert!(matches!(args(&["--config"]), Err(SpiceError::Usage(_))));
        assert!(matches!(args(&["-x", "a.py"]), Err(SpiceError::Usage(_))));
        assert!(matches!(args(&["a.py", "b.py"]), Err(SpiceError::Usage(_))));
    }

    #[test]
    fn test_prepare_program_show_all() {
        let mut editor = MagicEditor::default();
        prepare_program(&mut editor, "x = 1\n", false);
        assert_eq!(editor.mode(), Mode::Locked);
        assert_eq!(editor.visible_text(), "");

        prepare_program(&mut editor, "x = 1\n", true);
        assert_eq!(editor.mode(), Mode::Free);
        assert_eq!(editor.visible_text(), "x = 1\n");
        assert_eq!(editor.remaining_count(), 0);
    }

    #[test]
    fn test_save_program_writes_visible_text() {
        let path = std::env::temp_dir().join(format!("spice-save-{}.py", std::process::id()));
        let mut editor = MagicEditor::default();
        prepare_program(&mut editor, "print(1)\nprint(2)\n", false);
        editor.reveal_line();

        save_program(&path, editor.visible_text()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "print(1)\n");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_program_reports_errors() {
        let err = save_program(Path::new("/nonexistent/dir/lesson.py"), "x").unwrap_err();
        assert!(matches!(err, SpiceError::Io(_)));
    }
}
